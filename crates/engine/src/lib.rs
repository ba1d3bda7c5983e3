//! Engine module - drives a game session on a clock
//!
//! Sits between the pure rules in `hiscore-tetris-core` and the outside
//! world: it schedules ticks, routes player actions and keeps the high score
//! in sync with the score store without blocking play.

pub mod controller;
pub mod schedule;

pub use controller::{Controller, GameOverSummary};
pub use schedule::TickSchedule;
