use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hiscore_tetris::core::{is_valid_move, GameSession, Grid, PieceFactory, Shape, TickOutcome};
use hiscore_tetris::term::{GameView, ScoreBoardView, Viewport};
use hiscore_tetris::types::PieceKind;

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    session.start();

    c.bench_function("session_tick", |b| {
        b.iter(|| {
            if let TickOutcome::GameOver(_) = session.tick() {
                session.start();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new(10, 20);
            for y in 16..20 {
                for x in 0..10 {
                    grid.set_cell(x, y, Some(0));
                }
            }
            black_box(grid.clear_full_rows());
        })
    });
}

fn bench_create_piece(c: &mut Criterion) {
    let mut factory = PieceFactory::new(12345, 10);

    c.bench_function("create_piece", |b| {
        b.iter(|| black_box(factory.create_piece()))
    });
}

fn bench_collision(c: &mut Criterion) {
    let mut grid = Grid::new(10, 20);
    for x in 0..9 {
        grid.set_cell(x, 19, Some(2));
    }
    let shape = Shape::template(PieceKind::T);

    c.bench_function("is_valid_move", |b| {
        b.iter(|| is_valid_move(black_box(&shape), black_box(4), black_box(17), &grid))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    session.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            session.rotate();
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    session.start();
    let snap = session.snapshot();
    let view = GameView::default();
    let scores = ScoreBoardView::default();
    let mut fb = view.render(&snap, &scores, Viewport::new(80, 24));

    c.bench_function("render_frame", |b| {
        b.iter(|| view.render_into(black_box(&snap), &scores, Viewport::new(80, 24), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_create_piece,
    bench_collision,
    bench_rotate,
    bench_render
);
criterion_main!(benches);
