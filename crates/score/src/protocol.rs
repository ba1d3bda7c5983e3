//! Protocol module - JSON messages for the high-score store
//!
//! One JSON object per line in both directions. Every message carries a
//! `type` tag:
//!
//! ```text
//! -> {"type":"getHighScore"}
//! <- {"type":"highScore","value":1200}
//! -> {"type":"setHighScore","value":1500}
//! <- {"type":"ok"}
//! -> {"type":"bogus"}
//! <- {"type":"error","message":"invalid request: ..."}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ScoreStoreError;

/// Client -> store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScoreRequest {
    /// Read-only query.
    GetHighScore,
    /// Replace the stored value.
    SetHighScore { value: u64 },
}

/// Store -> client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScoreResponse {
    HighScore { value: u64 },
    Ok,
    Error { message: String },
}

pub fn parse_request(line: &str) -> Result<ScoreRequest, ScoreStoreError> {
    Ok(serde_json::from_str(line.trim())?)
}

pub fn parse_response(line: &str) -> Result<ScoreResponse, ScoreStoreError> {
    Ok(serde_json::from_str(line.trim())?)
}

/// Serialize a message followed by `\n`.
pub fn encode_line<T: Serialize>(msg: &T) -> Result<String, ScoreStoreError> {
    let mut line = serde_json::to_string(msg)?;
    line.push('\n');
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_use_camel_case_type_tags() {
        let get = serde_json::to_value(ScoreRequest::GetHighScore).unwrap();
        assert_eq!(get, serde_json::json!({"type": "getHighScore"}));

        let set = serde_json::to_value(ScoreRequest::SetHighScore { value: 150 }).unwrap();
        assert_eq!(set, serde_json::json!({"type": "setHighScore", "value": 150}));
    }

    #[test]
    fn responses_use_camel_case_type_tags() {
        let v = serde_json::to_value(ScoreResponse::HighScore { value: 7 }).unwrap();
        assert_eq!(v, serde_json::json!({"type": "highScore", "value": 7}));
        let v = serde_json::to_value(ScoreResponse::Ok).unwrap();
        assert_eq!(v, serde_json::json!({"type": "ok"}));
    }

    #[test]
    fn parse_request_accepts_whitespace() {
        let req = parse_request("  {\"type\":\"setHighScore\",\"value\":9}\r\n").unwrap();
        assert_eq!(req, ScoreRequest::SetHighScore { value: 9 });
    }

    #[test]
    fn parse_request_rejects_unknown_and_negative() {
        assert!(matches!(
            parse_request("{\"type\":\"dropTables\"}"),
            Err(ScoreStoreError::Protocol(_))
        ));
        assert!(parse_request("{\"type\":\"setHighScore\",\"value\":-1}").is_err());
        assert!(parse_request("not json").is_err());
    }

    #[test]
    fn encode_line_is_newline_terminated() {
        let line = encode_line(&ScoreRequest::GetHighScore).unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
    }
}
