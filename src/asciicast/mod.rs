//! asciicast v2 format model.
//!
//! Reference: https://docs.asciinema.org/manual/asciicast/v2/
//!
//! A recording is a newline-delimited text stream: the first line is a JSON
//! header object, every following line a 3-element JSON array
//! `[time, type, data]`. This module holds the decoded shapes, their
//! validation, and the canonical single-line encodings used for round-trips.

mod source;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use source::{FrameSource, SourceError, StreamFrameSource};

/// Format version this crate plays back.
pub const FORMAT_VERSION: u8 = 2;

/// asciicast v2 header (first line of a recording).
///
/// `version`, `width` and `height` are required; the remaining metadata is
/// optional and only carried for fidelity. The scheduler reads nothing from
/// it except `idle_time_limit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub version: u8,
    pub width: u16,
    pub height: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_time_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvInfo>,
}

impl Header {
    /// Canonical single-line JSON encoding (no trailing newline).
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

/// Environment captured at recording time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvInfo {
    #[serde(rename = "SHELL", skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    #[serde(rename = "TERM", skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

/// Frame direction codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    /// Data fed to stdin of the recorded program ("i").
    Input,
    /// Data the recorded program wrote to its terminal ("o").
    Output,
}

impl FrameType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "i" => Some(FrameType::Input),
            "o" => Some(FrameType::Output),
            _ => None,
        }
    }

    pub fn to_code(&self) -> &'static str {
        match self {
            FrameType::Input => "i",
            FrameType::Output => "o",
        }
    }
}

/// One timestamped event of a recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Seconds since recording start.
    pub time: f64,
    pub kind: FrameType,
    /// Raw payload, control sequences already unescaped by the JSON layer.
    pub data: String,
}

impl Frame {
    /// Parse a frame from a single recording line.
    ///
    /// The record must be a JSON array of exactly three elements: a numeric
    /// timestamp, an `"i"`/`"o"` direction tag and a string payload. Anything
    /// else fails with an error naming the offending field.
    pub fn parse(line: &str) -> Result<Self, FrameParseError> {
        let value: serde_json::Value = serde_json::from_str(line)?;

        let arr = value.as_array().ok_or(FrameParseError::NotAnArray)?;
        if arr.len() != 3 {
            return Err(FrameParseError::Arity(arr.len()));
        }

        let time = arr[0].as_f64().ok_or(FrameParseError::BadTime)?;

        let code = arr[1].as_str().ok_or(FrameParseError::BadType)?;
        let kind = FrameType::from_code(code)
            .ok_or_else(|| FrameParseError::UnknownType(code.to_string()))?;

        let data = arr[2].as_str().ok_or(FrameParseError::BadData)?.to_string();

        Ok(Frame { time, kind, data })
    }

    /// Canonical single-line JSON encoding (no trailing newline).
    pub fn to_json(&self) -> String {
        serde_json::to_string(&serde_json::json!([
            self.time,
            self.kind.to_code(),
            self.data
        ]))
        .unwrap()
    }
}

/// A frame record that failed validation.
#[derive(Debug, Error)]
pub enum FrameParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array")]
    NotAnArray,

    #[error("expected a 3-element array, got {0} elements")]
    Arity(usize),

    #[error("time: expected a number")]
    BadTime,

    #[error("type: expected a string")]
    BadType,

    #[error("type: unknown frame type {0:?}")]
    UnknownType(String),

    #[error("data: expected a string")]
    BadData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_output_frame() {
        let frame = Frame::parse(r#"[0.5,"o","hello"]"#).unwrap();
        assert_eq!(frame.time, 0.5);
        assert_eq!(frame.kind, FrameType::Output);
        assert_eq!(frame.data, "hello");
    }

    #[test]
    fn parse_input_frame() {
        let frame = Frame::parse(r#"[1.25,"i","ls\r"]"#).unwrap();
        assert_eq!(frame.kind, FrameType::Input);
        assert_eq!(frame.data, "ls\r");
    }

    #[test]
    fn parse_unescapes_control_sequences() {
        let frame = Frame::parse(r#"[0.1,"o","\u001b[31mred\u001b[0m\r\n"]"#).unwrap();
        assert_eq!(frame.data, "\x1b[31mred\x1b[0m\r\n");
    }

    #[test]
    fn parse_rejects_wrong_arity() {
        assert!(matches!(
            Frame::parse(r#"[0.5,"o"]"#),
            Err(FrameParseError::Arity(2))
        ));
        assert!(matches!(
            Frame::parse(r#"[0.5,"o","x","y"]"#),
            Err(FrameParseError::Arity(4))
        ));
    }

    #[test]
    fn parse_rejects_non_array() {
        assert!(matches!(
            Frame::parse(r#"{"time":0.5}"#),
            Err(FrameParseError::NotAnArray)
        ));
    }

    #[test]
    fn parse_rejects_bad_time() {
        assert!(matches!(
            Frame::parse(r#"["0.5","o","x"]"#),
            Err(FrameParseError::BadTime)
        ));
    }

    #[test]
    fn parse_rejects_bad_type_field() {
        assert!(matches!(
            Frame::parse(r#"[0.5,7,"x"]"#),
            Err(FrameParseError::BadType)
        ));
        assert!(matches!(
            Frame::parse(r#"[0.5,"m","x"]"#),
            Err(FrameParseError::UnknownType(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_data() {
        assert!(matches!(
            Frame::parse(r#"[0.5,"o",42]"#),
            Err(FrameParseError::BadData)
        ));
    }

    #[test]
    fn parse_rejects_truncated_record() {
        assert!(matches!(
            Frame::parse(r#"[0.5,"o""#),
            Err(FrameParseError::Json(_))
        ));
    }

    #[test]
    fn frame_type_codes() {
        assert_eq!(FrameType::from_code("i"), Some(FrameType::Input));
        assert_eq!(FrameType::from_code("o"), Some(FrameType::Output));
        assert_eq!(FrameType::from_code("m"), None);
        assert_eq!(FrameType::Input.to_code(), "i");
        assert_eq!(FrameType::Output.to_code(), "o");
    }

    #[test]
    fn frame_encoding_is_canonical() {
        let frame = Frame {
            time: 0.5,
            kind: FrameType::Output,
            data: "hi\r\n".to_string(),
        };
        assert_eq!(frame.to_json(), r#"[0.5,"o","hi\r\n"]"#);
    }

    #[test]
    fn header_encoding_skips_absent_metadata() {
        let header = Header {
            version: 2,
            width: 80,
            height: 24,
            timestamp: None,
            idle_time_limit: None,
            command: None,
            title: None,
            env: None,
        };
        assert_eq!(header.to_json(), r#"{"version":2,"width":80,"height":24}"#);
    }

    #[test]
    fn header_roundtrip_with_metadata() {
        let line = r#"{"version":2,"width":120,"height":40,"timestamp":1700000000,"idle_time_limit":1.5,"title":"demo","env":{"SHELL":"/bin/zsh","TERM":"xterm-256color"}}"#;
        let header: Header = serde_json::from_str(line).unwrap();
        assert_eq!(header.width, 120);
        assert_eq!(header.idle_time_limit, Some(1.5));
        assert_eq!(header.to_json(), line);
    }
}
