//! Shared protocol types for communication between the cellwire client and
//! the formula engine process.
//!
//! The protocol is JSON-over-stdio: one JSON object per line in each
//! direction. The client writes [`Request`] objects to the engine's stdin and
//! reads [`Response`] objects from its stdout. One request yields exactly one
//! response - a success value or a failure - never a partial result.
//!
//! The engine itself (formula parsing, dependency tracking, recalculation) is
//! on the other side of this boundary and is opaque to this crate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A command sent from the client to the engine process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Monotonically increasing request ID for correlating responses.
    pub id: u64,
    /// The command to execute.
    #[serde(flatten)]
    pub command: Command,
}

/// Commands the client can send to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum Command {
    /// Get the formula text stored at a cell (empty string if none).
    GetFormula { address: String },

    /// Replace the formula at a cell. The engine answers with the value of
    /// every cell whose value changed as a result of the edit.
    SetFormula { address: String, formula: String },

    /// Shut down the engine process.
    Shutdown,
}

/// A response sent from the engine back to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// The request ID this response corresponds to.
    pub id: u64,
    /// The result of the command.
    #[serde(flatten)]
    pub result: ResponseResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ResponseResult {
    #[serde(rename = "ok")]
    Ok {
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<ResponseData>,
    },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Data returned in successful responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// A formula string.
    Formula { formula: String },
    /// Recomputed values after an edit, keyed by cell address ("B7").
    Updates { updates: BTreeMap<String, CellValue> },
}

/// The value of a cell as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    Number(f64),
    Text(String),
    Error(String),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => write!(f, "<empty>"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Error(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string(value).unwrap()
    }

    // The wire format is load-bearing: the engine on the other side of the
    // boundary parses these exact shapes. Pin them.

    #[test]
    fn test_request_wire_shape() {
        let req = Request {
            id: 1,
            command: Command::GetFormula {
                address: "B7".to_string(),
            },
        };
        assert_eq!(
            to_json(&req),
            r#"{"id":1,"cmd":"GetFormula","params":{"address":"B7"}}"#
        );

        let req = Request {
            id: 2,
            command: Command::SetFormula {
                address: "A1".to_string(),
                formula: "=B7*2".to_string(),
            },
        };
        assert_eq!(
            to_json(&req),
            r#"{"id":2,"cmd":"SetFormula","params":{"address":"A1","formula":"=B7*2"}}"#
        );

        let req = Request {
            id: 3,
            command: Command::Shutdown,
        };
        assert_eq!(to_json(&req), r#"{"id":3,"cmd":"Shutdown"}"#);
    }

    #[test]
    fn test_response_wire_shape() {
        let resp = Response {
            id: 1,
            result: ResponseResult::Ok {
                data: Some(ResponseData::Formula {
                    formula: "=B7*2".to_string(),
                }),
            },
        };
        assert_eq!(
            to_json(&resp),
            r#"{"id":1,"status":"ok","data":{"formula":"=B7*2"}}"#
        );

        let resp = Response {
            id: 2,
            result: ResponseResult::Ok { data: None },
        };
        assert_eq!(to_json(&resp), r#"{"id":2,"status":"ok"}"#);

        let resp = Response {
            id: 3,
            result: ResponseResult::Error {
                message: "no such cell".to_string(),
            },
        };
        assert_eq!(
            to_json(&resp),
            r#"{"id":3,"status":"error","message":"no such cell"}"#
        );
    }

    #[test]
    fn test_updates_wire_shape() {
        let mut updates = BTreeMap::new();
        updates.insert("A1".to_string(), CellValue::Number(42.0));
        updates.insert("B7".to_string(), CellValue::Empty);

        let resp = Response {
            id: 4,
            result: ResponseResult::Ok {
                data: Some(ResponseData::Updates { updates }),
            },
        };
        assert_eq!(
            to_json(&resp),
            r#"{"id":4,"status":"ok","data":{"updates":{"A1":{"type":"Number","value":42.0},"B7":{"type":"Empty"}}}}"#
        );
    }

    #[test]
    fn test_cell_value_wire_shape() {
        assert_eq!(
            to_json(&CellValue::Number(1.5)),
            r#"{"type":"Number","value":1.5}"#
        );
        assert_eq!(
            to_json(&CellValue::Text("hi".to_string())),
            r#"{"type":"Text","value":"hi"}"#
        );
        assert_eq!(
            to_json(&CellValue::Error("#DIV/0!".to_string())),
            r##"{"type":"Error","value":"#DIV/0!"}"##
        );
        assert_eq!(to_json(&CellValue::Empty), r#"{"type":"Empty"}"#);
    }

    #[test]
    fn test_round_trips() {
        let commands = [
            Command::GetFormula {
                address: "A1".to_string(),
            },
            Command::SetFormula {
                address: "B7".to_string(),
                formula: "=A1".to_string(),
            },
            Command::Shutdown,
        ];
        for command in commands {
            let req = Request { id: 9, command };
            let json = to_json(&req);
            let back: Request = serde_json::from_str(&json).unwrap();
            assert_eq!(to_json(&back), json);
        }

        let values = [
            CellValue::Number(-0.5),
            CellValue::Text(String::new()),
            CellValue::Error("#REF!".to_string()),
            CellValue::Empty,
        ];
        for value in values {
            let json = to_json(&value);
            let back: CellValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn test_cell_value_helpers() {
        assert_eq!(CellValue::Number(2.0).as_f64(), Some(2.0));
        assert_eq!(CellValue::Empty.as_f64(), None);
        assert_eq!(CellValue::from("x").as_str(), Some("x"));
        assert!(CellValue::Empty.is_empty());
        assert!(!CellValue::from(1.0).is_empty());
        assert_eq!(CellValue::Error("#REF!".to_string()).to_string(), "#REF!");
    }
}
