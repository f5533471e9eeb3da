//! FortiOS response envelope
//!
//! Every CMDB reply wraps its payload in the same object:
//!
//! ```json
//! {"http_method": "GET", "results": [...], "vdom": "root",
//!  "mkey": "x", "status": "success", "http_status": 200}
//! ```
//!
//! Only `status` is mandatory. Singleton tables answer with `results` as a
//! bare object instead of an array; both shapes are accepted.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Status value FortiOS uses for a successful call
pub const STATUS_SUCCESS: &str = "success";

/// Parsed response envelope
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    pub vdom: Option<String>,
    pub mkey: Option<String>,
    pub status: String,
    pub http_status: Option<u16>,
    pub error: Option<i64>,
    pub results: Option<Vec<Value>>,
}

/// Result of reading one object
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// The object as the server currently holds it
    Found(Map<String, Value>),
    /// The server reports the object does not exist
    Missing,
    /// Success without a usable `results[0]`
    Empty,
}

impl Envelope {
    /// Parse a decoded body, failing when `status` is absent
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(Error::UnexpectedResponse);
        };

        let status = match map.remove("status") {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => return Err(Error::UnexpectedResponse),
            Some(other) => other.to_string(),
        };

        let results = match map.remove("results") {
            Some(Value::Array(items)) => Some(items),
            Some(Value::Null) | None => None,
            Some(single) => Some(vec![single]),
        };

        Ok(Self {
            vdom: map.remove("vdom").and_then(scalar_to_string),
            mkey: map.remove("mkey").and_then(scalar_to_string),
            status,
            http_status: map
                .get("http_status")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok()),
            error: map.get("error").and_then(Value::as_i64),
            results,
        })
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn is_not_found(&self) -> bool {
        self.http_status == Some(404)
    }

    /// Turn a non-success status into `Error::Api`
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Api {
                http_status: self.http_status.unwrap_or_default(),
                code: self.error.unwrap_or_default(),
                status: self.status,
            })
        }
    }

    /// Classify a GET reply
    pub fn into_read_outcome(self) -> Result<ReadOutcome> {
        if self.is_not_found() {
            return Ok(ReadOutcome::Missing);
        }
        let envelope = self.into_result()?;
        let first = envelope.results.and_then(|r| r.into_iter().next());
        Ok(match first {
            Some(Value::Object(object)) => ReadOutcome::Found(object),
            _ => ReadOutcome::Empty,
        })
    }
}

/// mkeys are strings for named tables and integers for id tables.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_status_is_unexpected() {
        let err = Envelope::from_value(json!({"mkey": "a", "http_status": 200})).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse));

        let err = Envelope::from_value(json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse));
    }

    #[test]
    fn test_numeric_mkey_becomes_string() {
        let envelope =
            Envelope::from_value(json!({"status": "success", "mkey": 7, "vdom": "root"})).unwrap();
        assert_eq!(envelope.mkey.as_deref(), Some("7"));
        assert_eq!(envelope.vdom.as_deref(), Some("root"));
    }

    #[test]
    fn test_empty_mkey_is_none() {
        let envelope = Envelope::from_value(json!({"status": "success", "mkey": ""})).unwrap();
        assert_eq!(envelope.mkey, None);
    }

    #[test]
    fn test_error_status_maps_to_api_error() {
        let envelope = Envelope::from_value(
            json!({"status": "error", "http_status": 500, "error": -651}),
        )
        .unwrap();
        match envelope.into_result() {
            Err(Error::Api { http_status, code, .. }) => {
                assert_eq!(http_status, 500);
                assert_eq!(code, -651);
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_outcomes() {
        let found = Envelope::from_value(
            json!({"status": "success", "results": [{"name": "a"}]}),
        )
        .unwrap();
        assert_eq!(
            found.into_read_outcome().unwrap(),
            ReadOutcome::Found(json!({"name": "a"}).as_object().unwrap().clone())
        );

        let singleton = Envelope::from_value(
            json!({"status": "success", "results": {"status": "enable"}}),
        )
        .unwrap();
        assert!(matches!(
            singleton.into_read_outcome().unwrap(),
            ReadOutcome::Found(_)
        ));

        let missing =
            Envelope::from_value(json!({"status": "error", "http_status": 404})).unwrap();
        assert_eq!(missing.into_read_outcome().unwrap(), ReadOutcome::Missing);

        let no_results = Envelope::from_value(json!({"status": "success"})).unwrap();
        assert_eq!(no_results.into_read_outcome().unwrap(), ReadOutcome::Empty);

        let null_first =
            Envelope::from_value(json!({"status": "success", "results": [null]})).unwrap();
        assert_eq!(null_first.into_read_outcome().unwrap(), ReadOutcome::Empty);
    }
}
