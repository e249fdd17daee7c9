//! Wire-level shapes shared between the cloudadm client and its tests.
//!
//! The management API speaks loosely-typed JSON; only the envelopes the
//! client itself interprets are modelled here. Resource records stay as
//! `serde_json::Value` all the way to the renderer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A page of records returned by a list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListResult {
    pub data: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl ListResult {
    /// Read a list envelope. The records live either under `data` or under
    /// the resource's plural keyword; paging counters are optional.
    pub fn from_envelope(envelope: &Value, keyword_plural: &str) -> Option<Self> {
        let object = envelope.as_object()?;
        let data = object
            .get("data")
            .or_else(|| object.get(keyword_plural))
            .and_then(Value::as_array)?
            .clone();

        Some(Self {
            data,
            total: object.get("total").and_then(Value::as_u64),
            limit: object.get("limit").and_then(Value::as_u64),
            offset: object.get("offset").and_then(Value::as_u64),
            marker: object
                .get("marker")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_owned),
        })
    }
}

/// Outcome of one item in a batch operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResult {
    pub id: String,
    pub status: u16,
    pub data: Value,
}

impl SubmitResult {
    pub fn ok(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            status: 200,
            data,
        }
    }

    pub fn failed(id: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        let mut error = Map::new();
        error.insert("error".to_string(), Value::String(message.into()));
        Self {
            id: id.into(),
            status,
            data: Value::Object(error),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn error_message(&self) -> Option<&str> {
        if self.is_success() {
            return None;
        }
        self.data.get("error").and_then(Value::as_str)
    }
}

/// One entry of a load-balancer access control list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    pub cidr: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl AclEntry {
    /// Parse the `cidr[ comment]` form accepted on the command line.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (cidr, comment) = match raw.split_once(char::is_whitespace) {
            Some((cidr, comment)) => (cidr, comment.trim()),
            None => (raw, ""),
        };
        if cidr.is_empty() {
            return None;
        }
        Some(Self {
            cidr: cidr.to_string(),
            comment: comment.to_string(),
        })
    }

    pub fn to_line(&self) -> String {
        if self.comment.is_empty() {
            self.cidr.clone()
        } else {
            format!("{} {}", self.cidr, self.comment)
        }
    }
}

/// Acknowledgement state change for a single alarm event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmEventAck {
    pub id: String,
    pub ack_status: i64,
}

/// Body of the batch acknowledgement endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmEventAckRequest {
    pub alarm_events: Vec<AlarmEventAck>,
}

impl AlarmEventAckRequest {
    pub fn single(id: impl Into<String>, ack_status: i64) -> Self {
        Self {
            alarm_events: vec![AlarmEventAck {
                id: id.into(),
                ack_status,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_envelope_reads_data_or_plural_key() {
        let by_data = json!({"data": [{"id": "a"}], "total": 3, "limit": 1});
        let list = ListResult::from_envelope(&by_data, "disks").expect("envelope");
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.total, Some(3));
        assert_eq!(list.limit, Some(1));

        let by_plural = json!({"disks": [{"id": "a"}, {"id": "b"}], "marker": ""});
        let list = ListResult::from_envelope(&by_plural, "disks").expect("envelope");
        assert_eq!(list.data.len(), 2);
        assert_eq!(list.marker, None);

        assert!(ListResult::from_envelope(&json!({"disk": {}}), "disks").is_none());
    }

    #[test]
    fn acl_entry_parses_optional_comment() {
        assert_eq!(
            AclEntry::parse("10.0.0.0/8 office lan"),
            Some(AclEntry {
                cidr: "10.0.0.0/8".into(),
                comment: "office lan".into()
            })
        );
        let bare = AclEntry::parse("192.168.1.1").expect("bare cidr");
        assert_eq!(bare.to_line(), "192.168.1.1");
        assert!(AclEntry::parse("   ").is_none());
    }

    #[test]
    fn alarm_ack_request_wraps_single_event() {
        let body = serde_json::to_value(AlarmEventAckRequest::single("abc", 1)).expect("json");
        assert_eq!(body, json!({"alarm_events": [{"id": "abc", "ack_status": 1}]}));
    }

    #[test]
    fn failed_submit_result_carries_message() {
        let failed = SubmitResult::failed("d1", 404, "not found");
        assert!(!failed.is_success());
        assert_eq!(failed.error_message(), Some("not found"));
        assert_eq!(SubmitResult::ok("d2", Value::Null).error_message(), None);
    }
}
