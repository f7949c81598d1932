//! Command model for the sync protocol's mutation batch.
//!
//! # Design
//! A command is a type tag, an opaque argument payload, a client-generated
//! operation id, and an optional temp id for entities the server has not
//! named yet. The argument payload stays generic over `Serialize` instead of
//! being pre-rendered: encoding happens when the request is built, so a
//! payload the serializer cannot represent fails the whole build loudly
//! rather than dropping fields.

use serde::Serialize;
use uuid::Uuid;

/// A single mutation sent in a sync request batch.
///
/// Wire field order is fixed: `type`, `args`, `uuid`, `temp_id`, with
/// `temp_id` omitted entirely when not set. Commands are built immediately
/// before a request and consumed by it once.
#[derive(Debug, Clone, Serialize)]
pub struct Command<A = serde_json::Value> {
    #[serde(rename = "type")]
    pub kind: String,
    pub args: A,
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_id: Option<String>,
}

impl<A> Command<A> {
    /// New command with a generated v4 operation id and no temp id.
    pub fn new(kind: &str, args: A) -> Self {
        Self {
            kind: kind.to_string(),
            args,
            uuid: Uuid::new_v4().to_string(),
            temp_id: None,
        }
    }

    /// Attach the temp id the server should resolve to a permanent id.
    pub fn with_temp_id(mut self, temp_id: &str) -> Self {
        self.temp_id = Some(temp_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_wire_field_order() {
        let command = Command {
            kind: "command_type".to_string(),
            args: "args",
            uuid: "uuid".to_string(),
            temp_id: Some("temp_id".to_string()),
        };
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(
            json,
            r#"{"type":"command_type","args":"args","uuid":"uuid","temp_id":"temp_id"}"#
        );
    }

    #[test]
    fn temp_id_is_omitted_when_unset() {
        let command = Command::new("project_add", serde_json::json!({"name": "Inbox"}));
        let json = serde_json::to_value(&command).unwrap();
        assert!(json.get("temp_id").is_none());
        assert_eq!(json["type"], "project_add");
        assert_eq!(json["args"]["name"], "Inbox");
    }

    #[test]
    fn new_generates_distinct_operation_ids() {
        let a = Command::new("project_add", ());
        let b = Command::new("project_add", ());
        assert_ne!(a.uuid, b.uuid);
        assert!(!a.uuid.is_empty());
    }

    #[test]
    fn with_temp_id_sets_temp_id() {
        let command = Command::new("project_add", ()).with_temp_id("tmp-1");
        assert_eq!(command.temp_id.as_deref(), Some("tmp-1"));
    }
}
