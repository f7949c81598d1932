//! Domain DTOs for the sync API.
//!
//! # Design
//! These types mirror the server's JSON but are defined independently of the
//! mock-server crate; the integration test catches schema drift. Resource
//! keys the server leaves out of a reply decode to empty collections via
//! `#[serde(default)]` — an absent key is not an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single project tracked by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub is_archived: bool,
}

/// Decoded reply from the sync endpoint.
///
/// `temp_id_mapping` is populated only for commands that carried a temp id
/// and succeeded; it maps each temp id to the permanent integer id the
/// server assigned.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncResponse {
    #[serde(default)]
    pub sync_token: String,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub temp_id_mapping: HashMap<String, i64>,
}
