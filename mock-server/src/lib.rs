//! In-memory implementation of the sync endpoint for tests.
//!
//! Accepts the form-encoded sync request (`token`, `sync_token`,
//! `resource_types`, optional `commands`), executes project commands against
//! shared in-memory state, and replies with the requested resource snapshots
//! plus `temp_id_mapping` and per-command `sync_status`.

use std::{collections::HashMap, sync::Arc};

use axum::{extract::State, http::StatusCode, routing::post, Form, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub is_archived: bool,
}

#[derive(Debug, Default)]
pub struct Store {
    projects: Vec<Project>,
    next_id: i64,
    generation: u64,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Deserialize)]
struct SyncForm {
    #[serde(default)]
    token: String,
    #[serde(default)]
    resource_types: String,
    commands: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommandIn {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    args: serde_json::Value,
    #[serde(default)]
    uuid: String,
    #[serde(default)]
    temp_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct SyncReply {
    sync_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    projects: Option<Vec<Project>>,
    temp_id_mapping: HashMap<String, i64>,
    sync_status: HashMap<String, String>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new().route("/sync", post(sync)).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn sync(
    State(db): State<Db>,
    Form(input): Form<SyncForm>,
) -> Result<Json<SyncReply>, StatusCode> {
    if input.token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let resource_types: Vec<String> = if input.resource_types.is_empty() {
        vec!["all".to_string()]
    } else {
        serde_json::from_str(&input.resource_types).map_err(|_| StatusCode::BAD_REQUEST)?
    };
    let commands: Vec<CommandIn> = match &input.commands {
        Some(raw) => serde_json::from_str(raw).map_err(|_| StatusCode::BAD_REQUEST)?,
        None => Vec::new(),
    };

    let mut store = db.write().await;
    let (temp_id_mapping, sync_status) = apply_commands(&mut store, &commands);
    store.generation += 1;

    let wants_projects = resource_types.iter().any(|t| t == "projects" || t == "all");
    let projects = wants_projects.then(|| store.projects.clone());

    Ok(Json(SyncReply {
        sync_token: format!("sync-{}", store.generation),
        projects,
        temp_id_mapping,
        sync_status,
    }))
}

/// Run a command batch in order. Ids created earlier in the batch may be
/// referenced by their temp id later in the same batch. Unknown command
/// types are skipped without poisoning the rest of the batch.
fn apply_commands(
    store: &mut Store,
    commands: &[CommandIn],
) -> (HashMap<String, i64>, HashMap<String, String>) {
    let mut mapping = HashMap::new();
    let mut status = HashMap::new();

    for command in commands {
        match command.kind.as_str() {
            "project_add" => {
                let name = command.args["name"].as_str().unwrap_or_default().to_string();
                store.next_id += 1;
                let id = store.next_id;
                store.projects.push(Project {
                    id,
                    name,
                    parent_id: None,
                    is_archived: false,
                });
                if let Some(temp_id) = &command.temp_id {
                    mapping.insert(temp_id.clone(), id);
                }
            }
            "project_update" => {
                if let Some(project) = find_project(store, &command.args, &mapping) {
                    if let Some(name) = command.args["name"].as_str() {
                        project.name = name.to_string();
                    }
                }
            }
            "project_move" => {
                let parent_id = command.args["parent_id"]
                    .as_str()
                    .and_then(|raw| resolve_id(raw, &mapping));
                if let Some(project) = find_project(store, &command.args, &mapping) {
                    project.parent_id = parent_id;
                }
            }
            "project_archive" => {
                if let Some(project) = find_project(store, &command.args, &mapping) {
                    project.is_archived = true;
                }
            }
            "project_delete" => {
                if let Some(raw) = command.args["id"].as_str() {
                    if let Some(id) = resolve_id(raw, &mapping) {
                        store.projects.retain(|project| project.id != id);
                    }
                }
            }
            _ => continue,
        }
        status.insert(command.uuid.clone(), "ok".to_string());
    }

    (mapping, status)
}

fn resolve_id(raw: &str, mapping: &HashMap<String, i64>) -> Option<i64> {
    mapping.get(raw).copied().or_else(|| raw.parse().ok())
}

fn find_project<'a>(
    store: &'a mut Store,
    args: &serde_json::Value,
    mapping: &HashMap<String, i64>,
) -> Option<&'a mut Project> {
    let id = resolve_id(args["id"].as_str()?, mapping)?;
    store.projects.iter_mut().find(|project| project.id == id)
}
