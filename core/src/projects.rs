//! Project operations layered on the sync exchange.
//!
//! List and the by-id/by-name lookups are read-only syncs filtered to the
//! `projects` resource type. The mutators each send a single command and
//! return the full `SyncResponse` so callers can read `temp_id_mapping`.

use serde::Serialize;

use crate::client::TodoistClient;
use crate::command::Command;
use crate::error::ApiError;
use crate::types::{Project, SyncResponse};

/// Project operations for one client. Borrowed from
/// [`TodoistClient::projects`].
pub struct ProjectService<'a> {
    client: &'a TodoistClient,
}

/// Input for [`ProjectService::add`]. When `temp_id` is `None` the command
/// still gets a generated one, so `temp_id_mapping` always names the new
/// project's permanent id.
#[derive(Debug, Clone)]
pub struct AddProject {
    pub name: String,
    pub temp_id: Option<String>,
}

/// Input for [`ProjectService::update`]. The id may be a permanent id or a
/// temp id from the same batch.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub id: String,
    pub name: String,
}

/// Input for [`ProjectService::move_project`].
#[derive(Debug, Clone)]
pub struct MoveProject {
    pub id: String,
    pub parent_id: String,
}

/// Input for [`ProjectService::archive`].
#[derive(Debug, Clone)]
pub struct ArchiveProject {
    pub id: String,
}

/// Input for [`ProjectService::delete`].
#[derive(Debug, Clone)]
pub struct DeleteProject {
    pub id: String,
}

#[derive(Serialize)]
struct AddArgs<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct UpdateArgs<'a> {
    id: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct MoveArgs<'a> {
    id: &'a str,
    parent_id: &'a str,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

impl<'a> ProjectService<'a> {
    pub(crate) fn new(client: &'a TodoistClient) -> Self {
        Self { client }
    }

    /// All projects, in server order.
    pub fn list(&self) -> Result<Vec<Project>, ApiError> {
        self.client.logln("list projects");
        let response = self.client.sync::<serde_json::Value>("*", &["projects"], &[])?;
        Ok(response.projects)
    }

    /// Fetch all projects and scan the whole list for a matching id.
    pub fn get_by_id(&self, id: i64) -> Result<Project, ApiError> {
        self.client.logf(format_args!("get project by id {id}"));
        let projects = self.list()?;
        projects
            .into_iter()
            .find(|project| project.id == id)
            .ok_or(ApiError::NotFound)
    }

    /// Fetch all projects and scan the whole list for a matching name.
    pub fn get_by_name(&self, name: &str) -> Result<Project, ApiError> {
        self.client.logf(format_args!("get project by name {name:?}"));
        let projects = self.list()?;
        projects
            .into_iter()
            .find(|project| project.name == name)
            .ok_or(ApiError::NotFound)
    }

    /// Create a project via a `project_add` command.
    pub fn add(&self, input: &AddProject) -> Result<SyncResponse, ApiError> {
        let command = Command::new("project_add", AddArgs { name: &input.name });
        let command = match &input.temp_id {
            Some(temp_id) => command.with_temp_id(temp_id),
            None => {
                let generated = uuid::Uuid::new_v4().to_string();
                command.with_temp_id(&generated)
            }
        };
        self.send(command)
    }

    /// Rename a project via a `project_update` command.
    pub fn update(&self, input: &UpdateProject) -> Result<SyncResponse, ApiError> {
        self.send(Command::new(
            "project_update",
            UpdateArgs {
                id: &input.id,
                name: &input.name,
            },
        ))
    }

    /// Reparent a project via a `project_move` command.
    pub fn move_project(&self, input: &MoveProject) -> Result<SyncResponse, ApiError> {
        self.send(Command::new(
            "project_move",
            MoveArgs {
                id: &input.id,
                parent_id: &input.parent_id,
            },
        ))
    }

    /// Archive a project via a `project_archive` command.
    pub fn archive(&self, input: &ArchiveProject) -> Result<SyncResponse, ApiError> {
        self.send(Command::new("project_archive", IdArgs { id: &input.id }))
    }

    /// Delete a project via a `project_delete` command.
    pub fn delete(&self, input: &DeleteProject) -> Result<SyncResponse, ApiError> {
        self.send(Command::new("project_delete", IdArgs { id: &input.id }))
    }

    fn send<A: Serialize>(&self, command: Command<A>) -> Result<SyncResponse, ApiError> {
        self.client
            .sync("*", &["projects"], std::slice::from_ref(&command))
    }
}
