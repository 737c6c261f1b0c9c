//! Annotation sources.
//!
//! An [`AnnotationSource`] lists projects and the tasks of a project, with
//! each task's annotations embedded. [`LabelStudioClient`] implements it
//! over the Label Studio REST API; tests use in-memory sources.
//!
//! # Example
//!
//! ```rust,no_run
//! use lsx::config::{Config, Overrides};
//! use lsx::source::{AnnotationSource, LabelStudioClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load(Overrides::default())?;
//! let client = LabelStudioClient::new(&config)?;
//!
//! for project in client.list_projects().await? {
//!     println!("{} {:?}", project.id, project.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::annotation::Task;

pub use client::LabelStudioClient;

/// Failures talking to the annotation service
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid API key: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// User that created a project.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProjectCreator {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A Label Studio project.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_by: Option<ProjectCreator>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Total number of tasks.
    #[serde(default)]
    pub task_number: Option<u64>,
    #[serde(default)]
    pub finished_task_number: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Column names of [`ProjectSummary`], in declaration order.
pub const PROJECT_COLUMNS: [&str; 7] = [
    "id",
    "title",
    "description",
    "created_by",
    "created_at",
    "tasks",
    "tasks_finished",
];

/// One row of the project overview.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectSummary {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Creator e-mail.
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub tasks: Option<u64>,
    pub tasks_finished: Option<u64>,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            created_by: project
                .created_by
                .as_ref()
                .and_then(|creator| creator.email.clone()),
            created_at: project.created_at,
            tasks: project.task_number,
            tasks_finished: project.finished_task_number,
        }
    }
}

/// Read access to an annotation service.
#[async_trait]
pub trait AnnotationSource: Send + Sync {
    /// Source name for logs (e.g., `"label-studio"`).
    fn name(&self) -> &'static str;

    /// List every project visible to the caller.
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// List every task of a project, annotations included.
    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>>;
}
