//! Extraction façade over an [`AnnotationSource`].
//!
//! Source failures never propagate out of the [`Extractor`]: they are
//! logged as warnings and the call returns `None`. `None` means "unknown",
//! while `Some(vec![])` means the service answered and there was nothing.

use tracing::{debug, warn};

use crate::annotation::{flatten, AnnotationRecord, Task};
use crate::source::{AnnotationSource, Project, ProjectSummary};

/// Pulls projects, tasks and flattened annotations from a source.
pub struct Extractor<S> {
    source: S,
}

impl<S: AnnotationSource> Extractor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// All projects as returned by the service.
    pub async fn raw_projects(&self) -> Option<Vec<Project>> {
        match self.source.list_projects().await {
            Ok(projects) => Some(projects),
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "Error fetching projects");
                None
            }
        }
    }

    /// One summary row per project.
    pub async fn projects(&self) -> Option<Vec<ProjectSummary>> {
        let projects = self.raw_projects().await?;
        Some(projects.iter().map(ProjectSummary::from).collect())
    }

    /// All tasks of a project, annotations included.
    pub async fn tasks(&self, project_id: i64) -> Option<Vec<Task>> {
        match self.source.list_tasks(project_id).await {
            Ok(tasks) => Some(tasks),
            Err(e) => {
                warn!(
                    source = self.source.name(),
                    project_id,
                    error = %e,
                    "Error fetching tasks"
                );
                None
            }
        }
    }

    /// Flattened annotation records of a project.
    pub async fn annotations(&self, project_id: i64) -> Option<Vec<AnnotationRecord>> {
        let tasks = self.tasks(project_id).await?;
        let records = flatten(project_id, &tasks);
        debug!(
            project_id,
            tasks = tasks.len(),
            records = records.len(),
            "Flattened annotations"
        );
        Some(records)
    }
}
