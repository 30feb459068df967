use std::sync::Arc;

use crate::api::{Backend, Project};
use crate::route::CrewTab;
use crate::state::{MissionsState, Slice};

const MAX_RECENT_PROJECTS: usize = 10;

/// Crew missions and projects
#[derive(Clone)]
pub struct MissionsPanel {
    state: Slice<MissionsState>,
    backend: Arc<dyn Backend>,
}

impl MissionsPanel {
    pub fn new(state: Slice<MissionsState>, backend: Arc<dyn Backend>) -> Self {
        Self { state, backend }
    }

    pub fn state(&self) -> &Slice<MissionsState> {
        &self.state
    }

    pub fn set_tab(&self, tab: CrewTab) {
        self.state.write().crew_tab = tab;
    }

    pub async fn reload_missions(&self) {
        match self.backend.list_missions().await {
            Ok(missions) => {
                tracing::debug!(count = missions.len(), "Loaded missions");
                self.state.write().missions = missions;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load missions"),
        }
    }

    pub async fn reload_projects(&self) {
        match self.backend.list_projects().await {
            Ok(projects) => {
                tracing::debug!(count = projects.len(), "Loaded projects");
                self.state.write().projects = projects;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load projects"),
        }
    }

    pub fn select_project(&self, project: Project) {
        tracing::debug!(project_id = %project.id, "Selecting project");
        let mut state = self.state.write();
        state.crew_tab = CrewTab::Projects;
        state.recent_projects.retain(|p| p.id != project.id);
        state.recent_projects.insert(0, project.clone());
        state.recent_projects.truncate(MAX_RECENT_PROJECTS);
        state.selected_project = Some(project);
    }
}
