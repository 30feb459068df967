//! Dashboard view state.
//!
//! State is split into slices that are locked independently. A panel owns the
//! slice it writes and only ever reads the others through its own handle, so
//! no component needs the whole application state.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::api::{BrowserProfile, GalleryApp, Mission, Plugin, Project, Session};
use crate::route::{AiUiView, CrewTab, PluginTab, View};

/// Shared, independently lockable piece of state
pub type Slice<T> = Arc<RwLock<T>>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatState {
    pub sessions: Vec<Session>,
    pub active_session_id: Option<String>,
}

impl ChatState {
    pub fn find_session(&self, id: &str) -> Option<Session> {
        self.sessions.iter().find(|s| s.id == id).cloned()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MissionsState {
    pub crew_tab: CrewTab,
    pub missions: Vec<Mission>,
    pub projects: Vec<Project>,
    /// Recently opened projects shown in the sidebar, newest first
    pub recent_projects: Vec<Project>,
    pub selected_project: Option<Project>,
}

impl MissionsState {
    pub fn find_project(&self, id: &str) -> Option<Project> {
        self.projects.iter().find(|p| p.id == id).cloned()
    }

    pub fn find_recent_project(&self, id: &str) -> Option<Project> {
        self.recent_projects.iter().find(|p| p.id == id).cloned()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AiUiState {
    /// Set once the plugin list has been fetched successfully
    pub loaded: bool,
    pub view: AiUiView,
    pub plugins: Vec<Plugin>,
    pub gallery: Vec<GalleryApp>,
    pub selected_plugin: Option<Plugin>,
    /// Last detail tab shown; reused when a link omits the tab
    pub plugin_tab: PluginTab,
}

impl AiUiState {
    pub fn find_plugin(&self, id: &str) -> Option<Plugin> {
        self.plugins.iter().find(|p| p.id == id).cloned()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AntiBrowserState {
    pub loaded: bool,
    pub profiles: Vec<BrowserProfile>,
}

/// Handles to every state slice. Cloning is cheap and shares the slices.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: Slice<View>,
    pub chat: Slice<ChatState>,
    pub missions: Slice<MissionsState>,
    pub ai_ui: Slice<AiUiState>,
    pub anti_browser: Slice<AntiBrowserState>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_view(&self) -> View {
        *self.view.read()
    }

    /// Point-in-time copy of all slices, for display and debugging
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            view: self.current_view(),
            chat: self.chat.read().clone(),
            missions: self.missions.read().clone(),
            ai_ui: self.ai_ui.read().clone(),
            anti_browser: self.anti_browser.read().clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub view: View,
    pub chat: ChatState,
    pub missions: MissionsState,
    pub ai_ui: AiUiState,
    pub anti_browser: AntiBrowserState,
}
