//! In-memory dashboard server

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pawnav::api::{BrowserProfile, GalleryApp, Mission, Plugin, Project, Session};
use pawnav::{ApiError, Backend};

/// Backend serving fixed lists.
///
/// Entities added with the `*_by_id_only` builders are returned by the
/// `get_*` calls but never appear in the lists, like records created after
/// the list was fetched.
#[derive(Default)]
pub struct FakeBackend {
    sessions: Vec<Session>,
    missions: Vec<Mission>,
    projects: Vec<Project>,
    plugins: Vec<Plugin>,
    gallery: Vec<GalleryApp>,
    profiles: Vec<BrowserProfile>,
    unlisted_sessions: Vec<Session>,
    unlisted_projects: Vec<Project>,
    unlisted_plugins: Vec<Plugin>,
    list_delay: Duration,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(mut self, sessions: Vec<Session>) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_projects(mut self, projects: Vec<Project>) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_plugins(mut self, plugins: Vec<Plugin>) -> Self {
        self.plugins = plugins;
        self
    }

    pub fn with_session_by_id_only(mut self, session: Session) -> Self {
        self.unlisted_sessions.push(session);
        self
    }

    pub fn with_project_by_id_only(mut self, project: Project) -> Self {
        self.unlisted_projects.push(project);
        self
    }

    pub fn with_plugin_by_id_only(mut self, plugin: Plugin) -> Self {
        self.unlisted_plugins.push(plugin);
        self
    }

    /// Latency of every list endpoint
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = delay;
        self
    }

    /// Calls made so far, as `name` or `name:id`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn was_called(&self, call: &str) -> bool {
        self.calls.lock().iter().any(|c| c == call)
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    async fn list<T: Clone>(&self, name: &str, items: &[T]) -> Result<Vec<T>, ApiError> {
        self.record(name);
        if !self.list_delay.is_zero() {
            tokio::time::sleep(self.list_delay).await;
        }
        Ok(items.to_vec())
    }
}

fn find<T: Clone>(listed: &[T], unlisted: &[T], id: &str, id_of: fn(&T) -> &str) -> Option<T> {
    listed
        .iter()
        .chain(unlisted)
        .find(|item| id_of(item) == id)
        .cloned()
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.list("list_sessions", &self.sessions).await
    }

    async fn get_session(&self, id: &str) -> Result<Option<Session>, ApiError> {
        self.record(format!("get_session:{id}"));
        Ok(find(&self.sessions, &self.unlisted_sessions, id, |s| &s.id))
    }

    async fn list_missions(&self) -> Result<Vec<Mission>, ApiError> {
        self.list("list_missions", &self.missions).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.list("list_projects", &self.projects).await
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, ApiError> {
        self.record(format!("get_project:{id}"));
        Ok(find(&self.projects, &self.unlisted_projects, id, |p| &p.id))
    }

    async fn list_plugins(&self) -> Result<Vec<Plugin>, ApiError> {
        self.list("list_plugins", &self.plugins).await
    }

    async fn get_plugin(&self, id: &str) -> Result<Option<Plugin>, ApiError> {
        self.record(format!("get_plugin:{id}"));
        Ok(find(&self.plugins, &self.unlisted_plugins, id, |p| &p.id))
    }

    async fn gallery(&self) -> Result<Vec<GalleryApp>, ApiError> {
        self.list("gallery", &self.gallery).await
    }

    async fn list_browser_profiles(&self) -> Result<Vec<BrowserProfile>, ApiError> {
        self.list("list_browser_profiles", &self.profiles).await
    }
}
