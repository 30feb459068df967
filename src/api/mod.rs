//! Dashboard REST API access.
//!
//! The navigation layer never talks HTTP directly; it goes through the
//! [`Backend`] trait so tests can substitute an in-memory implementation.

pub mod error;
pub mod http;
pub mod models;

use async_trait::async_trait;

pub use error::ApiError;
pub use http::HttpBackend;
pub use models::{BrowserProfile, GalleryApp, Mission, Plugin, PluginStatus, Project, Session};

/// Read-only operations the dashboard panels need from the server.
///
/// `get_*` methods return `Ok(None)` when the server reports the entity does
/// not exist.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError>;

    async fn get_session(&self, id: &str) -> Result<Option<Session>, ApiError>;

    async fn list_missions(&self) -> Result<Vec<Mission>, ApiError>;

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    async fn get_project(&self, id: &str) -> Result<Option<Project>, ApiError>;

    async fn list_plugins(&self) -> Result<Vec<Plugin>, ApiError>;

    async fn get_plugin(&self, id: &str) -> Result<Option<Plugin>, ApiError>;

    async fn gallery(&self) -> Result<Vec<GalleryApp>, ApiError>;

    async fn list_browser_profiles(&self) -> Result<Vec<BrowserProfile>, ApiError>;
}
