use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::models::{
    BrowserProfile, GalleryApp, GalleryEnvelope, Mission, MissionsEnvelope, Plugin,
    PluginEnvelope, PluginsEnvelope, ProfilesEnvelope, Project, ProjectEnvelope,
    ProjectsEnvelope, Session, SessionEnvelope, SessionsEnvelope,
};
use super::Backend;

/// [`Backend`] over the dashboard's HTTP API
#[derive(Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ApiError::InvalidBaseUrl(base_url));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: trimmed.to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_optional(path).await?.ok_or_else(|| ApiError::Status {
            status: StatusCode::NOT_FOUND.as_u16(),
            url: self.url(path),
        })
    }

    /// GET a JSON document, mapping 404 to `None`
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| ApiError::Decode {
                url,
                message: e.to_string(),
            })
    }
}

fn encode(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let envelope: SessionsEnvelope = self.get_json("/api/sessions").await?;
        Ok(envelope.sessions)
    }

    async fn get_session(&self, id: &str) -> Result<Option<Session>, ApiError> {
        let envelope: Option<SessionEnvelope> = self
            .get_optional(&format!("/api/sessions/{}", encode(id)))
            .await?;
        Ok(envelope.map(|e| e.session))
    }

    async fn list_missions(&self) -> Result<Vec<Mission>, ApiError> {
        let envelope: MissionsEnvelope = self.get_json("/api/missions").await?;
        Ok(envelope.missions)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let envelope: ProjectsEnvelope = self.get_json("/api/projects").await?;
        Ok(envelope.projects)
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, ApiError> {
        let envelope: Option<ProjectEnvelope> = self
            .get_optional(&format!("/api/projects/{}", encode(id)))
            .await?;
        Ok(envelope.map(|e| e.project))
    }

    async fn list_plugins(&self) -> Result<Vec<Plugin>, ApiError> {
        let envelope: PluginsEnvelope = self.get_json("/api/ai-ui/plugins").await?;
        Ok(envelope.plugins)
    }

    async fn get_plugin(&self, id: &str) -> Result<Option<Plugin>, ApiError> {
        let envelope: Option<PluginEnvelope> = self
            .get_optional(&format!("/api/ai-ui/plugins/{}", encode(id)))
            .await?;
        Ok(envelope.map(|e| e.plugin))
    }

    async fn gallery(&self) -> Result<Vec<GalleryApp>, ApiError> {
        let envelope: GalleryEnvelope = self.get_json("/api/ai-ui/gallery").await?;
        Ok(envelope.apps)
    }

    async fn list_browser_profiles(&self) -> Result<Vec<BrowserProfile>, ApiError> {
        let envelope: ProfilesEnvelope = self.get_json("/api/browser/profiles").await?;
        Ok(envelope.profiles)
    }
}
