//! Wire models for the dashboard REST API.
//!
//! Only the fields the navigation layer reads are modelled; everything else in
//! the payloads is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Whether a plugin's process is currently up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginStatus {
    Running,
    #[default]
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_plugin_icon")]
    pub icon: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub status: PluginStatus,
    #[serde(default)]
    pub web_view: Option<String>,
    #[serde(default)]
    pub web_view_path: Option<String>,
    #[serde(default)]
    pub openapi: Option<String>,
}

fn default_plugin_icon() -> String {
    "package".to_string()
}

impl Plugin {
    pub fn is_running(&self) -> bool {
        self.status == PluginStatus::Running
    }
}

/// Entry in the AI UI "discover" gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryApp {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

// Response envelopes

#[derive(Debug, Deserialize)]
pub(crate) struct SessionsEnvelope {
    #[serde(default)]
    pub sessions: Vec<Session>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionEnvelope {
    pub session: Session,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MissionsEnvelope {
    #[serde(default)]
    pub missions: Vec<Mission>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectsEnvelope {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectEnvelope {
    pub project: Project,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PluginsEnvelope {
    #[serde(default)]
    pub plugins: Vec<Plugin>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PluginEnvelope {
    pub plugin: Plugin,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GalleryEnvelope {
    #[serde(default)]
    pub apps: Vec<GalleryApp>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfilesEnvelope {
    #[serde(default)]
    pub profiles: Vec<BrowserProfile>,
}
