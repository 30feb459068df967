//! Fragment composition, the inverse of [`parse`](super::parse).

use super::{AiUiRoute, CrewRoute, CrewTab, PluginTab, Route, View};

/// Compose the canonical fragment for a route.
///
/// A plugin detail route without an explicit tab is written with the default
/// tab, so it parses back with `tab: Some(PluginTab::Web)`.
pub fn to_fragment(route: &Route) -> String {
    match route {
        Route::Chat { session_id: None } => View::Chat.fragment().to_string(),
        Route::Chat {
            session_id: Some(id),
        } => session_fragment(id),
        Route::Activity => View::Activity.fragment().to_string(),
        Route::Terminal => View::Terminal.fragment().to_string(),
        Route::AntiBrowser => View::AntiBrowser.fragment().to_string(),
        Route::Missions(CrewRoute::Tasks) => crew_fragment(CrewTab::Tasks),
        Route::Missions(CrewRoute::Projects) => crew_fragment(CrewTab::Projects),
        Route::Missions(CrewRoute::Project { project_id }) => project_fragment(project_id),
        Route::AiUi(sub) => ai_ui_fragment(sub, PluginTab::default()),
    }
}

/// `#/chat/{id}` with the id percent-encoded
pub fn session_fragment(session_id: &str) -> String {
    format!("#/chat/{}", urlencoding::encode(session_id))
}

pub fn crew_fragment(tab: CrewTab) -> String {
    match tab {
        CrewTab::Tasks => View::Missions.fragment().to_string(),
        CrewTab::Projects => format!("{}/projects", View::Missions.fragment()),
    }
}

pub fn project_fragment(project_id: &str) -> String {
    format!("#/project/{}", urlencoding::encode(project_id))
}

/// Compose an AI UI fragment; `fallback_tab` is used when a plugin detail
/// route carries no tab of its own.
pub fn ai_ui_fragment(sub: &AiUiRoute, fallback_tab: PluginTab) -> String {
    match sub {
        AiUiRoute::Home => View::AiUi.fragment().to_string(),
        AiUiRoute::Plugins => "#/ai-ui/plugins".to_string(),
        AiUiRoute::Discover => "#/ai-ui/discover".to_string(),
        AiUiRoute::Shell => "#/ai-ui/shell".to_string(),
        AiUiRoute::ApiDocs => "#/ai-ui/api-docs".to_string(),
        AiUiRoute::Other { name } => format!("#/ai-ui/{name}"),
        AiUiRoute::PluginDetail { plugin_id, tab } => format!(
            "#/ai-ui/plugin/{}/{}",
            urlencoding::encode(plugin_id),
            tab.unwrap_or(fallback_tab).as_str()
        ),
    }
}
