use std::sync::Arc;

use crate::api::{Backend, Plugin};
use crate::route::{AiUiView, PluginTab};
use crate::state::{AiUiState, Slice};

/// The AI UI plugin launcher
#[derive(Clone)]
pub struct AiUiPanel {
    state: Slice<AiUiState>,
    backend: Arc<dyn Backend>,
}

impl AiUiPanel {
    pub fn new(state: Slice<AiUiState>, backend: Arc<dyn Backend>) -> Self {
        Self { state, backend }
    }

    pub fn state(&self) -> &Slice<AiUiState> {
        &self.state
    }

    /// Fetch the plugin list on first visit only
    pub async fn ensure_loaded(&self) {
        if self.state.read().loaded {
            return;
        }
        self.fetch_plugins().await;
    }

    pub async fn fetch_plugins(&self) {
        match self.backend.list_plugins().await {
            Ok(plugins) => {
                tracing::debug!(count = plugins.len(), "Loaded plugins");
                let mut state = self.state.write();
                state.plugins = plugins;
                state.loaded = true;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load plugins"),
        }
    }

    pub async fn fetch_gallery(&self) {
        match self.backend.gallery().await {
            Ok(apps) => {
                tracing::debug!(count = apps.len(), "Loaded gallery");
                self.state.write().gallery = apps;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load gallery"),
        }
    }

    pub fn set_view(&self, view: AiUiView) {
        self.state.write().view = view;
    }

    pub fn set_plugin_tab(&self, tab: PluginTab) {
        self.state.write().plugin_tab = tab;
    }

    pub fn select_plugin(&self, plugin: Plugin) {
        tracing::debug!(plugin_id = %plugin.id, running = plugin.is_running(), "Selecting plugin");
        let mut state = self.state.write();
        // A directly fetched plugin may be missing from a stale list
        if state.find_plugin(&plugin.id).is_none() {
            state.plugins.push(plugin.clone());
        }
        state.view = AiUiView::PluginDetail;
        state.selected_plugin = Some(plugin);
    }
}
