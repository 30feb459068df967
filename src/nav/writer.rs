use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::route::fragment::{ai_ui_fragment, crew_fragment, project_fragment, session_fragment};
use crate::route::{to_fragment, AiUiRoute, CrewTab, PluginTab, Route, View};
use crate::state::{AiUiState, Slice};

use super::location::{normalize, Location};

/// One-shot marker for a fragment change this process caused itself
#[derive(Debug, Clone, Default)]
pub struct SuppressFlag(Arc<AtomicBool>);

impl SuppressFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Clear the flag, returning whether it was set
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }

    pub fn is_armed(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Writes view-state transitions back into the location fragment
#[derive(Clone)]
pub struct HashWriter {
    location: Arc<dyn Location>,
    suppress: SuppressFlag,
    ai_ui: Slice<AiUiState>,
}

impl HashWriter {
    pub fn new(location: Arc<dyn Location>, suppress: SuppressFlag, ai_ui: Slice<AiUiState>) -> Self {
        Self {
            location,
            suppress,
            ai_ui,
        }
    }

    /// Set the fragment unless it is already current.
    ///
    /// Returns whether the location was changed. The suppression flag is armed
    /// before the change so the listener skips the resulting notification.
    pub fn write(&self, fragment: &str) -> bool {
        let fragment = normalize(fragment);
        if self.location.fragment() == fragment {
            return false;
        }
        tracing::debug!(fragment = %fragment, "Writing fragment");
        self.suppress.arm();
        self.location.set_fragment(&fragment);
        true
    }

    pub fn write_view(&self, view: View) -> bool {
        self.write(view.fragment())
    }

    pub fn write_session(&self, session_id: &str) -> bool {
        if session_id.is_empty() {
            return refuse_empty_id("session");
        }
        self.write(&session_fragment(session_id))
    }

    pub fn write_crew(&self, tab: CrewTab) -> bool {
        self.write(&crew_fragment(tab))
    }

    pub fn write_project(&self, project_id: &str) -> bool {
        if project_id.is_empty() {
            return refuse_empty_id("project");
        }
        self.write(&project_fragment(project_id))
    }

    /// Write an AI UI fragment. A plugin detail without a tab falls back to
    /// the last tab shown.
    pub fn write_ai_ui(&self, sub: &AiUiRoute) -> bool {
        if !sub.is_addressable() {
            tracing::debug!(route = ?sub, "Not writing an AI UI route that cannot be parsed back");
            return false;
        }
        let last_tab = self.ai_ui.read().plugin_tab;
        self.write(&ai_ui_fragment(sub, last_tab))
    }

    /// Convenience over [`write_ai_ui`](Self::write_ai_ui) for a plugin page
    pub fn write_plugin(&self, plugin_id: &str, tab: Option<PluginTab>) -> bool {
        self.write_ai_ui(&AiUiRoute::PluginDetail {
            plugin_id: plugin_id.to_string(),
            tab,
        })
    }

    pub fn write_route(&self, route: &Route) -> bool {
        if !route.is_addressable() {
            tracing::debug!(route = ?route, "Not writing a route that cannot be parsed back");
            return false;
        }
        match route {
            Route::AiUi(sub) => self.write_ai_ui(sub),
            other => self.write(&to_fragment(other)),
        }
    }
}

fn refuse_empty_id(kind: &'static str) -> bool {
    tracing::debug!(kind, "Not writing a fragment for an empty id");
    false
}
