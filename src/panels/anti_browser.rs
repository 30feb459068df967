use std::sync::Arc;

use crate::api::Backend;
use crate::state::{AntiBrowserState, Slice};

/// Anti-detect browser profile manager
#[derive(Clone)]
pub struct AntiBrowserPanel {
    state: Slice<AntiBrowserState>,
    backend: Arc<dyn Backend>,
}

impl AntiBrowserPanel {
    pub fn new(state: Slice<AntiBrowserState>, backend: Arc<dyn Backend>) -> Self {
        Self { state, backend }
    }

    pub fn state(&self) -> &Slice<AntiBrowserState> {
        &self.state
    }

    /// Load profiles unless a previous visit already did
    pub async fn ensure_loaded(&self) {
        if self.state.read().loaded {
            return;
        }
        match self.backend.list_browser_profiles().await {
            Ok(profiles) => {
                tracing::debug!(count = profiles.len(), "Loaded browser profiles");
                let mut state = self.state.write();
                state.profiles = profiles;
                state.loaded = true;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load browser profiles"),
        }
    }
}
