use std::sync::Arc;

use crate::api::{Backend, Session};
use crate::nav::HashWriter;
use crate::state::{ChatState, Slice};

/// Options for [`ChatPanel::select_session`]
#[derive(Debug, Clone, Copy)]
pub struct SelectOptions {
    /// Write `#/chat/{id}` after selecting. Route application turns this off
    /// since the fragment is already the source of the selection.
    pub sync_hash: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self { sync_hash: true }
    }
}

#[derive(Clone)]
pub struct ChatPanel {
    state: Slice<ChatState>,
    backend: Arc<dyn Backend>,
    writer: HashWriter,
}

impl ChatPanel {
    pub fn new(state: Slice<ChatState>, backend: Arc<dyn Backend>, writer: HashWriter) -> Self {
        Self {
            state,
            backend,
            writer,
        }
    }

    pub fn state(&self) -> &Slice<ChatState> {
        &self.state
    }

    pub async fn reload_sessions(&self) {
        match self.backend.list_sessions().await {
            Ok(sessions) => {
                tracing::debug!(count = sessions.len(), "Loaded sessions");
                self.state.write().sessions = sessions;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load sessions"),
        }
    }

    /// Make `id` the active chat session, fetching it when it is not in the
    /// loaded list. Returns whether a session was selected.
    pub async fn select_session(&self, id: &str, options: SelectOptions) -> bool {
        let known = self.state.read().find_session(id);
        let session = match known {
            Some(session) => session,
            None => match self.backend.get_session(id).await {
                Ok(Some(session)) => {
                    self.remember(session.clone());
                    session
                }
                Ok(None) => {
                    tracing::debug!(session_id = id, "Session not found");
                    return false;
                }
                Err(e) => {
                    tracing::warn!(session_id = id, error = %e, "Failed to load session");
                    return false;
                }
            },
        };

        self.state.write().active_session_id = Some(session.id.clone());
        if options.sync_hash {
            self.writer.write_session(&session.id);
        }
        true
    }

    fn remember(&self, session: Session) {
        let mut state = self.state.write();
        if state.find_session(&session.id).is_none() {
            state.sessions.insert(0, session);
        }
    }
}
