//! Dashboard panels driven by navigation.
//!
//! Each panel owns one state slice and loads it from the [`Backend`]. Load
//! failures are logged here and never propagate to the caller, so a route
//! always applies even when the server is unhappy.
//!
//! [`Backend`]: crate::api::Backend

mod ai_ui;
mod anti_browser;
mod chat;
mod missions;

pub use ai_ui::AiUiPanel;
pub use anti_browser::AntiBrowserPanel;
pub use chat::{ChatPanel, SelectOptions};
pub use missions::MissionsPanel;
