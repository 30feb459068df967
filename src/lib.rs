pub mod api;
pub mod config;
pub mod console;
pub mod dashboard;
pub mod nav;
pub mod panels;
pub mod route;
pub mod state;
pub mod util;

pub use api::{ApiError, Backend, HttpBackend};
pub use config::Config;
pub use console::Console;
pub use dashboard::{Dashboard, Transition};
pub use nav::{HashWriter, Location, MemoryLocation, NavigationEvent, Router};
pub use route::{parse, to_fragment, AiUiRoute, CrewRoute, CrewTab, PluginTab, Route, View};
pub use state::AppState;
