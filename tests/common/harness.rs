//! Dashboard wiring for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pawnav::api::{Plugin, PluginStatus, Project, Session};
use pawnav::nav::{Listener, RenderHook};
use pawnav::{Config, Dashboard, Location, MemoryLocation};

use super::FakeBackend;

/// Counts post-render callbacks
#[derive(Default)]
pub struct RecordingHook {
    calls: AtomicUsize,
}

impl RecordingHook {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RenderHook for RecordingHook {
    fn refresh_icons(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// A started dashboard plus handles on its collaborators
pub struct Harness {
    pub dashboard: Arc<Dashboard>,
    pub location: Arc<MemoryLocation>,
    pub backend: Arc<FakeBackend>,
    pub hook: Arc<RecordingHook>,
    pub listener: Listener,
}

impl Harness {
    /// Build and start a dashboard whose location initially shows `fragment`
    pub fn start(backend: FakeBackend, fragment: &str) -> Self {
        Self::start_with_config(Config::default(), backend, fragment)
    }

    pub fn start_with_config(config: Config, backend: FakeBackend, fragment: &str) -> Self {
        let backend = Arc::new(backend);
        let hook = Arc::new(RecordingHook::default());
        let (location, events) = MemoryLocation::new(fragment);
        let location = Arc::new(location);
        let dashboard = Arc::new(Dashboard::new(
            &config,
            backend.clone(),
            location.clone(),
            hook.clone(),
        ));
        let listener = dashboard
            .start(events)
            .expect("first start should initialize the router");

        Self {
            dashboard,
            location,
            backend,
            hook,
            listener,
        }
    }

    /// Simulate the user typing a URL, then wait for the router and every
    /// load it started
    pub async fn visit(&self, fragment: &str) {
        let mut handled = self.dashboard.router().events_handled();
        let before = *handled.borrow_and_update();
        assert!(self.location.navigate(fragment), "fragment did not change");
        handled
            .wait_for(|count| *count > before)
            .await
            .expect("router listener stopped");
        self.dashboard.settled().await;
    }

    /// Wait until the router has consumed `count` events in total
    pub async fn wait_for_events(&self, count: u64) {
        self.dashboard
            .router()
            .events_handled()
            .wait_for(|handled| *handled >= count)
            .await
            .expect("router listener stopped");
        self.dashboard.settled().await;
    }

    pub fn fragment(&self) -> String {
        self.location.fragment()
    }
}

pub fn session(id: &str) -> Session {
    Session {
        id: id.to_string(),
        title: Some(format!("Session {id}")),
        updated_at: None,
    }
}

pub fn project(id: &str) -> Project {
    Project {
        id: id.to_string(),
        name: format!("Project {id}"),
        status: None,
    }
}

pub fn plugin(id: &str) -> Plugin {
    Plugin {
        id: id.to_string(),
        name: format!("Plugin {id}"),
        description: String::new(),
        icon: "package".to_string(),
        version: Some("1.0.0".to_string()),
        port: Some(9100),
        status: PluginStatus::Running,
        web_view: None,
        web_view_path: None,
        openapi: None,
    }
}
