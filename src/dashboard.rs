//! Wiring of state, panels and navigation into one dashboard instance.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::Backend;
use crate::config::Config;
use crate::nav::{
    HashWriter, Listener, Location, NavigationEvent, Panels, PendingLoads, RenderHook, Resolver,
    RouteApplier, Router, SuppressFlag,
};
use crate::panels::{AiUiPanel, AntiBrowserPanel, ChatPanel, MissionsPanel, SelectOptions};
use crate::route::{parse, AiUiRoute, CrewRoute, CrewTab, PluginTab, Route, View};
use crate::state::AppState;

/// Outcome of a user-initiated transition
#[must_use = "dropping a Transition detaches its loads"]
#[derive(Debug)]
pub struct Transition {
    pub loads: PendingLoads,
    /// Whether the fragment changed (it is left alone when already current)
    pub hash_written: bool,
}

pub struct Dashboard {
    state: AppState,
    location: Arc<dyn Location>,
    writer: HashWriter,
    router: Arc<Router>,
    panels: Panels,
}

impl Dashboard {
    pub fn new(
        config: &Config,
        backend: Arc<dyn Backend>,
        location: Arc<dyn Location>,
        hook: Arc<dyn RenderHook>,
    ) -> Self {
        let state = AppState::new();
        state.ai_ui.write().plugin_tab = config.default_plugin_tab;
        let suppress = SuppressFlag::new();
        let writer = HashWriter::new(location.clone(), suppress.clone(), state.ai_ui.clone());

        let panels = Panels {
            chat: ChatPanel::new(state.chat.clone(), backend.clone(), writer.clone()),
            missions: MissionsPanel::new(state.missions.clone(), backend.clone()),
            ai_ui: AiUiPanel::new(state.ai_ui.clone(), backend.clone()),
            anti_browser: AntiBrowserPanel::new(state.anti_browser.clone(), backend.clone()),
        };

        let applier = RouteApplier::new(
            state.view.clone(),
            panels.clone(),
            backend,
            Resolver::new(config.resolve),
            hook,
        )
        .with_default_plugin_tab(config.default_plugin_tab);
        let router = Arc::new(Router::new(location.clone(), Arc::new(applier), suppress));

        Self {
            state,
            location,
            writer,
            router,
            panels,
        }
    }

    /// Start the navigation listener; see [`Router::init`]
    pub fn start(&self, events: mpsc::UnboundedReceiver<NavigationEvent>) -> Option<Listener> {
        self.router.init(events)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    pub fn writer(&self) -> &HashWriter {
        &self.writer
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn current_fragment(&self) -> String {
        self.location.fragment()
    }

    pub fn current_route(&self) -> Route {
        parse(&self.location.fragment())
    }

    /// Wait for every load started so far, including detached ones
    pub async fn settled(&self) {
        self.router.applier().idle().await;
    }

    /// Switch to `route` from inside the application: apply it and record it
    /// in the fragment without the router applying it a second time.
    ///
    /// A route that names an entity by an empty id is refused: nothing is
    /// applied or written.
    pub fn navigate(&self, route: Route) -> Transition {
        if !route.is_addressable() {
            tracing::debug!(route = ?route, "Ignoring transition to an unaddressable route");
            return Transition {
                loads: PendingLoads::default(),
                hash_written: false,
            };
        }
        let route = self.with_remembered_tab(route);
        let hash_written = self.writer.write_route(&route);
        let token = self.router.supersede();
        let loads = self.router.applier().apply(&route, token);
        Transition {
            loads,
            hash_written,
        }
    }

    pub fn show_view(&self, view: View) -> Transition {
        self.navigate(landing_route(view))
    }

    pub fn set_crew_tab(&self, tab: CrewTab) -> Transition {
        self.navigate(Route::Missions(match tab {
            CrewTab::Tasks => CrewRoute::Tasks,
            CrewTab::Projects => CrewRoute::Projects,
        }))
    }

    pub fn open_project(&self, project_id: &str) -> Transition {
        self.navigate(Route::Missions(CrewRoute::Project {
            project_id: project_id.to_string(),
        }))
    }

    pub fn open_plugin(&self, plugin_id: &str, tab: Option<PluginTab>) -> Transition {
        self.navigate(Route::AiUi(AiUiRoute::PluginDetail {
            plugin_id: plugin_id.to_string(),
            tab,
        }))
    }

    /// Switch tabs on the open plugin page
    pub fn set_plugin_tab(&self, tab: PluginTab) -> bool {
        self.panels.ai_ui.set_plugin_tab(tab);
        let selected = self
            .state
            .ai_ui
            .read()
            .selected_plugin
            .as_ref()
            .map(|p| p.id.clone());
        match selected {
            Some(id) => self.writer.write_plugin(&id, Some(tab)),
            None => false,
        }
    }

    /// Open a chat session picked from the session list
    pub async fn open_session(&self, session_id: &str) -> bool {
        if session_id.is_empty() {
            return false;
        }
        self.router.supersede();
        *self.state.view.write() = View::Chat;
        self.panels
            .chat
            .select_session(session_id, SelectOptions { sync_hash: true })
            .await
    }

    fn with_remembered_tab(&self, route: Route) -> Route {
        match route {
            Route::AiUi(AiUiRoute::PluginDetail {
                plugin_id,
                tab: None,
            }) => Route::AiUi(AiUiRoute::PluginDetail {
                plugin_id,
                tab: Some(self.state.ai_ui.read().plugin_tab),
            }),
            other => other,
        }
    }
}

/// Route shown when a view is picked from the navigation bar
fn landing_route(view: View) -> Route {
    match view {
        View::Chat => Route::Chat { session_id: None },
        View::Activity => Route::Activity,
        View::Terminal => Route::Terminal,
        View::AntiBrowser => Route::AntiBrowser,
        View::AiUi => Route::AiUi(AiUiRoute::Home),
        View::Missions => Route::Missions(CrewRoute::Tasks),
    }
}
