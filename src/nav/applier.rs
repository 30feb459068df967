use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::api::{Backend, Plugin, Project};
use crate::panels::{AiUiPanel, AntiBrowserPanel, ChatPanel, MissionsPanel, SelectOptions};
use crate::route::{AiUiRoute, CrewRoute, CrewTab, PluginTab, Route, View};
use crate::state::Slice;

use super::resolve::{Lookup, Resolver};

/// Post-render callback fired after every route application
pub trait RenderHook: Send + Sync {
    /// Re-scan the rendered view for icon placeholders
    fn refresh_icons(&self);
}

/// Hook for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderHook;

impl RenderHook for NoopRenderHook {
    fn refresh_icons(&self) {}
}

/// Background work started by one route application
#[must_use = "dropping PendingLoads detaches the loads; call settle() to wait for them"]
#[derive(Debug, Default)]
pub struct PendingLoads {
    handles: Vec<JoinHandle<()>>,
}

impl PendingLoads {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every load to finish
    pub async fn settle(self) {
        if self.is_empty() {
            return;
        }
        for result in join_all(self.handles).await {
            if let Err(e) = result {
                if e.is_panic() {
                    tracing::error!(error = %e, "Route load task panicked");
                }
            }
        }
    }

    /// Let the loads finish on their own
    pub fn detach(self) {}
}

/// Panels a route application can touch
#[derive(Clone)]
pub struct Panels {
    pub chat: ChatPanel,
    pub missions: MissionsPanel,
    pub ai_ui: AiUiPanel,
    pub anti_browser: AntiBrowserPanel,
}

/// Turns a [`Route`] into view-state changes and background loads
pub struct RouteApplier {
    view: Slice<View>,
    panels: Panels,
    backend: Arc<dyn Backend>,
    resolver: Resolver,
    hook: Arc<dyn RenderHook>,
    default_plugin_tab: PluginTab,
    tracker: TaskTracker,
}

impl RouteApplier {
    pub fn new(
        view: Slice<View>,
        panels: Panels,
        backend: Arc<dyn Backend>,
        resolver: Resolver,
        hook: Arc<dyn RenderHook>,
    ) -> Self {
        Self {
            view,
            panels,
            backend,
            resolver,
            hook,
            default_plugin_tab: PluginTab::default(),
            tracker: TaskTracker::new(),
        }
    }

    pub fn with_default_plugin_tab(mut self, tab: PluginTab) -> Self {
        self.default_plugin_tab = tab;
        self
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    /// Apply a route. View changes happen before this returns; loads and
    /// entity resolution run in the background, bound to `token`.
    pub fn apply(&self, route: &Route, token: CancellationToken) -> PendingLoads {
        tracing::debug!(route = ?route, "Applying route");
        *self.view.write() = route.view();

        let mut loads = PendingLoads::default();
        match route {
            Route::Chat { session_id } => {
                if let Some(id) = session_id.clone() {
                    let chat = self.panels.chat.clone();
                    self.spawn(&mut loads, async move {
                        chat.select_session(&id, SelectOptions { sync_hash: false })
                            .await;
                    });
                }
            }
            Route::Activity | Route::Terminal => {}
            Route::AntiBrowser => {
                let panel = self.panels.anti_browser.clone();
                self.spawn(&mut loads, async move { panel.ensure_loaded().await });
            }
            Route::Missions(crew) => self.apply_missions(crew, token, &mut loads),
            Route::AiUi(sub) => self.apply_ai_ui(sub, token, &mut loads),
        }

        let hook = self.hook.clone();
        self.spawn(&mut loads, async move {
            tokio::task::yield_now().await;
            hook.refresh_icons();
        });

        loads
    }

    /// Wait until every load spawned so far has finished
    pub async fn idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    fn apply_missions(
        &self,
        crew: &CrewRoute,
        token: CancellationToken,
        loads: &mut PendingLoads,
    ) {
        let missions = self.panels.missions.clone();
        missions.set_tab(crew.tab());

        let panel = missions.clone();
        self.spawn(loads, async move { panel.reload_missions().await });

        if crew.tab() == CrewTab::Projects {
            let panel = missions.clone();
            self.spawn(loads, async move { panel.reload_projects().await });
        }

        if let CrewRoute::Project { project_id } = crew {
            let state = missions.state().clone();
            let recent = missions.state().clone();
            let lookups: Vec<Lookup<Project>> = vec![
                Box::new(move |id: &str| state.read().find_project(id)),
                Box::new(move |id: &str| recent.read().find_recent_project(id)),
            ];
            let backend = self.backend.clone();
            let resolver = self.resolver;
            let id = project_id.clone();
            self.spawn(loads, async move {
                let resolution = resolver
                    .resolve(
                        "project",
                        &id,
                        &lookups,
                        move |id| async move { backend.get_project(&id).await },
                        &token,
                    )
                    .await;
                if let Some(project) = resolution.into_value() {
                    missions.select_project(project);
                }
            });
        }
    }

    fn apply_ai_ui(
        &self,
        sub: &AiUiRoute,
        token: CancellationToken,
        loads: &mut PendingLoads,
    ) {
        let ai_ui = self.panels.ai_ui.clone();

        let panel = ai_ui.clone();
        self.spawn(loads, async move { panel.ensure_loaded().await });

        ai_ui.set_view(sub.view());

        match sub {
            AiUiRoute::Discover => {
                let panel = ai_ui.clone();
                self.spawn(loads, async move { panel.fetch_gallery().await });
            }
            AiUiRoute::PluginDetail { plugin_id, tab } => {
                ai_ui.set_plugin_tab(tab.unwrap_or(self.default_plugin_tab));

                let state = ai_ui.state().clone();
                let lookups: Vec<Lookup<Plugin>> =
                    vec![Box::new(move |id: &str| state.read().find_plugin(id))];
                let backend = self.backend.clone();
                let resolver = self.resolver;
                let id = plugin_id.clone();
                self.spawn(loads, async move {
                    let resolution = resolver
                        .resolve(
                            "plugin",
                            &id,
                            &lookups,
                            move |id| async move { backend.get_plugin(&id).await },
                            &token,
                        )
                        .await;
                    if let Some(plugin) = resolution.into_value() {
                        ai_ui.select_plugin(plugin);
                    }
                });
            }
            _ => {}
        }
    }

    fn spawn<F>(&self, loads: &mut PendingLoads, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        loads.handles.push(self.tracker.spawn(task));
    }
}
