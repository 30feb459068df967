//! Integration tests for fragment-driven navigation
//!
//! Covers the round trip between the location and the view state: external
//! changes are applied, the dashboard's own writes are not applied twice.

use super::common::{plugin, project, session, FakeBackend, Harness};
use pawnav::route::AiUiView;
use pawnav::{CrewTab, MemoryLocation, PluginTab, View};

/// A view switch made by the dashboard is written once and never re-applied
#[tokio::test]
async fn test_own_write_is_not_reapplied() {
    let h = Harness::start(FakeBackend::new(), "");

    let transition = h.dashboard.show_view(View::Terminal);
    assert!(transition.hash_written);
    transition.loads.settle().await;
    h.wait_for_events(1).await;

    assert_eq!(h.fragment(), "#/terminal");
    assert_eq!(h.dashboard.state().current_view(), View::Terminal);
    assert_eq!(h.hook.count(), 1, "echo of our own write was applied");

    // The next external change goes through normally
    h.visit("#/activity").await;
    assert_eq!(h.dashboard.state().current_view(), View::Activity);
    assert_eq!(h.hook.count(), 2);
}

/// Writing the fragment that is already current changes nothing
#[tokio::test]
async fn test_rewriting_current_fragment_is_noop() {
    let h = Harness::start(FakeBackend::new(), "#/terminal");
    h.dashboard.settled().await;

    let transition = h.dashboard.show_view(View::Terminal);
    assert!(!transition.hash_written);
    transition.loads.settle().await;

    assert_eq!(h.location.entries(), vec!["#/terminal".to_string()]);
}

#[tokio::test]
async fn test_init_is_idempotent() {
    let h = Harness::start(FakeBackend::new(), "");
    let (_other, events) = MemoryLocation::new("");

    assert!(h.dashboard.router().is_initialized());
    assert!(h.dashboard.start(events).is_none());

    // Still exactly one listener
    h.visit("#/terminal").await;
    assert_eq!(h.hook.count(), 1);
}

#[tokio::test]
async fn test_deep_link_applied_on_start() {
    let backend = FakeBackend::new().with_projects(vec![project("alpha"), project("beta")]);
    let h = Harness::start(backend, "#/crew/projects");
    assert!(h.listener.initial.is_some());
    h.dashboard.settled().await;

    let state = h.dashboard.state();
    assert_eq!(state.current_view(), View::Missions);
    let missions = state.missions.read();
    assert_eq!(missions.crew_tab, CrewTab::Projects);
    assert_eq!(missions.projects.len(), 2);
    drop(missions);

    assert!(h.backend.was_called("list_missions"));
    assert!(h.backend.was_called("list_projects"));
    assert_eq!(h.fragment(), "#/crew/projects");
    assert_eq!(h.hook.count(), 1);
}

#[tokio::test]
async fn test_empty_fragment_is_not_a_deep_link() {
    for fragment in ["", "#", "#/"] {
        let h = Harness::start(FakeBackend::new(), fragment);
        assert!(h.listener.initial.is_none(), "{fragment:?} applied on start");
        assert_eq!(h.dashboard.state().current_view(), View::Chat);
    }
}

#[tokio::test]
async fn test_unknown_view_falls_back_to_chat() {
    let h = Harness::start(FakeBackend::new(), "#/terminal");
    h.dashboard.settled().await;

    h.visit("#/nowhere/at/all").await;
    assert_eq!(h.dashboard.state().current_view(), View::Chat);
}

/// A chat deep link selects the session without writing the fragment back
#[tokio::test]
async fn test_chat_link_does_not_rewrite_fragment() {
    let backend = FakeBackend::new().with_session_by_id_only(session("s 1"));
    let h = Harness::start(backend, "");

    h.visit("#/chat/s%201").await;

    let chat = h.dashboard.state().chat.read().clone();
    assert_eq!(chat.active_session_id.as_deref(), Some("s 1"));
    assert_eq!(chat.sessions.len(), 1, "fetched session should be remembered");
    assert!(h.backend.was_called("get_session:s 1"));
    assert_eq!(
        h.location.entries(),
        vec![String::new(), "#/chat/s%201".to_string()]
    );
}

#[tokio::test]
async fn test_unknown_session_leaves_selection_alone() {
    let backend = FakeBackend::new().with_sessions(vec![session("s1")]);
    let h = Harness::start(backend, "");
    assert!(h.dashboard.open_session("s1").await);
    h.wait_for_events(1).await;

    h.visit("#/chat/ghost").await;

    let chat = h.dashboard.state().chat.read();
    assert_eq!(chat.active_session_id.as_deref(), Some("s1"));
}

/// Picking a session from the list records it in the fragment
#[tokio::test]
async fn test_open_session_writes_fragment() {
    let backend = FakeBackend::new().with_sessions(vec![session("s1"), session("s2")]);
    let h = Harness::start(backend, "#/terminal");
    h.dashboard.settled().await;
    h.dashboard.panels().chat.reload_sessions().await;
    let applied = h.hook.count();

    assert!(h.dashboard.open_session("s2").await);
    h.wait_for_events(1).await;

    assert_eq!(h.fragment(), "#/chat/s2");
    assert_eq!(h.dashboard.state().current_view(), View::Chat);
    assert_eq!(
        h.dashboard.state().chat.read().active_session_id.as_deref(),
        Some("s2")
    );
    assert!(!h.backend.was_called("get_session:s2"));
    assert_eq!(h.hook.count(), applied, "own write was applied again");
}

#[tokio::test]
async fn test_back_and_forward_reapply_routes() {
    let h = Harness::start(FakeBackend::new(), "");

    h.visit("#/terminal").await;
    h.visit("#/anti-browser").await;
    assert!(h.dashboard.state().anti_browser.read().loaded);

    assert!(h.location.back());
    h.wait_for_events(3).await;
    assert_eq!(h.dashboard.state().current_view(), View::Terminal);

    assert!(h.location.forward());
    h.wait_for_events(4).await;
    assert_eq!(h.dashboard.state().current_view(), View::AntiBrowser);

    let profile_loads = h
        .backend
        .calls()
        .iter()
        .filter(|c| *c == "list_browser_profiles")
        .count();
    assert_eq!(profile_loads, 1, "profiles should only load on first visit");
}

#[tokio::test]
async fn test_crew_tab_switch() {
    let backend = FakeBackend::new().with_projects(vec![project("alpha")]);
    let h = Harness::start(backend, "");

    let transition = h.dashboard.set_crew_tab(CrewTab::Projects);
    transition.loads.settle().await;
    h.wait_for_events(1).await;

    assert_eq!(h.fragment(), "#/crew/projects");
    let missions = h.dashboard.state().missions.read();
    assert_eq!(missions.crew_tab, CrewTab::Projects);
    assert_eq!(missions.projects.len(), 1);
}

#[tokio::test]
async fn test_ai_ui_sub_views() {
    let h = Harness::start(FakeBackend::new(), "");

    h.visit("#/ai-ui/discover").await;
    assert_eq!(h.dashboard.state().ai_ui.read().view, AiUiView::Discover);
    assert!(h.backend.was_called("gallery"));

    h.visit("#/ai-ui/marketplace").await;
    assert_eq!(
        h.dashboard.state().ai_ui.read().view,
        AiUiView::Custom("marketplace".to_string())
    );

    h.visit("#/ai-ui").await;
    assert_eq!(h.dashboard.state().ai_ui.read().view, AiUiView::Home);

    let plugin_loads = h
        .backend
        .calls()
        .iter()
        .filter(|c| *c == "list_plugins")
        .count();
    assert_eq!(plugin_loads, 1);
}

/// A plugin link without a tab reuses the tab shown last
#[tokio::test(start_paused = true)]
async fn test_plugin_tab_is_remembered() {
    let backend = FakeBackend::new().with_plugins(vec![plugin("counter"), plugin("notes")]);
    let h = Harness::start(backend, "");

    h.visit("#/ai-ui/plugin/counter/api").await;
    {
        let ai_ui = h.dashboard.state().ai_ui.read();
        assert_eq!(ai_ui.plugin_tab, PluginTab::Api);
        assert_eq!(ai_ui.view, AiUiView::PluginDetail);
        assert_eq!(
            ai_ui.selected_plugin.as_ref().map(|p| p.id.as_str()),
            Some("counter")
        );
    }

    let transition = h.dashboard.open_plugin("notes", None);
    transition.loads.settle().await;
    h.wait_for_events(2).await;

    assert_eq!(h.fragment(), "#/ai-ui/plugin/notes/api");
    assert_eq!(
        h.dashboard
            .state()
            .ai_ui
            .read()
            .selected_plugin
            .as_ref()
            .map(|p| p.id.clone()),
        Some("notes".to_string())
    );

    assert!(h.dashboard.set_plugin_tab(PluginTab::Overview));
    h.wait_for_events(3).await;
    assert_eq!(h.fragment(), "#/ai-ui/plugin/notes/overview");
    assert_eq!(h.dashboard.state().ai_ui.read().plugin_tab, PluginTab::Overview);
}

/// Transitions naming an empty id leave the view and the history untouched
#[tokio::test]
async fn test_empty_ids_are_refused() {
    let h = Harness::start(FakeBackend::new(), "#/terminal");
    h.dashboard.settled().await;
    let applied = h.hook.count();

    let transition = h.dashboard.open_project("");
    assert!(!transition.hash_written);
    assert!(transition.loads.is_empty());

    let transition = h.dashboard.open_plugin("", Some(PluginTab::Web));
    assert!(!transition.hash_written);
    assert!(transition.loads.is_empty());

    assert!(!h.dashboard.open_session("").await);
    h.dashboard.settled().await;

    assert_eq!(h.dashboard.state().current_view(), View::Terminal);
    assert_eq!(h.location.entries(), vec!["#/terminal".to_string()]);
    assert_eq!(h.hook.count(), applied);
    assert!(h.backend.calls().is_empty());
}
