//! Route model for the dashboard's URL fragment.
//!
//! A [`Route`] is the parsed form of a fragment such as `#/ai-ui/plugin/p1/web`.
//! Each variant carries only the sub-state that belongs to its view, so a
//! crew tab can never be attached to a chat route and vice versa.

pub mod fragment;
pub mod parse;

use serde::Serialize;

pub use fragment::to_fragment;
pub use parse::parse;

/// Top-level dashboard view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Chat,
    Activity,
    Terminal,
    AntiBrowser,
    AiUi,
    Missions,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Chat,
        View::Activity,
        View::Terminal,
        View::AntiBrowser,
        View::AiUi,
        View::Missions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Chat => "chat",
            View::Activity => "activity",
            View::Terminal => "terminal",
            View::AntiBrowser => "anti-browser",
            View::AiUi => "ai-ui",
            View::Missions => "missions",
        }
    }

    /// Parse a view name. Unknown names fall back to chat.
    pub fn parse(s: &str) -> Self {
        match s {
            "activity" => View::Activity,
            "terminal" => View::Terminal,
            "anti-browser" => View::AntiBrowser,
            "ai-ui" => View::AiUi,
            "missions" | "crew" => View::Missions,
            _ => View::Chat,
        }
    }

    /// Fragment written when the user switches to this view
    pub fn fragment(&self) -> &'static str {
        match self {
            View::Chat => "#/chat",
            View::Activity => "#/activity",
            View::Terminal => "#/terminal",
            View::AntiBrowser => "#/anti-browser",
            View::AiUi => "#/ai-ui",
            View::Missions => "#/crew",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tab shown inside the missions ("crew") view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrewTab {
    #[default]
    Tasks,
    Projects,
}

impl CrewTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrewTab::Tasks => "tasks",
            CrewTab::Projects => "projects",
        }
    }
}

/// Tab shown on a plugin's detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginTab {
    Overview,
    #[default]
    Web,
    Api,
}

impl PluginTab {
    pub const ALL: [PluginTab; 3] = [PluginTab::Overview, PluginTab::Web, PluginTab::Api];

    pub fn as_str(&self) -> &'static str {
        match self {
            PluginTab::Overview => "overview",
            PluginTab::Web => "web",
            PluginTab::Api => "api",
        }
    }

    /// Strict parse; anything outside the fixed set is rejected
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "overview" => Some(PluginTab::Overview),
            "web" => Some(PluginTab::Web),
            "api" => Some(PluginTab::Api),
            _ => None,
        }
    }
}

/// Flat name of the AI UI sub-view, as shown in the panel header
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiUiView {
    #[default]
    Home,
    Plugins,
    Discover,
    Shell,
    ApiDocs,
    PluginDetail,
    Custom(String),
}

impl AiUiView {
    pub fn as_str(&self) -> &str {
        match self {
            AiUiView::Home => "home",
            AiUiView::Plugins => "plugins",
            AiUiView::Discover => "discover",
            AiUiView::Shell => "shell",
            AiUiView::ApiDocs => "api-docs",
            AiUiView::PluginDetail => "plugin-detail",
            AiUiView::Custom(name) => name,
        }
    }
}

/// Sub-route of the AI UI view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum AiUiRoute {
    #[default]
    Home,
    Plugins,
    Discover,
    Shell,
    ApiDocs,
    /// Sub-view name not known to this build, kept verbatim
    Other { name: String },
    PluginDetail {
        plugin_id: String,
        tab: Option<PluginTab>,
    },
}

impl AiUiRoute {
    pub fn view(&self) -> AiUiView {
        match self {
            AiUiRoute::Home => AiUiView::Home,
            AiUiRoute::Plugins => AiUiView::Plugins,
            AiUiRoute::Discover => AiUiView::Discover,
            AiUiRoute::Shell => AiUiView::Shell,
            AiUiRoute::ApiDocs => AiUiView::ApiDocs,
            AiUiRoute::Other { name } => AiUiView::Custom(name.clone()),
            AiUiRoute::PluginDetail { .. } => AiUiView::PluginDetail,
        }
    }

    /// Whether the sub-route can be written as a fragment that parses back
    /// to itself
    pub fn is_addressable(&self) -> bool {
        match self {
            AiUiRoute::PluginDetail { plugin_id, .. } => !plugin_id.is_empty(),
            AiUiRoute::Other { name } => {
                !name.contains('/')
                    && matches!(AiUiRoute::from_segment(name), AiUiRoute::Other { .. })
            }
            _ => true,
        }
    }

    /// Map a sub-view name (second fragment segment) to a route.
    /// Empty means home; unknown names are kept as-is.
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "" | "home" => AiUiRoute::Home,
            "plugins" => AiUiRoute::Plugins,
            "discover" => AiUiRoute::Discover,
            "shell" => AiUiRoute::Shell,
            "api-docs" => AiUiRoute::ApiDocs,
            other => AiUiRoute::Other {
                name: other.to_string(),
            },
        }
    }
}

/// Sub-route of the missions ("crew") view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum CrewRoute {
    #[default]
    Tasks,
    Projects,
    Project { project_id: String },
}

impl CrewRoute {
    pub fn tab(&self) -> CrewTab {
        match self {
            CrewRoute::Tasks => CrewTab::Tasks,
            CrewRoute::Projects | CrewRoute::Project { .. } => CrewTab::Projects,
        }
    }
}

/// Parsed URL fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum Route {
    Chat { session_id: Option<String> },
    Activity,
    Terminal,
    AntiBrowser,
    AiUi(AiUiRoute),
    Missions(CrewRoute),
}

impl Default for Route {
    fn default() -> Self {
        Route::Chat { session_id: None }
    }
}

impl Route {
    pub fn view(&self) -> View {
        match self {
            Route::Chat { .. } => View::Chat,
            Route::Activity => View::Activity,
            Route::Terminal => View::Terminal,
            Route::AntiBrowser => View::AntiBrowser,
            Route::AiUi(_) => View::AiUi,
            Route::Missions(_) => View::Missions,
        }
    }

    /// Whether the route can be written as a fragment that parses back to
    /// itself. Routes naming an entity by an empty id cannot.
    pub fn is_addressable(&self) -> bool {
        match self {
            Route::Chat { session_id } => session_id.as_deref() != Some(""),
            Route::Missions(CrewRoute::Project { project_id }) => !project_id.is_empty(),
            Route::AiUi(sub) => sub.is_addressable(),
            _ => true,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            Route::Chat { session_id } => session_id.as_deref(),
            _ => None,
        }
    }

    pub fn crew_tab(&self) -> Option<CrewTab> {
        match self {
            Route::Missions(crew) => Some(crew.tab()),
            _ => None,
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        match self {
            Route::Missions(CrewRoute::Project { project_id }) => Some(project_id),
            _ => None,
        }
    }

    pub fn ai_ui_view(&self) -> Option<AiUiView> {
        match self {
            Route::AiUi(sub) => Some(sub.view()),
            _ => None,
        }
    }

    pub fn plugin_id(&self) -> Option<&str> {
        match self {
            Route::AiUi(AiUiRoute::PluginDetail { plugin_id, .. }) => Some(plugin_id),
            _ => None,
        }
    }

    pub fn plugin_tab(&self) -> Option<PluginTab> {
        match self {
            Route::AiUi(AiUiRoute::PluginDetail { tab, .. }) => *tab,
            _ => None,
        }
    }
}

impl std::str::FromStr for Route {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&to_fragment(self))
    }
}
