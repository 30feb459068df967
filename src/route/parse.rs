//! Fragment parser.
//!
//! Total over all input: anything unrecognized degrades to the most specific
//! route that the valid leading segments describe, and ultimately to the
//! default chat route.

use super::{AiUiRoute, CrewRoute, PluginTab, Route};

/// Parse a URL fragment (`#/view/...`, `/view/...` or `view/...`) into a route
pub fn parse(fragment: &str) -> Route {
    let path = fragment.strip_prefix('#').unwrap_or(fragment);
    let path = path.strip_prefix('/').unwrap_or(path);
    let segments: Vec<&str> = path.split('/').collect();

    let head = segments.first().copied().unwrap_or("");
    let arg = |index: usize| segments.get(index).copied().filter(|s| !s.is_empty());

    match head {
        "chat" => Route::Chat {
            session_id: arg(1).map(decode_segment),
        },
        "activity" => Route::Activity,
        "terminal" => Route::Terminal,
        "anti-browser" => Route::AntiBrowser,
        "crew" => match arg(1) {
            Some("projects") => Route::Missions(CrewRoute::Projects),
            _ => Route::Missions(CrewRoute::Tasks),
        },
        // A bare `#/project` has nothing to select and lands on the default route
        "project" => match arg(1) {
            Some(id) => Route::Missions(CrewRoute::Project {
                project_id: decode_segment(id),
            }),
            None => Route::default(),
        },
        "ai-ui" => Route::AiUi(parse_ai_ui(arg(1), arg(2), arg(3))),
        _ => Route::default(),
    }
}

fn parse_ai_ui(sub: Option<&str>, id: Option<&str>, tab: Option<&str>) -> AiUiRoute {
    match (sub, id) {
        (Some("plugin"), Some(id)) => AiUiRoute::PluginDetail {
            plugin_id: decode_segment(id),
            tab: tab.and_then(PluginTab::parse),
        },
        (Some(sub), _) => AiUiRoute::from_segment(sub),
        (None, _) => AiUiRoute::Home,
    }
}

/// Percent-decode a path segment, keeping the raw text when the escape is malformed
pub(crate) fn decode_segment(raw: &str) -> String {
    if !has_valid_escapes(raw) {
        return raw.to_string();
    }
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::debug!(segment = raw, error = %e, "Fragment segment is not UTF-8 after decoding");
            raw.to_string()
        }
    }
}

// urlencoding passes malformed `%` sequences through untouched; the raw
// fallback has to apply to the whole segment instead.
fn has_valid_escapes(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
