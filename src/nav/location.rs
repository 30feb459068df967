//! The platform side of navigation: the current fragment and its change
//! notifications.

use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Notification raised by the platform when the fragment changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    HashChanged { fragment: String },
}

/// Access to the browser location's fragment
pub trait Location: Send + Sync {
    /// Current fragment including the leading `#`, or empty when there is none
    fn fragment(&self) -> String;

    /// Replace the fragment. Implementations raise a change notification when
    /// the value actually changes.
    fn set_fragment(&self, fragment: &str);
}

/// Normalize a fragment the way `location.hash` reports it
pub fn normalize(fragment: &str) -> String {
    if fragment.is_empty() || fragment.starts_with('#') {
        fragment.to_string()
    } else {
        format!("#{fragment}")
    }
}

/// True when a fragment carries a route worth applying on first load
pub fn is_deep_link(fragment: &str) -> bool {
    !matches!(fragment, "" | "#" | "#/")
}

#[derive(Debug)]
struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    fn current(&self) -> &str {
        &self.entries[self.index]
    }
}

/// In-process location with a linear history, back and forward.
///
/// Every change of the current entry is reported on the channel returned
/// by [`MemoryLocation::new`], like `hashchange` in a browser.
#[derive(Debug)]
pub struct MemoryLocation {
    history: Mutex<History>,
    events: mpsc::UnboundedSender<NavigationEvent>,
}

impl MemoryLocation {
    pub fn new(initial: &str) -> (Self, mpsc::UnboundedReceiver<NavigationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let location = Self {
            history: Mutex::new(History {
                entries: vec![normalize(initial)],
                index: 0,
            }),
            events: tx,
        };
        (location, rx)
    }

    /// User-driven navigation (typed URL or clicked link)
    pub fn navigate(&self, fragment: &str) -> bool {
        let fragment = normalize(fragment);
        {
            let mut history = self.history.lock();
            if history.current() == fragment {
                return false;
            }
            let next = history.index + 1;
            history.entries.truncate(next);
            history.entries.push(fragment.clone());
            history.index = next;
        }
        self.notify(fragment);
        true
    }

    pub fn back(&self) -> bool {
        let fragment = {
            let mut history = self.history.lock();
            if history.index == 0 {
                return false;
            }
            history.index -= 1;
            history.current().to_string()
        };
        self.notify(fragment);
        true
    }

    pub fn forward(&self) -> bool {
        let fragment = {
            let mut history = self.history.lock();
            if history.index + 1 >= history.entries.len() {
                return false;
            }
            history.index += 1;
            history.current().to_string()
        };
        self.notify(fragment);
        true
    }

    pub fn entries(&self) -> Vec<String> {
        self.history.lock().entries.clone()
    }

    fn notify(&self, fragment: String) {
        tracing::trace!(fragment = %fragment, "hashchange");
        // Nobody listening is not an error; the navigation still happened
        let _ = self.events.send(NavigationEvent::HashChanged { fragment });
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        self.history.lock().current().to_string()
    }

    fn set_fragment(&self, fragment: &str) {
        self.navigate(fragment);
    }
}
