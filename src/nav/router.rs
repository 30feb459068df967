use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::route::parse;

use super::applier::{PendingLoads, RouteApplier};
use super::location::{is_deep_link, Location, NavigationEvent};
use super::writer::SuppressFlag;

/// Handle returned by the first [`Router::init`] call
pub struct Listener {
    /// Loads started by the deep link present at startup, if any
    pub initial: Option<PendingLoads>,
    /// The task consuming navigation events
    pub task: JoinHandle<()>,
}

/// Listens for fragment changes and applies the routes they describe.
///
/// Changes the application made itself (through [`HashWriter`]) are skipped
/// once via the shared [`SuppressFlag`].
///
/// [`HashWriter`]: super::HashWriter
pub struct Router {
    location: Arc<dyn Location>,
    applier: Arc<RouteApplier>,
    suppress: SuppressFlag,
    initialized: AtomicBool,
    current: Mutex<CancellationToken>,
    handled: watch::Sender<u64>,
}

impl Router {
    pub fn new(
        location: Arc<dyn Location>,
        applier: Arc<RouteApplier>,
        suppress: SuppressFlag,
    ) -> Self {
        let (handled, _) = watch::channel(0);
        Self {
            location,
            applier,
            suppress,
            initialized: AtomicBool::new(false),
            current: Mutex::new(CancellationToken::new()),
            handled,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn applier(&self) -> &Arc<RouteApplier> {
        &self.applier
    }

    /// Start listening. Only the first call has any effect; later calls
    /// return `None`.
    ///
    /// A route already present in the location is applied immediately so
    /// deep links work on first load.
    pub fn init(
        self: &Arc<Self>,
        mut events: mpsc::UnboundedReceiver<NavigationEvent>,
    ) -> Option<Listener> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::debug!("Router already initialized");
            return None;
        }

        let fragment = self.location.fragment();
        let initial = if is_deep_link(&fragment) {
            tracing::info!(fragment = %fragment, "Applying initial route");
            Some(self.apply_fragment(&fragment))
        } else {
            None
        };

        let router = Arc::clone(self);
        let task = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    NavigationEvent::HashChanged { fragment } => {
                        tracing::trace!(fragment = %fragment, "Navigation event");
                        if let Some(loads) = router.handle_change() {
                            loads.detach();
                        }
                    }
                }
                router.handled.send_modify(|count| *count += 1);
            }
            tracing::debug!("Navigation event stream closed");
        });

        Some(Listener { initial, task })
    }

    /// React to one fragment change. Returns `None` when the change was
    /// self-inflicted and has been swallowed.
    pub fn handle_change(&self) -> Option<PendingLoads> {
        if self.suppress.take() {
            tracing::trace!("Skipping change caused by our own write");
            return None;
        }
        let fragment = self.location.fragment();
        Some(self.apply_fragment(&fragment))
    }

    /// Cancel work tied to the current route and hand out a token for the
    /// next one
    pub fn supersede(&self) -> CancellationToken {
        let mut current = self.current.lock();
        current.cancel();
        *current = CancellationToken::new();
        current.clone()
    }

    /// Count of navigation events the listener has processed, suppressed or not
    pub fn events_handled(&self) -> watch::Receiver<u64> {
        self.handled.subscribe()
    }

    fn apply_fragment(&self, fragment: &str) -> PendingLoads {
        let route = parse(fragment);
        tracing::debug!(fragment, view = %route.view(), "Navigating");
        let token = self.supersede();
        let loads = self.applier.apply(&route, token);
        tracing::trace!(loads = loads.len(), "Route applied");
        loads
    }
}
