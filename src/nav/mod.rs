//! Hash-fragment navigation.
//!
//! Two directions share one [`Location`]:
//!
//! - fragment → state: the [`Router`] listens for changes, parses the
//!   fragment and hands the route to the [`RouteApplier`];
//! - state → fragment: the [`HashWriter`] writes transitions back, arming a
//!   [`SuppressFlag`] so the router ignores the echo.

pub mod applier;
pub mod location;
pub mod resolve;
pub mod router;
pub mod writer;

pub use applier::{NoopRenderHook, Panels, PendingLoads, RenderHook, RouteApplier};
pub use location::{Location, MemoryLocation, NavigationEvent};
pub use resolve::{Resolution, Resolver, RetryPolicy, MAX_RETRY_DELAY};
pub use router::{Listener, Router};
pub use writer::{HashWriter, SuppressFlag};
