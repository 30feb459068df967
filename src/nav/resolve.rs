//! Deferred resolution of entities referenced by id in a route.
//!
//! A link like `#/project/X` can be followed before the list that contains
//! `X` has finished loading. Resolution escalates in a fixed order: look in
//! the loaded collection, wait and look again (possibly in several
//! collections), then fetch the entity directly. Every wait races the route's
//! cancellation token so a newer navigation abandons the old lookup.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::ApiError;

/// Lookup of an entity by id in an in-memory collection
pub type Lookup<T> = Box<dyn Fn(&str) -> Option<T> + Send + Sync>;

/// Bounded retry schedule for deferred resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Delayed lookups before falling back to a direct fetch
    pub max_attempts: u32,
    /// Wait before the first delayed lookup
    pub delay: Duration,
    /// Multiplier applied to the wait after each attempt
    pub backoff: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::from_millis(500),
            backoff: 2.0,
        }
    }
}

/// Longest single wait between delayed lookups
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

impl RetryPolicy {
    /// Wait before delayed attempt `attempt` (1-based), capped at
    /// [`MAX_RETRY_DELAY`]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if self.delay.is_zero() {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let factor = self.backoff.max(1.0).powi(exponent);
        Duration::try_from_secs_f64(self.delay.as_secs_f64() * factor)
            .map_or(MAX_RETRY_DELAY, |wait| wait.min(MAX_RETRY_DELAY))
    }
}

/// How a resolution ended
#[derive(Debug)]
pub enum Resolution<T> {
    /// Found in the loaded collection on the first look
    Immediate(T),
    /// Found after waiting `attempt` times
    Retried { value: T, attempt: u32 },
    /// Found by the direct fetch
    Fetched(T),
    NotFound,
    Failed(ApiError),
    Cancelled,
}

impl<T> Resolution<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Resolution::Immediate(value)
            | Resolution::Retried { value, .. }
            | Resolution::Fetched(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Resolution::Immediate(value)
            | Resolution::Retried { value, .. }
            | Resolution::Fetched(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Resolution::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    policy: RetryPolicy,
}

impl Resolver {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Resolve `id` against `lookups`, then `fetch`.
    ///
    /// The immediate look uses only the first lookup; delayed attempts try
    /// every lookup in order.
    pub async fn resolve<T, F, Fut>(
        &self,
        kind: &'static str,
        id: &str,
        lookups: &[Lookup<T>],
        fetch: F,
        token: &CancellationToken,
    ) -> Resolution<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Option<T>, ApiError>>,
    {
        if token.is_cancelled() {
            return Resolution::Cancelled;
        }

        if let Some(value) = lookups.first().and_then(|lookup| lookup(id)) {
            return Resolution::Immediate(value);
        }

        for attempt in 1..=self.policy.max_attempts {
            let wait = self.policy.delay_for(attempt);
            tracing::debug!(
                kind,
                id,
                attempt,
                wait_ms = wait.as_millis() as u64,
                "Not loaded yet, retrying later"
            );

            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(kind, id, "Resolution superseded");
                    return Resolution::Cancelled;
                }
                _ = tokio::time::sleep(wait) => {}
            }

            if let Some(value) = lookups.iter().find_map(|lookup| lookup(id)) {
                return Resolution::Retried { value, attempt };
            }
        }

        tracing::debug!(kind, id, "Not in any loaded collection, fetching directly");
        let fetched = tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!(kind, id, "Resolution superseded");
                return Resolution::Cancelled;
            }
            result = fetch(id.to_string()) => result,
        };

        match fetched {
            Ok(Some(value)) => Resolution::Fetched(value),
            Ok(None) => {
                tracing::debug!(kind, id, "Giving up: not found");
                Resolution::NotFound
            }
            Err(e) => {
                tracing::warn!(
                    kind,
                    id,
                    error = %e,
                    transient = e.is_transient(),
                    "Giving up: direct fetch failed"
                );
                Resolution::Failed(e)
            }
        }
    }
}
