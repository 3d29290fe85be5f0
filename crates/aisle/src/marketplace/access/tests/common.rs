use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::marketplace::access::domain::{SessionState, SiteMap, UserId, UserRole};
use crate::marketplace::access::guard::{
    OnboardingLookupError, OnboardingStatusSource, RouteAccessGuard,
};

pub(super) fn couple(id: &str) -> SessionState {
    SessionState::authenticated(id, UserRole::Couple)
}

pub(super) fn vendor(id: &str) -> SessionState {
    SessionState::authenticated(id, UserRole::Vendor)
}

enum ScriptedOutcome {
    Complete,
    Incomplete,
    Fail(String),
}

/// Onboarding source that always answers the same way, with optional latency
/// and a call counter.
pub(super) struct ScriptedOnboarding {
    outcome: ScriptedOutcome,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedOnboarding {
    pub(super) fn complete() -> Self {
        Self::with_outcome(ScriptedOutcome::Complete)
    }

    pub(super) fn incomplete() -> Self {
        Self::with_outcome(ScriptedOutcome::Incomplete)
    }

    pub(super) fn failing(message: &str) -> Self {
        Self::with_outcome(ScriptedOutcome::Fail(message.to_string()))
    }

    pub(super) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn with_outcome(outcome: ScriptedOutcome) -> Self {
        Self {
            outcome,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl OnboardingStatusSource for ScriptedOnboarding {
    async fn onboarding_complete(&self, _vendor: &UserId) -> Result<bool, OnboardingLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outcome {
            ScriptedOutcome::Complete => Ok(true),
            ScriptedOutcome::Incomplete => Ok(false),
            ScriptedOutcome::Fail(message) => {
                Err(OnboardingLookupError::Unavailable(message.clone()))
            }
        }
    }
}

/// Onboarding source that answers each call from a script of
/// `(latency, flag)` pairs, in call order. Calls past the end of the script
/// answer `false` immediately.
pub(super) struct StaggeredOnboarding {
    script: Mutex<VecDeque<(Duration, bool)>>,
}

impl StaggeredOnboarding {
    pub(super) fn new(script: Vec<(Duration, bool)>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

#[async_trait]
impl OnboardingStatusSource for StaggeredOnboarding {
    async fn onboarding_complete(&self, _vendor: &UserId) -> Result<bool, OnboardingLookupError> {
        let step = {
            let mut script = self.script.lock().expect("script mutex poisoned");
            script.pop_front()
        };
        match step {
            Some((delay, flag)) => {
                tokio::time::sleep(delay).await;
                Ok(flag)
            }
            None => Ok(false),
        }
    }
}

pub(super) fn guard_with<S>(source: S) -> RouteAccessGuard<S>
where
    S: OnboardingStatusSource + 'static,
{
    RouteAccessGuard::new(SiteMap::default(), Arc::new(source), Duration::from_millis(200))
}

pub(super) fn guard_sharing<S>(source: Arc<S>) -> RouteAccessGuard<S>
where
    S: OnboardingStatusSource + 'static,
{
    RouteAccessGuard::new(SiteMap::default(), source, Duration::from_millis(200))
}
