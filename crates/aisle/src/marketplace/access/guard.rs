use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

use super::domain::{OnboardingStatus, SessionState, SiteMap, UserId, UserRole};
use super::policy::{decide, AccessDecision};

/// Read side of the hosted `vendor_profiles` table.
///
/// A vendor without a profile row answers `Ok(false)`; only transport faults
/// surface as errors.
#[async_trait]
pub trait OnboardingStatusSource: Send + Sync {
    async fn onboarding_complete(&self, vendor: &UserId) -> Result<bool, OnboardingLookupError>;
}

/// Raised when the onboarding flag cannot be read at all.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingLookupError {
    #[error("onboarding store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of one onboarding lookup, kept for diagnostics and cache reuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingProbe {
    pub user_id: UserId,
    pub path: String,
    pub status: OnboardingStatus,
    pub resolved_at: DateTime<Utc>,
    /// Failure text when the lookup erred or timed out; the probe then
    /// resolves closed as `Incomplete`.
    pub failure: Option<String>,
}

/// Gates rendering of requested routes against session state and, for
/// vendors, the onboarding flag.
///
/// Decisions are recomputed on every navigation, but the onboarding lookup
/// runs at most once per `(user, path)` pair, is skipped on the auth and
/// onboarding routes, and is bounded by `lookup_timeout`. A generation
/// counter fences concurrent navigations: a lookup that finishes after a
/// newer one started still answers its own caller but never overwrites the
/// newer probe.
pub struct RouteAccessGuard<S> {
    sitemap: SiteMap,
    source: Arc<S>,
    lookup_timeout: Duration,
    generation: AtomicU64,
    last_probe: Mutex<Option<OnboardingProbe>>,
}

impl<S> RouteAccessGuard<S>
where
    S: OnboardingStatusSource + 'static,
{
    pub fn new(sitemap: SiteMap, source: Arc<S>, lookup_timeout: Duration) -> Self {
        Self {
            sitemap,
            source,
            lookup_timeout,
            generation: AtomicU64::new(0),
            last_probe: Mutex::new(None),
        }
    }

    pub fn sitemap(&self) -> &SiteMap {
        &self.sitemap
    }

    /// Decide without waiting: reuses the cached probe when it matches and
    /// otherwise treats the onboarding flag as unresolved. This is the
    /// render-pass view and may come back `Pending`.
    pub fn snapshot(&self, session: &SessionState, path: &str) -> AccessDecision {
        let path = SiteMap::normalize(path);
        let onboarding = match self.lookup_scope(session, &path) {
            Some(user_id) => self
                .cached_status(&user_id, &path)
                .unwrap_or(OnboardingStatus::Unknown),
            None => OnboardingStatus::Unknown,
        };
        decide(&self.sitemap, &path, session, onboarding)
    }

    /// Resolve the onboarding flag (when the route needs it) and decide.
    pub async fn evaluate(&self, session: &SessionState, path: &str) -> AccessDecision {
        let path = SiteMap::normalize(path);
        let onboarding = self.onboarding_for(session, &path).await;
        decide(&self.sitemap, &path, session, onboarding)
    }

    /// Most recent lookup outcome, exposed for diagnostics.
    pub fn last_probe(&self) -> Option<OnboardingProbe> {
        self.last_probe.lock().expect("probe mutex poisoned").clone()
    }

    /// Drop the cached probe and invalidate in-flight lookups, e.g. after a
    /// sign-out or a profile change.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.last_probe.lock().expect("probe mutex poisoned") = None;
    }

    /// The lookup only matters for vendors headed somewhere vendor-scoped,
    /// and never on the auth or onboarding routes themselves.
    fn lookup_scope(&self, session: &SessionState, path: &str) -> Option<UserId> {
        let SessionState::Authenticated { user, profile } = session else {
            return None;
        };
        if profile.user_role != UserRole::Vendor {
            return None;
        }
        if self.sitemap.is_auth(path) || self.sitemap.is_onboarding(path) {
            return None;
        }
        if !self.sitemap.is_vendor_scoped(path) {
            return None;
        }
        Some(user.id.clone())
    }

    fn cached_status(&self, user_id: &UserId, path: &str) -> Option<OnboardingStatus> {
        let guard = self.last_probe.lock().expect("probe mutex poisoned");
        guard
            .as_ref()
            .filter(|probe| probe.user_id == *user_id && probe.path == path)
            .map(|probe| probe.status)
    }

    async fn onboarding_for(&self, session: &SessionState, path: &str) -> OnboardingStatus {
        let Some(user_id) = self.lookup_scope(session, path) else {
            return OnboardingStatus::Unknown;
        };

        if let Some(status) = self.cached_status(&user_id, path) {
            return status;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let lookup = self.source.onboarding_complete(&user_id);
        let (status, failure) = match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(Ok(complete)) => (OnboardingStatus::from_flag(complete), None),
            Ok(Err(err)) => {
                warn!(
                    user_id = %user_id.0,
                    %err,
                    "onboarding lookup failed; treating vendor as not onboarded"
                );
                (OnboardingStatus::Incomplete, Some(err.to_string()))
            }
            Err(_) => {
                warn!(
                    user_id = %user_id.0,
                    timeout_ms = self.lookup_timeout.as_millis() as u64,
                    "onboarding lookup timed out; treating vendor as not onboarded"
                );
                (
                    OnboardingStatus::Incomplete,
                    Some("lookup timed out".to_string()),
                )
            }
        };

        let probe = OnboardingProbe {
            user_id,
            path: path.to_string(),
            status,
            resolved_at: Utc::now(),
            failure,
        };

        // A newer navigation may have started while this lookup ran; its
        // generation supersedes ours and the stale probe is discarded.
        if self.generation.load(Ordering::SeqCst) == generation {
            *self.last_probe.lock().expect("probe mutex poisoned") = Some(probe);
        }

        status
    }
}
