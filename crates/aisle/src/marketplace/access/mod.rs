//! Route access gating for the couple/vendor navigation shell.
//!
//! `decide` is the pure precedence procedure; `RouteAccessGuard` wraps it
//! with the asynchronous onboarding lookup, its per-`(user, path)` cache, the
//! fail-closed timeout, and the staleness fencing that keeps late lookups
//! from clobbering newer navigations.

pub mod domain;
pub mod guard;
pub mod policy;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{
    OnboardingStatus, SessionState, SiteMap, UserId, UserIdentity, UserProfile, UserRole,
};
pub use guard::{OnboardingLookupError, OnboardingProbe, OnboardingStatusSource, RouteAccessGuard};
pub use policy::{decide, AccessDecision, PendingReason, RedirectTarget};
pub use router::navigation_router;
