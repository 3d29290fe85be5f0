use super::common::*;
use crate::marketplace::access::domain::{OnboardingStatus, SessionState};
use crate::marketplace::access::policy::{AccessDecision, PendingReason, RedirectTarget};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn onboarded_vendor_renders_vendor_routes() {
    let source = Arc::new(ScriptedOnboarding::complete());
    let guard = guard_sharing(source.clone());

    let decision = guard.evaluate(&vendor("v-1"), "/vendor/dashboard").await;
    assert_eq!(decision, AccessDecision::Render);
    assert_eq!(source.calls(), 1);

    let probe = guard.last_probe().expect("probe recorded");
    assert_eq!(probe.user_id.0, "v-1");
    assert_eq!(probe.path, "/vendor/dashboard");
    assert_eq!(probe.status, OnboardingStatus::Complete);
    assert!(probe.failure.is_none());
}

#[tokio::test]
async fn lookup_runs_once_per_user_and_path() {
    let source = Arc::new(ScriptedOnboarding::complete());
    let guard = guard_sharing(source.clone());
    let session = vendor("v-1");

    guard.evaluate(&session, "/vendor/dashboard").await;
    guard.evaluate(&session, "/vendor/dashboard").await;
    assert_eq!(source.calls(), 1);

    // A different vendor path is a different cache key.
    guard.evaluate(&session, "/vendor/bookings").await;
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn trailing_slashes_share_one_cache_entry() {
    let source = Arc::new(ScriptedOnboarding::complete());
    let guard = guard_sharing(source.clone());
    let session = vendor("v-1");

    let first = guard.evaluate(&session, "/vendor/dashboard/").await;
    let second = guard.evaluate(&session, "/vendor/dashboard").await;

    assert_eq!(first, AccessDecision::Render);
    assert_eq!(second, AccessDecision::Render);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn lookup_failure_fails_closed_toward_onboarding() {
    let guard = guard_with(ScriptedOnboarding::failing("store offline"));

    let decision = guard.evaluate(&vendor("v-1"), "/vendor/bookings").await;
    assert_eq!(
        decision,
        AccessDecision::Redirect(RedirectTarget::VendorOnboarding)
    );

    let probe = guard.last_probe().expect("probe recorded");
    assert_eq!(probe.status, OnboardingStatus::Incomplete);
    assert!(probe.failure.expect("failure recorded").contains("store offline"));
}

#[tokio::test(start_paused = true)]
async fn slow_lookup_times_out_and_fails_closed() {
    let source = ScriptedOnboarding::complete().with_delay(Duration::from_millis(500));
    let guard = guard_with(source);

    let decision = guard.evaluate(&vendor("v-1"), "/vendor/bookings").await;
    assert_eq!(
        decision,
        AccessDecision::Redirect(RedirectTarget::VendorOnboarding)
    );

    let probe = guard.last_probe().expect("probe recorded");
    assert_eq!(probe.status, OnboardingStatus::Incomplete);
    assert!(probe.failure.expect("failure recorded").contains("timed out"));
}

#[tokio::test(start_paused = true)]
async fn stale_lookup_never_overwrites_a_newer_probe() {
    // First navigation answers slowly (and positively), second quickly (and
    // negatively). The slow answer still serves its own caller, but the probe
    // kept for reuse must be the newer one.
    let source = StaggeredOnboarding::new(vec![
        (Duration::from_millis(100), true),
        (Duration::from_millis(10), false),
    ]);
    let guard = guard_sharing(Arc::new(source));
    let session = vendor("v-1");

    let (slow, fast) = tokio::join!(
        guard.evaluate(&session, "/vendor/analytics"),
        guard.evaluate(&session, "/vendor/bookings"),
    );

    assert_eq!(slow, AccessDecision::Render);
    assert_eq!(fast, AccessDecision::Redirect(RedirectTarget::VendorOnboarding));

    let probe = guard.last_probe().expect("probe recorded");
    assert_eq!(probe.path, "/vendor/bookings");
    assert_eq!(probe.status, OnboardingStatus::Incomplete);
}

#[tokio::test]
async fn reset_clears_the_cache_and_forces_a_fresh_lookup() {
    let source = Arc::new(ScriptedOnboarding::complete());
    let guard = guard_sharing(source.clone());
    let session = vendor("v-1");

    guard.evaluate(&session, "/vendor/dashboard").await;
    assert_eq!(source.calls(), 1);

    guard.reset();
    assert!(guard.last_probe().is_none());

    guard.evaluate(&session, "/vendor/dashboard").await;
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn snapshot_reports_pending_until_a_lookup_lands() {
    let source = Arc::new(ScriptedOnboarding::complete());
    let guard = guard_sharing(source.clone());
    let session = vendor("v-1");

    let before = guard.snapshot(&session, "/vendor/dashboard");
    assert_eq!(
        before,
        AccessDecision::Pending(PendingReason::OnboardingCheck)
    );
    assert_eq!(source.calls(), 0);

    guard.evaluate(&session, "/vendor/dashboard").await;

    let after = guard.snapshot(&session, "/vendor/dashboard");
    assert_eq!(after, AccessDecision::Render);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn auth_and_onboarding_routes_skip_the_lookup() {
    let source = Arc::new(ScriptedOnboarding::incomplete());
    let guard = guard_sharing(source.clone());
    let session = vendor("v-1");

    let auth = guard.evaluate(&session, "/auth").await;
    assert_eq!(auth, AccessDecision::Render);

    let onboarding = guard.evaluate(&session, "/vendor/onboarding").await;
    assert_eq!(onboarding, AccessDecision::Render);

    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn non_vendor_sessions_never_trigger_lookups() {
    let source = Arc::new(ScriptedOnboarding::complete());
    let guard = guard_sharing(source.clone());

    let anonymous = guard.evaluate(&SessionState::Anonymous, "/dashboard").await;
    assert_eq!(anonymous, AccessDecision::Redirect(RedirectTarget::Auth));

    let couple_decision = guard.evaluate(&couple("c-1"), "/vendor/dashboard").await;
    assert_eq!(
        couple_decision,
        AccessDecision::Redirect(RedirectTarget::CoupleDashboard)
    );

    let resolving = guard.evaluate(&SessionState::Resolving, "/dashboard").await;
    assert_eq!(
        resolving,
        AccessDecision::Pending(PendingReason::SessionResolving)
    );

    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn vendors_off_vendor_scope_skip_the_lookup() {
    let source = Arc::new(ScriptedOnboarding::incomplete());
    let guard = guard_sharing(source.clone());

    let decision = guard.evaluate(&vendor("v-1"), "/dashboard").await;
    assert_eq!(
        decision,
        AccessDecision::Redirect(RedirectTarget::VendorDashboard)
    );
    assert_eq!(source.calls(), 0);
}
