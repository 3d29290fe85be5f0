use serde::{Deserialize, Serialize};

use super::domain::{OnboardingStatus, SessionState, SiteMap, UserRole};

/// What the navigation shell should do with a requested route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// Keep the blocking loading indicator up.
    Pending(PendingReason),
    /// Show the requested route.
    Render,
    /// Navigate elsewhere instead.
    Redirect(RedirectTarget),
}

impl AccessDecision {
    pub const fn label(self) -> &'static str {
        match self {
            AccessDecision::Pending(_) => "pending",
            AccessDecision::Render => "render",
            AccessDecision::Redirect(_) => "redirect",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            AccessDecision::Pending(reason) => format!("pending: {}", reason.summary()),
            AccessDecision::Render => "render requested route".to_string(),
            AccessDecision::Redirect(target) => format!("redirect to {}", target.label()),
        }
    }
}

/// Why rendering is currently blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingReason {
    SessionResolving,
    OnboardingCheck,
}

impl PendingReason {
    pub const fn summary(self) -> &'static str {
        match self {
            PendingReason::SessionResolving => "session still resolving",
            PendingReason::OnboardingCheck => "onboarding status check in flight",
        }
    }
}

/// Destination of a redirect decision, resolved against the sitemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectTarget {
    Auth,
    VendorOnboarding,
    CoupleDashboard,
    VendorDashboard,
}

impl RedirectTarget {
    pub const fn label(self) -> &'static str {
        match self {
            RedirectTarget::Auth => "auth",
            RedirectTarget::VendorOnboarding => "vendor_onboarding",
            RedirectTarget::CoupleDashboard => "couple_dashboard",
            RedirectTarget::VendorDashboard => "vendor_dashboard",
        }
    }

    pub fn location<'a>(&self, sitemap: &'a SiteMap) -> &'a str {
        match self {
            RedirectTarget::Auth => &sitemap.auth_path,
            RedirectTarget::VendorOnboarding => &sitemap.vendor_onboarding_path,
            RedirectTarget::CoupleDashboard => &sitemap.couple_dashboard_path,
            RedirectTarget::VendorDashboard => &sitemap.vendor_dashboard_path,
        }
    }
}

/// Decide what to do with `path`, first matching rule wins.
///
/// The order is load-bearing: unresolved state blocks everything, the auth
/// entry point always renders, anonymous visitors go to auth, vendors with
/// unfinished onboarding are forced into the onboarding flow before any other
/// vendor page, non-vendors stay out of vendor pages, vendors are steered off
/// couple pages (the shared profile page excepted), and whatever survives
/// renders. `path` is expected to be normalized already.
pub fn decide(
    sitemap: &SiteMap,
    path: &str,
    session: &SessionState,
    onboarding: OnboardingStatus,
) -> AccessDecision {
    let vendor_scoped = sitemap.is_vendor_scoped(path);
    let onboarding_route = sitemap.is_onboarding(path);

    match session {
        SessionState::Resolving => {
            return AccessDecision::Pending(PendingReason::SessionResolving);
        }
        SessionState::Authenticated { profile, .. }
            if profile.user_role == UserRole::Vendor
                && vendor_scoped
                && !onboarding_route
                && onboarding == OnboardingStatus::Unknown =>
        {
            return AccessDecision::Pending(PendingReason::OnboardingCheck);
        }
        _ => {}
    }

    if sitemap.is_auth(path) {
        return AccessDecision::Render;
    }

    let SessionState::Authenticated { profile, .. } = session else {
        return AccessDecision::Redirect(RedirectTarget::Auth);
    };
    let role = profile.user_role;

    if role == UserRole::Vendor
        && onboarding == OnboardingStatus::Incomplete
        && vendor_scoped
        && !onboarding_route
    {
        return AccessDecision::Redirect(RedirectTarget::VendorOnboarding);
    }

    if vendor_scoped && role != UserRole::Vendor {
        return AccessDecision::Redirect(RedirectTarget::CoupleDashboard);
    }

    if !vendor_scoped && !sitemap.is_profile(path) && role == UserRole::Vendor {
        return AccessDecision::Redirect(RedirectTarget::VendorDashboard);
    }

    AccessDecision::Render
}
