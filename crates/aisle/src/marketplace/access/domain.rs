use serde::{Deserialize, Serialize};

/// Identifier wrapper for account holders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Role attached to an authenticated profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Couple,
    Vendor,
}

impl UserRole {
    pub const fn label(self) -> &'static str {
        match self {
            UserRole::Couple => "couple",
            UserRole::Vendor => "vendor",
        }
    }
}

/// Authenticated identity as reported by the hosted auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
}

/// Profile attributes the route guard consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_role: UserRole,
}

/// Where session resolution currently stands.
///
/// `Resolving` covers both the session handshake and the profile fetch; the
/// guard blocks rendering until the provider settles on one of the other two
/// states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Resolving,
    Anonymous,
    Authenticated {
        user: UserIdentity,
        profile: UserProfile,
    },
}

impl SessionState {
    pub fn authenticated(user_id: impl Into<String>, user_role: UserRole) -> Self {
        Self::Authenticated {
            user: UserIdentity {
                id: UserId(user_id.into()),
            },
            profile: UserProfile { user_role },
        }
    }

    pub fn role(&self) -> Option<UserRole> {
        match self {
            Self::Authenticated { profile, .. } => Some(profile.user_role),
            _ => None,
        }
    }
}

/// Resolution state of the vendor onboarding flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    Unknown,
    Complete,
    Incomplete,
}

impl OnboardingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OnboardingStatus::Unknown => "unknown",
            OnboardingStatus::Complete => "complete",
            OnboardingStatus::Incomplete => "incomplete",
        }
    }

    pub(crate) fn from_flag(complete: bool) -> Self {
        if complete {
            Self::Complete
        } else {
            Self::Incomplete
        }
    }
}

/// Route layout the guard classifies request paths against.
///
/// Paths are compared after normalization: a leading slash is ensured and
/// trailing slashes are trimmed, so `/vendor/dashboard/` and
/// `/vendor/dashboard` are the same route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMap {
    pub auth_path: String,
    pub couple_dashboard_path: String,
    pub vendor_prefix: String,
    pub vendor_dashboard_path: String,
    pub vendor_onboarding_path: String,
    pub profile_path: String,
}

impl Default for SiteMap {
    fn default() -> Self {
        Self {
            auth_path: "/auth".to_string(),
            couple_dashboard_path: "/dashboard".to_string(),
            vendor_prefix: "/vendor".to_string(),
            vendor_dashboard_path: "/vendor/dashboard".to_string(),
            vendor_onboarding_path: "/vendor/onboarding".to_string(),
            profile_path: "/profile".to_string(),
        }
    }
}

impl SiteMap {
    pub fn normalize(path: &str) -> String {
        let trimmed = path.trim();
        let mut normalized = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        while normalized.len() > 1 && normalized.ends_with('/') {
            normalized.pop();
        }
        normalized
    }

    pub fn is_auth(&self, path: &str) -> bool {
        path == self.auth_path
    }

    /// True for the vendor prefix itself and anything nested under it.
    /// Sibling routes that merely share the prefix text ("/vendors") stay out.
    pub fn is_vendor_scoped(&self, path: &str) -> bool {
        match path.strip_prefix(self.vendor_prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    pub fn is_onboarding(&self, path: &str) -> bool {
        path == self.vendor_onboarding_path
    }

    pub fn is_profile(&self, path: &str) -> bool {
        path == self.profile_path
    }
}
