use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::domain::{SessionState, UserId, UserIdentity, UserProfile, UserRole};
use super::guard::{OnboardingStatusSource, RouteAccessGuard};
use super::policy::AccessDecision;

/// Router builder exposing the navigation decision endpoint.
pub fn navigation_router<S>(guard: Arc<RouteAccessGuard<S>>) -> Router
where
    S: OnboardingStatusSource + 'static,
{
    Router::new()
        .route("/api/v1/navigation/decision", post(decision_handler::<S>))
        .with_state(guard)
}

/// Session snapshot as the navigation shell reports it.
#[derive(Debug, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub(crate) enum SessionPayload {
    Resolving,
    Anonymous,
    Authenticated { user_id: String, user_role: UserRole },
}

impl SessionPayload {
    fn into_session(self) -> SessionState {
        match self {
            SessionPayload::Resolving => SessionState::Resolving,
            SessionPayload::Anonymous => SessionState::Anonymous,
            SessionPayload::Authenticated { user_id, user_role } => SessionState::Authenticated {
                user: UserIdentity {
                    id: UserId(user_id),
                },
                profile: UserProfile { user_role },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DecisionRequest {
    pub(crate) path: String,
    pub(crate) session: SessionPayload,
}

/// Decision payload returned to the shell.
#[derive(Debug, Serialize)]
pub(crate) struct DecisionView {
    pub(crate) decision: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) location: Option<String>,
    pub(crate) detail: String,
}

pub(crate) async fn decision_handler<S>(
    State(guard): State<Arc<RouteAccessGuard<S>>>,
    Json(request): Json<DecisionRequest>,
) -> Json<DecisionView>
where
    S: OnboardingStatusSource + 'static,
{
    let session = request.session.into_session();
    let decision = guard.evaluate(&session, &request.path).await;

    let location = match decision {
        AccessDecision::Redirect(target) => Some(target.location(guard.sitemap()).to_string()),
        _ => None,
    };

    Json(DecisionView {
        decision: decision.label(),
        location,
        detail: decision.summary(),
    })
}
