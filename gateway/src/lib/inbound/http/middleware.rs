use auth::IdentityClaim;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use super::identity::extract_identity;
use crate::domain::access::Admission;
use crate::domain::access::GateDecision;
use crate::inbound::http::router::AppState;

/// Page protected requests are sent to when not authenticated.
pub const LOGIN_PATH: &str = "/auth/login";

/// Identity attached to a request that passed the gate on a protected path.
///
/// Lives in the request extensions for the duration of the request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub IdentityClaim);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(authentication_required)
    }
}

/// 401 response for protected API paths.
pub fn authentication_required() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Middleware that runs the access gate ahead of every handler.
///
/// Public and out-of-scope paths pass untouched. Protected paths need a valid
/// bearer token: the identity is attached to the request extensions, otherwise
/// API paths get a 401 and page paths a redirect to the login page.
pub async fn access_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let decision = state.access_gate.evaluate(req.uri().path(), || {
        extract_identity(req.headers(), &state.authenticator)
    });

    match decision {
        GateDecision::Allow(Admission::Authenticated(identity)) => {
            req.extensions_mut().insert(AuthenticatedUser(identity));
            next.run(req).await
        }
        GateDecision::Allow(_) => next.run(req).await,
        GateDecision::Unauthorized => {
            tracing::debug!(path = %req.uri().path(), "Rejected unauthenticated API request");
            authentication_required()
        }
        GateDecision::RedirectToLogin => {
            tracing::debug!(path = %req.uri().path(), "Redirecting unauthenticated request to login");
            Redirect::temporary(LOGIN_PATH).into_response()
        }
    }
}
