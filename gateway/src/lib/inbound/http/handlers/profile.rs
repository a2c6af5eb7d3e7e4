use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Identity of the caller as established by the access gate.
///
/// `member_since` is filled when the identity belongs to a stored user.
pub async fn get_profile(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    let member_since = match UserId::from_string(&identity.user_id) {
        Ok(user_id) => match state.user_service.get_user(&user_id).await {
            Ok(user) => Some(user.created_at),
            Err(UserError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        },
        Err(_) => None,
    };

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ProfileData {
            user_id: identity.user_id.clone(),
            email: identity.email.clone(),
            role: identity.role.to_string(),
            is_admin: identity.is_admin(),
            member_since,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub is_admin: bool,
    pub member_since: Option<DateTime<Utc>>,
}
