use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::users::UserData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .get_user(&auth_user.user_id)
        .await
        .map_err(|e| match e {
            // A valid token whose user has since been deleted.
            UserError::NotFound(_) => {
                ApiError::Unauthorized("User no longer exists".to_string())
            }
            other => ApiError::from(other),
        })
        .map(|ref user| ApiSuccess::new(StatusCode::OK, "Current user", user.into()))
}
