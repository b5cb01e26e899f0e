use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::users::ensure_self;
use crate::inbound::http::handlers::users::parse_user_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    ensure_self(&auth_user, &user_id)?;

    state
        .user_service
        .delete_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::ack(StatusCode::OK, "User deleted"))
}
