use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::users::parse_user_id;
use crate::inbound::http::handlers::users::UserData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, "User retrieved", user.into()))
}
