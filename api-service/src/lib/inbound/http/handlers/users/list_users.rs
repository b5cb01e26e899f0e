use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::users::UserData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(
                StatusCode::OK,
                "Users retrieved",
                users.iter().map(UserData::from).collect(),
            )
        })
}
