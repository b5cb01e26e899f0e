use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use crate::domain::user::models::Age;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::users::ensure_self;
use crate::inbound::http::handlers::users::parse_user_id;
use crate::inbound::http::handlers::users::UserData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::FieldError;
use crate::inbound::http::validation::FieldErrors;
use crate::inbound::http::validation::Validate;
use crate::inbound::http::validation::ValidatedJson;

pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    ValidatedJson(command): ValidatedJson<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    ensure_self(&auth_user, &user_id)?;

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, "User updated", user.into()))
}

/// HTTP request body for a partial user update (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UpdateUserRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    age: Option<i64>,
    is_active: Option<bool>,
}

impl Validate for UpdateUserRequest {
    type Output = UpdateUserCommand;

    fn validate(self) -> Result<UpdateUserCommand, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let command = UpdateUserCommand {
            username: errors.optional("username", self.username, Username::new),
            email: errors.optional("email", self.email, EmailAddress::new),
            password: errors.optional("password", self.password, Password::new),
            age: errors.optional("age", self.age, Age::new),
            is_active: self.is_active,
        };

        if errors.is_empty() {
            Ok(command)
        } else {
            Err(errors.into_vec())
        }
    }
}
