use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::validation::FieldError;

pub mod delete_user;
pub mod get_current_user;
pub mod get_user;
pub mod list_users;
pub mod update_user;

pub use delete_user::delete_user;
pub use get_current_user::get_current_user;
pub use get_user::get_user;
pub use list_users::list_users;
pub use update_user::update_user;

/// Public view of a user. The password hash never leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub age: u8,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.to_string(),
            email: user.email.to_string(),
            age: user.age.value(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::from_string(raw).map_err(|e| ApiError::Validation(vec![FieldError::new("user_id", e)]))
}

/// Accounts may only be modified by their owner.
pub(crate) fn ensure_self(caller: &AuthenticatedUser, target: &UserId) -> Result<(), ApiError> {
    if caller.user_id == *target {
        Ok(())
    } else {
        tracing::warn!(
            caller = %caller.user_id,
            target = %target,
            "Refused to modify another user"
        );
        Err(ApiError::forbidden("Not allowed to modify another user"))
    }
}
