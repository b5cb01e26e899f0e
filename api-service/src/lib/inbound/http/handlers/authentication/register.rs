use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::user::models::Age;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::users::UserData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::FieldError;
use crate::inbound::http::validation::FieldErrors;
use crate::inbound::http::validation::Validate;
use crate::inbound::http::validation::ValidatedJson;

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(command): ValidatedJson<RegisterRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .register_user(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, "User registered", user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    age: Option<i64>,
    is_active: Option<bool>,
}

impl Validate for RegisterRequest {
    type Output = CreateUserCommand;

    fn validate(self) -> Result<CreateUserCommand, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let username = errors.required("username", self.username, Username::new);
        let email = errors.required("email", self.email, EmailAddress::new);
        let password = errors.required("password", self.password, Password::new);
        let age = errors.required("age", self.age, Age::new);

        match (username, email, password, age) {
            (Some(username), Some(email), Some(password), Some(age)) if errors.is_empty() => {
                Ok(CreateUserCommand {
                    username,
                    email,
                    password,
                    age,
                    is_active: self.is_active.unwrap_or(true),
                })
            }
            _ => Err(errors.into_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(value: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_request_defaults_to_active() {
        let command = request(json!({
            "username": "alice",
            "email": "a@b.com",
            "password": "secret1",
            "age": 30
        }))
        .validate()
        .unwrap();

        assert_eq!(command.email.as_str(), "a@b.com");
        assert_eq!(command.age.value(), 30);
        assert!(command.is_active);
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let errors = request(json!({"username": "alice"})).validate().unwrap_err();

        assert_eq!(
            errors,
            vec![
                FieldError::required("email"),
                FieldError::required("password"),
                FieldError::required("age"),
            ]
        );
    }

    #[test]
    fn test_invalid_values_are_reported_per_field() {
        let errors = request(json!({
            "username": "al",
            "email": "not-an-email",
            "password": "abc",
            "age": -3
        }))
        .validate()
        .unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["username", "email", "password", "age"]);
        assert_eq!(
            errors[2].message,
            "Password must be at least 6 characters long"
        );
    }
}
