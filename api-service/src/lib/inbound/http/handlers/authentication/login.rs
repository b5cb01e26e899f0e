use std::sync::Arc;

use auth::AuthenticationError;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::Password;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::FieldError;
use crate::inbound::http::validation::FieldErrors;
use crate::inbound::http::validation::Validate;
use crate::inbound::http::validation::ValidatedJson;
use crate::user::errors::UserError;

const TOKEN_TYPE: &str = "bearer";

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let user = match state
        .user_service
        .get_user_by_email(&credentials.email)
        .await
    {
        Ok(user) => Some(user),
        Err(UserError::NotFoundByEmail(_)) => None,
        Err(e) => return Err(ApiError::from(e)),
    };

    let authenticator = Arc::clone(&state.authenticator);
    let subject = user
        .as_ref()
        .map(|user| (user.id.to_string(), user.password_hash.clone()));
    let password = credentials.password;

    // Argon2 verification is CPU-bound. Unknown emails still pay for one.
    let result = tokio::task::spawn_blocking(move || match subject {
        Some((identity, password_hash)) => {
            authenticator.authenticate(&identity, password.expose(), &password_hash)
        }
        None => Err(authenticator.reject_unknown(password.expose())),
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("Authentication task failed: {}", e)))?
    .map_err(|e| match e {
        AuthenticationError::InvalidCredentials => invalid_credentials(),
        AuthenticationError::PasswordError(err) => {
            ApiError::InternalServerError(format!("Password verification failed: {}", err))
        }
        AuthenticationError::TokenError(err) => {
            ApiError::InternalServerError(format!("Token generation failed: {}", err))
        }
    })?;

    // A successful result implies a known user.
    let Some(user) = user else {
        return Err(invalid_credentials());
    };

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "Login successful",
        LoginResponseData {
            token: result.access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: result.expires_in,
        },
    ))
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid credentials".to_string())
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

/// Validated login credentials
#[derive(Debug)]
pub struct LoginCredentials {
    pub email: String,
    pub password: Password,
}

impl Validate for LoginRequest {
    type Output = LoginCredentials;

    fn validate(self) -> Result<LoginCredentials, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        let email = errors.required("email", self.email, |email: String| {
            let email = email.trim().to_string();
            if email.is_empty() {
                Err("Email must not be empty")
            } else {
                Ok(email)
            }
        });
        let password = errors.required("password", self.password, Password::new);

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => {
                Ok(LoginCredentials { email, password })
            }
            _ => Err(errors.into_vec()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_credentials_are_trimmed() {
        let request: LoginRequest =
            serde_json::from_value(json!({"email": " a@b.com ", "password": "secret1"})).unwrap();

        let credentials = request.validate().unwrap();

        assert_eq!(credentials.email, "a@b.com");
        assert_eq!(credentials.password.expose(), "secret1");
    }

    #[test]
    fn test_missing_credentials() {
        let request: LoginRequest = serde_json::from_value(json!({})).unwrap();

        assert_eq!(
            request.validate().unwrap_err(),
            vec![
                FieldError::required("email"),
                FieldError::required("password")
            ]
        );
    }

    #[test]
    fn test_blank_email_is_rejected() {
        let request: LoginRequest =
            serde_json::from_value(json!({"email": "   ", "password": "secret1"})).unwrap();

        assert_eq!(
            request.validate().unwrap_err(),
            vec![FieldError::new("email", "Email must not be empty")]
        );
    }
}
