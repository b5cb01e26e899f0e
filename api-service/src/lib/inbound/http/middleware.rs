use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Identity resolved from a verified bearer token, stored in request extensions.
///
/// Tokens carry the immutable user id, never the email, so a token keeps
/// naming the same user after profile changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates bearer tokens and adds the caller identity to request extensions.
///
/// Runs on every protected request; nothing about a verification outcome is cached.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(req.headers())?;

    let subject = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(reason = %e, "Token validation failed");
        match e {
            TokenError::Expired => ApiError::Unauthorized("Token has expired".to_string()),
            _ => ApiError::Unauthorized("Invalid token".to_string()),
        }
    })?;

    let user_id = UserId::from_string(&subject).map_err(|_| {
        tracing::warn!("Token subject is not a user id");
        ApiError::Unauthorized("Invalid token".to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers.get(header::AUTHORIZATION).ok_or_else(|| {
        tracing::warn!("Missing Authorization header");
        ApiError::Unauthorized("Not authenticated".to_string())
    })?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => {
            tracing::warn!("Malformed Authorization header");
            Err(ApiError::Unauthorized(
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            ))
        }
    }
}

/// Rewrites error responses produced by the framework itself (unmatched
/// method, body limits, plain-text rejections) into the response envelope.
///
/// Responses that are already JSON pass through untouched, so envelopes
/// rendered by [`ApiError`] are never wrapped twice.
pub async fn envelope_framework_errors(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if is_json {
        return response;
    }

    ApiError::Http {
        status,
        detail: status.canonical_reason().unwrap_or("Error").to_string(),
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extracts_bearer_token() {
        assert_eq!(extract_token_from_header(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_token_from_header(&headers("bearer abc")), Ok("abc"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            extract_token_from_header(&HeaderMap::new()),
            Err(ApiError::Unauthorized("Not authenticated".to_string()))
        );
    }

    #[test]
    fn test_wrong_scheme_or_empty_token() {
        for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer    ", "abc"] {
            assert!(
                matches!(
                    extract_token_from_header(&headers(value)),
                    Err(ApiError::Unauthorized(_))
                ),
                "{value:?} should be rejected"
            );
        }
    }
}
