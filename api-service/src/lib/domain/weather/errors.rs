use thiserror::Error;

/// Error for City validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CityError {
    #[error("City must not be empty")]
    Empty,
}

/// Errors raised while fetching weather from the upstream provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather provider is not configured")]
    NotConfigured,

    #[error("Weather provider request failed: {0}")]
    Upstream(String),

    #[error("Weather provider returned an unexpected response: {0}")]
    InvalidResponse(String),
}
