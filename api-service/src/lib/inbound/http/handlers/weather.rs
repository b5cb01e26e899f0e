use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::weather::models::City;
use crate::domain::weather::models::WeatherReport;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::FieldError;
use crate::inbound::http::validation::FieldErrors;
use crate::inbound::http::validation::Validate;
use crate::inbound::http::validation::ValidatedQuery;

pub async fn get_weather(
    State(state): State<AppState>,
    ValidatedQuery(city): ValidatedQuery<WeatherQuery>,
) -> Result<ApiSuccess<WeatherData>, ApiError> {
    state
        .weather_provider
        .current_weather(&city)
        .await
        .map_err(|e| {
            tracing::warn!(city = %city, error = %e, "Weather lookup failed");
            ApiError::from(e)
        })
        .map(|report| ApiSuccess::new(StatusCode::OK, "Weather retrieved", report.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct WeatherQuery {
    city: Option<String>,
}

impl Validate for WeatherQuery {
    type Output = City;

    fn validate(self) -> Result<City, Vec<FieldError>> {
        let mut errors = FieldErrors::new();
        // A blank city counts as missing.
        let city = self.city.filter(|c| !c.trim().is_empty());
        errors
            .required("city", city, City::new)
            .ok_or_else(|| errors.into_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherData {
    pub city: String,
    pub country: Option<String>,
    pub description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub wind_speed: Option<f64>,
}

impl From<WeatherReport> for WeatherData {
    fn from(report: WeatherReport) -> Self {
        Self {
            city: report.city,
            country: report.country,
            description: report.description,
            temperature: report.temperature,
            feels_like: report.feels_like,
            humidity: report.humidity,
            wind_speed: report.wind_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_blank_city_is_required() {
        for city in [None, Some("".to_string()), Some("   ".to_string())] {
            assert_eq!(
                WeatherQuery { city }.validate().unwrap_err(),
                vec![FieldError::required("city")]
            );
        }
    }

    #[test]
    fn test_city_is_trimmed() {
        let city = WeatherQuery {
            city: Some(" London ".to_string()),
        }
        .validate()
        .unwrap();

        assert_eq!(city.as_str(), "London");
    }
}
