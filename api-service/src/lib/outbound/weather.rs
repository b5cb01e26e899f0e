//! OpenWeatherMap adapter for the [`WeatherProvider`] port.
//!
//! Owns transport details only: the request, timeout and status mapping, and
//! decoding the provider payload into a [`WeatherReport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::WeatherConfig;
use crate::domain::weather::models::City;
use crate::domain::weather::models::WeatherReport;
use crate::domain::weather::ports::WeatherProvider;
use crate::weather::errors::WeatherError;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

pub struct OpenWeatherMapClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenWeatherMapClient {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &WeatherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                CURRENT_WEATHER_PATH
            ),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapClient {
    async fn current_weather(&self, city: &City) -> Result<WeatherReport, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::NotConfigured)?;

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", city.as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }
        if !status.is_success() {
            return Err(WeatherError::Upstream(format!(
                "provider responded with status {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_report(&body)
    }
}

/// The request URL carries the api key, so it is stripped before logging and
/// never forwarded to callers.
fn map_transport_error(error: reqwest::Error) -> WeatherError {
    let error = error.without_url();
    tracing::warn!(error = %error, "Weather provider request failed");

    let message = if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "could not connect to provider"
    } else {
        "request failed"
    };
    WeatherError::Upstream(message.to_string())
}

fn parse_report(body: &[u8]) -> Result<WeatherReport, WeatherError> {
    let dto: CurrentWeatherDto = serde_json::from_slice(body)
        .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;

    let description = dto
        .weather
        .into_iter()
        .next()
        .map(|condition| condition.description)
        .ok_or_else(|| WeatherError::InvalidResponse("missing weather conditions".to_string()))?;

    Ok(WeatherReport {
        city: dto.name,
        country: dto.sys.and_then(|sys| sys.country),
        description,
        temperature: dto.main.temp,
        feels_like: dto.main.feels_like,
        humidity: dto.main.humidity,
        wind_speed: dto.wind.map(|wind| wind.speed),
    })
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherDto {
    name: String,
    weather: Vec<ConditionDto>,
    main: MainDto,
    wind: Option<WindDto>,
    sys: Option<SysDto>,
}

#[derive(Debug, Deserialize)]
struct ConditionDto {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainDto {
    temp: f64,
    feels_like: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct WindDto {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct SysDto {
    country: Option<String>,
}
