use std::fmt;

use crate::weather::errors::CityError;

/// City name used to query the weather provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City(String);

impl City {
    /// # Errors
    /// * `Empty` - Blank after trimming
    pub fn new(name: String) -> Result<Self, CityError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(CityError::Empty);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Current conditions for a city, in metric units.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub country: Option<String>,
    pub description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub wind_speed: Option<f64>,
}
