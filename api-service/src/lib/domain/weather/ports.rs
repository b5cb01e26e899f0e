use async_trait::async_trait;

use crate::weather::errors::WeatherError;
use crate::weather::models::City;
use crate::weather::models::WeatherReport;

/// Upstream source of current weather conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + 'static {
    /// Fetch current conditions for `city`.
    ///
    /// # Errors
    /// * `CityNotFound` - Provider does not know the city
    /// * `NotConfigured` - No API key is configured
    /// * `Upstream` - Transport failure, timeout or provider error status
    /// * `InvalidResponse` - Provider body could not be decoded
    async fn current_weather(&self, city: &City) -> Result<WeatherReport, WeatherError>;
}
