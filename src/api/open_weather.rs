use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::{
    core::{position::Coordinates, weather::Observation},
    prelude::*,
    quantity::{speed::MetresPerSecond, temperature::Celsius},
};

const URL: &str = "https://api.openweathermap.org/data/2.5/weather";

pub struct Api {
    client: Client,
    api_key: Option<String>,
}

impl Api {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, api_key })
    }

    /// Current conditions at the location, falling back to a mild default
    /// day — the range estimate must not depend on the weather service
    /// being up.
    #[instrument(skip_all)]
    pub async fn get_observation(&self, location: Coordinates) -> Observation {
        let Some(api_key) = &self.api_key else {
            warn!("no API key configured, assuming default weather");
            return Observation::default();
        };
        match self.get(api_key, location).await {
            Ok(observation) => observation,
            Err(error) => {
                warn!("weather fetch failed: {error:#}");
                Observation::default()
            }
        }
    }

    async fn get(&self, api_key: &str, location: Coordinates) -> Result<Observation> {
        let current: CurrentWeather = self
            .client
            .get(URL)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let observation = Observation::from(current);
        info!(
            temperature = %observation.temperature,
            wind_speed = %observation.wind_speed,
            description = observation.description.as_str(),
            "fetched the weather"
        );
        Ok(observation)
    }
}

#[derive(Deserialize)]
struct CurrentWeather {
    main: Main,

    #[serde(default)]
    wind: Wind,

    #[serde(default)]
    weather: Vec<Weather>,
}

#[derive(Deserialize)]
struct Main {
    temp: f64,
}

#[derive(Deserialize)]
struct Wind {
    #[serde(default = "Wind::default_speed")]
    speed: f64,
}

impl Wind {
    const fn default_speed() -> f64 {
        3.0
    }
}

impl Default for Wind {
    fn default() -> Self {
        Self { speed: Self::default_speed() }
    }
}

#[derive(Deserialize)]
struct Weather {
    description: String,

    #[serde(default = "Weather::default_icon")]
    icon: String,
}

impl Weather {
    fn default_icon() -> String {
        "01d".to_string()
    }
}

impl From<CurrentWeather> for Observation {
    fn from(current: CurrentWeather) -> Self {
        let default = Self::default();
        let (description, icon) = current
            .weather
            .into_iter()
            .next()
            .map_or((default.description, default.icon), |weather| {
                (weather.description, weather.icon)
            });
        Self {
            temperature: Celsius(current.main.temp),
            wind_speed: MetresPerSecond(current.wind.speed),
            description,
            icon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_current_weather_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"
            {
                "coord": {"lon": -0.4139, "lat": 51.3656},
                "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
                "main": {"temp": 11.2, "feels_like": 10.4, "humidity": 87},
                "wind": {"speed": 5.7, "deg": 220},
                "name": "Weybridge"
            }
        "#;
        let observation = Observation::from(serde_json::from_str::<CurrentWeather>(RESPONSE)?);
        assert_eq!(observation.temperature, Celsius(11.2));
        assert_eq!(observation.wind_speed, MetresPerSecond(5.7));
        assert_eq!(observation.description, "light rain");
        assert_eq!(observation.icon, "10d");
        Ok(())
    }

    #[test]
    fn missing_wind_defaults_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"{"main": {"temp": 21.0}}"#;
        let observation = Observation::from(serde_json::from_str::<CurrentWeather>(RESPONSE)?);
        assert_eq!(observation.wind_speed, MetresPerSecond(3.0));
        assert_eq!(observation.description, "Unknown");
        Ok(())
    }
}
