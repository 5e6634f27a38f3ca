use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{CurrentConditions, FORECAST_DAYS, Forecast, ForecastEntry, NOON_SLOT, round_temperature},
};

use super::WeatherProvider;

pub const CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    current_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn with_endpoints(api_key: String, current_url: String, forecast_url: String) -> Self {
        Self {
            api_key,
            current_url,
            forecast_url,
            http: Client::new(),
        }
    }

    /// GETs `url` for `city` in metric units. The query string is percent-encoded by reqwest.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, city: &str) -> Result<T, WeatherError> {
        debug!(url, city, "requesting OpenWeather");

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::NotFound(city.to_string()));
        }

        if !status.is_success() {
            return Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl TryFrom<OwCurrentResponse> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let weather = parsed
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::Incomplete("weather[0]"))?;

        Ok(CurrentConditions {
            city: parsed.name,
            temperature_c: round_temperature(parsed.main.temp),
            description: weather.description,
            icon: weather.icon,
        })
    }
}

impl TryFrom<OwForecastEntry> for ForecastEntry {
    type Error = WeatherError;

    fn try_from(entry: OwForecastEntry) -> Result<Self, Self::Error> {
        let time = DateTime::from_timestamp(entry.dt, 0).ok_or(WeatherError::Incomplete("dt"))?;
        let weather = entry
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::Incomplete("list[].weather[0]"))?;

        Ok(ForecastEntry {
            time,
            slot: entry.dt_txt,
            temperature_c: round_temperature(entry.main.temp),
            description: weather.description,
            icon: weather.icon,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let parsed: OwCurrentResponse = self.get_json(&self.current_url, city).await?;
        parsed.try_into()
    }

    async fn forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let parsed: OwForecastResponse = self.get_json(&self.forecast_url, city).await?;

        // Only the kept slots need complete weather data.
        let entries = parsed
            .list
            .into_iter()
            .filter(|e| e.dt_txt.contains(NOON_SLOT))
            .take(FORECAST_DAYS)
            .map(ForecastEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Forecast { entries })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
