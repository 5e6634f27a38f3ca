use chrono::{DateTime, Local, Utc};
use std::fmt;

use crate::error::WeatherError;

/// Shortest city name accepted from the search box, in characters.
pub const MIN_QUERY_CHARS: usize = 2;

/// Forecast slot kept for each day.
pub const NOON_SLOT: &str = "12:00:00";

/// Number of daily forecast entries shown.
pub const FORECAST_DAYS: usize = 5;

/// A validated city name: trimmed, non-empty, at least [`MIN_QUERY_CHARS`] long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn parse(raw: &str) -> Result<Self, WeatherError> {
        let city = raw.trim();

        if city.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }
        if city.chars().count() < MIN_QUERY_CHARS {
            return Err(WeatherError::QueryTooShort);
        }

        Ok(Self(city.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rounds half toward positive infinity, so `-2.5` becomes `-2` and `21.5` becomes `22`.
pub fn round_temperature(celsius: f64) -> i32 {
    let rounded = celsius.round();
    // `f64::round` breaks ties away from zero; negative ties go up instead.
    let rounded = if rounded - celsius == -0.5 { rounded + 1.0 } else { rounded };
    rounded as i32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentConditions {
    pub city: String,
    pub temperature_c: i32,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    /// Provider's human-readable slot, e.g. `2024-05-01 12:00:00`.
    pub slot: String,
    pub temperature_c: i32,
    pub description: String,
    pub icon: String,
}

impl ForecastEntry {
    pub fn is_noon(&self) -> bool {
        self.slot.contains(NOON_SLOT)
    }

    /// Short weekday name in the local timezone, e.g. `Mon`.
    pub fn weekday(&self) -> String {
        self.time.with_timezone(&Local).format("%a").to_string()
    }
}

/// Forecast slots in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forecast {
    pub entries: Vec<ForecastEntry>,
}

impl Forecast {
    /// One representative entry per day: the noon slot, first five days only.
    pub fn daily(&self) -> impl Iterator<Item = &ForecastEntry> {
        self.entries
            .iter()
            .filter(|e| e.is_noon())
            .take(FORECAST_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ts: i64, slot: &str, temp: i32) -> ForecastEntry {
        ForecastEntry {
            time: DateTime::from_timestamp(ts, 0).unwrap(),
            slot: slot.to_string(),
            temperature_c: temp,
            description: "clear sky".into(),
            icon: "01d".into(),
        }
    }

    #[test]
    fn query_rejects_blank_input() {
        for raw in ["", "   ", "\t\n"] {
            assert!(matches!(Query::parse(raw), Err(WeatherError::EmptyQuery)));
        }
    }

    #[test]
    fn query_rejects_single_character() {
        assert!(matches!(Query::parse(" a "), Err(WeatherError::QueryTooShort)));
        // One char, two bytes.
        assert!(matches!(Query::parse("é"), Err(WeatherError::QueryTooShort)));
    }

    #[test]
    fn query_is_trimmed() {
        let q = Query::parse("  Oslo \n").unwrap();
        assert_eq!(q.as_str(), "Oslo");
        assert_eq!(Query::parse("Rome").unwrap().to_string(), "Rome");
    }

    #[test]
    fn rounding_is_not_truncation() {
        assert_eq!(round_temperature(21.4), 21);
        assert_eq!(round_temperature(21.5), 22);
        assert_eq!(round_temperature(21.7), 22);
        assert_eq!(round_temperature(-0.4), 0);
        assert_eq!(round_temperature(-2.5), -2);
        assert_eq!(round_temperature(-2.6), -3);
        assert_eq!(round_temperature(0.49999999999999994), 0);
        assert_eq!(round_temperature(-0.5), 0);
        assert_eq!(round_temperature(0.5), 1);
    }

    #[test]
    fn daily_keeps_noon_entries_in_order() {
        // 2024-05-01 00:00:00 UTC
        let base = 1_714_521_600;
        let mut entries = Vec::new();
        for day in 0..6 {
            for slot in ["09:00:00", "12:00:00", "15:00:00"] {
                let hour: i64 = slot[..2].parse().unwrap();
                let ts = base + day * 86_400 + hour * 3_600;
                entries.push(entry(ts, &format!("2024-05-0{} {slot}", day + 1), day as i32));
            }
        }
        let forecast = Forecast { entries };

        let daily: Vec<_> = forecast.daily().collect();

        assert_eq!(daily.len(), 5);
        assert!(daily.iter().all(|e| e.slot.ends_with("12:00:00")));
        let temps: Vec<_> = daily.iter().map(|e| e.temperature_c).collect();
        assert_eq!(temps, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn daily_may_be_shorter_than_five_days() {
        let forecast = Forecast {
            entries: vec![
                entry(1_714_557_600, "2024-05-01 10:00:00", 1),
                entry(1_714_564_800, "2024-05-01 12:00:00", 2),
            ],
        };
        assert_eq!(forecast.daily().count(), 1);
        assert_eq!(Forecast::default().daily().count(), 0);
    }

    #[test]
    fn weekday_is_short_name() {
        // Wednesday 2024-05-01 12:00 UTC
        let e = entry(1_714_564_800, "2024-05-01 12:00:00", 20);
        assert_eq!(e.weekday(), "Wed");
    }
}
