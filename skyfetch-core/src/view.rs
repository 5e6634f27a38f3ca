//! Display instructions produced by the client and the port a front end implements to show them.

use crate::model::{CurrentConditions, Forecast};

/// Icon host URL with an `{icon}` placeholder.
pub const ICON_URL_TEMPLATE: &str = "https://openweathermap.org/img/wn/{icon}@2x.png";

pub const FORECAST_TITLE: &str = "5-Day Forecast";

pub const WELCOME_SUGGESTIONS: [&str; 4] = ["London", "Tokyo", "New York", "Paris"];

pub const CLEAR_HISTORY_PROMPT: &str = "Clear all recent searches?";

pub fn icon_url(template: &str, icon: &str) -> String {
    template.replace("{icon}", icon)
}

fn celsius(temperature: i32) -> String {
    format!("{temperature}°C")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentView {
    pub city: String,
    pub temperature: String,
    pub description: String,
    pub icon_url: String,
}

impl CurrentView {
    pub fn new(data: &CurrentConditions, icon_template: &str) -> Self {
        Self {
            city: data.city.clone(),
            temperature: celsius(data.temperature_c),
            description: data.description.clone(),
            icon_url: icon_url(icon_template, &data.icon),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    pub day: String,
    pub temperature: String,
    pub description: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastView {
    pub title: String,
    pub cards: Vec<ForecastCard>,
}

impl ForecastView {
    /// One card per daily representative entry.
    pub fn new(data: &Forecast, icon_template: &str) -> Self {
        let cards = data
            .daily()
            .map(|entry| ForecastCard {
                day: entry.weekday(),
                temperature: celsius(entry.temperature_c),
                description: entry.description.clone(),
                icon_url: icon_url(icon_template, &entry.icon),
            })
            .collect();

        Self {
            title: FORECAST_TITLE.to_string(),
            cards,
        }
    }
}

/// Content of the results region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Welcome { suggestions: Vec<String> },
    Loading,
    Error { message: String },
    Current(CurrentView),
    Forecast(ForecastView),
}

impl Panel {
    pub fn welcome() -> Self {
        Panel::Welcome {
            suggestions: WELCOME_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Panel::Error { message: message.into() }
    }
}

/// State of the search button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchControl {
    #[default]
    Ready,
    Searching,
}

impl SearchControl {
    pub fn label(&self) -> &'static str {
        match self {
            SearchControl::Ready => "Search",
            SearchControl::Searching => "Searching...",
        }
    }
}

/// User actions a front end reports back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Search box submitted (button or Enter) with its raw contents.
    Search(String),
    /// A recent-search entry was selected.
    Recent(String),
    ClearHistory,
}

pub trait UiPort {
    /// Replace the results region.
    fn render(&mut self, panel: Panel);

    /// Add to the results region below what is already shown.
    fn append(&mut self, panel: Panel);

    /// Show the recent-search strip. An empty slice hides it.
    fn render_recent(&mut self, cities: &[String]);

    fn set_search_control(&mut self, control: SearchControl);

    fn clear_input(&mut self);

    fn confirm(&mut self, prompt: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ForecastEntry;
    use chrono::DateTime;

    #[test]
    fn current_view_formats_temperature_and_icon() {
        let data = CurrentConditions {
            city: "London".into(),
            temperature_c: 21,
            description: "clear sky".into(),
            icon: "01d".into(),
        };

        let view = CurrentView::new(&data, ICON_URL_TEMPLATE);

        assert_eq!(view.temperature, "21°C");
        assert_eq!(view.icon_url, "https://openweathermap.org/img/wn/01d@2x.png");
    }

    #[test]
    fn forecast_view_builds_cards_from_noon_entries() {
        let at = |ts: i64, slot: &str, temp: i32| ForecastEntry {
            time: DateTime::from_timestamp(ts, 0).unwrap(),
            slot: slot.into(),
            temperature_c: temp,
            description: "rain".into(),
            icon: "10d".into(),
        };
        let forecast = Forecast {
            entries: vec![
                at(1_714_554_000, "2024-05-01 09:00:00", 5),
                at(1_714_564_800, "2024-05-01 12:00:00", 9),
                at(1_714_651_200, "2024-05-02 12:00:00", -3),
            ],
        };

        let view = ForecastView::new(&forecast, "icons/{icon}.png");

        assert_eq!(view.title, "5-Day Forecast");
        let days: Vec<_> = view.cards.iter().map(|c| c.day.as_str()).collect();
        assert_eq!(days, ["Wed", "Thu"]);
        assert_eq!(view.cards[1].temperature, "-3°C");
        assert_eq!(view.cards[0].icon_url, "icons/10d.png");
    }

    #[test]
    fn search_control_labels() {
        assert_eq!(SearchControl::default().label(), "Search");
        assert_eq!(SearchControl::Searching.label(), "Searching...");
    }
}
