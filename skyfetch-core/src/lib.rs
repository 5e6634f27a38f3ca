//! Core library for the `skyfetch` weather client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider behind the `WeatherProvider` seam
//! - Domain models, recent-search history and key-value persistence
//! - The `WeatherClient` that turns user events into display instructions for a `UiPort`
//!
//! It is used by `skyfetch-cli`, but any front end implementing `UiPort` can drive it.

pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod provider;
pub mod storage;
pub mod view;

pub use client::WeatherClient;
pub use config::Config;
pub use error::WeatherError;
pub use history::RecentSearches;
pub use model::{CurrentConditions, Forecast, ForecastEntry, Query};
pub use provider::{WeatherProvider, provider_from_config};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use view::{Panel, SearchControl, UiEvent, UiPort};
