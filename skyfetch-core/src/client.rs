use tracing::{debug, info, warn};

use crate::{
    error::WeatherError,
    history::RecentSearches,
    model::{CurrentConditions, Forecast, Query},
    provider::WeatherProvider,
    storage::{KeyValueStore, LAST_CITY_KEY},
    view::{
        CLEAR_HISTORY_PROMPT, CurrentView, ForecastView, ICON_URL_TEMPLATE, Panel, SearchControl,
        UiEvent, UiPort,
    },
};

/// Owns the provider, the persisted history and the UI it drives.
#[derive(Debug)]
pub struct WeatherClient<S, U> {
    provider: Box<dyn WeatherProvider>,
    store: S,
    ui: U,
    recent: RecentSearches,
    icon_url_template: String,
}

impl<S: KeyValueStore, U: UiPort> WeatherClient<S, U> {
    pub fn new(provider: Box<dyn WeatherProvider>, store: S, ui: U) -> Self {
        Self {
            provider,
            store,
            ui,
            recent: RecentSearches::new(),
            icon_url_template: ICON_URL_TEMPLATE.to_string(),
        }
    }

    pub fn with_icon_url_template(mut self, template: impl Into<String>) -> Self {
        self.icon_url_template = template.into();
        self
    }

    pub fn recent(&self) -> &RecentSearches {
        &self.recent
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Startup: show persisted history, then re-fetch the last city or greet.
    pub async fn bootstrap(&mut self) {
        self.load_history();

        match self.last_city() {
            Some(city) => {
                debug!(%city, "restoring last city");
                // Failures are already rendered.
                let _ = self.fetch_weather(&city).await;
            }
            None => self.ui.render(Panel::welcome()),
        }
    }

    /// Reads the persisted recent searches and renders the strip.
    pub fn load_history(&mut self) {
        self.recent = RecentSearches::load(&self.store).unwrap_or_else(|err| {
            warn!("Ignoring stored recent searches: {err:#}");
            RecentSearches::new()
        });
        self.render_recent_searches();
    }

    fn last_city(&self) -> Option<String> {
        match self.store.get(LAST_CITY_KEY) {
            Ok(city) => city.filter(|c| !c.trim().is_empty()),
            Err(err) => {
                warn!("Failed to read last city: {err:#}");
                None
            }
        }
    }

    pub async fn handle_event(&mut self, event: UiEvent) -> Result<(), WeatherError> {
        match event {
            UiEvent::Search(raw) => self.handle_search(&raw).await,
            UiEvent::Recent(city) => self.fetch_weather(&city).await,
            UiEvent::ClearHistory => {
                self.clear_history();
                Ok(())
            }
        }
    }

    /// Validates the search box contents and looks the city up.
    /// Validation failures are rendered and no request is made.
    pub async fn handle_search(&mut self, raw: &str) -> Result<(), WeatherError> {
        let query = match Query::parse(raw) {
            Ok(query) => query,
            Err(err) => {
                self.ui.render(Panel::error(err.user_message()));
                return Err(err);
            }
        };

        self.ui.clear_input();
        self.fetch_weather(query.as_str()).await
    }

    /// Fetches current conditions and forecast together; renders both or an error.
    pub async fn fetch_weather(&mut self, city: &str) -> Result<(), WeatherError> {
        self.ui.render(Panel::Loading);
        self.ui.set_search_control(SearchControl::Searching);

        let outcome = tokio::try_join!(self.provider.current(city), self.provider.forecast(city));

        let result = match outcome {
            Ok((current, forecast)) => {
                info!(city, "weather lookup succeeded");
                self.record_search(city);
                self.render_current(&current);
                self.render_forecast(&forecast);
                Ok(())
            }
            Err(err) => {
                debug!(city, "weather lookup failed: {err}");
                self.ui.render(Panel::error(err.user_message()));
                Err(err)
            }
        };

        self.ui.set_search_control(SearchControl::Ready);
        result
    }

    pub fn render_current(&mut self, data: &CurrentConditions) {
        let view = CurrentView::new(data, &self.icon_url_template);
        self.ui.render(Panel::Current(view));
    }

    pub fn render_forecast(&mut self, data: &Forecast) {
        let view = ForecastView::new(data, &self.icon_url_template);
        self.ui.append(Panel::Forecast(view));
    }

    /// Puts `city` at the front of the history and remembers it as the last city.
    /// Storage failures are logged; the in-memory history is still updated.
    pub fn record_search(&mut self, city: &str) {
        self.recent.record(city);

        if let Err(err) = self.recent.save(&mut self.store) {
            warn!("Failed to persist recent searches: {err:#}");
        }
        if let Err(err) = self.store.set(LAST_CITY_KEY, city) {
            warn!("Failed to persist last city: {err:#}");
        }

        self.render_recent_searches();
    }

    pub fn render_recent_searches(&mut self) {
        self.ui.render_recent(self.recent.as_slice());
    }

    /// Empties the history after confirmation. Returns whether anything was cleared.
    pub fn clear_history(&mut self) -> bool {
        if !self.ui.confirm(CLEAR_HISTORY_PROMPT) {
            return false;
        }

        self.recent.clear();
        if let Err(err) = RecentSearches::forget(&mut self.store) {
            warn!("Failed to remove stored history: {err:#}");
        }
        info!("search history cleared");

        self.render_recent_searches();
        true
    }
}
