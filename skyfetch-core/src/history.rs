use anyhow::{Context, Result};
use serde::Serialize;

use crate::storage::{KeyValueStore, LAST_CITY_KEY, RECENT_SEARCHES_KEY};

/// Maximum number of cities kept in the recent-search list.
pub const RECENT_CAPACITY: usize = 5;

/// Most-recent-first list of looked-up cities, deduplicated case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecentSearches {
    cities: Vec<String>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from stored cities, dropping duplicates and anything past capacity.
    pub fn from_cities<I>(cities: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut list = Self::new();
        for city in cities {
            if list.cities.len() == RECENT_CAPACITY {
                break;
            }
            if !list.contains(&city) {
                list.cities.push(capitalize(&city));
            }
        }
        list
    }

    /// Moves `city` to the front, inserting it if new and evicting the oldest entry on overflow.
    /// Returns the normalized name that was stored.
    pub fn record(&mut self, city: &str) -> String {
        let normalized = capitalize(city.trim());
        let key = normalized.to_lowercase();

        self.cities.retain(|c| c.to_lowercase() != key);
        self.cities.insert(0, normalized.clone());
        self.cities.truncate(RECENT_CAPACITY);

        normalized
    }

    pub fn contains(&self, city: &str) -> bool {
        let key = city.trim().to_lowercase();
        self.cities.iter().any(|c| c.to_lowercase() == key)
    }

    pub fn clear(&mut self) {
        self.cities.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.cities.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.cities
    }

    /// Reads the persisted list. A missing key yields an empty list.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let Some(raw) = store.get(RECENT_SEARCHES_KEY)? else {
            return Ok(Self::new());
        };

        let cities: Vec<String> = serde_json::from_str(&raw)
            .with_context(|| format!("Stored '{RECENT_SEARCHES_KEY}' is not a JSON list of cities"))?;

        Ok(Self::from_cities(cities))
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let raw = serde_json::to_string(self).context("Failed to serialize recent searches")?;
        store.set(RECENT_SEARCHES_KEY, &raw)
    }

    /// Removes both the list and the last city from `store`.
    pub fn forget(store: &mut dyn KeyValueStore) -> Result<()> {
        store.remove(RECENT_SEARCHES_KEY)?;
        store.remove(LAST_CITY_KEY)
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
/// Words are separated by whitespace or hyphens, which are kept as-is.
pub fn capitalize(city: &str) -> String {
    let mut out = String::with_capacity(city.len());
    let mut word_start = true;

    for ch in city.chars() {
        if ch.is_whitespace() || ch == '-' {
            word_start = true;
            out.push(ch);
        } else if word_start {
            out.extend(ch.to_uppercase());
            word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn capitalize_normalizes_each_word() {
        assert_eq!(capitalize("paris"), "Paris");
        assert_eq!(capitalize("PARIS"), "Paris");
        assert_eq!(capitalize("new york"), "New York");
        assert_eq!(capitalize("rio de janeiro"), "Rio De Janeiro");
        assert_eq!(capitalize("saint-étienne"), "Saint-Étienne");
    }

    #[test]
    fn record_deduplicates_case_insensitively() {
        let mut recent = RecentSearches::new();
        recent.record("paris");
        recent.record("Paris");

        assert_eq!(recent.as_slice(), ["Paris"]);
    }

    #[test]
    fn record_moves_existing_city_to_front() {
        let mut recent = RecentSearches::new();
        for city in ["Oslo", "Rome", "Lima"] {
            recent.record(city);
        }
        assert_eq!(recent.as_slice(), ["Lima", "Rome", "Oslo"]);

        let stored = recent.record("oslo");

        assert_eq!(stored, "Oslo");
        assert_eq!(recent.as_slice(), ["Oslo", "Lima", "Rome"]);
    }

    #[test]
    fn sixth_city_evicts_the_oldest() {
        let mut recent = RecentSearches::new();
        for city in ["a1", "b2", "c3", "d4", "e5", "f6"] {
            recent.record(city);
        }

        assert_eq!(recent.len(), RECENT_CAPACITY);
        assert_eq!(recent.get(0), Some("F6"));
        assert!(!recent.contains("a1"));
        assert!(recent.contains("B2"));
    }

    #[test]
    fn from_cities_enforces_invariants() {
        let stored = ["lima", "Lima", "oslo", "rome", "kyiv", "cairo", "quito"]
            .map(String::from);

        let recent = RecentSearches::from_cities(stored);

        assert_eq!(recent.as_slice(), ["Lima", "Oslo", "Rome", "Kyiv", "Cairo"]);
    }

    #[test]
    fn load_and_save_use_the_recent_searches_key() {
        let mut store = MemoryStore::default();
        let mut recent = RecentSearches::new();
        recent.record("tokyo");
        recent.record("berlin");

        recent.save(&mut store).expect("save must succeed");

        assert_eq!(
            store.get(RECENT_SEARCHES_KEY).unwrap().as_deref(),
            Some(r#"["Berlin","Tokyo"]"#)
        );
        assert_eq!(RecentSearches::load(&store).unwrap(), recent);
    }

    #[test]
    fn load_without_key_is_empty() {
        let store = MemoryStore::default();
        assert!(RecentSearches::load(&store).unwrap().is_empty());
    }

    #[test]
    fn load_rejects_corrupt_value() {
        let mut store = MemoryStore::default();
        store.set(RECENT_SEARCHES_KEY, "not json").unwrap();

        let err = RecentSearches::load(&store).unwrap_err();
        assert!(err.to_string().contains("not a JSON list"));
    }

    #[test]
    fn forget_removes_both_keys() {
        let mut store = MemoryStore::default();
        store.set(RECENT_SEARCHES_KEY, r#"["Oslo"]"#).unwrap();
        store.set(LAST_CITY_KEY, "Oslo").unwrap();

        RecentSearches::forget(&mut store).unwrap();

        assert_eq!(store.get(RECENT_SEARCHES_KEY).unwrap(), None);
        assert_eq!(store.get(LAST_CITY_KEY).unwrap(), None);
    }
}
