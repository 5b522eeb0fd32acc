//! Run-scoped settings registry shared by every generator.
//!
//! Values are plain strings. Generators that need list- or dict-shaped values
//! format them into their textual form before storing them here.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Settings {
    values: IndexMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the value for `key` or an empty string.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    /// Inserts `value` only when `key` has no value yet.
    pub fn insert_default<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Overrides existing values with every pair of `other`.
    pub fn update<I, K, V>(&mut self, other: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in other {
            self.insert(key, value);
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON dump used for debug logging.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut settings = Settings::new();
        settings.update(iter);
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_overrides_in_order() {
        let mut settings = Settings::new();
        settings.insert("license", "MIT");
        settings.insert_default("license", "GPL3");
        assert_eq!(settings.get("license"), Some("MIT"));

        settings.update([("license", "APACHE"), ("author", "dks")]);
        assert_eq!(settings.get("license"), Some("APACHE"));
        assert_eq!(settings.get_or_empty("author"), "dks");
        assert_eq!(settings.get_or_empty("missing"), "");
        assert_eq!(settings.len(), 2);

        settings.clear();
        assert!(settings.is_empty());
    }

    #[test]
    fn test_to_json_keeps_insertion_order() {
        let settings: Settings = [("name", "demo"), ("version", "1.0.0")].into_iter().collect();
        let json = settings.to_json();
        assert!(json.find("name").unwrap() < json.find("version").unwrap());
    }
}
