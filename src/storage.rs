//! Local profile storage
//!
//! The browser front end keeps the signed-in farmer in local storage under
//! `agrisphere_*` keys. `ProfileStore` models that key-value capability so it
//! can be injected; `MemoryProfileStore` is the in-process implementation.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub const KEY_PREFIX: &str = "agrisphere_";

const USERNAME_KEY: &str = "username";
const PROFILE_KEY: &str = "profile";

/// String key-value storage; keys are given without the prefix
pub trait ProfileStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub fn prefixed(key: &str) -> String {
    format!("{}{}", KEY_PREFIX, key)
}

#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored keys, prefix included
    pub fn keys(&self) -> Vec<String> {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.get(&prefixed(key)).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.insert(prefixed(key), value.to_string());
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries.remove(&prefixed(key));
    }
}

/// Signed-in farmer profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub crops: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_size_acres: Option<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredFields {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    crops: Vec<String>,
    #[serde(default)]
    farm_size_acres: Option<f64>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    /// Load the stored profile
    ///
    /// # Returns
    /// `None` when nobody is signed in. A username without stored profile
    /// fields yields a bare profile.
    pub fn load(store: &dyn ProfileStore) -> Result<Option<Self>> {
        let Some(username) = store.get(USERNAME_KEY).filter(|u| !u.is_empty()) else {
            return Ok(None);
        };

        let fields = match store.get(PROFILE_KEY) {
            Some(json) => serde_json::from_str::<StoredFields>(&json)
                .with_context(|| format!("Failed to parse stored profile for {}", username))?,
            None => StoredFields::default(),
        };

        Ok(Some(Self {
            username,
            full_name: fields.full_name,
            location: fields.location,
            language: fields.language,
            crops: fields.crops,
            farm_size_acres: fields.farm_size_acres,
        }))
    }

    pub fn save(&self, store: &dyn ProfileStore) -> Result<()> {
        let fields = StoredFields {
            full_name: self.full_name.clone(),
            location: self.location.clone(),
            language: self.language.clone(),
            crops: self.crops.clone(),
            farm_size_acres: self.farm_size_acres,
        };
        let json = serde_json::to_string(&fields).context("Failed to serialize profile")?;
        store.set(USERNAME_KEY, &self.username);
        store.set(PROFILE_KEY, &json);
        Ok(())
    }

    /// Sign out: remove the username and profile fields
    pub fn clear(store: &dyn ProfileStore) {
        store.remove(USERNAME_KEY);
        store.remove(PROFILE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            full_name: Some("Ravi Kumar".to_string()),
            location: Some("Nashik".to_string()),
            crops: vec!["grapes".to_string(), "onion".to_string()],
            farm_size_acres: Some(4.5),
            ..UserProfile::new("ravi")
        }
    }

    #[test]
    fn test_keys_are_prefixed() {
        let store = MemoryProfileStore::new();
        sample_profile().save(&store).unwrap();
        assert_eq!(store.keys(), vec!["agrisphere_profile", "agrisphere_username"]);
        assert_eq!(store.get("username").as_deref(), Some("ravi"));
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryProfileStore::new();
        let profile = sample_profile();
        profile.save(&store).unwrap();
        assert_eq!(UserProfile::load(&store).unwrap(), Some(profile));
    }

    #[test]
    fn test_signed_out() {
        let store = MemoryProfileStore::new();
        assert_eq!(UserProfile::load(&store).unwrap(), None);

        sample_profile().save(&store).unwrap();
        UserProfile::clear(&store);
        assert_eq!(UserProfile::load(&store).unwrap(), None);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_username_only() {
        let store = MemoryProfileStore::new();
        store.set("username", "meena");
        assert_eq!(UserProfile::load(&store).unwrap(), Some(UserProfile::new("meena")));
    }

    #[test]
    fn test_corrupt_profile_is_an_error() {
        let store = MemoryProfileStore::new();
        store.set("username", "meena");
        store.set("profile", "{not json");
        assert!(UserProfile::load(&store).is_err());
    }
}
