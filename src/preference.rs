// src/preference.rs
//
// Persisted language preference. The store is a trait so the fallback rules
// can be exercised without a browser.

use crate::error::{Result, SiteError};
use crate::lang::Lang;

pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// `window.localStorage`, stored as raw strings.
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(SiteError::StorageUnavailable)
    }
}

impl PreferenceStore for BrowserStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| SiteError::Storage(format!("{:?}", e)))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| SiteError::Storage(format!("{:?}", e)))
    }
}

pub struct LanguagePreference<S: PreferenceStore> {
    store: S,
    key: String,
}

impl<S: PreferenceStore> LanguagePreference<S> {
    pub fn new(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// Stored language, `es` when unset, invalid or unreadable.
    pub fn load(&self) -> Lang {
        match self.store.load(&self.key) {
            Ok(value) => Lang::from_stored(value.as_deref()),
            Err(e) => {
                log::warn!("Could not read language preference: {}", e);
                Lang::default()
            }
        }
    }

    /// Best effort; the caller keeps the language for the session either way.
    pub fn save(&self, lang: Lang) {
        if let Err(e) = self.store.save(&self.key, lang.code()) {
            log::warn!("Could not persist language preference: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage(RefCell<HashMap<String, String>>);

    impl PreferenceStore for MemoryStorage {
        fn load(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.borrow().get(key).cloned())
        }

        fn save(&self, key: &str, value: &str) -> Result<()> {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    struct UnavailableStorage;

    impl PreferenceStore for UnavailableStorage {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Err(SiteError::StorageUnavailable)
        }

        fn save(&self, _key: &str, _value: &str) -> Result<()> {
            Err(SiteError::StorageUnavailable)
        }
    }

    #[test]
    fn test_defaults_to_spanish() {
        let pref = LanguagePreference::new(MemoryStorage::default(), "lang");
        assert_eq!(pref.load(), Lang::Es);
    }

    #[test]
    fn test_roundtrip_through_store() {
        let pref = LanguagePreference::new(MemoryStorage::default(), "lang");
        pref.save(Lang::En);
        assert_eq!(pref.store.0.borrow().get("lang").map(String::as_str), Some("en"));
        assert_eq!(pref.load(), Lang::En);
    }

    #[test]
    fn test_invalid_value_falls_back() {
        let store = MemoryStorage::default();
        store.save("lang", "\"en\"").unwrap();
        let pref = LanguagePreference::new(store, "lang");
        assert_eq!(pref.load(), Lang::Es);
    }

    #[test]
    fn test_unavailable_storage_does_not_fail() {
        let pref = LanguagePreference::new(UnavailableStorage, "lang");
        pref.save(Lang::En);
        assert_eq!(pref.load(), Lang::Es);
    }
}
