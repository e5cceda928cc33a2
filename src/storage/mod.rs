use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Durable client-side key/value storage. Best effort: failures read as
/// "missing" and writes may be dropped.
pub(crate) trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

pub(crate) type SharedStorage = Arc<dyn KeyValueStorage>;

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                tracing::debug!(key, "localStorage write rejected");
            }
        }
    }
}

/// In-process storage for tests and non-browser hosts.
#[derive(Debug, Default)]
pub(crate) struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }
}

/// Picks `localStorage` when running in a browser.
pub(crate) fn default_storage() -> SharedStorage {
    if cfg!(target_arch = "wasm32") {
        Arc::new(LocalStorage)
    } else {
        Arc::new(MemoryStorage::default())
    }
}

pub(crate) fn load_search(storage: &dyn KeyValueStorage, key: &str) -> String {
    storage.get(key).unwrap_or_default()
}

pub(crate) fn save_search(storage: &dyn KeyValueStorage, key: &str, value: &str) {
    storage.set(key, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let s = MemoryStorage::default();
        assert_eq!(load_search(&s, "notes-search"), "");

        save_search(&s, "notes-search", "lunch");
        assert_eq!(load_search(&s, "notes-search"), "lunch");

        save_search(&s, "notes-search", "");
        assert_eq!(s.get("notes-search").as_deref(), Some(""));
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_search_roundtrip() {
        let s = LocalStorage;
        save_search(&s, "notes-search-test", "meeting");
        assert_eq!(load_search(&s, "notes-search-test"), "meeting");
    }
}
