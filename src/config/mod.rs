use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_API_URL: &str = "https://notehub-public.goit.study/api";

/// Runtime endpoint configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub api_token: Option<String>,
}

impl EnvConfig {
    pub fn new() -> Self {
        // Both `window.ENV.API_URL` and `window.ENV.api_url` are accepted;
        // same for the token.
        Self {
            api_url: read_env_string(&["API_URL", "api_url"])
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_token: read_env_string(&["API_TOKEN", "api_token"])
                .filter(|t| !t.trim().is_empty()),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Tunables for the notes listing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NotesConfig {
    pub per_page: u32,
    pub debounce_ms: i32,
    pub loader_min_ms: i64,
    pub toast_ms: i64,
    pub stale_ms: i64,
    pub search_storage_key: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            per_page: 10,
            debounce_ms: 500,
            loader_min_ms: 3000,
            toast_ms: 2000,
            stale_ms: 60_000,
            search_storage_key: "notes-search".to_string(),
        }
    }
}

impl NotesConfig {
    /// Defaults overlaid with numeric overrides from `window.ENV`
    /// (`PER_PAGE`, `DEBOUNCE_MS`, `LOADER_MIN_MS`).
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_overrides(|key| read_env_string(&[key]));
        cfg
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let num = |key: &str| lookup(key).and_then(|v| v.trim().parse::<i64>().ok());

        if let Some(v) = num("PER_PAGE")
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v > 0)
        {
            self.per_page = v;
        }
        if let Some(v) = num("DEBOUNCE_MS")
            .and_then(|v| i32::try_from(v).ok())
            .filter(|v| *v >= 0)
        {
            self.debounce_ms = v;
        }
        if let Some(v) = num("LOADER_MIN_MS").filter(|v| *v >= 0) {
            self.loader_min_ms = v;
        }
    }
}

fn read_env_string(keys: &[&str]) -> Option<String> {
    let window = web_sys::window()?;
    let env = window.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }

    keys.iter().find_map(|k| {
        let v = js_sys::Reflect::get(&env, &(*k).into()).ok()?;
        v.as_string()
            .or_else(|| v.as_f64().map(|n| (n as i64).to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_config_defaults() {
        let cfg = NotesConfig::default();
        assert_eq!(cfg.per_page, 10);
        assert_eq!(cfg.debounce_ms, 500);
        assert_eq!(cfg.loader_min_ms, 3000);
        assert_eq!(cfg.search_storage_key, "notes-search");
    }

    #[test]
    fn test_notes_config_overrides_ignore_invalid_values() {
        let mut cfg = NotesConfig::default();
        cfg.apply_overrides(|k| match k {
            "PER_PAGE" => Some("0".to_string()),
            "DEBOUNCE_MS" => Some("250".to_string()),
            "LOADER_MIN_MS" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(cfg.per_page, 10);
        assert_eq!(cfg.debounce_ms, 250);
        assert_eq!(cfg.loader_min_ms, 3000);
    }

    #[test]
    fn test_notes_config_overrides_reject_out_of_range_values() {
        let mut cfg = NotesConfig::default();
        cfg.apply_overrides(|k| match k {
            "PER_PAGE" => Some("4294967306".to_string()),
            "DEBOUNCE_MS" => Some("2147483648".to_string()),
            _ => None,
        });
        assert_eq!(cfg.per_page, 10);
        assert_eq!(cfg.debounce_ms, 500);

        cfg.apply_overrides(|k| match k {
            "PER_PAGE" => Some("25".to_string()),
            "DEBOUNCE_MS" => Some("-1".to_string()),
            _ => None,
        });
        assert_eq!(cfg.per_page, 25);
        assert_eq!(cfg.debounce_ms, 500);
    }
}
