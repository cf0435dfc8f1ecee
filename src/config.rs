//! Build-time configuration.
//!
//! `RECEITAS_BACKEND_URL` and `RECEITAS_LOG` are read when the wasm bundle is
//! compiled. Without a backend URL the app talks to the origin it was served
//! from.

use leptos::prelude::*;

const BACKEND_URL_VAR: Option<&str> = option_env!("RECEITAS_BACKEND_URL");
const LOG_LEVEL_VAR: Option<&str> = option_env!("RECEITAS_LOG");
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root of the REST API, e.g. `https://host/api`. Never ends with `/`.
    pub api_base: String,
    /// `tracing` filter directive.
    pub log_level: String,
}

impl AppConfig {
    pub fn new(backend_url: &str, log_level: &str) -> Self {
        Self {
            api_base: api_base_for(backend_url),
            log_level: log_level.to_string(),
        }
    }

    /// Resolves the configuration for the running page.
    pub fn load() -> Self {
        let backend = BACKEND_URL_VAR
            .filter(|v| !v.trim().is_empty())
            .map(String::from)
            .or_else(window_origin)
            .unwrap_or_default();
        let level = LOG_LEVEL_VAR
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_LOG_LEVEL);
        Self::new(&backend, level)
    }

    /// Absolute URL for an API path such as `/recipes`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

fn api_base_for(backend_url: &str) -> String {
    format!("{}/api", backend_url.trim().trim_end_matches('/'))
}

fn window_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_else(AppConfig::load)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_strips_trailing_slash() {
        let config = AppConfig::new("https://receitas.example.com/", "debug");
        assert_eq!(config.api_base, "https://receitas.example.com/api");
        assert_eq!(
            config.url("/recipes"),
            "https://receitas.example.com/api/recipes"
        );
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_empty_backend_gives_relative_api() {
        let config = AppConfig::new("", "info");
        assert_eq!(config.url("/shopping-lists"), "/api/shopping-lists");
    }
}
