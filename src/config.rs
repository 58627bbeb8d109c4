use serde::{Deserialize, Serialize};

use crate::geo::Margins;
use crate::state::ZoomExtent;

pub const DEFAULT_WORLD_URL: &str = "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";
pub const DEFAULT_NAMES_URL: &str = "world-country-names.csv";
pub const DEFAULT_API_BASE: &str = "https://api.shutterstock.com";

/// Startup configuration. Never carries the API token or fetch mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub world_url: String,
    /// Key of the countries object inside the topology.
    pub world_object: String,
    pub names_url: String,
    pub api_base: String,
    pub zoom: ZoomExtent,
    pub margins: Margins,
    /// Horizontal gap between the pointer and the floating country label.
    pub label_offset: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world_url: DEFAULT_WORLD_URL.to_string(),
            world_object: "countries".to_string(),
            names_url: DEFAULT_NAMES_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            zoom: ZoomExtent::default(),
            margins: Margins::default(),
            label_offset: 10.0,
        }
    }
}

impl AppConfig {
    /// Apply `world`, `object` and `names` overrides; other keys are ignored.
    /// The API base never comes from the page, since searches carry the user's token.
    pub fn with_overrides<'a>(
        mut self,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "world" => self.world_url = value.to_string(),
                "object" => self.world_object = value.to_string(),
                "names" => self.names_url = value.to_string(),
                _ => {}
            }
        }
        self
    }

    /// Defaults overridden by the page's query string.
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
            return Self::default();
        };
        let pairs: Vec<(&str, String)> = ["world", "object", "names"]
            .into_iter()
            .filter_map(|k| params.get(k).map(|v| (k, v)))
            .collect();
        Self::default().with_overrides(pairs.iter().map(|(k, v)| (*k, v.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FetchMode, MediaQuery};

    #[test]
    fn overrides_known_keys_only() {
        let cfg = AppConfig::default().with_overrides([
            ("world", "https://example.org/atlas.json"),
            ("names", "  "),
            ("token", "secret"),
        ]);
        assert_eq!(cfg.world_url, "https://example.org/atlas.json");
        assert_eq!(cfg.names_url, DEFAULT_NAMES_URL);
        assert_eq!(cfg.world_object, "countries");
        assert_eq!(cfg.zoom, ZoomExtent { min: 1.0, max: 8.0 });
    }

    #[test]
    fn api_base_cannot_be_redirected() {
        let cfg = AppConfig::default().with_overrides([("api", "https://attacker.example")]);
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        let query = MediaQuery::new("France", "secret", FetchMode::Image).unwrap();
        assert_eq!(
            query.endpoint(&cfg.api_base),
            "https://api.shutterstock.com/v2/images/search"
        );
    }
}
