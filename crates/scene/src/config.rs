use layers::symbology::{LineLayerStyle, Theme, border_layers};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_CDN_URL: &str = "http://localhost:8080";

const MAPTILER_STYLE_BASE: &str = "https://api.maptiler.com/maps";

/// Runtime configuration of the map page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapConfig {
    pub api_base_url: String,
    pub cdn_url: String,
    /// Empty when unset; the basemap style then fails to authorize.
    pub maptiler_api_key: String,
    pub theme: Theme,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cdn_url: DEFAULT_CDN_URL.to_string(),
            maptiler_api_key: String::new(),
            theme: Theme::default(),
        }
    }
}

impl MapConfig {
    /// Builds a config, falling back to defaults for blank values.
    pub fn new(
        api_base_url: Option<String>,
        cdn_url: Option<String>,
        maptiler_api_key: Option<String>,
        theme: Theme,
    ) -> Self {
        let d = Self::default();
        let cfg = Self {
            api_base_url: non_blank(api_base_url).unwrap_or(d.api_base_url),
            cdn_url: non_blank(cdn_url).unwrap_or(d.cdn_url),
            maptiler_api_key: non_blank(maptiler_api_key).unwrap_or_default(),
            theme,
        };
        if !cfg.has_maptiler_key() {
            tracing::warn!("MapTiler API key is not set; basemap tiles will not load");
        }
        cfg
    }

    pub fn has_maptiler_key(&self) -> bool {
        !self.maptiler_api_key.is_empty()
    }

    /// Basemap style document for the current theme.
    pub fn style_url(&self) -> String {
        let style = match self.theme {
            Theme::Dark => "dataviz-dark",
            Theme::Light => "dataviz-light",
        };
        format!(
            "{MAPTILER_STYLE_BASE}/{style}/style.json?key={}",
            self.maptiler_api_key
        )
    }

    pub fn border_layers(&self) -> Vec<LineLayerStyle> {
        border_layers(self.theme)
    }

    /// `path` joined onto the API base, without doubled slashes.
    pub fn api_url(&self, path: &str) -> String {
        join(&self.api_base_url, path)
    }

    /// Absolute URL of a CDN asset. Absolute inputs pass through.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        join(&self.cdn_url, path)
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = MapConfig::new(Some(" ".into()), None, Some(String::new()), Theme::Light);
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert!(!cfg.has_maptiler_key());
    }

    #[test]
    fn style_url_follows_theme() {
        let mut cfg = MapConfig::new(None, None, Some("abc".into()), Theme::Dark);
        assert_eq!(
            cfg.style_url(),
            "https://api.maptiler.com/maps/dataviz-dark/style.json?key=abc"
        );
        cfg.theme = Theme::Light;
        assert!(cfg.style_url().contains("dataviz-light"));
        assert_eq!(cfg.border_layers().len(), 2);
    }

    #[test]
    fn urls_join_cleanly() {
        let cfg = MapConfig::new(
            Some("https://api.example.org/".into()),
            Some("https://cdn.example.org".into()),
            None,
            Theme::Light,
        );
        assert_eq!(
            cfg.api_url("/api/v1/map/pins"),
            "https://api.example.org/api/v1/map/pins"
        );
        assert_eq!(cfg.asset_url("a/b.jpg"), "https://cdn.example.org/a/b.jpg");
        assert_eq!(cfg.asset_url("https://x/y.jpg"), "https://x/y.jpg");
    }
}
