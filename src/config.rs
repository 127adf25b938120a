use anyhow::{bail, Result};

/// Label used for chart links when the caller does not supply one
pub const DEFAULT_CHART_LABEL: &str = "Chart Data";

/// Default chart window (one day)
pub const DEFAULT_CHART_SECONDS: u64 = 86400;

pub const DEFAULT_SITE_PREFIX: &str = "/pattoo/web";

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone)]
pub struct Config {
    // Localization
    pub language: String,

    // Charts
    pub site_prefix: String,
    pub default_chart_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            site_prefix: DEFAULT_SITE_PREFIX.to_string(),
            default_chart_seconds: DEFAULT_CHART_SECONDS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let language = std::env::var("PATTOO_WEB_LANGUAGE")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string());
        if language.is_empty() {
            bail!("PATTOO_WEB_LANGUAGE is set but empty");
        }

        Ok(Self {
            language,

            // Charts - a trailing slash would double up in chart links
            site_prefix: std::env::var("PATTOO_WEB_SITE_PREFIX")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_SITE_PREFIX.to_string()),
            default_chart_seconds: std::env::var("PATTOO_WEB_DEFAULT_CHART_SECONDS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .filter(|&seconds: &u64| seconds > 0)
                .unwrap_or(DEFAULT_CHART_SECONDS),
        })
    }

    /// Language code that translation entries must match to be shown.
    pub fn language(&self) -> &str {
        &self.language
    }
}
