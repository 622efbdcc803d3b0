use std::env;
use std::time::Duration;

use crate::entities::Viewport;
use crate::error::{config_error, Error};

pub const DEFAULT_API_BASE: &str = "https://dynamic-pricing-system-ola-1.onrender.com";
pub const DEFAULT_GOOGLE_MAPS_API_BASE: &str = "https://maps.googleapis.com";
pub const DEFAULT_AUTOCOMPLETE_RADIUS: f64 = 50_000.0;

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the fare-prediction service (`POST {api_base}/predict`).
    pub api_base: String,
    /// Unset means the prediction call waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub google_maps_api_base: String,
    pub google_maps_api_key: Option<String>,
    /// Autocomplete bias radius around the viewport center, in metres.
    pub autocomplete_radius: f64,
    pub viewport: Viewport,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            request_timeout: None,
            google_maps_api_base: DEFAULT_GOOGLE_MAPS_API_BASE.into(),
            google_maps_api_key: None,
            autocomplete_radius: DEFAULT_AUTOCOMPLETE_RADIUS,
            viewport: Viewport::default(),
        }
    }
}

impl Config {
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(api_base) = non_empty(lookup("FARECAST_API_BASE")) {
            config.api_base = api_base;
        }

        if let Some(raw) = non_empty(lookup("FARECAST_TIMEOUT_SECS")) {
            let secs: u64 = raw
                .parse()
                .map_err(|_| config_error("FARECAST_TIMEOUT_SECS", &raw))?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        if let Some(api_base) = non_empty(lookup("GOOGLE_MAPS_API_BASE")) {
            config.google_maps_api_base = api_base;
        }

        config.google_maps_api_key = non_empty(lookup("GOOGLE_MAPS_API_KEY"));

        if let Some(raw) = non_empty(lookup("FARECAST_AUTOCOMPLETE_RADIUS")) {
            let radius: f64 = raw
                .parse()
                .ok()
                .filter(|r: &f64| r.is_finite() && *r > 0.0)
                .ok_or_else(|| config_error("FARECAST_AUTOCOMPLETE_RADIUS", &raw))?;
            config.autocomplete_radius = radius;
        }

        tracing::debug!(api_base = %config.api_base, "loaded configuration");

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = Config::from_lookup(|_| None).unwrap();

    assert_eq!(config.api_base, DEFAULT_API_BASE);
    assert_eq!(config.google_maps_api_base, DEFAULT_GOOGLE_MAPS_API_BASE);
    assert!(config.google_maps_api_key.is_none());
    assert!(config.request_timeout.is_none());
    assert_eq!(config.autocomplete_radius, DEFAULT_AUTOCOMPLETE_RADIUS);
    assert_eq!(config.viewport.zoom, 11);
}

#[test]
fn reads_overrides() {
    let config = Config::from_lookup(|key| match key {
        "FARECAST_API_BASE" => Some("http://localhost:8000".into()),
        "FARECAST_TIMEOUT_SECS" => Some("30".into()),
        "GOOGLE_MAPS_API_KEY" => Some(" secret ".into()),
        "FARECAST_AUTOCOMPLETE_RADIUS" => Some("1500".into()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.api_base, "http://localhost:8000");
    assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    assert_eq!(config.google_maps_api_key.as_deref(), Some("secret"));
    assert_eq!(config.autocomplete_radius, 1500.0);
}

#[test]
fn blank_api_key_is_treated_as_unset() {
    let config = Config::from_lookup(|key| match key {
        "GOOGLE_MAPS_API_KEY" => Some("   ".into()),
        _ => None,
    })
    .unwrap();

    assert!(config.google_maps_api_key.is_none());
}

#[test]
fn rejects_malformed_numbers() {
    let err = Config::from_lookup(|key| match key {
        "FARECAST_TIMEOUT_SECS" => Some("soon".into()),
        _ => None,
    })
    .unwrap_err();
    assert_eq!(err.code, 2);

    let err = Config::from_lookup(|key| match key {
        "FARECAST_AUTOCOMPLETE_RADIUS" => Some("-5".into()),
        _ => None,
    })
    .unwrap_err();
    assert_eq!(err.code, 2);
}
