// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate client configuration from .env files

use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default Places API endpoint root
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Client configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all client settings in one struct
/// Load with PlacesConfig::from_env() or start from PlacesConfig::default()
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// Google Places API key (empty = not configured)
    pub api_key: String,

    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Cache lifetime in minutes (0 disables caching)
    pub cache_period: u64,

    /// Thumbnail image size requested for place photos
    pub image_thumbnail_width: u32,
    pub image_thumbnail_height: u32,

    /// Big image size requested for place photos
    pub image_big_width: u32,
    pub image_big_height: u32,

    /// HTTP request timeout in seconds
    pub timeout: u64,

    /// Log level: debug, info, warn, error
    pub log_level: String,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        PlacesConfig {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            // two weeks
            cache_period: 20160,
            image_thumbnail_width: 100,
            image_thumbnail_height: 100,
            image_big_width: 1024,
            image_big_height: 768,
            timeout: 30,
            log_level: "info".to_string(),
        }
    }
}

impl PlacesConfig {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment, falling back to defaults
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = PlacesConfig::default();

        PlacesConfig {
            api_key: env::var("GOOGLE_PLACES_API_KEY").unwrap_or_else(|_| String::new()),

            base_url: env::var("GOOGLE_PLACES_BASE_URL").unwrap_or(defaults.base_url),

            cache_period: parse_var("GOOGLE_PLACES_CACHE_PERIOD", defaults.cache_period),

            image_thumbnail_width: parse_var(
                "GOOGLE_PLACES_IMAGE_THUMBNAIL_WIDTH",
                defaults.image_thumbnail_width,
            ),
            image_thumbnail_height: parse_var(
                "GOOGLE_PLACES_IMAGE_THUMBNAIL_HEIGHT",
                defaults.image_thumbnail_height,
            ),
            image_big_width: parse_var("GOOGLE_PLACES_IMAGE_BIG_WIDTH", defaults.image_big_width),
            image_big_height: parse_var("GOOGLE_PLACES_IMAGE_BIG_HEIGHT", defaults.image_big_height),

            timeout: parse_var("GOOGLE_PLACES_TIMEOUT", defaults.timeout),

            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Builder-style API key override
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Cache lifetime as a Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_period * 60)
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures the client can build usable requests
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("GOOGLE_PLACES_BASE_URL must not be empty".to_string());
        }

        if self.image_thumbnail_width == 0
            || self.image_thumbnail_height == 0
            || self.image_big_width == 0
            || self.image_big_height == 0
        {
            return Err("Image dimensions must be greater than zero".to_string());
        }

        if self.api_key.is_empty() {
            log::warn!("GOOGLE_PLACES_API_KEY not configured - requests will fail");
        }

        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid value for {}: {:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlacesConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache_ttl(), Duration::from_secs(20160 * 60));
        assert_eq!(
            (config.image_thumbnail_width, config.image_thumbnail_height),
            (100, 100)
        );
        assert_eq!((config.image_big_width, config.image_big_height), (1024, 768));
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_validate() {
        let config = PlacesConfig::default().with_api_key("test_key");
        assert!(config.validate().is_ok());

        let mut broken = config.clone();
        broken.image_big_height = 0;
        assert!(broken.validate().is_err());

        let mut no_base = config;
        no_base.base_url = String::new();
        assert!(no_base.validate().is_err());
    }

    #[test]
    fn test_parse_var_falls_back_on_garbage() {
        env::set_var("GOOGLE_PLACES_TEST_PARSE_VAR", "not-a-number");
        assert_eq!(parse_var("GOOGLE_PLACES_TEST_PARSE_VAR", 42u32), 42);

        env::set_var("GOOGLE_PLACES_TEST_PARSE_VAR", "7");
        assert_eq!(parse_var("GOOGLE_PLACES_TEST_PARSE_VAR", 42u32), 7);
        env::remove_var("GOOGLE_PLACES_TEST_PARSE_VAR");
    }
}
