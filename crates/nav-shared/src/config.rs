//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_CACHE_KEY, DEFAULT_CACHE_TTL_SECS, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_MENU_ENDPOINT, DEFAULT_PAGE_SUFFIX,
};

#[derive(Debug, Deserialize, Clone)]
pub struct NavConfig {
    pub app: AppSettings,
    pub api: ApiSettings,
    pub cache: CacheSettings,
    pub resolver: ResolverSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub menu_endpoint: String,
    pub timeout_seconds: u64,
    /// Keep cookies between requests, like a browser's credentialed fetch.
    pub with_credentials: bool,
    /// Session cookie (`name=value`) attached to non-public requests.
    pub session_cookie: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheSettings {
    pub key: String,
    pub ttl_seconds: u64,
    /// Directory for the persistent cache; in-memory when unset.
    pub dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResolverSettings {
    pub page_suffix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
    pub dir: Option<String>,
}

impl NavConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Layering: built-in defaults, `config/default`, `config/{APP_ENV}`,
    /// the explicit file (if any), then `NAV__SECTION__KEY` variables.
    pub fn load_from(path: Option<&str>) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let mut builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder
            .add_source(Environment::with_prefix("NAV").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.name", "navctl")?
            .set_default("api.base_url", DEFAULT_API_BASE_URL)?
            .set_default("api.menu_endpoint", DEFAULT_MENU_ENDPOINT)?
            .set_default("api.timeout_seconds", DEFAULT_HTTP_TIMEOUT_SECS)?
            .set_default("api.with_credentials", true)?
            .set_default("cache.key", DEFAULT_CACHE_KEY)?
            .set_default("cache.ttl_seconds", DEFAULT_CACHE_TTL_SECS)?
            .set_default("resolver.page_suffix", DEFAULT_PAGE_SUFFIX)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                env: "development".into(),
                name: "navctl".into(),
            },
            api: ApiSettings {
                base_url: DEFAULT_API_BASE_URL.into(),
                menu_endpoint: DEFAULT_MENU_ENDPOINT.into(),
                timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
                with_credentials: true,
                session_cookie: None,
            },
            cache: CacheSettings {
                key: DEFAULT_CACHE_KEY.into(),
                ttl_seconds: DEFAULT_CACHE_TTL_SECS,
                dir: None,
            },
            resolver: ResolverSettings {
                page_suffix: DEFAULT_PAGE_SUFFIX.into(),
            },
            logging: LoggingSettings {
                level: "info".into(),
                json: false,
                dir: None,
            },
        }
    }
}
