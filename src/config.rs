//! Configuration types.

use std::path::PathBuf;

use crate::error::ConfigError;

/// What the navigator does with a rejected navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePolicy {
    /// Surface the error to the caller (debug builds).
    Strict,
    /// Log and ignore the request (release builds).
    Lenient,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

impl std::str::FromStr for RoutePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(ConfigError::InvalidValue {
                key: "EKOPAY_ROUTE_POLICY".to_string(),
                message: format!("expected `strict` or `lenient`, got `{other}`"),
            }),
        }
    }
}

/// App configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Preference database path. `:memory:` keeps everything in RAM.
    pub db_path: PathBuf,
    /// Port for the support HTTP server. `None` disables it.
    pub http_port: Option<u16>,
    /// Handling of invalid navigation requests.
    pub route_policy: RoutePolicy,
    /// Whether the `debug_onboarding` route may be navigated to.
    pub debug_routes: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/ekopay.db"),
            http_port: None,
            route_policy: RoutePolicy::default(),
            debug_routes: cfg!(debug_assertions),
        }
    }
}

impl AppConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("EKOPAY_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }

        if let Some(port) = lookup("EKOPAY_HTTP_PORT") {
            let port = port.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "EKOPAY_HTTP_PORT".to_string(),
                message: e.to_string(),
            })?;
            config.http_port = Some(port);
        }

        if let Some(policy) = lookup("EKOPAY_ROUTE_POLICY") {
            config.route_policy = policy.parse()?;
        }

        if let Some(flag) = lookup("EKOPAY_DEBUG_ROUTES") {
            config.debug_routes = parse_bool("EKOPAY_DEBUG_ROUTES", &flag)?;
        }

        Ok(config)
    }

    /// Whether the preference database lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.db_path.as_os_str() == ":memory:"
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got `{other}`"),
        }),
    }
}
