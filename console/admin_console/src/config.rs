//! Application configuration loaded from environment variables.

use std::time::Duration;

use crate::errors::{ConsoleError, Result};
use crate::shell::View;
use crate::surface::{BaseStyle, ContainerSize};

#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the map substrate. Without it the map shows its placeholder.
    pub map_access_token: Option<String>,
    /// Base style the map starts in.
    pub map_style: BaseStyle,
    /// Screen shown at startup.
    pub initial_view: View,
    /// Simulated load latency of the headless map substrate.
    pub map_load_delay: Duration,
    /// Initial size of the map container, in pixels.
    pub container_size: ContainerSize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            map_access_token: env_var("MAP_ACCESS_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            map_style: match env_var("MAP_STYLE") {
                Ok(name) => BaseStyle::from_name(&name).ok_or_else(|| {
                    ConsoleError::Config(format!("Unknown MAP_STYLE: {name}"))
                })?,
                Err(_) => BaseStyle::default(),
            },
            initial_view: match env_var("INITIAL_VIEW") {
                Ok(id) => View::from_id(&id),
                Err(_) => View::default(),
            },
            map_load_delay: Duration::from_millis(
                env_var("MAP_LOAD_DELAY_MS")
                    .unwrap_or_else(|_| "250".to_string())
                    .parse()
                    .map_err(|_| ConsoleError::Config("Invalid MAP_LOAD_DELAY_MS".to_string()))?,
            ),
            container_size: ContainerSize {
                width: env_var("CONTAINER_WIDTH")
                    .unwrap_or_else(|_| "1280".to_string())
                    .parse()
                    .map_err(|_| ConsoleError::Config("Invalid CONTAINER_WIDTH".to_string()))?,
                height: env_var("CONTAINER_HEIGHT")
                    .unwrap_or_else(|_| "720".to_string())
                    .parse()
                    .map_err(|_| ConsoleError::Config("Invalid CONTAINER_HEIGHT".to_string()))?,
            },
        })
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| ConsoleError::Config(format!("Missing env var: {key}")))
}
