//! Field configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub row_count: i32,
    pub col_count: i32,
    /// Pixel size of one cell. Only read by renderers.
    pub cube_size: u32,
    pub tick_interval_ms: u64,
    /// Number of upcoming pieces kept visible by the queue.
    pub preview: usize,
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            row_count: 20,
            col_count: 10,
            cube_size: 30,
            tick_interval_ms: 1000,
            preview: 1,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("config parse error: {0}")]
pub struct ConfigFromStrError(serde_json::Error);

impl FromStr for Config {
    type Err = ConfigFromStrError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(ConfigFromStrError)
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        serde_json::to_string(self)
            .map_err(|_| std::fmt::Error)
            .and_then(|s| f.write_str(&s))
    }
}
