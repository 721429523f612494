// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Settings for the controller's update loops.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tick loop settings.
///
/// Missing fields take their defaults, so an empty document is valid:
///
/// ```rust
/// use kestrel_game::LoopsConfig;
///
/// let config = LoopsConfig::from_ron_str("(tick_enabled: true)").unwrap();
/// assert!(config.tick_enabled);
/// assert_eq!(config.tick_interval_secs, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopsConfig {
    /// Whether the tick machine runs at all.
    pub tick_enabled: bool,
    /// Seconds between ticks. Zero ticks once per frame.
    pub tick_interval_secs: f32,
}

impl Default for LoopsConfig {
    fn default() -> Self {
        Self {
            tick_enabled: false,
            tick_interval_secs: 1.0,
        }
    }
}

impl LoopsConfig {
    /// Parses a RON document.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let config: Self = ron::from_str(source).context("Failed to parse loops config as RON")?;
        config.validated()
    }

    /// Parses a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(source).context("Failed to parse loops config as JSON")?;
        config.validated()
    }

    /// Loads a config file, picking the format from its extension
    /// (`.ron` or `.json`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read loops config '{}'", path.display()))?;
        let config = match extension(path) {
            Some("ron") => Self::from_ron_str(&source),
            Some("json") => Self::from_json_str(&source),
            other => bail!(
                "Unsupported loops config format {:?} for '{}'",
                other.unwrap_or(""),
                path.display()
            ),
        }
        .with_context(|| format!("Invalid loops config '{}'", path.display()))?;
        log::debug!("LoopsConfig: loaded from '{}'.", path.display());
        Ok(config)
    }

    /// Writes the config, picking the format from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = match extension(path) {
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .context("Failed to serialize loops config as RON")?,
            Some("json") => serde_json::to_string_pretty(self)
                .context("Failed to serialize loops config as JSON")?,
            other => bail!(
                "Unsupported loops config format {:?} for '{}'",
                other.unwrap_or(""),
                path.display()
            ),
        };
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write loops config '{}'", path.display()))
    }

    /// The tick interval as a [`Duration`]. Invalid values read as zero.
    pub fn tick_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.tick_interval_secs).unwrap_or(Duration::ZERO)
    }

    fn validated(self) -> Result<Self> {
        if Duration::try_from_secs_f32(self.tick_interval_secs).is_err() {
            bail!(
                "tick_interval_secs must be a non-negative number of seconds that fits a Duration, got {}",
                self.tick_interval_secs
            );
        }
        Ok(self)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
