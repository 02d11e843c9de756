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

//! Engine and window configuration, loadable from JSON.

use crate::error::EngineError;
use kat_core::math::Extent2D;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a window created by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title shown in the window's caption.
    pub title: String,
    /// Initial client-area size in pixels.
    pub size: Extent2D,
    /// Whether resize messages from the platform are honoured.
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Window".to_string(),
            size: Extent2D::new(800, 800),
            resizable: false,
        }
    }
}

/// Complete engine configuration.
///
/// Missing fields fall back to their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether presentation waits for vertical sync.
    pub vsync: bool,
    /// Settings for windows created without an explicit config.
    pub window: WindowConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vsync: true,
            window: WindowConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load the configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EngineError::ConfigLoad {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        let config = Self::from_json(&content)?;
        log::debug!("Engine config loaded from '{}'.", path.display());
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let path = path.as_ref();
        let write_error = |details: String| EngineError::ConfigWrite {
            path: path.display().to_string(),
            details,
        };
        let json = serde_json::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| write_error(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.vsync);
        assert_eq!(config.window.size, Extent2D::new(800, 800));
    }

    #[test]
    fn test_partial_json_overrides_fields() {
        let config = EngineConfig::from_json(
            r#"{ "vsync": false, "window": { "title": "Demo", "resizable": true } }"#,
        )
        .unwrap();

        assert!(!config.vsync);
        assert_eq!(config.window.title, "Demo");
        assert!(config.window.resizable);
        assert_eq!(config.window.size, Extent2D::new(800, 800));
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let err = EngineConfig::from_json("{ vsync: ").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let path = std::env::temp_dir().join("kat-runtime-config-that-does-not-exist.json");
        let err = EngineConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, EngineError::ConfigLoad { .. }));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "kat-runtime-config-{}.json",
            std::process::id()
        ));
        let mut config = EngineConfig::default();
        config.window.title = "Saved".to_string();
        config.window.size = Extent2D::new(1024, 768);

        config.to_file(&path).unwrap();
        let loaded = EngineConfig::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }
}
