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

//! Defines the error type of the engine runtime.

use crate::platform::WindowId;
use std::fmt;

/// An error raised by the engine runtime.
#[derive(Debug)]
pub enum EngineError {
    /// The configuration file could not be read.
    ConfigLoad {
        /// The path of the file that failed to load.
        path: String,
        /// The underlying I/O error.
        details: String,
    },
    /// The configuration text is not valid JSON for an [`EngineConfig`](crate::EngineConfig).
    ConfigParse(String),
    /// The configuration could not be serialized or written.
    ConfigWrite {
        /// The destination path.
        path: String,
        /// The underlying I/O or serialization error.
        details: String,
    },
    /// A message was addressed to a window the engine does not know.
    UnknownWindow(WindowId),
    /// The engine that owned the message queue has been dropped.
    QueueDisconnected,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ConfigLoad { path, details } => {
                write!(f, "Failed to load engine config from '{path}': {details}")
            }
            EngineError::ConfigParse(details) => {
                write!(f, "Invalid engine config: {details}")
            }
            EngineError::ConfigWrite { path, details } => {
                write!(f, "Failed to write engine config to '{path}': {details}")
            }
            EngineError::UnknownWindow(id) => {
                write!(f, "No window registered for {id}")
            }
            EngineError::QueueDisconnected => {
                write!(f, "Message queue disconnected; the engine is gone")
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::ConfigParse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = EngineError::ConfigLoad {
            path: "engine.json".to_string(),
            details: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load engine config from 'engine.json': not found"
        );
        assert_eq!(
            EngineError::UnknownWindow(WindowId::from_raw(7)).to_string(),
            "No window registered for window#7"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: EngineError = json_err.into();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }
}
