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

//! # Kat Runtime
//!
//! The engine loop and the components that talk to each other through
//! [`kat_core::signal`]: the [`Engine`], its [`Window`]s and the
//! [`InputManager`]. Native windowing code plugs in from the outside by
//! posting [`WindowMessage`]s through a [`MessagePoster`].

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod platform;
pub mod window;

pub use config::{EngineConfig, WindowConfig};
pub use engine::{Engine, Viewport};
pub use error::EngineError;
pub use input::InputManager;
pub use platform::{MessagePoster, WindowId, WindowMessage};
pub use window::Window;
