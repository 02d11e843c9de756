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

//! Backend-agnostic input identities and the payloads carried by input events.
//!
//! These types are plain data. The engine's input manager publishes them
//! through [`Emitter`](crate::signal::Emitter)s, one per kind of input.

mod key;

pub use self::key::Key;

use crate::math::Offset2D;
use serde::{Deserialize, Serialize};

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// The first extra button (typically "back").
    X1,
    /// The second extra button (typically "forward").
    X2,
}

impl MouseButton {
    /// The entry for this button in the key-state table.
    pub const fn key(self) -> Key {
        match self {
            MouseButton::Left => Key::LeftButton,
            MouseButton::Right => Key::RightButton,
            MouseButton::Middle => Key::MiddleButton,
            MouseButton::X1 => Key::X1Button,
            MouseButton::X2 => Key::X2Button,
        }
    }
}

/// Modifier keys held while an input event happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeyMods {
    /// A control key was down.
    pub control: bool,
    /// A shift key was down.
    pub shift: bool,
    /// An alt key was down.
    pub alt: bool,
}

impl KeyMods {
    /// No modifier held.
    pub const NONE: Self = Self {
        control: false,
        shift: false,
        alt: false,
    };

    /// Returns `true` if no modifier is held.
    pub fn is_empty(&self) -> bool {
        !(self.control || self.shift || self.alt)
    }
}

/// Auto-repeat information for a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeyFlags {
    /// The key was already down before this event (auto-repeat).
    pub repeat: bool,
    /// How many repeats the platform folded into this event.
    pub repeat_count: u16,
}

/// Payload of the key pressed / key released events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The key, with generic modifiers already resolved to their left/right
    /// variant when the platform can tell them apart.
    pub key: Key,
    /// The hardware scancode, with `0xE0` in the high byte for extended keys.
    pub scancode: u16,
    /// Modifiers held at the time of the event.
    pub mods: KeyMods,
    /// Auto-repeat information.
    pub flags: KeyFlags,
}

impl KeyEvent {
    /// A non-repeating event without modifiers and with an unknown scancode.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            scancode: 0,
            mods: KeyMods::NONE,
            flags: KeyFlags::default(),
        }
    }

    /// Returns the event with `mods` as its modifiers.
    #[must_use]
    pub fn with_mods(mut self, mods: KeyMods) -> Self {
        self.mods = mods;
        self
    }

    /// Returns the event marked as an auto-repeat.
    #[must_use]
    pub fn repeated(mut self, repeat_count: u16) -> Self {
        self.flags = KeyFlags {
            repeat: true,
            repeat_count,
        };
        self
    }
}

/// Payload of the mouse button pressed / released events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MouseButtonEvent {
    /// The button.
    pub button: MouseButton,
    /// Cursor position in client coordinates.
    pub position: Offset2D,
    /// Modifiers held at the time of the event.
    pub mods: KeyMods,
}

impl MouseButtonEvent {
    /// An event without modifiers.
    pub fn new(button: MouseButton, position: Offset2D) -> Self {
        Self {
            button,
            position,
            mods: KeyMods::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_buttons_map_to_distinct_keys() {
        let buttons = [
            MouseButton::Left,
            MouseButton::Right,
            MouseButton::Middle,
            MouseButton::X1,
            MouseButton::X2,
        ];
        let mut codes: Vec<u16> = buttons.iter().map(|b| b.key().code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), buttons.len());
    }

    #[test]
    fn test_key_event_builders() {
        let mods = KeyMods {
            shift: true,
            ..KeyMods::NONE
        };
        let event = KeyEvent::new(Key::Space).with_mods(mods).repeated(3);

        assert_eq!(event.key, Key::Space);
        assert!(event.mods.shift);
        assert!(!event.mods.is_empty());
        assert!(event.flags.repeat);
        assert_eq!(event.flags.repeat_count, 3);
    }
}
