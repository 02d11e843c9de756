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

//! Input state tracking and input events.

use kat_core::input::{Key, KeyEvent, MouseButton, MouseButtonEvent};
use kat_core::math::Offset2D;
use kat_core::signal::Emitter;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

/// Publishes keyboard and mouse events and answers "is this held right now?".
///
/// State is built from the messages the engine routes here, so queries reflect
/// everything pumped up to the current frame.
#[derive(Debug, Default)]
pub struct InputManager {
    key_pressed: Emitter<KeyEvent>,
    key_released: Emitter<KeyEvent>,
    mouse_button_pressed: Emitter<MouseButtonEvent>,
    mouse_button_released: Emitter<MouseButtonEvent>,
    held: RefCell<HashSet<Key>>,
    mouse_position: Cell<Offset2D>,
}

impl InputManager {
    /// Creates a manager with nothing held and the cursor at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired for every key press, including auto-repeats.
    pub fn key_pressed(&self) -> &Emitter<KeyEvent> {
        &self.key_pressed
    }

    /// Fired for every key release.
    pub fn key_released(&self) -> &Emitter<KeyEvent> {
        &self.key_released
    }

    /// Fired when a mouse button goes down.
    pub fn mouse_button_pressed(&self) -> &Emitter<MouseButtonEvent> {
        &self.mouse_button_pressed
    }

    /// Fired when a mouse button goes up.
    pub fn mouse_button_released(&self) -> &Emitter<MouseButtonEvent> {
        &self.mouse_button_released
    }

    /// Returns `true` while `key` is held.
    ///
    /// The generic [`Key::Shift`], [`Key::Control`] and [`Key::Alt`] are held
    /// when either side is.
    pub fn key(&self, key: Key) -> bool {
        let held = self.held.borrow();
        if held.contains(&key) {
            return true;
        }
        match key.sides() {
            Some((left, right)) => held.contains(&left) || held.contains(&right),
            None => false,
        }
    }

    /// Returns `true` while `button` is held.
    pub fn mouse_button(&self, button: MouseButton) -> bool {
        self.held.borrow().contains(&button.key())
    }

    /// Last known cursor position in client coordinates.
    pub fn mouse_position(&self) -> Offset2D {
        self.mouse_position.get()
    }

    pub(crate) fn handle_key_down(&self, event: &KeyEvent) {
        self.held.borrow_mut().insert(event.key);
        self.key_pressed.fire(event);
    }

    pub(crate) fn handle_key_up(&self, event: &KeyEvent) {
        self.held.borrow_mut().remove(&event.key);
        self.key_released.fire(event);
    }

    pub(crate) fn handle_mouse_down(&self, event: &MouseButtonEvent) {
        self.mouse_position.set(event.position);
        self.held.borrow_mut().insert(event.button.key());
        self.mouse_button_pressed.fire(event);
    }

    pub(crate) fn handle_mouse_up(&self, event: &MouseButtonEvent) {
        self.mouse_position.set(event.position);
        self.held.borrow_mut().remove(&event.button.key());
        self.mouse_button_released.fire(event);
    }

    pub(crate) fn handle_mouse_moved(&self, position: Offset2D) {
        self.mouse_position.set(position);
    }
}
