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

//! The seam between native windowing glue and the engine.
//!
//! Platform code never touches engine objects directly. It translates native
//! messages into [`WindowMessage`]s and posts them, tagged with the
//! [`WindowId`] they belong to, through a [`MessagePoster`]. The engine drains
//! the queue once per frame on its own thread and routes every message to the
//! owning window.

use crate::error::EngineError;
use kat_core::input::{KeyEvent, MouseButtonEvent};
use kat_core::math::{Extent2D, Offset2D};
use std::fmt;

/// Identifies a window within one engine. Never reused by that engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    /// Wraps a raw id, e.g. one stored in a native window's user data.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value of this id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// A platform message addressed to one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMessage {
    /// The user asked to close the window.
    Close,
    /// The window's contents must be redrawn.
    Paint,
    /// The client area changed size.
    Resized(Extent2D),
    /// A key went down (or auto-repeated).
    KeyDown(KeyEvent),
    /// A key went up.
    KeyUp(KeyEvent),
    /// A mouse button went down.
    MouseDown(MouseButtonEvent),
    /// A mouse button went up.
    MouseUp(MouseButtonEvent),
    /// The cursor moved to a new client position.
    MouseMoved(Offset2D),
}

/// The engine's end of the platform message channel.
#[derive(Debug)]
pub(crate) struct MessageQueue {
    sender: flume::Sender<(WindowId, WindowMessage)>,
    receiver: flume::Receiver<(WindowId, WindowMessage)>,
}

impl MessageQueue {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// A new poster feeding this queue.
    pub(crate) fn poster(&self) -> MessagePoster {
        MessagePoster {
            sender: self.sender.clone(),
        }
    }

    /// Pops the next pending message without blocking.
    pub(crate) fn try_next(&self) -> Option<(WindowId, WindowMessage)> {
        self.receiver.try_recv().ok()
    }

    /// Number of messages waiting to be pumped.
    pub(crate) fn pending(&self) -> usize {
        self.receiver.len()
    }
}

/// A cloneable, thread-safe handle for posting messages to an engine.
///
/// Posting never blocks. Messages are delivered on the engine's next
/// [`update`](crate::Engine::update), in the order they were posted.
#[derive(Debug, Clone)]
pub struct MessagePoster {
    sender: flume::Sender<(WindowId, WindowMessage)>,
}

impl MessagePoster {
    /// Queues `message` for the window `id`.
    ///
    /// Fails with [`EngineError::QueueDisconnected`] once the engine is gone.
    /// The id is not validated here; messages for unknown windows are dropped
    /// with a warning when pumped.
    pub fn post(&self, id: WindowId, message: WindowMessage) -> Result<(), EngineError> {
        self.sender.send((id, message)).map_err(|e| {
            log::error!("Failed to post {:?}: {e}. Engine likely dropped.", e.0 .1);
            EngineError::QueueDisconnected
        })
    }
}
