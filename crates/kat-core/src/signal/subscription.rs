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

use super::channel::{Detach, HandlerId};
use std::fmt;
use std::rc::Rc;

/// RAII handle for one handler registered through [`Emitter::connect`].
///
/// The handler stays registered for as long as the subscription lives.
/// Dropping it, or calling [`disconnect`](Subscription::disconnect), removes
/// the handler from its channel exactly once.
///
/// A subscription keeps its channel alive, so it may safely outlive the
/// [`Emitter`] it came from.
///
/// [`Emitter`]: super::Emitter
/// [`Emitter::connect`]: super::Emitter::connect
#[must_use = "dropping a Subscription immediately disconnects its handler"]
pub struct Subscription {
    id: HandlerId,
    channel: Option<Rc<dyn Detach>>,
}

impl Subscription {
    pub(crate) fn new(id: HandlerId, channel: Rc<dyn Detach>) -> Self {
        Self {
            id,
            channel: Some(channel),
        }
    }

    /// The id of the handler this subscription controls.
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Returns `true` until the subscription has been disconnected.
    pub fn is_connected(&self) -> bool {
        self.channel.is_some()
    }

    /// Removes the handler from its channel.
    ///
    /// Calling this more than once is a no-op, as is calling it after the
    /// handler was already removed by id through the emitter.
    pub fn disconnect(&mut self) {
        if let Some(channel) = self.channel.take() {
            let removed = channel.detach(self.id);
            log::trace!("Subscription {} disconnected (removed: {removed}).", self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("connected", &self.is_connected())
            .finish()
    }
}
