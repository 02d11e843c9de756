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

use super::channel::{Channel, HandlerId};
use super::subscription::Subscription;
use std::fmt;
use std::rc::{Rc, Weak};

/// A named event exposed by a producer component.
///
/// `A` is the argument handed to every handler by reference (use a tuple or a
/// payload struct for several values) and `R` is the handler return type.
/// With a non-unit `R`, [`emit`](Emitter::emit) returns one value per handler,
/// in registration order.
///
/// Cloning an emitter yields another handle to the same channel.
///
/// A handler that owns a clone of its own emitter keeps the channel alive
/// through itself: the channel then leaks, along with every handler in it.
/// Handlers that need to reach their emitter (to connect, disconnect or emit
/// re-entrantly) should capture a [`WeakEmitter`] from
/// [`downgrade`](Emitter::downgrade) instead.
///
/// # Example
///
/// ```rust
/// use kat_core::signal::Emitter;
///
/// let on_resize: Emitter<(u32, u32)> = Emitter::new();
/// let subscription = on_resize.connect(|&(w, h)| println!("{w}x{h}"));
/// on_resize.fire(&(800, 600));
/// drop(subscription); // stops listening
/// ```
///
/// Re-entrant use through a non-owning handle:
///
/// ```rust
/// use kat_core::signal::Emitter;
///
/// let countdown: Emitter<u32> = Emitter::new();
/// let weak = countdown.downgrade();
/// let _sub = countdown.connect(move |n| {
///     if let (Some(countdown), true) = (weak.upgrade(), *n > 0) {
///         countdown.fire(&(n - 1));
///     }
/// });
/// countdown.fire(&3);
/// ```
pub struct Emitter<A: ?Sized, R = ()> {
    channel: Rc<Channel<A, R>>,
}

impl<A: ?Sized, R> Emitter<A, R> {
    /// Creates an emitter with a fresh, empty channel.
    pub fn new() -> Self {
        Self {
            channel: Rc::new(Channel::new()),
        }
    }

    /// Registers `handler` without a [`Subscription`].
    ///
    /// The handler stays registered until [`disconnect`](Emitter::disconnect)
    /// is called with the returned id, or until the channel is gone. Anything
    /// the handler captures must stay valid for that long.
    pub fn connect_detached(&self, handler: impl Fn(&A) -> R + 'static) -> HandlerId {
        self.channel.register(handler)
    }

    /// Removes the handler registered under `id`. Returns `false` if it was
    /// not registered.
    pub fn disconnect(&self, id: HandlerId) -> bool {
        self.channel.remove(id)
    }

    /// Calls every registered handler with `args` and returns their results
    /// in registration order.
    pub fn emit(&self, args: &A) -> Vec<R> {
        self.channel.dispatch(args)
    }

    /// Returns a handle that does not keep the channel alive.
    pub fn downgrade(&self) -> WeakEmitter<A, R> {
        WeakEmitter {
            channel: Rc::downgrade(&self.channel),
        }
    }

    /// Number of handlers currently registered.
    pub fn handler_count(&self) -> usize {
        self.channel.len()
    }

    /// Returns `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl<A: ?Sized + 'static, R: 'static> Emitter<A, R> {
    /// Registers `handler` and returns the [`Subscription`] that keeps it
    /// registered.
    pub fn connect(&self, handler: impl Fn(&A) -> R + 'static) -> Subscription {
        let id = self.channel.register(handler);
        Subscription::new(id, self.channel.clone())
    }
}

impl<A: ?Sized> Emitter<A, ()> {
    /// Calls every registered handler with `args`.
    pub fn fire(&self, args: &A) {
        self.channel.dispatch(args);
    }
}

impl<A: ?Sized, R> Clone for Emitter<A, R> {
    fn clone(&self) -> Self {
        Self {
            channel: Rc::clone(&self.channel),
        }
    }
}

impl<A: ?Sized, R> Default for Emitter<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized, R> fmt::Debug for Emitter<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("handlers", &self.channel.len())
            .finish()
    }
}

/// A non-owning handle to an [`Emitter`]'s channel.
///
/// Safe to capture inside the emitter's own handlers.
pub struct WeakEmitter<A: ?Sized, R = ()> {
    channel: Weak<Channel<A, R>>,
}

impl<A: ?Sized, R> WeakEmitter<A, R> {
    /// Returns the emitter if its channel is still alive.
    pub fn upgrade(&self) -> Option<Emitter<A, R>> {
        self.channel.upgrade().map(|channel| Emitter { channel })
    }
}

impl<A: ?Sized, R> Clone for WeakEmitter<A, R> {
    fn clone(&self) -> Self {
        Self {
            channel: Weak::clone(&self.channel),
        }
    }
}

impl<A: ?Sized, R> fmt::Debug for WeakEmitter<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakEmitter")
            .field("alive", &(self.channel.strong_count() > 0))
            .finish()
    }
}
