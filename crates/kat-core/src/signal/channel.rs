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

//! The handler store behind every [`Emitter`](super::Emitter).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identifies one registered handler within a single [`Channel`].
///
/// Ids are minted from a monotonically increasing counter and are never
/// reused for the lifetime of the channel, even after the handler is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Returns the raw counter value of this id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type-erased handler stored by a channel.
pub type HandlerFn<A, R> = dyn Fn(&A) -> R;

/// An ordered collection of handlers for one event signature.
///
/// Handlers are kept in registration order. Because ids only ever grow and
/// entries are appended, the list stays sorted by id, which lets removal use
/// a binary search.
///
/// All methods take `&self`. The handler list is only borrowed for the short
/// moment needed to read or modify it and never while a handler runs, so
/// handlers may register, remove or dispatch on the same channel.
pub struct Channel<A: ?Sized, R = ()> {
    handlers: RefCell<Vec<(HandlerId, Rc<HandlerFn<A, R>>)>>,
    next_id: Cell<u64>,
}

impl<A: ?Sized, R> Channel<A, R> {
    /// Creates an empty channel.
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Stores `handler` under a freshly minted id and returns that id.
    pub fn register(&self, handler: impl Fn(&A) -> R + 'static) -> HandlerId {
        let id = HandlerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Removes the handler registered under `id`.
    ///
    /// Returns `false` if no such handler is stored, which is not an error:
    /// removing twice is a no-op.
    ///
    /// The removed handler is dropped only after the handler list is released,
    /// so state it captured (including subscriptions to this same channel)
    /// may detach from here while it is torn down.
    pub fn remove(&self, id: HandlerId) -> bool {
        let removed = {
            let mut handlers = self.handlers.borrow_mut();
            match handlers.binary_search_by_key(&id, |(hid, _)| *hid) {
                Ok(index) => Some(handlers.remove(index)),
                Err(_) => None,
            }
        };
        removed.is_some()
    }

    /// Invokes every stored handler in registration order and collects their
    /// return values in the same order.
    ///
    /// The set of handlers is snapshotted before the first one runs:
    ///   - a handler added during dispatch is not called until the next dispatch,
    ///   - a handler removed during dispatch is still called in this one.
    ///
    /// A panicking handler aborts the remaining calls and the panic reaches
    /// the caller. The channel itself stays usable.
    pub fn dispatch(&self, args: &A) -> Vec<R> {
        let snapshot: Vec<Rc<HandlerFn<A, R>>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        log::trace!("Dispatching to {} handler(s).", snapshot.len());

        let mut results = Vec::with_capacity(snapshot.len());
        for handler in snapshot {
            results.push(handler(args));
        }
        results
    }

    /// Returns `true` if a handler is registered under `id`.
    pub fn contains(&self, id: HandlerId) -> bool {
        self.handlers
            .borrow()
            .binary_search_by_key(&id, |(hid, _)| *hid)
            .is_ok()
    }

    /// Number of currently registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Returns `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}

impl<A: ?Sized, R> Default for Channel<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized, R> fmt::Debug for Channel<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("handlers", &self.len())
            .field("next_id", &self.next_id.get())
            .finish()
    }
}

/// Removal seam used by [`Subscription`](super::Subscription), which does not
/// know the channel's signature.
pub(crate) trait Detach {
    fn detach(&self, id: HandlerId) -> bool;
}

impl<A: ?Sized, R> Detach for Channel<A, R> {
    fn detach(&self, id: HandlerId) -> bool {
        self.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_never_reused() {
        let channel = Channel::<i32>::new();
        let a = channel.register(|_| {});
        let b = channel.register(|_| {});
        assert!(channel.remove(a));
        let c = channel.register(|_| {});

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert!(c > b, "ids must keep growing after a removal");
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let channel = Channel::<i32>::new();
        let id = channel.register(|_| {});

        assert!(channel.remove(id));
        assert!(!channel.remove(id));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_removed_handler_can_detach_from_same_channel_on_drop() {
        struct DetachOnDrop {
            channel: Rc<Channel<i32>>,
            id: HandlerId,
        }
        impl Drop for DetachOnDrop {
            fn drop(&mut self) {
                self.channel.remove(self.id);
            }
        }

        let channel = Rc::new(Channel::<i32>::new());
        let inner = channel.register(|_| {});
        let guard = DetachOnDrop {
            channel: Rc::clone(&channel),
            id: inner,
        };
        let outer = channel.register(move |_| {
            let _keep = &guard;
        });

        assert!(channel.remove(outer));

        assert!(!channel.contains(inner));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_dispatch_collects_in_registration_order() {
        let channel = Channel::<i32, i32>::new();
        channel.register(|x| x + 1);
        channel.register(|x| x * 10);
        channel.register(|x| -x);

        assert_eq!(channel.dispatch(&3), vec![4, 30, -3]);
    }

    #[test]
    fn test_removal_from_the_middle_keeps_order() {
        let channel = Channel::<i32, &'static str>::new();
        channel.register(|_| "first");
        let middle = channel.register(|_| "middle");
        channel.register(|_| "last");

        channel.remove(middle);

        assert!(!channel.contains(middle));
        assert_eq!(channel.dispatch(&0), vec!["first", "last"]);
    }

    #[test]
    fn test_dispatch_with_no_handlers() {
        let channel = Channel::<str, usize>::new();
        assert!(channel.dispatch("nothing").is_empty());
    }

    #[test]
    fn test_unsized_argument() {
        let channel = Channel::<str, usize>::new();
        channel.register(|s| s.len());
        channel.register(|s| s.chars().filter(|c| *c == 'a').count());

        assert_eq!(channel.dispatch("banana"), vec![6, 3]);
    }

    #[test]
    fn test_debug_reports_handler_count() {
        let channel = Channel::<()>::new();
        channel.register(|_| {});
        let text = format!("{channel:?}");
        assert!(text.contains("handlers: 1"), "{text}");
    }
}
