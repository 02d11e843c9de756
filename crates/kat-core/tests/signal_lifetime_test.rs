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

use kat_core::signal::{Emitter, Subscription};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct KeyboardDevice {
    on_key: Emitter<(char, bool)>,
}

struct Listener {
    seen: Rc<RefCell<Vec<char>>>,
    _subscription: Subscription,
}

impl Listener {
    fn attach(device: &KeyboardDevice) -> Self {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let subscription = {
            let seen = seen.clone();
            device.on_key.connect(move |&(c, pressed)| {
                if pressed {
                    seen.borrow_mut().push(c);
                }
            })
        };
        Self {
            seen,
            _subscription: subscription,
        }
    }
}

#[test]
fn test_int_emitter_scenario() {
    let emitter: Emitter<i32, i32> = Emitter::new();
    let h1 = emitter.connect(|x| x + 100);
    let h2 = emitter.connect(|x| x * 3);
    let h3 = emitter.connect(|x| 1 - x);

    assert_eq!(emitter.emit(&5), vec![105, 15, -4]);

    drop(h2);
    assert_eq!(emitter.emit(&7), vec![107, -6]);

    assert!(h1.is_connected());
    assert!(h3.is_connected());
}

#[test]
fn test_component_listens_for_its_own_lifetime() {
    let device = KeyboardDevice {
        on_key: Emitter::new(),
    };

    let listener = Listener::attach(&device);
    device.on_key.fire(&('a', true));
    device.on_key.fire(&('a', false));
    device.on_key.fire(&('b', true));

    let seen = listener.seen.clone();
    drop(listener);
    device.on_key.fire(&('c', true));

    assert_eq!(*seen.borrow(), vec!['a', 'b']);
    assert!(device.on_key.is_empty());
}

#[test]
fn test_listener_outliving_producer() {
    let device = KeyboardDevice {
        on_key: Emitter::new(),
    };
    let listener = Listener::attach(&device);
    device.on_key.fire(&('x', true));

    drop(device);
    let seen = listener.seen.clone();
    drop(listener);

    assert_eq!(*seen.borrow(), vec!['x']);
}

#[test]
fn test_explicit_disconnect_then_scope_exit() {
    let emitter: Emitter<()> = Emitter::new();
    let kept_hits = Rc::new(Cell::new(0));
    let _kept = {
        let kept_hits = kept_hits.clone();
        emitter.connect(move |_| kept_hits.set(kept_hits.get() + 1))
    };

    {
        let mut scoped = emitter.connect(|_| panic!("disconnected handler must not run"));
        scoped.disconnect();
    }

    emitter.fire(&());
    emitter.fire(&());
    assert_eq!(kept_hits.get(), 2);
}

#[test]
fn test_many_handlers_each_called_once_with_identical_args() {
    let emitter: Emitter<String, usize> = Emitter::new();
    let calls = Rc::new(RefCell::new(Vec::new()));

    let subscriptions: Vec<Subscription> = (0..16)
        .map(|n| {
            let calls = calls.clone();
            emitter.connect(move |s: &String| {
                calls.borrow_mut().push((n, s.clone()));
                n
            })
        })
        .collect();

    let results = emitter.emit(&"payload".to_string());

    assert_eq!(results, (0..16).collect::<Vec<usize>>());
    let calls = calls.borrow();
    assert_eq!(calls.len(), 16);
    assert!(calls.iter().all(|(_, s)| s == "payload"));
    assert_eq!(subscriptions.len(), 16);
}

#[test]
fn test_handler_owning_follow_up_connection_tears_down_cleanly() {
    // The owner's closure keeps a second connection to the same device alive,
    // plus one to another device.
    let device = KeyboardDevice {
        on_key: Emitter::new(),
    };
    let other = KeyboardDevice {
        on_key: Emitter::new(),
    };
    let follow_up_hits = Rc::new(Cell::new(0));
    let follow_up = {
        let follow_up_hits = follow_up_hits.clone();
        device
            .on_key
            .connect(move |_| follow_up_hits.set(follow_up_hits.get() + 1))
    };
    let mirrored = other.on_key.connect(|_| {});
    let owner = device.on_key.connect(move |_| {
        let _keep = (&follow_up, &mirrored);
    });

    device.on_key.fire(&('a', true));
    assert_eq!(follow_up_hits.get(), 1);

    drop(owner);

    assert_eq!(device.on_key.handler_count(), 0);
    assert_eq!(other.on_key.handler_count(), 0);
    device.on_key.fire(&('b', true));
    assert_eq!(follow_up_hits.get(), 1);
}

#[test]
fn test_detached_handler_owning_subscription_disconnects_by_id() {
    let device = KeyboardDevice {
        on_key: Emitter::new(),
    };
    let nested = device.on_key.connect(|_| {});
    let id = device.on_key.connect_detached(move |_| {
        let _keep = &nested;
    });

    assert!(device.on_key.disconnect(id));

    assert!(device.on_key.is_empty());
}
