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

//! Typed, single-threaded publish/subscribe primitives.
//!
//! A producer exposes one [`Emitter`] per kind of event. Consumers
//! [`connect`](Emitter::connect) a handler and keep the returned
//! [`Subscription`] alive for as long as they want to listen; dropping it is
//! all the cleanup required. [`Emitter::emit`] runs every handler
//! synchronously, in registration order, and returns their results.
//!
//! The types here are `!Send`: registration, removal and dispatch all happen
//! on the thread that drives the engine loop. Work produced on other threads
//! reaches that loop through a message queue instead.

mod channel;
mod emitter;
mod subscription;

pub use self::channel::{Channel, HandlerFn, HandlerId};
pub use self::emitter::{Emitter, WeakEmitter};
pub use self::subscription::Subscription;
