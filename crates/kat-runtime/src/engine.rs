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

//! The engine: frame loop, viewport tracking and window bookkeeping.
//!
//! Windows and application code never call each other directly. The engine
//! exposes one [`Emitter`] per per-frame event and windows connect to them
//! when they are created, dropping their subscriptions when they go away.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::input::InputManager;
use crate::platform::{MessagePoster, MessageQueue, WindowId, WindowMessage};
use crate::window::Window;
use kat_core::math::{Extent2D, Offset2D};
use kat_core::signal::Emitter;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// The region of the render target drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    /// Bottom-left corner in pixels.
    pub position: Offset2D,
    /// Size in pixels.
    pub size: Extent2D,
}

impl Viewport {
    /// Creates a viewport from a position and a size.
    pub const fn new(position: Offset2D, size: Extent2D) -> Self {
        Self { position, size }
    }
}

/// Drives the frame loop and owns the per-frame events.
///
/// An engine is created behind an [`Rc`] because every [`Window`] keeps a
/// strong reference to it. The engine only keeps weak references to its
/// windows, keyed by [`WindowId`].
pub struct Engine {
    config: EngineConfig,
    vsync: Cell<bool>,
    current_viewport: Cell<Viewport>,
    primary_window: Cell<Option<WindowId>>,
    windows: RefCell<HashMap<WindowId, Weak<Window>>>,
    next_window_id: Cell<u64>,
    queue: MessageQueue,
    input: InputManager,

    window_update: Emitter<()>,
    window_redraw_request: Emitter<()>,
    viewport_changed: Emitter<Viewport>,
    open_query: Emitter<(), bool>,
}

impl Engine {
    /// Creates an engine with no windows.
    pub fn new(config: EngineConfig) -> Rc<Self> {
        log::info!("Engine initialized (vsync: {}).", config.vsync);
        Rc::new(Self {
            vsync: Cell::new(config.vsync),
            config,
            current_viewport: Cell::new(Viewport::default()),
            primary_window: Cell::new(None),
            windows: RefCell::new(HashMap::new()),
            next_window_id: Cell::new(1),
            queue: MessageQueue::new(),
            input: InputManager::new(),
            window_update: Emitter::new(),
            window_redraw_request: Emitter::new(),
            viewport_changed: Emitter::new(),
            open_query: Emitter::new(),
        })
    }

    /// The configuration the engine was created with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fired at the end of every [`update`](Engine::update), after messages
    /// were pumped.
    pub fn window_update(&self) -> &Emitter<()> {
        &self.window_update
    }

    /// Fired at the start of every [`update`](Engine::update), before
    /// messages are pumped.
    pub fn window_redraw_request(&self) -> &Emitter<()> {
        &self.window_redraw_request
    }

    /// Fired by [`set_viewport`](Engine::set_viewport) when the viewport changes.
    pub fn viewport_changed(&self) -> &Emitter<Viewport> {
        &self.viewport_changed
    }

    /// Asked by [`is_any_open`](Engine::is_any_open). Every window answers
    /// whether it is still open.
    pub fn open_query(&self) -> &Emitter<(), bool> {
        &self.open_query
    }

    /// Keyboard and mouse events and state.
    pub fn input(&self) -> &InputManager {
        &self.input
    }

    /// Runs one frame: redraw requests, message pump, window updates.
    ///
    /// Only the messages already queued when the pump starts are delivered;
    /// anything posted while they are processed waits for the next frame.
    pub fn update(&self) {
        self.window_redraw_request.fire(&());
        let pumped = self.pump_messages();
        log::trace!("Pumped {pumped} message(s).");
        self.window_update.fire(&());
    }

    fn pump_messages(&self) -> usize {
        let pending = self.queue.pending();
        let mut pumped = 0;
        while pumped < pending {
            let Some((id, message)) = self.queue.try_next() else {
                break;
            };
            pumped += 1;
            match self.window(id) {
                Some(window) => window.process(message),
                None => log::warn!("Dropping {message:?} addressed to unknown {id}."),
            }
        }
        pumped
    }

    /// Returns `true` if at least one window reports itself open.
    pub fn is_any_open(&self) -> bool {
        self.open_query.emit(&()).into_iter().any(|open| open)
    }

    /// Runs [`update`](Engine::update) until no window is open and returns
    /// the number of frames run.
    pub fn mainloop(&self) -> u64 {
        log::info!("Entering main loop.");
        let mut frames = 0;
        while self.is_any_open() {
            self.update();
            frames += 1;
        }
        log::info!("Main loop finished after {frames} frame(s).");
        frames
    }

    /// Enables or disables vertical sync.
    pub fn set_vsync(&self, vsync: bool) {
        self.vsync.set(vsync);
    }

    /// Returns whether vertical sync is enabled.
    pub fn is_vsync(&self) -> bool {
        self.vsync.get()
    }

    /// The viewport last set with [`set_viewport`](Engine::set_viewport).
    pub fn current_viewport(&self) -> Viewport {
        self.current_viewport.get()
    }

    /// Makes `viewport` current, firing [`viewport_changed`](Engine::viewport_changed)
    /// only if it differs from the current one.
    pub fn set_viewport(&self, viewport: Viewport) {
        let previous = self.current_viewport.replace(viewport);
        if previous != viewport {
            log::debug!("Viewport changed to {viewport:?}.");
            self.viewport_changed.fire(&viewport);
        }
    }

    /// Sets the viewport to cover `window`'s client area.
    pub fn set_viewport_to_window(&self, window: &Window) {
        self.set_viewport(window.viewport());
    }

    /// Marks `window` as the primary window.
    pub fn set_primary_window(&self, window: &Window) {
        self.primary_window.set(Some(window.id()));
    }

    /// The primary window, if one was set and it is still alive.
    pub fn primary_window(&self) -> Option<Rc<Window>> {
        self.primary_window.get().and_then(|id| self.window(id))
    }

    /// A handle platform glue can use to post messages, from any thread.
    pub fn poster(&self) -> MessagePoster {
        self.queue.poster()
    }

    /// Queues `message` for the window `id`, checking that it exists.
    pub fn post(&self, id: WindowId, message: WindowMessage) -> Result<(), EngineError> {
        if !self.windows.borrow().contains_key(&id) {
            return Err(EngineError::UnknownWindow(id));
        }
        self.queue.poster().post(id, message)
    }

    /// Looks up a live window by id.
    pub fn window(&self, id: WindowId) -> Option<Rc<Window>> {
        self.windows.borrow().get(&id).and_then(Weak::upgrade)
    }

    /// Number of live windows.
    pub fn window_count(&self) -> usize {
        self.windows.borrow().len()
    }

    pub(crate) fn allocate_window_id(&self) -> WindowId {
        let raw = self.next_window_id.get();
        self.next_window_id.set(raw + 1);
        WindowId::from_raw(raw)
    }

    pub(crate) fn register_window(&self, window: &Rc<Window>) {
        self.windows
            .borrow_mut()
            .insert(window.id(), Rc::downgrade(window));
        log::debug!("Registered {} '{}'.", window.id(), window.title());
    }

    pub(crate) fn unregister_window(&self, id: WindowId) {
        self.windows.borrow_mut().remove(&id);
        if self.primary_window.get() == Some(id) {
            self.primary_window.set(None);
        }
        log::debug!("Unregistered {id}.");
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("vsync", &self.vsync.get())
            .field("current_viewport", &self.current_viewport.get())
            .field("windows", &self.window_count())
            .field("pending_messages", &self.queue.pending())
            .finish()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        log::info!("Engine shut down.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_windows_means_nothing_open() {
        let engine = Engine::new(EngineConfig::default());
        assert!(!engine.is_any_open());
        assert_eq!(engine.mainloop(), 0);
    }

    #[test]
    fn test_open_query_aggregates_answers() {
        let engine = Engine::new(EngineConfig::default());
        let _closed = engine.open_query().connect(|_| false);
        assert!(!engine.is_any_open());

        let _open = engine.open_query().connect(|_| true);
        assert!(engine.is_any_open());
    }

    #[test]
    fn test_viewport_change_fires_only_on_difference() {
        let engine = Engine::new(EngineConfig::default());
        let changes = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let changes = changes.clone();
            engine
                .viewport_changed()
                .connect(move |v: &Viewport| changes.borrow_mut().push(*v))
        };

        let a = Viewport::new(Offset2D::ZERO, Extent2D::new(640, 480));
        let b = Viewport::new(Offset2D::new(10, 0), Extent2D::new(640, 480));
        engine.set_viewport(a);
        engine.set_viewport(a);
        engine.set_viewport(b);

        assert_eq!(*changes.borrow(), vec![a, b]);
        assert_eq!(engine.current_viewport(), b);
    }

    #[test]
    fn test_update_order() {
        let engine = Engine::new(EngineConfig::default());
        let order = Rc::new(RefCell::new(Vec::new()));

        let _redraw = {
            let order = order.clone();
            engine
                .window_redraw_request()
                .connect(move |_| order.borrow_mut().push("redraw_request"))
        };
        let _update = {
            let order = order.clone();
            engine
                .window_update()
                .connect(move |_| order.borrow_mut().push("update"))
        };

        engine.update();
        engine.update();

        assert_eq!(
            *order.borrow(),
            vec!["redraw_request", "update", "redraw_request", "update"]
        );
    }

    #[test]
    fn test_messages_for_unknown_windows_are_dropped() {
        let engine = Engine::new(EngineConfig::default());
        let ghost = WindowId::from_raw(42);

        assert!(matches!(
            engine.post(ghost, WindowMessage::Close),
            Err(EngineError::UnknownWindow(id)) if id == ghost
        ));

        engine.poster().post(ghost, WindowMessage::Close).unwrap();
        engine.update();
        assert_eq!(engine.queue.pending(), 0);
    }

    #[test]
    fn test_vsync_starts_from_config() {
        let config = EngineConfig {
            vsync: false,
            ..EngineConfig::default()
        };
        let engine = Engine::new(config);
        assert!(!engine.is_vsync());
        engine.set_vsync(true);
        assert!(engine.is_vsync());
    }
}
