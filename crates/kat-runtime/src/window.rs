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

//! Headless windows driven by platform messages.

use crate::config::WindowConfig;
use crate::engine::{Engine, Viewport};
use crate::platform::{WindowId, WindowMessage};
use kat_core::math::{Extent2D, Offset2D};
use kat_core::signal::{Emitter, Subscription};
use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A window registered with an [`Engine`].
///
/// On creation the window connects to the engine's update, redraw-request and
/// open-query events. The handlers only hold a [`Weak`] reference to the
/// window, and the subscriptions are owned by the window, so dropping the last
/// `Rc<Window>` disconnects everything.
pub struct Window {
    id: WindowId,
    _engine_subscriptions: [Subscription; 3],
    engine: Rc<Engine>,
    title: String,
    size: Cell<Extent2D>,
    pending_size: Cell<Option<Extent2D>>,
    resizable: Cell<bool>,
    closed: Cell<bool>,
    redraw: Emitter<()>,
    resized: Emitter<Extent2D>,
}

impl Window {
    /// Creates a window using the engine's default window settings.
    pub fn new(engine: &Rc<Engine>) -> Rc<Self> {
        let config = engine.config().window.clone();
        Self::with_config(engine, &config)
    }

    /// Creates a window with explicit settings.
    pub fn with_config(engine: &Rc<Engine>, config: &WindowConfig) -> Rc<Self> {
        let id = engine.allocate_window_id();

        let window = Rc::new_cyclic(|weak: &Weak<Window>| {
            let on_update = {
                let weak = weak.clone();
                engine.window_update().connect(move |_| {
                    if let Some(window) = weak.upgrade() {
                        window.update();
                    }
                })
            };
            let on_redraw_request = {
                let weak = weak.clone();
                engine.window_redraw_request().connect(move |_| {
                    if let Some(window) = weak.upgrade() {
                        window.request_redraw();
                    }
                })
            };
            let on_open_query = {
                let weak = weak.clone();
                engine
                    .open_query()
                    .connect(move |_| weak.upgrade().is_some_and(|window| !window.is_closed()))
            };

            Window {
                id,
                _engine_subscriptions: [on_update, on_redraw_request, on_open_query],
                engine: Rc::clone(engine),
                title: config.title.clone(),
                size: Cell::new(config.size),
                pending_size: Cell::new(None),
                resizable: Cell::new(config.resizable),
                closed: Cell::new(false),
                redraw: Emitter::new(),
                resized: Emitter::new(),
            }
        });

        engine.register_window(&window);
        window
    }

    /// The id messages for this window are addressed to.
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// The window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The engine this window belongs to.
    pub fn engine(&self) -> &Rc<Engine> {
        &self.engine
    }

    /// Fired when the window must repaint its contents.
    pub fn redraw(&self) -> &Emitter<()> {
        &self.redraw
    }

    /// Fired at most once per frame, with the new client size, when the
    /// window was resized since the previous frame.
    pub fn resized(&self) -> &Emitter<Extent2D> {
        &self.resized
    }

    /// Returns `true` once the window was asked to close.
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Marks the window closed (or open again).
    pub fn set_closed(&self, closed: bool) {
        self.closed.set(closed);
    }

    /// Current client-area size.
    pub fn size(&self) -> Extent2D {
        self.size.get()
    }

    /// A viewport covering the whole client area.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(Offset2D::ZERO, self.size.get())
    }

    /// Whether platform glue should let the user resize this window.
    pub fn is_resizable(&self) -> bool {
        self.resizable.get()
    }

    /// Sets whether platform glue should let the user resize this window.
    pub fn set_resizable(&self, resizable: bool) {
        self.resizable.set(resizable);
    }

    /// Asks for a repaint; [`redraw`](Window::redraw) fires when the engine
    /// pumps the resulting `Paint` message.
    pub fn request_redraw(&self) {
        if let Err(e) = self.engine.post(self.id, WindowMessage::Paint) {
            log::warn!("Redraw request for {} failed: {e}", self.id);
        }
    }

    /// Commits a pending resize, firing [`resized`](Window::resized).
    pub fn update(&self) {
        if let Some(size) = self.pending_size.take() {
            if size != self.size.get() {
                self.size.set(size);
                self.resized.fire(&size);
            }
        }
    }

    /// Handles one platform message addressed to this window.
    pub fn process(&self, message: WindowMessage) {
        log::trace!("{} <- {message:?}", self.id);
        let input = self.engine.input();
        match message {
            WindowMessage::Close => {
                log::debug!("{} '{}' asked to close.", self.id, self.title);
                self.closed.set(true);
            }
            WindowMessage::Paint => self.redraw.fire(&()),
            WindowMessage::Resized(size) => self.pending_size.set(Some(size)),
            WindowMessage::KeyDown(event) => input.handle_key_down(&event),
            WindowMessage::KeyUp(event) => input.handle_key_up(&event),
            WindowMessage::MouseDown(event) => input.handle_mouse_down(&event),
            WindowMessage::MouseUp(event) => input.handle_mouse_up(&event),
            WindowMessage::MouseMoved(position) => input.handle_mouse_moved(position),
        }
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("size", &self.size.get())
            .field("closed", &self.closed.get())
            .finish()
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.engine.unregister_window(self.id);
    }
}
