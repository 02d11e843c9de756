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

use anyhow::{Context, Result};
use kat_core::input::{Key, KeyEvent, KeyMods, MouseButton, MouseButtonEvent};
use kat_core::math::{Extent2D, Offset2D};
use kat_runtime::{Engine, EngineConfig, MessagePoster, Viewport, Window, WindowId, WindowMessage};
use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

const PALETTE: [&str; 4] = ["cyan", "magenta", "yellow", "white"];
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Stands in for a native message pump: replays a short input session.
fn spawn_scripted_platform(poster: MessagePoster, id: WindowId) -> thread::JoinHandle<Result<()>> {
    thread::spawn(move || {
        let ctrl = KeyMods {
            control: true,
            ..KeyMods::NONE
        };
        let shift = KeyMods {
            shift: true,
            ..KeyMods::NONE
        };
        let alt = KeyMods {
            alt: true,
            ..KeyMods::NONE
        };
        let script = [
            WindowMessage::MouseMoved(Offset2D::new(120, 80)),
            WindowMessage::KeyDown(KeyEvent::new(Key::Space).with_mods(ctrl)),
            WindowMessage::KeyUp(KeyEvent::new(Key::Space).with_mods(ctrl)),
            WindowMessage::Resized(Extent2D::new(1280, 720)),
            WindowMessage::KeyDown(KeyEvent::new(Key::Space).with_mods(shift)),
            WindowMessage::KeyDown(KeyEvent::new(Key::Space).with_mods(shift).repeated(1)),
            WindowMessage::KeyUp(KeyEvent::new(Key::Space)),
            WindowMessage::MouseDown(MouseButtonEvent {
                mods: alt,
                ..MouseButtonEvent::new(MouseButton::Left, Offset2D::new(300, 200))
            }),
            WindowMessage::MouseUp(MouseButtonEvent::new(
                MouseButton::Left,
                Offset2D::new(300, 200),
            )),
            WindowMessage::KeyDown(KeyEvent::new(Key::Escape)),
        ];
        for message in script {
            thread::sleep(FRAME_TIME * 2);
            poster.post(id, message)?;
        }
        Ok(())
    })
}

fn load_config() -> Result<EngineConfig> {
    match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_file(&path)
            .with_context(|| format!("loading engine config from '{path}'")),
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let engine = Engine::new(load_config()?);
    let window = Window::new(&engine);
    window.set_resizable(true);
    engine.set_vsync(false);
    engine.set_primary_window(&window);

    let color = Rc::new(Cell::new(0usize));

    let _on_viewport = {
        let color = color.clone();
        engine.viewport_changed().connect(move |viewport: &Viewport| {
            color.set((color.get() + 1) % PALETTE.len());
            log::info!(
                "Viewport is now {}x{}, background {}.",
                viewport.size.width,
                viewport.size.height,
                PALETTE[color.get()]
            );
        })
    };

    let _on_key = {
        let color = color.clone();
        let weak_engine = Rc::downgrade(&engine);
        engine.input().key_pressed().connect(move |event: &KeyEvent| {
            let Some(engine) = weak_engine.upgrade() else {
                return;
            };
            if event.flags.repeat {
                return;
            }
            match event.key {
                Key::Space if event.mods.control => {
                    color.set((color.get() + 1) % PALETTE.len());
                    log::info!("Background changed to {}.", PALETTE[color.get()]);
                }
                Key::Space if event.mods.shift => {
                    let pos = engine.input().mouse_position();
                    log::info!("Pos: {}, {}", pos.x, pos.y);
                }
                Key::Escape => {
                    if let Some(window) = engine.primary_window() {
                        window.set_closed(true);
                    }
                }
                _ => {}
            }
        })
    };

    let _on_mouse = engine
        .input()
        .mouse_button_pressed()
        .connect(|event: &MouseButtonEvent| {
            if event.button == MouseButton::Left && event.mods.alt {
                log::info!("MPos: {}, {}", event.position.x, event.position.y);
            }
        });

    let _on_redraw = {
        let weak_window = Rc::downgrade(&window);
        window.redraw().connect(move |_| {
            if let Some(window) = weak_window.upgrade() {
                window.engine().set_viewport_to_window(&window);
            }
        })
    };

    let _frame_pacing = engine.window_update().connect(|_| thread::sleep(FRAME_TIME));

    let platform = spawn_scripted_platform(engine.poster(), window.id());
    let frames = engine.mainloop();
    log::info!("Ran {frames} frame(s).");

    platform
        .join()
        .map_err(|_| anyhow::anyhow!("platform thread panicked"))??;
    Ok(())
}
