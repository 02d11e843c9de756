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

//! Virtual-key identities.
//!
//! Discriminants are the Windows virtual-key codes, so platform glue can map a
//! raw key code with [`Key::from_code`] and back with [`Key::code`].

use serde::{Deserialize, Serialize};

macro_rules! virtual_keys {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$key_attr:meta])* $key:ident = $code:literal, )*
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(u16)]
        $vis enum $name {
            $( $(#[$key_attr])* $key = $code, )*
        }

        impl $name {
            /// Every key, in ascending code order.
            pub const ALL: &'static [$name] = &[ $( $name::$key, )* ];

            /// The virtual-key code of this key.
            pub const fn code(self) -> u16 {
                self as u16
            }

            /// Looks up the key for a virtual-key code.
            pub const fn from_code(code: u16) -> Option<Self> {
                match code {
                    $( $code => Some($name::$key), )*
                    _ => None,
                }
            }
        }
    };
}

virtual_keys! {
    /// A keyboard key, or a mouse button seen through the key-state table.
    #[allow(missing_docs)]
    pub enum Key {
        LeftButton = 0x01,
        RightButton = 0x02,
        MiddleButton = 0x04,
        X1Button = 0x05,
        X2Button = 0x06,
        Backspace = 0x08,
        Tab = 0x09,
        Clear = 0x0C,
        Enter = 0x0D,
        /// Either shift key.
        Shift = 0x10,
        /// Either control key.
        Control = 0x11,
        /// Either alt key.
        Alt = 0x12,
        Pause = 0x13,
        CapsLock = 0x14,
        Escape = 0x1B,
        Space = 0x20,
        PageUp = 0x21,
        PageDown = 0x22,
        End = 0x23,
        Home = 0x24,
        Left = 0x25,
        Up = 0x26,
        Right = 0x27,
        Down = 0x28,
        Select = 0x29,
        Print = 0x2A,
        Execute = 0x2B,
        PrintScreen = 0x2C,
        Insert = 0x2D,
        Delete = 0x2E,
        Help = 0x2F,
        Num0 = 0x30,
        Num1 = 0x31,
        Num2 = 0x32,
        Num3 = 0x33,
        Num4 = 0x34,
        Num5 = 0x35,
        Num6 = 0x36,
        Num7 = 0x37,
        Num8 = 0x38,
        Num9 = 0x39,
        A = 0x41,
        B = 0x42,
        C = 0x43,
        D = 0x44,
        E = 0x45,
        F = 0x46,
        G = 0x47,
        H = 0x48,
        I = 0x49,
        J = 0x4A,
        K = 0x4B,
        L = 0x4C,
        M = 0x4D,
        N = 0x4E,
        O = 0x4F,
        P = 0x50,
        Q = 0x51,
        R = 0x52,
        S = 0x53,
        T = 0x54,
        U = 0x55,
        V = 0x56,
        W = 0x57,
        X = 0x58,
        Y = 0x59,
        Z = 0x5A,
        LeftWindows = 0x5B,
        RightWindows = 0x5C,
        Apps = 0x5D,
        Sleep = 0x5F,
        Numpad0 = 0x60,
        Numpad1 = 0x61,
        Numpad2 = 0x62,
        Numpad3 = 0x63,
        Numpad4 = 0x64,
        Numpad5 = 0x65,
        Numpad6 = 0x66,
        Numpad7 = 0x67,
        Numpad8 = 0x68,
        Numpad9 = 0x69,
        Multiply = 0x6A,
        Add = 0x6B,
        Separator = 0x6C,
        Subtract = 0x6D,
        Decimal = 0x6E,
        Divide = 0x6F,
        F1 = 0x70,
        F2 = 0x71,
        F3 = 0x72,
        F4 = 0x73,
        F5 = 0x74,
        F6 = 0x75,
        F7 = 0x76,
        F8 = 0x77,
        F9 = 0x78,
        F10 = 0x79,
        F11 = 0x7A,
        F12 = 0x7B,
        F13 = 0x7C,
        F14 = 0x7D,
        F15 = 0x7E,
        F16 = 0x7F,
        F17 = 0x80,
        F18 = 0x81,
        F19 = 0x82,
        F20 = 0x83,
        F21 = 0x84,
        F22 = 0x85,
        F23 = 0x86,
        F24 = 0x87,
        NumLock = 0x90,
        LeftShift = 0xA0,
        RightShift = 0xA1,
        LeftControl = 0xA2,
        RightControl = 0xA3,
        LeftAlt = 0xA4,
        RightAlt = 0xA5,
        BrowserBack = 0xA6,
        BrowserForward = 0xA7,
        BrowserRefresh = 0xA8,
        BrowserStop = 0xA9,
        BrowserSearch = 0xAA,
        BrowserFavorites = 0xAB,
        BrowserHome = 0xAC,
        VolumeMute = 0xAD,
        VolumeDown = 0xAE,
        VolumeUp = 0xAF,
        MediaNextTrack = 0xB0,
        MediaPreviousTrack = 0xB1,
        MediaStop = 0xB2,
        MediaPlayPause = 0xB3,
        LaunchMail = 0xB4,
        LaunchMediaSelect = 0xB5,
        LaunchApp1 = 0xB6,
        LaunchApp2 = 0xB7,
        Semicolon = 0xBA,
        Plus = 0xBB,
        Comma = 0xBC,
        Minus = 0xBD,
        Period = 0xBE,
        ForwardSlash = 0xBF,
        Grave = 0xC0,
        LeftBracket = 0xDB,
        Backslash = 0xDC,
        RightBracket = 0xDD,
        Apostrophe = 0xDE,
        Play = 0xFA,
        Zoom = 0xFB,
    }
}

impl Key {
    /// For the generic modifier keys, the left and right physical keys they
    /// stand for. `None` for every other key.
    pub const fn sides(self) -> Option<(Key, Key)> {
        match self {
            Key::Shift => Some((Key::LeftShift, Key::RightShift)),
            Key::Control => Some((Key::LeftControl, Key::RightControl)),
            Key::Alt => Some((Key::LeftAlt, Key::RightAlt)),
            _ => None,
        }
    }
}
