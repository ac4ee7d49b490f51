//! Static key definitions for the board.
//!
//! One entry per physical key: the row-chip and column-chip coordinates
//! plus the client-side code strings that identify the key. This table is
//! the single source of truth for key mappings; [`KeyTable::new`] in the
//! parent module validates it at startup.
//!
//! [`KeyTable::new`]: super::KeyTable::new

use serde::{Deserialize, Serialize};

use crate::matrix::Axis;

/// Identifier for each physical key on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyId {
    Escape,
    F8,
    PrintScreen,
    F10,
    F6,
    F4,
    F5,
    NumpadForwardSlash,
    ClosingBracket,
    Numpad4,
    F2,
    F1,
    LeftAlt,
    Backtick,
    F9,
    ScrollLock,
    F11,
    F7,
    Num4,
    T,
    Numpad8,
    LeftWindows,
    Backspace,
    Backslash,
    Numpad1,
    F3,
    Num1,
    LeftCtrl,
    Tab,
    Num8,
    PauseBreak,
    F12,
    U,
    R,
    Num6,
    End,
    P,
    Delete,
    Numpad2,
    Num3,
    Num2,
    Q,
    Num9,
    PageUp,
    Minus,
    H,
    Num5,
    Enter,
    Y,
    LeftShift,
    NumpadAsterisk,
    OpeningBracket,
    Numpad3,
    E,
    W,
    RightCtrl,
    A,
    Num0,
    NumLock,
    Equals,
    Num7,
    F,
    G,
    Numpad7,
    Semicolon,
    Up,
    NumpadMinus,
    D,
    O,
    Home,
    I,
    J,
    V,
    B,
    Numpad9,
    Apostrophe,
    Right,
    NumpadPlus,
    C,
    X,
    RightAlt,
    Z,
    L,
    PageDown,
    Left,
    N,
    M,
    Comma,
    Numpad5,
    K,
    Numpad0,
    S,
    RightWindows,
    CapsLock,
    ForwardSlash,
    Insert,
    RightShift,
    Period,
    RightFunction,
    Numpad6,
    Down,
    Space,
    NumpadEnter,
    NumpadPeriod,
}

/// Number of physical keys on the board.
pub const KEY_COUNT: usize = 104;

/// Unvalidated table entry: (logical pin, axis, channel) per chip, as laid
/// out in the board schematic.
pub(crate) struct RawKey {
    pub id: KeyId,
    pub row: (u8, Axis, u8),
    pub col: (u8, Axis, u8),
    pub aliases: &'static [&'static str],
}

const fn raw(
    id: KeyId,
    row: (u8, Axis, u8),
    col: (u8, Axis, u8),
    aliases: &'static [&'static str],
) -> RawKey {
    RawKey { id, row, col, aliases }
}

/// All key definitions, grouped by row pin as on the schematic.
///
/// `RightFunction` has no DOM code; its alias is a placeholder until the
/// firmware assigns one.
pub(crate) const RAW_KEYS: &[RawKey] = &[
    raw(KeyId::Escape, (14, Axis::Y, 5), (2, Axis::X, 1), &["Escape"]),
    raw(KeyId::F8, (14, Axis::Y, 5), (3, Axis::X, 2), &["F8"]),
    raw(KeyId::PrintScreen, (14, Axis::Y, 5), (4, Axis::X, 3), &["PrintScreen"]),
    raw(KeyId::F10, (14, Axis::Y, 5), (5, Axis::X, 4), &["F10"]),
    raw(KeyId::F6, (14, Axis::Y, 5), (6, Axis::X, 5), &["F6"]),
    raw(KeyId::F4, (14, Axis::Y, 5), (7, Axis::Y, 0), &["F4"]),
    raw(KeyId::F5, (14, Axis::Y, 5), (8, Axis::Y, 1), &["F5"]),
    raw(KeyId::NumpadForwardSlash, (14, Axis::Y, 5), (10, Axis::Y, 3), &["NumpadDivide"]),
    raw(KeyId::ClosingBracket, (14, Axis::Y, 5), (13, Axis::Y, 6), &["BracketRight"]),
    raw(KeyId::Numpad4, (14, Axis::Y, 5), (22, Axis::X, 11), &["Numpad4"]),
    raw(KeyId::F2, (14, Axis::Y, 5), (23, Axis::X, 10), &["F2"]),
    raw(KeyId::F1, (14, Axis::Y, 5), (24, Axis::X, 9), &["F1"]),
    raw(KeyId::LeftAlt, (14, Axis::Y, 5), (25, Axis::X, 8), &["AltLeft"]),
    raw(KeyId::Backtick, (15, Axis::Y, 6), (2, Axis::X, 1), &["Backquote"]),
    raw(KeyId::F9, (15, Axis::Y, 6), (3, Axis::X, 2), &["F9"]),
    raw(KeyId::ScrollLock, (15, Axis::Y, 6), (4, Axis::X, 3), &["ScrollLock"]),
    raw(KeyId::F11, (15, Axis::Y, 6), (5, Axis::X, 4), &["F11"]),
    raw(KeyId::F7, (15, Axis::Y, 6), (6, Axis::X, 5), &["F7"]),
    raw(KeyId::Num4, (15, Axis::Y, 6), (7, Axis::Y, 0), &["Digit4"]),
    raw(KeyId::T, (15, Axis::Y, 6), (8, Axis::Y, 1), &["KeyT"]),
    raw(KeyId::Numpad8, (15, Axis::Y, 6), (10, Axis::Y, 3), &["Numpad8"]),
    raw(KeyId::LeftWindows, (15, Axis::Y, 6), (11, Axis::Y, 4), &["MetaLeft"]),
    raw(KeyId::Backspace, (15, Axis::Y, 6), (12, Axis::Y, 5), &["Backspace"]),
    raw(KeyId::Backslash, (15, Axis::Y, 6), (13, Axis::Y, 6), &["Backslash"]),
    raw(KeyId::Numpad1, (15, Axis::Y, 6), (22, Axis::X, 11), &["Numpad1"]),
    raw(KeyId::F3, (15, Axis::Y, 6), (23, Axis::X, 10), &["F3"]),
    raw(KeyId::Num1, (15, Axis::Y, 6), (24, Axis::X, 9), &["Digit1"]),
    raw(KeyId::LeftCtrl, (16, Axis::X, 11), (1, Axis::X, 0), &["ControlLeft"]),
    raw(KeyId::Tab, (16, Axis::X, 11), (2, Axis::X, 1), &["Tab"]),
    raw(KeyId::Num8, (16, Axis::X, 11), (3, Axis::X, 2), &["Digit8"]),
    raw(KeyId::PauseBreak, (16, Axis::X, 11), (4, Axis::X, 3), &["Pause"]),
    raw(KeyId::F12, (16, Axis::X, 11), (5, Axis::X, 4), &["F12"]),
    raw(KeyId::U, (16, Axis::X, 11), (6, Axis::X, 5), &["KeyU"]),
    raw(KeyId::R, (16, Axis::X, 11), (7, Axis::Y, 0), &["KeyR"]),
    raw(KeyId::Num6, (16, Axis::X, 11), (8, Axis::Y, 1), &["Digit6"]),
    raw(KeyId::End, (16, Axis::X, 11), (10, Axis::Y, 3), &["End"]),
    raw(KeyId::P, (16, Axis::X, 11), (12, Axis::Y, 5), &["KeyP"]),
    raw(KeyId::Delete, (16, Axis::X, 11), (13, Axis::Y, 6), &["Delete"]),
    raw(KeyId::Numpad2, (16, Axis::X, 11), (22, Axis::X, 11), &["Numpad2"]),
    raw(KeyId::Num3, (16, Axis::X, 11), (23, Axis::X, 10), &["Digit3"]),
    raw(KeyId::Num2, (16, Axis::X, 11), (24, Axis::X, 9), &["Digit2"]),
    raw(KeyId::Q, (17, Axis::X, 10), (2, Axis::X, 1), &["KeyQ"]),
    raw(KeyId::Num9, (17, Axis::X, 10), (3, Axis::X, 2), &["Digit9"]),
    raw(KeyId::PageUp, (17, Axis::X, 10), (4, Axis::X, 3), &["PageUp"]),
    raw(KeyId::Minus, (17, Axis::X, 10), (5, Axis::X, 4), &["Minus"]),
    raw(KeyId::H, (17, Axis::X, 10), (6, Axis::X, 5), &["KeyH"]),
    raw(KeyId::Num5, (17, Axis::X, 10), (7, Axis::Y, 0), &["Digit5"]),
    raw(KeyId::Enter, (17, Axis::X, 10), (13, Axis::Y, 6), &["Enter"]),
    raw(KeyId::Y, (17, Axis::X, 10), (8, Axis::Y, 1), &["KeyY"]),
    raw(KeyId::LeftShift, (17, Axis::X, 10), (9, Axis::Y, 2), &["ShiftLeft"]),
    raw(KeyId::NumpadAsterisk, (17, Axis::X, 10), (10, Axis::Y, 3), &["NumpadMultiply"]),
    raw(KeyId::OpeningBracket, (17, Axis::X, 10), (12, Axis::Y, 5), &["BracketLeft"]),
    raw(KeyId::Numpad3, (17, Axis::X, 10), (22, Axis::X, 11), &["Numpad3"]),
    raw(KeyId::E, (17, Axis::X, 10), (23, Axis::X, 10), &["KeyE"]),
    raw(KeyId::W, (17, Axis::X, 10), (24, Axis::X, 9), &["KeyW"]),
    raw(KeyId::RightCtrl, (18, Axis::X, 9), (1, Axis::X, 0), &["ControlRight"]),
    raw(KeyId::A, (18, Axis::X, 9), (2, Axis::X, 1), &["KeyA"]),
    raw(KeyId::Num0, (18, Axis::X, 9), (3, Axis::X, 2), &["Digit0"]),
    raw(KeyId::NumLock, (18, Axis::X, 9), (4, Axis::X, 3), &["NumLock"]),
    raw(KeyId::Equals, (18, Axis::X, 9), (5, Axis::X, 4), &["Equal"]),
    raw(KeyId::Num7, (18, Axis::X, 9), (6, Axis::X, 5), &["Digit7"]),
    raw(KeyId::F, (18, Axis::X, 9), (7, Axis::Y, 0), &["KeyF"]),
    raw(KeyId::G, (18, Axis::X, 9), (8, Axis::Y, 1), &["KeyG"]),
    raw(KeyId::Numpad7, (18, Axis::X, 9), (10, Axis::Y, 3), &["Numpad7"]),
    raw(KeyId::Semicolon, (18, Axis::X, 9), (12, Axis::Y, 5), &["Semicolon"]),
    raw(KeyId::Up, (18, Axis::X, 9), (13, Axis::Y, 6), &["ArrowUp"]),
    raw(KeyId::NumpadMinus, (18, Axis::X, 9), (22, Axis::X, 11), &["NumpadSubtract"]),
    raw(KeyId::D, (18, Axis::X, 9), (23, Axis::X, 10), &["KeyD"]),
    raw(KeyId::O, (19, Axis::X, 8), (3, Axis::X, 2), &["KeyO"]),
    raw(KeyId::Home, (19, Axis::X, 8), (4, Axis::X, 3), &["Home"]),
    raw(KeyId::I, (19, Axis::X, 8), (5, Axis::X, 4), &["KeyI"]),
    raw(KeyId::J, (19, Axis::X, 8), (6, Axis::X, 5), &["KeyJ"]),
    raw(KeyId::V, (19, Axis::X, 8), (7, Axis::Y, 0), &["KeyV"]),
    raw(KeyId::B, (19, Axis::X, 8), (8, Axis::Y, 1), &["KeyB"]),
    raw(KeyId::Numpad9, (19, Axis::X, 8), (10, Axis::Y, 3), &["Numpad9"]),
    raw(KeyId::Apostrophe, (19, Axis::X, 8), (12, Axis::Y, 5), &["Quote"]),
    raw(KeyId::Right, (19, Axis::X, 8), (13, Axis::Y, 6), &["ArrowRight"]),
    raw(KeyId::NumpadPlus, (19, Axis::X, 8), (22, Axis::X, 11), &["NumpadAdd"]),
    raw(KeyId::C, (19, Axis::X, 8), (23, Axis::X, 10), &["KeyC"]),
    raw(KeyId::X, (19, Axis::X, 8), (24, Axis::X, 9), &["KeyX"]),
    raw(KeyId::RightAlt, (19, Axis::X, 8), (25, Axis::X, 8), &["AltRight"]),
    raw(KeyId::Z, (20, Axis::X, 7), (2, Axis::X, 1), &["KeyZ"]),
    raw(KeyId::L, (20, Axis::X, 7), (3, Axis::X, 2), &["KeyL"]),
    raw(KeyId::PageDown, (20, Axis::X, 7), (4, Axis::X, 3), &["PageDown"]),
    raw(KeyId::Left, (20, Axis::X, 7), (5, Axis::X, 4), &["ArrowLeft"]),
    raw(KeyId::N, (20, Axis::X, 7), (6, Axis::X, 5), &["KeyN"]),
    raw(KeyId::M, (20, Axis::X, 7), (7, Axis::Y, 0), &["KeyM"]),
    raw(KeyId::Comma, (20, Axis::X, 7), (8, Axis::Y, 1), &["Comma"]),
    raw(KeyId::Numpad5, (20, Axis::X, 7), (10, Axis::Y, 3), &["Numpad5"]),
    raw(KeyId::K, (20, Axis::X, 7), (12, Axis::Y, 5), &["KeyK"]),
    raw(KeyId::Numpad0, (20, Axis::X, 7), (13, Axis::Y, 6), &["Numpad0"]),
    raw(KeyId::S, (20, Axis::X, 7), (24, Axis::X, 9), &["KeyS"]),
    raw(KeyId::RightWindows, (20, Axis::X, 7), (26, Axis::X, 7), &["MetaRight"]),
    raw(KeyId::CapsLock, (21, Axis::Y, 4), (2, Axis::X, 1), &["CapsLock"]),
    raw(KeyId::ForwardSlash, (21, Axis::Y, 4), (3, Axis::X, 2), &["Slash"]),
    raw(KeyId::Insert, (21, Axis::Y, 4), (4, Axis::X, 3), &["Insert"]),
    raw(KeyId::RightShift, (21, Axis::Y, 4), (5, Axis::X, 4), &["ShiftRight"]),
    raw(KeyId::Period, (21, Axis::Y, 4), (6, Axis::X, 5), &["Period"]),
    raw(KeyId::RightFunction, (21, Axis::Y, 4), (7, Axis::Y, 0), &["foo"]),
    raw(KeyId::Numpad6, (21, Axis::Y, 4), (10, Axis::Y, 3), &["Numpad6"]),
    raw(KeyId::Down, (21, Axis::Y, 4), (12, Axis::Y, 5), &["ArrowDown"]),
    raw(KeyId::Space, (21, Axis::Y, 4), (13, Axis::Y, 6), &["Space"]),
    raw(KeyId::NumpadEnter, (21, Axis::Y, 4), (22, Axis::X, 11), &["NumpadEnter"]),
    raw(KeyId::NumpadPeriod, (21, Axis::Y, 4), (24, Axis::X, 9), &["NumpadDecimal"]),
];
