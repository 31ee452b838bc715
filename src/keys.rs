// src/keys.rs

use bitflags::bitflags;

bitflags! {
    /// Represents a keyboard modifier.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2; // Also known as Option on macOS
        const SUPER = 1 << 3; // Also known as Windows key or Command key
    }
}

/// Represents a key symbol.
///
/// Only the keys the shell reacts to (or is likely to grow a reaction to)
/// get their own variant; everything else maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeySymbol {
    Char(char),

    // Navigation keys
    Left,
    Right,
    Up,
    Down,

    // Other common keys
    Enter,
    Backspace,
    Tab,
    Escape,

    // Unidentified key
    #[default]
    Unknown,
}
