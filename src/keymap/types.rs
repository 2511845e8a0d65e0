//! Core types for the keymap system: Key, Chord, KeyStroke

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::config::KeymapError;

macro_rules! keys {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A key from the closed alphabet used by keybinding documents
        ///
        /// Declaration order is the canonical serialization order: modifiers
        /// come first, then everything else.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum Key {
            $($variant),+
        }

        impl Key {
            /// Every key, in canonical order
            pub const ALL: &'static [Key] = &[$(Key::$variant),+];

            /// Name of the key as written in keybinding documents
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Key::$variant => $name),+
                }
            }

            fn from_name(name: &str) -> Option<Key> {
                match name {
                    $($name => Some(Key::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

keys! {
    // Modifiers
    Ctrl => "ctrl",
    Shift => "shift",
    Alt => "alt",
    Win => "win",

    // Digits
    Digit0 => "0", Digit1 => "1", Digit2 => "2", Digit3 => "3", Digit4 => "4",
    Digit5 => "5", Digit6 => "6", Digit7 => "7", Digit8 => "8", Digit9 => "9",

    // Letters
    A => "a", B => "b", C => "c", D => "d", E => "e", F => "f", G => "g",
    H => "h", I => "i", J => "j", K => "k", L => "l", M => "m", N => "n",
    O => "o", P => "p", Q => "q", R => "r", S => "s", T => "t", U => "u",
    V => "v", W => "w", X => "x", Y => "y", Z => "z",

    // Named keys
    Space => "space",
    Tab => "tab",
    Enter => "enter",
    Backspace => "backspace",

    // Punctuation (OEM codes, JIS layout: oem_1 ':' oem_2 '/' oem_3 '@'
    // oem_4 '[' oem_5 '¥' oem_6 ']' oem_7 '^' oem_102 '\')
    OemComma => "oem_comma",
    OemMinus => "oem_minus",
    OemPeriod => "oem_period",
    OemPlus => "oem_plus",
    Oem1 => "oem_1",
    Oem2 => "oem_2",
    Oem3 => "oem_3",
    Oem4 => "oem_4",
    Oem5 => "oem_5",
    Oem6 => "oem_6",
    Oem7 => "oem_7",
    Oem102 => "oem_102",

    // Function keys
    F1 => "f1", F2 => "f2", F3 => "f3", F4 => "f4", F5 => "f5", F6 => "f6",
    F7 => "f7", F8 => "f8", F9 => "f9", F10 => "f10", F11 => "f11", F12 => "f12",

    // Navigation
    Left => "left",
    Right => "right",
    Up => "up",
    Down => "down",
    Home => "home",
    End => "end",
    PageUp => "pageup",
    PageDown => "pagedown",
    Delete => "delete",
    Escape => "escape",
    Insert => "insert",

    // Numpad / browser
    Numpad0 => "numpad0",
    NumpadAdd => "numpad_add",
    NumpadSubtract => "numpad_subtract",
    BrowserBack => "browserback",
    BrowserForward => "browserforward",
}

// Chord stores one bit per key
const _: () = assert!(Key::ALL.len() <= u128::BITS as usize);

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Key {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Key::from_name(&name).ok_or_else(|| KeymapError::InvalidKey(format!("Unknown key: {}", s)))
    }
}

/// A set of keys pressed simultaneously, stored as a bitset
///
/// Equality and inclusion are set-based, so `ctrl+k` and `k+ctrl` are the
/// same chord. Iteration and display always use the canonical key order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Chord(u128);

impl Chord {
    const fn bit(key: Key) -> u128 {
        1u128 << (key as u8)
    }

    /// Chord holding a single key
    pub const fn single(key: Key) -> Self {
        Chord(Self::bit(key))
    }

    /// Build a chord from keys in any order
    pub fn from_keys<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        keys.into_iter().collect()
    }

    #[inline]
    pub const fn contains(self, key: Key) -> bool {
        self.0 & Self::bit(key) != 0
    }

    /// True if every key of `target` is held in this chord
    #[inline]
    pub const fn includes(self, target: Chord) -> bool {
        self.0 & target.0 == target.0
    }

    /// True if the two chords share at least one key
    #[inline]
    pub const fn intersects(self, other: Chord) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Swap `target` for `replacement`
    ///
    /// Returns `self` unchanged unless all of `target` is present; otherwise
    /// the keys of `target` are removed and the keys of `replacement` added.
    pub const fn replace(self, target: Chord, replacement: Chord) -> Chord {
        if !self.includes(target) {
            return self;
        }
        Chord((self.0 & !target.0) | replacement.0)
    }

    /// Keys of this chord in canonical order
    pub fn keys(self) -> impl Iterator<Item = Key> {
        Key::ALL.iter().copied().filter(move |key| self.contains(*key))
    }
}

impl FromIterator<Key> for Chord {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Chord(iter.into_iter().fold(0, |bits, key| bits | Chord::bit(key)))
    }
}

impl From<Key> for Chord {
    fn from(key: Key) -> Self {
        Chord::single(key)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            f.write_str(key.as_str())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chord({})", self)
    }
}

/// Parse a chord like "ctrl+shift+k"
impl FromStr for Chord {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chord = Chord::default();
        for part in s.trim().split('+') {
            if part.trim().is_empty() {
                return Err(KeymapError::InvalidKey(format!("Empty key in chord: {}", s)));
            }
            chord = Chord(chord.0 | Chord::bit(part.parse()?));
        }
        Ok(chord)
    }
}

/// One chord, or a prefix chord followed by a trailing chord
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyStroke {
    Single(Chord),
    Sequence(Chord, Chord),
}

impl KeyStroke {
    /// The chord pressed first
    pub const fn first(self) -> Chord {
        match self {
            KeyStroke::Single(chord) | KeyStroke::Sequence(chord, _) => chord,
        }
    }

    /// The chord completing a two-chord sequence
    pub const fn trailing(self) -> Option<Chord> {
        match self {
            KeyStroke::Single(_) => None,
            KeyStroke::Sequence(_, chord) => Some(chord),
        }
    }

    pub const fn len(self) -> usize {
        match self {
            KeyStroke::Single(_) => 1,
            KeyStroke::Sequence(..) => 2,
        }
    }

    pub const fn is_sequence(self) -> bool {
        matches!(self, KeyStroke::Sequence(..))
    }

    pub fn chords(self) -> impl Iterator<Item = Chord> {
        [Some(self.first()), self.trailing()].into_iter().flatten()
    }

    /// Apply [`Chord::replace`] to every chord, keeping the stroke length
    pub const fn replace(self, target: Chord, replacement: Chord) -> KeyStroke {
        match self {
            KeyStroke::Single(chord) => KeyStroke::Single(chord.replace(target, replacement)),
            KeyStroke::Sequence(first, second) => KeyStroke::Sequence(
                first.replace(target, replacement),
                second.replace(target, replacement),
            ),
        }
    }

    /// Prepend `leader` to a single chord; sequences cannot take another prefix
    pub const fn with_leader(self, leader: Chord) -> Option<KeyStroke> {
        match self {
            KeyStroke::Single(chord) => Some(KeyStroke::Sequence(leader, chord)),
            KeyStroke::Sequence(..) => None,
        }
    }
}

impl From<Chord> for KeyStroke {
    fn from(chord: Chord) -> Self {
        KeyStroke::Single(chord)
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStroke::Single(chord) => write!(f, "{}", chord),
            KeyStroke::Sequence(first, second) => write!(f, "{} {}", first, second),
        }
    }
}

/// Parse a stroke like "ctrl+k ctrl+down"
impl FromStr for KeyStroke {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chords = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Chord>, _>>()?;

        match chords.as_slice() {
            [chord] => Ok(KeyStroke::Single(*chord)),
            [first, second] => Ok(KeyStroke::Sequence(*first, *second)),
            [] => Err(KeymapError::InvalidKey("Empty keystroke".to_string())),
            _ => Err(KeymapError::InvalidKey(format!(
                "More than two chords in keystroke: {}",
                s
            ))),
        }
    }
}

impl Serialize for KeyStroke {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KeyStroke {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
