//! The 257-symbol alphabet.
//!
//! Every byte value is a symbol, and one extra out-of-band symbol marks the
//! end of the payload. No input byte can collide with the end-marker.

use std::fmt;

/// Number of distinct symbols: 256 byte values plus the end-marker.
pub const ALPHABET_SIZE: usize = 257;

/// A Huffman symbol.
///
/// Ordering places all bytes in ascending order, then the end-marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// A literal byte.
    Byte(u8),
    /// End of payload.
    EndMarker,
}

impl Symbol {
    /// Dense index in `0..ALPHABET_SIZE` (bytes 0-255, end-marker 256).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Symbol::Byte(b) => b as usize,
            Symbol::EndMarker => 256,
        }
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0..=255 => Some(Symbol::Byte(index as u8)),
            256 => Some(Symbol::EndMarker),
            _ => None,
        }
    }

    /// Whether this is the end-marker.
    pub fn is_end_marker(self) -> bool {
        matches!(self, Symbol::EndMarker)
    }

    /// Iterate the whole alphabet in order.
    pub fn all() -> impl Iterator<Item = Symbol> {
        (0..ALPHABET_SIZE).filter_map(Symbol::from_index)
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol::Byte(byte)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Byte(b) if b.is_ascii_graphic() => write!(f, "'{}'", *b as char),
            Symbol::Byte(b) => write!(f, "0x{:02X}", b),
            Symbol::EndMarker => write!(f, "<END>"),
        }
    }
}
