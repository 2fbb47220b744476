//! # OxiHuff Core
//!
//! Core components for the OxiHuff Huffman compressor.
//!
//! This crate provides the building blocks shared by the codec and the CLI:
//!
//! - [`bitstream`]: Bit-addressable buffer with bit-level reader and writer
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Front end                                           │
//! │     oxihuff CLI                                         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Frequency table, Huffman tree, header, enc/dec      │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitBuffer, BitReader/BitWriter, errors              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{BitBuffer, BitReader};
//! use std::io::Cursor;
//!
//! let mut buffer = BitBuffer::new(8).unwrap();
//! buffer.set_bit(0, 1).unwrap();
//! assert_eq!(buffer.get_bit(0).unwrap(), 1);
//!
//! let mut reader = BitReader::new(Cursor::new(vec![0x80]));
//! assert_eq!(reader.read_bit().unwrap(), Some(1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitBuffer, BitReader, BitWriter, DEFAULT_CAPACITY_BITS};
pub use error::{OxiHuffError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitBuffer, BitReader, BitWriter};
    pub use crate::error::{OxiHuffError, Result};
}
