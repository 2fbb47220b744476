//! Huffman payload encoding.
//!
//! The encoder is the second pass over the input: the frequency scan has
//! already rewound the source, and the header has already been written.

use crate::code::EncodingMap;
use crate::symbol::Symbol;
use log::debug;
use oxihuff_core::BitWriter;
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{ErrorKind, Read, Write};

/// Read chunk size for the encode pass.
const READ_CHUNK: usize = 8192;

/// Writes the code of every input byte, then the end-marker's code.
#[derive(Debug, Clone, Copy)]
pub struct HuffmanEncoder<'a> {
    map: &'a EncodingMap,
}

impl<'a> HuffmanEncoder<'a> {
    /// Create an encoder over `map`.
    pub fn new(map: &'a EncodingMap) -> Self {
        Self { map }
    }

    /// Encode all of `source` into `writer` and flush it.
    ///
    /// Returns the number of input bytes consumed. A byte without a code
    /// fails with [`OxiHuffError::UnknownSymbol`]; that only happens when the
    /// map was built for different data.
    pub fn encode<R: Read, W: Write>(
        &self,
        source: &mut R,
        writer: &mut BitWriter<W>,
    ) -> Result<u64> {
        let mut chunk = [0u8; READ_CHUNK];
        let mut consumed = 0u64;

        loop {
            let n = match source.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &byte in &chunk[..n] {
                self.write_symbol(Symbol::Byte(byte), writer)?;
            }
            consumed += n as u64;
        }

        self.write_symbol(Symbol::EndMarker, writer)?;
        writer.flush()?;
        debug!(
            "encoded {} bytes into {} payload bits",
            consumed,
            writer.bits_written()
        );
        Ok(consumed)
    }

    fn write_symbol<W: Write>(&self, symbol: Symbol, writer: &mut BitWriter<W>) -> Result<()> {
        let code = self
            .map
            .get(symbol)
            .ok_or_else(|| OxiHuffError::unknown_symbol(symbol.index() as u16))?;
        writer.write_bits(code.bits())
    }
}
