//! Codec configuration.

use oxihuff_core::DEFAULT_CAPACITY_BITS;
use oxihuff_core::error::{OxiHuffError, Result};

/// Huffman codec configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanConfig {
    /// Capacity of the bit buffer used by the payload writer and reader, in
    /// bits. Must be a non-zero multiple of 8.
    ///
    /// This only changes how often the buffer is flushed or refilled; the
    /// compressed bytes are identical for every valid capacity.
    pub buffer_bits: usize,
}

impl HuffmanConfig {
    /// Create a configuration with the given buffer capacity.
    pub fn new(buffer_bits: usize) -> Self {
        Self { buffer_bits }
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_bits == 0 || self.buffer_bits % 8 != 0 {
            return Err(OxiHuffError::invalid_capacity(self.buffer_bits));
        }
        Ok(())
    }
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        Self {
            buffer_bits: DEFAULT_CAPACITY_BITS,
        }
    }
}
