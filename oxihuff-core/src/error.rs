//! Error types for OxiHuff operations.
//!
//! A single error type covers the whole pipeline: bit-buffer contract
//! violations, I/O failures from the attached source or sink, and malformed
//! or truncated compressed data.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Bit position beyond the buffer capacity.
    #[error("Bit position {position} out of range for buffer of {capacity} bits")]
    OutOfRange {
        /// Requested bit position.
        position: usize,
        /// Buffer capacity in bits.
        capacity: usize,
    },

    /// A bit value other than 0 or 1 was written.
    #[error("Invalid bit value: {value} (must be 0 or 1)")]
    InvalidBitValue {
        /// The rejected value.
        value: u8,
    },

    /// Bit buffer capacity that cannot hold whole bytes.
    #[error("Invalid buffer capacity: {capacity} bits (must be a non-zero multiple of 8)")]
    InvalidCapacity {
        /// The rejected capacity in bits.
        capacity: usize,
    },

    /// Flush or refill attempted without an attached sink or source.
    #[error("No {endpoint} attached")]
    Unconfigured {
        /// Which endpoint is missing ("sink" or "source").
        endpoint: &'static str,
    },

    /// The frequency-table header could not be parsed.
    #[error("Malformed header: {message}")]
    MalformedHeader {
        /// Description of the header error.
        message: String,
    },

    /// The payload ended before the end-marker was decoded.
    #[error("Truncated payload: source exhausted at bit {bit_position} before end-marker")]
    TruncatedPayload {
        /// Number of payload bits consumed when the source ran out.
        bit_position: u64,
    },

    /// A symbol without a code was encountered while encoding.
    #[error("No code assigned to symbol {symbol}")]
    UnknownSymbol {
        /// Symbol index (0-255 for bytes, 256 for the end-marker).
        symbol: u16,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create an out-of-range error.
    pub fn out_of_range(position: usize, capacity: usize) -> Self {
        Self::OutOfRange { position, capacity }
    }

    /// Create an invalid bit value error.
    pub fn invalid_bit_value(value: u8) -> Self {
        Self::InvalidBitValue { value }
    }

    /// Create an invalid capacity error.
    pub fn invalid_capacity(capacity: usize) -> Self {
        Self::InvalidCapacity { capacity }
    }

    /// Create an unconfigured-endpoint error.
    pub fn unconfigured(endpoint: &'static str) -> Self {
        Self::Unconfigured { endpoint }
    }

    /// Create a malformed header error.
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            message: message.into(),
        }
    }

    /// Create a truncated payload error.
    pub fn truncated(bit_position: u64) -> Self {
        Self::TruncatedPayload { bit_position }
    }

    /// Create an unknown symbol error.
    pub fn unknown_symbol(symbol: u16) -> Self {
        Self::UnknownSymbol { symbol }
    }

    /// Whether this error means the compressed data itself is bad, as opposed
    /// to an I/O or usage failure.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(
            self,
            Self::MalformedHeader { .. } | Self::TruncatedPayload { .. }
        )
    }
}
