//! # OxiHuff Huffman
//!
//! Pure Rust static Huffman compression.
//!
//! Compression makes two passes over a seekable input: the first counts
//! symbol frequencies, the second emits codes. The output is a header holding
//! the frequency table followed by the bit-packed payload, terminated by a
//! dedicated end-marker symbol that no input byte can collide with.
//!
//! ```text
//! compress:   scan ─► write_header ─► tree ─► codes ─► encode (BitWriter)
//! decompress: read_header ─► tree ─► decode (BitReader)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_huffman::{compress_bytes, decompress_bytes};
//!
//! let data = b"abracadabra";
//! let packed = compress_bytes(data).unwrap();
//! assert_eq!(decompress_bytes(&packed).unwrap(), data);
//! ```
//!
//! ## Streaming I/O
//!
//! ```rust
//! use oxihuff_huffman::{compress, decompress};
//! use std::io::Cursor;
//!
//! let mut input = Cursor::new(b"aaaa".to_vec());
//! let mut packed = Vec::new();
//! let summary = compress(&mut input, &mut packed).unwrap();
//! assert_eq!(summary.output_bytes(), 7);
//!
//! let mut restored = Vec::new();
//! decompress(&mut Cursor::new(packed), &mut restored).unwrap();
//! assert_eq!(restored, b"aaaa");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod code;
pub mod config;
pub mod decode;
pub mod encode;
pub mod frequency;
pub mod header;
pub mod symbol;
pub mod tree;

// Re-exports
pub use code::{Code, EncodingMap};
pub use config::HuffmanConfig;
pub use decode::HuffmanDecoder;
pub use encode::HuffmanEncoder;
pub use frequency::FrequencyTable;
pub use header::{read_header, write_header};
pub use symbol::Symbol;
pub use tree::HuffmanTree;

use frequency::MAX_HEADER_COUNT;
use log::{debug, warn};
use oxihuff_core::error::Result;
use oxihuff_core::{BitReader, BitWriter};
use std::io::{Cursor, Read, Seek, Write};

/// Sizes reported by a compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionSummary {
    /// Bytes consumed from the input.
    pub input_bytes: u64,
    /// Bytes of header written.
    pub header_bytes: u64,
    /// Bytes of payload written, padding included.
    pub payload_bytes: u64,
    /// Distinct symbols in the table, end-marker included.
    pub distinct_symbols: usize,
}

impl CompressionSummary {
    /// Total bytes written.
    pub fn output_bytes(&self) -> u64 {
        self.header_bytes + self.payload_bytes
    }

    /// Output size divided by input size (0.0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes() as f64 / self.input_bytes as f64
        }
    }

    /// Space savings as a percentage (negative when the output grew).
    pub fn space_savings(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            (1.0 - self.ratio()) * 100.0
        }
    }
}

/// Header-only view of a compressed artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Frequency table as stored in the header.
    pub table: FrequencyTable,
    /// Serialized header size.
    pub header_bytes: usize,
}

impl HeaderInfo {
    /// Original data size implied by the header.
    ///
    /// Exact unless [`is_saturated`](Self::is_saturated) is true, in which
    /// case it is a lower bound.
    pub fn original_size(&self) -> u64 {
        self.table.data_len()
    }

    /// Whether any stored count hit the 16-bit ceiling.
    ///
    /// A symbol that really occurred exactly 65535 times is stored the same
    /// way as a saturated one, so this can report `true` for an exact header.
    /// Treat it as "the original size may be a lower bound".
    pub fn is_saturated(&self) -> bool {
        self.table.iter().any(|(_, c)| c == MAX_HEADER_COUNT)
    }

    /// The code table the payload was written with.
    pub fn encoding_map(&self) -> EncodingMap {
        EncodingMap::from_tree(&HuffmanTree::from_frequencies(&self.table))
    }

    /// Payload size in bits implied by the header, end-marker included.
    pub fn payload_bits(&self) -> u64 {
        self.encoding_map().encoded_bits(&self.table)
    }
}

/// Compress `input` into `output` with the default configuration.
pub fn compress<R, W>(input: &mut R, output: &mut W) -> Result<CompressionSummary>
where
    R: Read + Seek,
    W: Write,
{
    compress_with_config(input, output, &HuffmanConfig::default())
}

/// Compress `input` into `output`.
///
/// `input` is read twice: once to count frequencies and once to encode. It
/// is sought back to its starting position in between.
pub fn compress_with_config<R, W>(
    input: &mut R,
    output: &mut W,
    config: &HuffmanConfig,
) -> Result<CompressionSummary>
where
    R: Read + Seek,
    W: Write,
{
    config.validate()?;

    let table = FrequencyTable::scan(input)?;
    if table.exceeds_header_range() {
        warn!("symbol counts above {MAX_HEADER_COUNT} saturate in the header");
    }
    let header_bytes = write_header(&table, output)?;

    // Build codes from what the decoder will read back, not the raw counts.
    let coded = table.clamped();
    let tree = HuffmanTree::from_frequencies(&coded);
    let map = EncodingMap::from_tree(&tree);

    let mut writer = BitWriter::with_capacity(&mut *output, config.buffer_bits)?;
    let input_bytes = HuffmanEncoder::new(&map).encode(input, &mut writer)?;
    let payload_bytes = writer.bits_written().div_ceil(8);
    output.flush()?;

    let summary = CompressionSummary {
        input_bytes,
        header_bytes: header_bytes as u64,
        payload_bytes,
        distinct_symbols: coded.distinct_symbols(),
    };
    debug!("compression finished: {:?}", summary);
    Ok(summary)
}

/// Decompress `input` into `output` with the default configuration.
pub fn decompress<R, W>(input: &mut R, output: &mut W) -> Result<u64>
where
    R: Read,
    W: Write,
{
    decompress_with_config(input, output, &HuffmanConfig::default())
}

/// Decompress `input` into `output`, returning the bytes produced.
pub fn decompress_with_config<R, W>(
    input: &mut R,
    output: &mut W,
    config: &HuffmanConfig,
) -> Result<u64>
where
    R: Read,
    W: Write,
{
    config.validate()?;

    let table = read_header(input)?;
    let tree = HuffmanTree::from_frequencies(&table);
    let mut reader = BitReader::with_capacity(&mut *input, config.buffer_bits)?;
    let produced = HuffmanDecoder::new(&tree).decode(&mut reader, output)?;
    output.flush()?;
    Ok(produced)
}

/// Read only the header of a compressed artifact.
pub fn inspect<R: Read>(input: &mut R) -> Result<HeaderInfo> {
    let table = read_header(input)?;
    let header_bytes = header::header_len(&table);
    Ok(HeaderInfo {
        table,
        header_bytes,
    })
}

/// Compress an in-memory buffer.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(data.len() / 2 + 16);
    compress(&mut Cursor::new(data), &mut output)?;
    Ok(output)
}

/// Decompress an in-memory buffer.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(data.len() * 2);
    decompress(&mut Cursor::new(data), &mut output)?;
    Ok(output)
}
