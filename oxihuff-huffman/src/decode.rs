//! Huffman payload decoding.
//!
//! Decoding walks the tree one bit at a time. Reaching a byte leaf emits the
//! byte and restarts at the root; reaching the end-marker leaf ends the
//! payload. Running out of bits first is an error, since trailing padding
//! never decodes to the end-marker on its own.

use crate::symbol::Symbol;
use crate::tree::HuffmanTree;
use log::debug;
use oxihuff_core::BitReader;
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{Read, Write};

/// Decoded bytes are staged and written to the sink in chunks of this size.
const OUTPUT_CHUNK: usize = 8192;

/// Tree-walking payload decoder.
#[derive(Debug, Clone, Copy)]
pub struct HuffmanDecoder<'a> {
    tree: &'a HuffmanTree,
}

impl<'a> HuffmanDecoder<'a> {
    /// Create a decoder over `tree`.
    pub fn new(tree: &'a HuffmanTree) -> Self {
        Self { tree }
    }

    /// Decode from `reader` into `sink` until the end-marker.
    ///
    /// Returns the number of bytes written. Fails with
    /// [`OxiHuffError::TruncatedPayload`] if the reader runs dry first; bytes
    /// decoded before that point may already have reached the sink.
    pub fn decode<R: Read, W: Write>(
        &self,
        reader: &mut BitReader<R>,
        sink: &mut W,
    ) -> Result<u64> {
        let root = self.tree.root();
        let mut current = root;
        let mut pending = Vec::with_capacity(OUTPUT_CHUNK);
        let mut produced = 0u64;

        loop {
            let Some(bit) = reader.read_bit()? else {
                return Err(OxiHuffError::truncated(reader.bits_read()));
            };

            // A lone-leaf tree has no children: every bit lands on the root.
            current = self.tree.child(current, bit).unwrap_or(current);

            match self.tree.symbol(current) {
                Some(Symbol::EndMarker) => break,
                Some(Symbol::Byte(byte)) => {
                    pending.push(byte);
                    if pending.len() == OUTPUT_CHUNK {
                        sink.write_all(&pending)?;
                        produced += pending.len() as u64;
                        pending.clear();
                    }
                    current = root;
                }
                None => {}
            }
        }

        sink.write_all(&pending)?;
        produced += pending.len() as u64;
        debug!(
            "decoded {} bytes from {} payload bits",
            produced,
            reader.bits_read()
        );
        Ok(produced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use std::io::Cursor;

    fn decode(table: &FrequencyTable, payload: &[u8]) -> Result<Vec<u8>> {
        let tree = HuffmanTree::from_frequencies(table);
        let mut reader = BitReader::new(Cursor::new(payload));
        let mut out = Vec::new();
        let produced = HuffmanDecoder::new(&tree).decode(&mut reader, &mut out)?;
        assert_eq!(produced, out.len() as u64);
        Ok(out)
    }

    #[test]
    fn test_decode_aaaa() {
        let table = FrequencyTable::from_bytes(b"aaaa");
        assert_eq!(decode(&table, &[0xF0]).unwrap(), b"aaaa");
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let table = FrequencyTable::from_bytes(b"aaaa");
        assert_eq!(decode(&table, &[0xF0, 0xFF, 0xFF]).unwrap(), b"aaaa");
    }

    #[test]
    fn test_decode_single_leaf() {
        let table = FrequencyTable::new();
        assert_eq!(decode(&table, &[0x00]).unwrap(), b"");
    }

    #[test]
    fn test_truncated_without_end_marker() {
        let table = FrequencyTable::from_bytes(b"aaaa");
        // Eight 'a' codes and no end-marker
        let err = decode(&table, &[0xFF]).unwrap_err();
        assert!(matches!(err, OxiHuffError::TruncatedPayload { bit_position: 8 }));
    }

    #[test]
    fn test_truncated_empty_payload() {
        let table = FrequencyTable::from_bytes(b"abc");
        assert!(matches!(
            decode(&table, &[]),
            Err(OxiHuffError::TruncatedPayload { bit_position: 0 })
        ));
    }

    #[test]
    fn test_output_spans_chunks() {
        let table = FrequencyTable::from_counts([(Symbol::Byte(b'x'), 20_000)]);
        // x = 1, END = 0
        let mut payload = vec![0xFF; 20_000 / 8];
        payload.push(0x00);
        let out = decode(&table, &payload).unwrap();
        assert_eq!(out.len(), 20_000);
        assert!(out.iter().all(|&b| b == b'x'));
    }
}
