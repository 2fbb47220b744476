//! Symbol frequency tables.
//!
//! A [`FrequencyTable`] always contains the end-marker with a count of at
//! least 1, so the tree built from it always has an end-marker leaf.

use crate::symbol::{ALPHABET_SIZE, Symbol};
use log::debug;
use oxihuff_core::error::Result;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

/// Chunk size for the frequency scan.
const SCAN_CHUNK: usize = 8192;

/// Largest count representable in the header.
pub const MAX_HEADER_COUNT: u64 = u16::MAX as u64;

/// Occurrence counts for the 257-symbol alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Create a table holding only the end-marker (count 1).
    pub fn new() -> Self {
        let mut counts = [0u64; ALPHABET_SIZE];
        counts[Symbol::EndMarker.index()] = 1;
        Self { counts }
    }

    /// Build a table from explicit `(symbol, count)` pairs.
    ///
    /// Zero counts are treated as absent. Later pairs for the same symbol
    /// replace earlier ones. The end-marker occurs exactly once per stream,
    /// so any count given for it is ignored and it is always 1.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (Symbol, u64)>,
    {
        let mut table = Self::new();
        for (symbol, count) in counts {
            if let Symbol::Byte(b) = symbol {
                table.counts[b as usize] = count;
            }
        }
        table
    }

    /// Count the bytes of an in-memory slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.add_bytes(data);
        table
    }

    /// Scan `source` once, counting every byte, then seek it back to where
    /// the scan started so it can be read again by the encoder.
    pub fn scan<R: Read + Seek>(source: &mut R) -> Result<Self> {
        let start = source.stream_position()?;
        let mut table = Self::new();
        let mut chunk = [0u8; SCAN_CHUNK];

        loop {
            match source.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => table.add_bytes(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        source.seek(SeekFrom::Start(start))?;
        debug!(
            "frequency scan: {} bytes, {} distinct symbols",
            table.data_len(),
            table.distinct_symbols()
        );
        Ok(table)
    }

    fn add_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// Count for `symbol` (0 if absent).
    pub fn count(&self, symbol: Symbol) -> u64 {
        self.counts[symbol.index()]
    }

    /// Whether `symbol` occurs in the table.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.count(symbol) > 0
    }

    /// Number of symbols with a non-zero count, end-marker included.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Present symbols and their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .filter_map(|(i, &count)| Symbol::from_index(i).map(|s| (s, count)))
    }

    /// Sum of all byte counts, i.e. the length of the scanned input.
    ///
    /// Saturates at `u64::MAX` for hand-built tables.
    pub fn data_len(&self) -> u64 {
        self.counts[..256]
            .iter()
            .fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Sum of all counts, end-marker included.
    pub fn total_weight(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Whether any count exceeds what the header can store.
    pub fn exceeds_header_range(&self) -> bool {
        self.counts.iter().any(|&c| c > MAX_HEADER_COUNT)
    }

    /// Copy of this table with every count saturated at [`MAX_HEADER_COUNT`].
    ///
    /// This is exactly the table a decoder reads back from the header.
    pub fn clamped(&self) -> Self {
        let mut counts = self.counts;
        for count in counts.iter_mut() {
            *count = (*count).min(MAX_HEADER_COUNT);
        }
        Self { counts }
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_new_has_only_end_marker() {
        let table = FrequencyTable::new();
        assert_eq!(table.distinct_symbols(), 1);
        assert_eq!(table.count(Symbol::EndMarker), 1);
        assert_eq!(table.data_len(), 0);
        assert_eq!(table.total_weight(), 1);
    }

    #[test]
    fn test_from_bytes() {
        let table = FrequencyTable::from_bytes(b"aaaa");
        assert_eq!(table.count(Symbol::Byte(b'a')), 4);
        assert_eq!(table.count(Symbol::EndMarker), 1);
        assert_eq!(table.distinct_symbols(), 2);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![(Symbol::Byte(b'a'), 4), (Symbol::EndMarker, 1)]
        );
    }

    #[test]
    fn test_hash_byte_is_ordinary_data() {
        let table = FrequencyTable::from_bytes(b"##");
        assert_eq!(table.count(Symbol::Byte(b'#')), 2);
        assert_eq!(table.count(Symbol::EndMarker), 1);
    }

    #[test]
    fn test_scan_rewinds_to_start() {
        let mut source = Cursor::new(b"hello world".to_vec());
        let table = FrequencyTable::scan(&mut source).unwrap();
        assert_eq!(table.data_len(), 11);
        assert_eq!(table.count(Symbol::Byte(b'l')), 3);
        assert_eq!(source.position(), 0);
    }

    #[test]
    fn test_scan_from_offset() {
        let mut source = Cursor::new(b"xxabc".to_vec());
        source.set_position(2);
        let table = FrequencyTable::scan(&mut source).unwrap();
        assert_eq!(table.data_len(), 3);
        assert!(!table.contains(Symbol::Byte(b'x')));
        assert_eq!(source.position(), 2);
    }

    #[test]
    fn test_scan_large_input_spans_chunks() {
        let data = vec![7u8; SCAN_CHUNK * 3 + 5];
        let table = FrequencyTable::scan(&mut Cursor::new(data)).unwrap();
        assert_eq!(table.count(Symbol::Byte(7)), (SCAN_CHUNK * 3 + 5) as u64);
    }

    #[test]
    fn test_from_counts_forces_end_marker() {
        let table = FrequencyTable::from_counts([
            (Symbol::Byte(1), 3),
            (Symbol::Byte(2), 0),
            (Symbol::EndMarker, 0),
        ]);
        assert_eq!(table.count(Symbol::EndMarker), 1);
        assert!(!table.contains(Symbol::Byte(2)));
        assert_eq!(table.distinct_symbols(), 2);
    }

    #[test]
    fn test_from_counts_ignores_end_marker_count() {
        let table = FrequencyTable::from_counts([
            (Symbol::Byte(b'a'), 4),
            (Symbol::EndMarker, 3),
        ]);
        assert_eq!(table.count(Symbol::EndMarker), 1);
        assert_eq!(table, FrequencyTable::from_bytes(b"aaaa"));
    }

    #[test]
    fn test_huge_counts_saturate_sums() {
        let table = FrequencyTable::from_counts([(Symbol::Byte(0), u64::MAX), (Symbol::Byte(1), 1)]);
        assert_eq!(table.data_len(), u64::MAX);
        assert_eq!(table.total_weight(), u64::MAX);
    }

    #[test]
    fn test_clamped() {
        let table = FrequencyTable::from_counts([(Symbol::Byte(0), 70_000), (Symbol::Byte(1), 5)]);
        assert!(table.exceeds_header_range());
        let clamped = table.clamped();
        assert_eq!(clamped.count(Symbol::Byte(0)), MAX_HEADER_COUNT);
        assert_eq!(clamped.count(Symbol::Byte(1)), 5);
        assert!(!clamped.exceeds_header_range());
    }
}
