//! Property-based tests for the Huffman codec.

use oxihuff_huffman::{
    EncodingMap, FrequencyTable, HuffmanTree, Symbol, compress_bytes, decompress_bytes,
    read_header, write_header,
};
use proptest::prelude::*;
use std::io::Cursor;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Arbitrary bytes, biased toward small alphabets so that some codes get long.
fn data_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..2048),
        prop::collection::vec(0u8..4, 0..2048),
        prop::collection::vec(prop::sample::select(vec![0x00u8, 0x23, 0xFE, 0xFF]), 0..512),
    ]
}

/// Tables whose counts fit the header, sometimes with an explicit end-marker
/// count mixed in.
fn table_strategy() -> impl Strategy<Value = FrequencyTable> {
    (
        prop::collection::btree_map(any::<u8>(), 1u64..=65_535, 0..64),
        prop::option::of(0u64..=65_535),
    )
        .prop_map(|(counts, end)| {
            let bytes = counts.into_iter().map(|(b, c)| (Symbol::Byte(b), c));
            FrequencyTable::from_counts(bytes.chain(end.map(|c| (Symbol::EndMarker, c))))
        })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn test_roundtrip(data in data_strategy()) {
        let compressed = compress_bytes(&data)?;
        let restored = decompress_bytes(&compressed)?;
        prop_assert_eq!(restored, data);
    }

    #[test]
    fn test_frequency_conservation(data in data_strategy()) {
        let table = FrequencyTable::from_bytes(&data);
        prop_assert_eq!(table.data_len(), data.len() as u64);
        prop_assert_eq!(table.total_weight(), data.len() as u64 + 1);
        prop_assert_eq!(table.count(Symbol::EndMarker), 1);
    }

    #[test]
    fn test_tree_shape(table in table_strategy()) {
        let tree = HuffmanTree::from_frequencies(&table);
        let leaves = table.distinct_symbols();
        prop_assert_eq!(tree.leaf_count(), leaves);
        prop_assert_eq!(tree.internal_count(), leaves - 1);
        prop_assert_eq!(tree.root_weight(), table.total_weight());
    }

    #[test]
    fn test_codes_prefix_free(table in table_strategy()) {
        let map = EncodingMap::from_tree(&HuffmanTree::from_frequencies(&table));
        prop_assert_eq!(map.len(), table.distinct_symbols());

        let codes: Vec<_> = map.iter().map(|(_, code)| *code).collect();
        for (i, a) in codes.iter().enumerate() {
            prop_assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_header_roundtrip(table in table_strategy()) {
        let mut header = Vec::new();
        write_header(&table, &mut header)?;
        let read = read_header(&mut Cursor::new(header))?;
        prop_assert_eq!(read, table);
    }
}
