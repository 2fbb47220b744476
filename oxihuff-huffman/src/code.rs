//! Huffman codes and the symbol-to-code map.

use crate::frequency::FrequencyTable;
use crate::symbol::{ALPHABET_SIZE, Symbol};
use crate::tree::{HuffmanTree, NodeId, NodeKind};
use std::fmt;

/// Longest possible code: a 257-leaf tree degenerated into a chain.
pub const MAX_CODE_BITS: usize = ALPHABET_SIZE - 1;

const WORDS: usize = MAX_CODE_BITS.div_ceil(64);

/// A packed bit sequence of up to [`MAX_CODE_BITS`] bits.
///
/// Bit 0 is the first bit on the wire (the first branch taken from the root).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    words: [u64; WORDS],
    len: u16,
}

impl Code {
    /// Empty code.
    pub const fn new() -> Self {
        Self {
            words: [0; WORDS],
            len: 0,
        }
    }

    /// Build a code from a slice of 0/1 values.
    pub fn from_bits(bits: &[u8]) -> Self {
        let mut code = Self::new();
        for &bit in bits {
            code.push(bit);
        }
        code
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the code has no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one bit (any non-zero value is a 1).
    pub fn push(&mut self, bit: u8) {
        let i = self.len();
        debug_assert!(i < MAX_CODE_BITS, "code longer than {MAX_CODE_BITS} bits");
        if bit != 0 {
            self.words[i / 64] |= 1u64 << (63 - i % 64);
        }
        self.len += 1;
    }

    /// Remove the last bit.
    pub fn pop(&mut self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        let bit = self.bit(self.len() - 1);
        let i = self.len() - 1;
        self.words[i / 64] &= !(1u64 << (63 - i % 64));
        self.len -= 1;
        Some(bit)
    }

    /// Bit at `index` (0 or 1).
    pub fn bit(&self, index: usize) -> u8 {
        debug_assert!(index < self.len());
        ((self.words[index / 64] >> (63 - index % 64)) & 1) as u8
    }

    /// Iterate the bits in wire order.
    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len()).map(|i| self.bit(i))
    }

    /// Whether `self` is a prefix of `other` (equal codes count as prefixes).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && (0..self.len()).all(|i| self.bit(i) == other.bit(i))
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// Symbol-to-code table derived from a [`HuffmanTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingMap {
    codes: Vec<Option<Code>>,
}

impl EncodingMap {
    /// Assign a code to every leaf of `tree` (left = 0, right = 1).
    ///
    /// A single-leaf tree gets the one-bit code `0`, so every occurrence
    /// still costs one bit on the wire.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; ALPHABET_SIZE];

        if let Some(symbol) = tree.symbol(tree.root()) {
            codes[symbol.index()] = Some(Code::from_bits(&[0]));
        } else {
            let mut prefix = Code::new();
            assign(tree, tree.root(), &mut prefix, &mut codes);
        }

        Self { codes }
    }

    /// Code for `symbol`, if it has one.
    #[inline]
    pub fn get(&self, symbol: Symbol) -> Option<&Code> {
        self.codes[symbol.index()].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbols and their codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &Code)> + '_ {
        self.codes.iter().enumerate().filter_map(|(i, code)| {
            let code = code.as_ref()?;
            Symbol::from_index(i).map(|s| (s, code))
        })
    }

    /// Longest assigned code.
    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Payload size in bits for the data described by `table`, end-marker
    /// included.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        table.iter().fold(0u64, |acc, (symbol, count)| {
            let len = self.get(symbol).map_or(0, |c| c.len() as u64);
            acc.saturating_add(len.saturating_mul(count))
        })
    }
}

fn assign(tree: &HuffmanTree, id: NodeId, prefix: &mut Code, codes: &mut [Option<Code>]) {
    match tree.node(id).kind {
        NodeKind::Leaf(symbol) => codes[symbol.index()] = Some(*prefix),
        NodeKind::Internal { left, right } => {
            prefix.push(0);
            assign(tree, left, prefix, codes);
            prefix.pop();
            prefix.push(1);
            assign(tree, right, prefix, codes);
            prefix.pop();
        }
    }
}
