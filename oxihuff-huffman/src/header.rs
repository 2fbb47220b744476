//! Frequency-table header.
//!
//! The header makes a compressed artifact self-describing: it carries the
//! counts needed to rebuild the exact tree the encoder used.
//!
//! ```text
//! header     := count:u16le record{count} terminator
//! record     := symbol:u8 frequency:u16le     (frequency 1..=65535)
//! terminator := 0xFE
//! ```
//!
//! Only byte symbols are written as records. The end-marker is implied with a
//! count of 1, which is the only count a [`FrequencyTable`] gives it.
//! The leading record count is what lets a `0xFE` symbol byte appear inside a
//! record: the reader knows where the records end, so the terminator is
//! recognised by its position and never by its value.
//! Counts above 65535 saturate on write.

use crate::frequency::{FrequencyTable, MAX_HEADER_COUNT};
use crate::symbol::Symbol;
use log::debug;
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{ErrorKind, Read, Write};

/// Byte that closes the header.
pub const HEADER_TERMINATOR: u8 = 0xFE;

/// Size of one `(symbol, frequency)` record.
pub const RECORD_SIZE: usize = 3;

/// At most one record per byte value.
pub const MAX_RECORDS: usize = 256;

/// Serialized size of the header for `table`.
pub fn header_len(table: &FrequencyTable) -> usize {
    2 + byte_records(table).count() * RECORD_SIZE + 1
}

fn byte_records(table: &FrequencyTable) -> impl Iterator<Item = (u8, u16)> + '_ {
    table.iter().filter_map(|(symbol, count)| match symbol {
        Symbol::Byte(b) => Some((b, count.min(MAX_HEADER_COUNT) as u16)),
        Symbol::EndMarker => None,
    })
}

/// Write the header for `table` to `sink`, returning the bytes written.
pub fn write_header<W: Write>(table: &FrequencyTable, sink: &mut W) -> Result<usize> {
    let records: Vec<(u8, u16)> = byte_records(table).collect();
    let mut buf = Vec::with_capacity(2 + records.len() * RECORD_SIZE + 1);

    buf.extend_from_slice(&(records.len() as u16).to_le_bytes());
    for (symbol, frequency) in &records {
        buf.push(*symbol);
        buf.extend_from_slice(&frequency.to_le_bytes());
    }
    buf.push(HEADER_TERMINATOR);

    sink.write_all(&buf)?;
    debug!("wrote header: {} records, {} bytes", records.len(), buf.len());
    Ok(buf.len())
}

/// Read a header from `source`, leaving it positioned at the first payload
/// byte.
///
/// Fails with [`OxiHuffError::MalformedHeader`] if the source ends early or
/// the records are inconsistent.
pub fn read_header<R: Read>(source: &mut R) -> Result<FrequencyTable> {
    let count = u16::from_le_bytes(read_array(source, "record count")?) as usize;
    if count > MAX_RECORDS {
        return Err(OxiHuffError::malformed_header(format!(
            "record count {count} exceeds {MAX_RECORDS}"
        )));
    }

    let mut seen = [false; MAX_RECORDS];
    let mut records = Vec::with_capacity(count + 1);
    for _ in 0..count {
        let [symbol, lo, hi] = read_array::<_, RECORD_SIZE>(source, "record")?;
        let frequency = u16::from_le_bytes([lo, hi]);
        if frequency == 0 {
            return Err(OxiHuffError::malformed_header(format!(
                "zero frequency for symbol {symbol:#04x}"
            )));
        }
        if std::mem::replace(&mut seen[symbol as usize], true) {
            return Err(OxiHuffError::malformed_header(format!(
                "duplicate record for symbol {symbol:#04x}"
            )));
        }
        records.push((Symbol::Byte(symbol), frequency as u64));
    }

    let [terminator] = read_array::<_, 1>(source, "terminator")?;
    if terminator != HEADER_TERMINATOR {
        return Err(OxiHuffError::malformed_header(format!(
            "expected terminator {HEADER_TERMINATOR:#04x}, found {terminator:#04x}"
        )));
    }

    records.push((Symbol::EndMarker, 1));
    debug!("read header: {} records", count);
    Ok(FrequencyTable::from_counts(records))
}

fn read_array<R: Read, const N: usize>(source: &mut R, what: &str) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    match source.read_exact(&mut buf) {
        Ok(()) => Ok(buf),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(OxiHuffError::malformed_header(
            format!("source exhausted while reading {what}"),
        )),
        Err(e) => Err(e.into()),
    }
}
