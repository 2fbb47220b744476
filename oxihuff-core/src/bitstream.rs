//! Bit-level I/O over a fixed-capacity, bit-addressable buffer.
//!
//! This module provides [`BitBuffer`], a byte array addressed one bit at a
//! time, and the two directions built on top of it: [`BitWriter`] stages bits
//! and hands whole buffers to a sink, [`BitReader`] refills from a source and
//! hands out one bit at a time.
//!
//! # Bit Ordering
//!
//! Bits are addressed MSB-first within each byte: bit position 0 is the most
//! significant bit of byte 0, position 7 its least significant bit, position 8
//! the most significant bit of byte 1, and so on.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits([1, 0, 1]).unwrap();
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, vec![0b1010_0000]);
//!
//! let mut reader = BitReader::new(Cursor::new(output));
//! assert_eq!(reader.read_bit().unwrap(), Some(1));
//! assert_eq!(reader.read_bit().unwrap(), Some(0));
//! assert_eq!(reader.read_bit().unwrap(), Some(1));
//! ```

use crate::error::{OxiHuffError, Result};
use log::trace;
use std::io::{ErrorKind, Read, Write};

/// Default buffer capacity in bits (128 bytes).
pub const DEFAULT_CAPACITY_BITS: usize = 1024;

/// A fixed-capacity, bit-indexable byte array with a cursor.
///
/// The cursor and occupied-byte count are driven by [`BitWriter`] and
/// [`BitReader`]; on its own the buffer only offers random bit access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer {
    /// Backing bytes, `capacity / 8` long.
    bytes: Vec<u8>,
    /// Capacity in bits.
    capacity: usize,
    /// Next bit position to write or read.
    cursor: usize,
    /// Number of bytes holding meaningful data.
    occupied: usize,
}

impl BitBuffer {
    /// Create a zeroed buffer holding `capacity` bits.
    ///
    /// The capacity must be a non-zero multiple of 8.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 || capacity % 8 != 0 {
            return Err(OxiHuffError::invalid_capacity(capacity));
        }
        Ok(Self {
            bytes: vec![0u8; capacity / 8],
            capacity,
            cursor: 0,
            occupied: 0,
        })
    }

    /// Capacity in bits.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current cursor position in bits.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of bytes currently holding data.
    pub fn occupied_bytes(&self) -> usize {
        self.occupied
    }

    /// The occupied prefix of the backing array.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.occupied]
    }

    /// Set (`1`) or clear (`0`) the bit at `position`.
    pub fn set_bit(&mut self, position: usize, value: u8) -> Result<()> {
        if position >= self.capacity {
            return Err(OxiHuffError::out_of_range(position, self.capacity));
        }
        let mask = 0x80u8 >> (position % 8);
        match value {
            0 => self.bytes[position / 8] &= !mask,
            1 => self.bytes[position / 8] |= mask,
            other => return Err(OxiHuffError::invalid_bit_value(other)),
        }
        Ok(())
    }

    /// Get the bit at `position` as 0 or 1.
    pub fn get_bit(&self, position: usize) -> Result<u8> {
        if position >= self.capacity {
            return Err(OxiHuffError::out_of_range(position, self.capacity));
        }
        Ok((self.bytes[position / 8] >> (7 - position % 8)) & 1)
    }

    /// Clear all bits and counters.
    pub fn reset(&mut self) {
        self.bytes.fill(0);
        self.cursor = 0;
        self.occupied = 0;
    }

    /// Whether the cursor has reached the end of the buffer.
    fn is_full(&self) -> bool {
        self.cursor >= self.capacity
    }

    /// Whether every occupied bit has been consumed.
    fn is_drained(&self) -> bool {
        self.cursor >= self.occupied * 8
    }
}

impl Default for BitBuffer {
    fn default() -> Self {
        Self {
            bytes: vec![0u8; DEFAULT_CAPACITY_BITS / 8],
            capacity: DEFAULT_CAPACITY_BITS,
            cursor: 0,
            occupied: 0,
        }
    }
}

/// A bit-level writer that stages bits in a [`BitBuffer`] and writes whole
/// buffers to a sink.
///
/// The buffer is written out automatically only when it is full and another
/// bit arrives. Call [`flush`](Self::flush) after the last bit; nothing is
/// written on drop.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Staging buffer.
    buffer: BitBuffer,
    /// Attached sink.
    sink: Option<W>,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` with the default capacity, attached to `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            buffer: BitBuffer::default(),
            sink: Some(sink),
            total_bits_written: 0,
        }
    }

    /// Create a new `BitWriter` with a buffer of `capacity` bits.
    pub fn with_capacity(sink: W, capacity: usize) -> Result<Self> {
        let mut writer = Self::detached(capacity)?;
        writer.attach(sink);
        Ok(writer)
    }

    /// Create a `BitWriter` with no sink yet.
    ///
    /// Bits can be staged, but any flush fails with
    /// [`OxiHuffError::Unconfigured`] until [`attach`](Self::attach) is called.
    pub fn detached(capacity: usize) -> Result<Self> {
        Ok(Self {
            buffer: BitBuffer::new(capacity)?,
            sink: None,
            total_bits_written: 0,
        })
    }

    /// Attach the output sink.
    pub fn attach(&mut self, sink: W) {
        self.sink = Some(sink);
    }

    /// Get a reference to the underlying sink, if attached.
    pub fn get_ref(&self) -> Option<&W> {
        self.sink.as_ref()
    }

    /// Get the staging buffer.
    pub fn buffer(&self) -> &BitBuffer {
        &self.buffer
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write a single bit (0 or 1).
    pub fn write_bit(&mut self, value: u8) -> Result<()> {
        if self.buffer.is_full() {
            self.flush()?;
        }
        self.buffer.set_bit(self.buffer.cursor, value)?;
        self.buffer.cursor += 1;
        self.buffer.occupied = self.buffer.cursor.div_ceil(8);
        self.total_bits_written += 1;
        Ok(())
    }

    /// Write a sequence of bits in order.
    pub fn write_bits<I>(&mut self, bits: I) -> Result<()>
    where
        I: IntoIterator<Item = u8>,
    {
        for bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Write the occupied bytes to the sink and reset the buffer.
    ///
    /// The last byte may carry up to 7 zero padding bits.
    pub fn flush(&mut self) -> Result<()> {
        let sink = self
            .sink
            .as_mut()
            .ok_or_else(|| OxiHuffError::unconfigured("sink"))?;
        sink.write_all(self.buffer.as_bytes())?;
        trace!("bit writer flushed {} bytes", self.buffer.occupied);
        self.buffer.reset();
        Ok(())
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        self.sink.ok_or_else(|| OxiHuffError::unconfigured("sink"))
    }
}

/// A bit-level reader that refills a [`BitBuffer`] from a source.
///
/// [`read_bit`](Self::read_bit) returns `Ok(None)` once the source is
/// exhausted. I/O failures are returned as errors, never as end-of-source.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Staging buffer.
    buffer: BitBuffer,
    /// Attached source.
    source: Option<R>,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` with the default capacity, attached to `source`.
    pub fn new(source: R) -> Self {
        Self {
            buffer: BitBuffer::default(),
            source: Some(source),
            total_bits_read: 0,
        }
    }

    /// Create a new `BitReader` with a buffer of `capacity` bits.
    pub fn with_capacity(source: R, capacity: usize) -> Result<Self> {
        let mut reader = Self::detached(capacity)?;
        reader.attach(source);
        Ok(reader)
    }

    /// Create a `BitReader` with no source yet.
    pub fn detached(capacity: usize) -> Result<Self> {
        Ok(Self {
            buffer: BitBuffer::new(capacity)?,
            source: None,
            total_bits_read: 0,
        })
    }

    /// Attach the input source.
    pub fn attach(&mut self, source: R) {
        self.source = Some(source);
    }

    /// Get a reference to the underlying source, if attached.
    pub fn get_ref(&self) -> Option<&R> {
        self.source.as_ref()
    }

    /// Consume this `BitReader` and return the underlying source.
    ///
    /// Bits already buffered but not yet read are discarded.
    pub fn into_inner(self) -> Option<R> {
        self.source
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Refill the buffer with up to `capacity / 8` bytes from the source.
    ///
    /// Returns the number of bytes obtained; zero means the source is
    /// exhausted.
    pub fn refill(&mut self) -> Result<usize> {
        let source = self
            .source
            .as_mut()
            .ok_or_else(|| OxiHuffError::unconfigured("source"))?;
        self.buffer.reset();

        let want = self.buffer.bytes.len();
        let mut filled = 0;
        while filled < want {
            match source.read(&mut self.buffer.bytes[filled..want]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        self.buffer.occupied = filled;
        trace!("bit reader refilled {} bytes", filled);
        Ok(filled)
    }

    /// Read a single bit, refilling first if the buffer is drained.
    ///
    /// Returns `Ok(None)` at end of source.
    pub fn read_bit(&mut self) -> Result<Option<u8>> {
        if self.buffer.is_drained() && self.refill()? == 0 {
            return Ok(None);
        }
        let bit = self.buffer.get_bit(self.buffer.cursor)?;
        self.buffer.cursor += 1;
        self.total_bits_read += 1;
        Ok(Some(bit))
    }
}
