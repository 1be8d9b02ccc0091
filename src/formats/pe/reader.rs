//! Bounds-checked positional access to the image bytes.

use crate::formats::pe::types::{PeError, Result};

/// Little-endian cursor over an immutable byte buffer.
///
/// Every seek and read is validated against the buffer length and fails with
/// [`PeError::Truncated`] instead of indexing past the end, so a crafted or
/// cut-off input can never cause out-of-bounds access.
#[derive(Debug)]
pub struct ImageReader<'data> {
    data: &'data [u8],
    pos: usize,
}

impl<'data> ImageReader<'data> {
    pub fn new(data: &'data [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Reposition the cursor. Seeking to the buffer end is allowed; seeking
    /// past it is not.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(PeError::Truncated { offset, wanted: 0 });
        }
        self.pos = offset;
        Ok(())
    }

    /// Advance the cursor without consuming the bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        let target = self.pos.checked_add(len).ok_or(PeError::Truncated {
            offset: self.pos,
            wanted: len,
        })?;
        self.seek(target)
    }

    /// Read exactly `len` bytes at the cursor and advance past them.
    pub fn read_exact(&mut self, len: usize) -> Result<&'data [u8]> {
        let end = self.pos.checked_add(len).ok_or(PeError::Truncated {
            offset: self.pos,
            wanted: len,
        })?;
        if end > self.data.len() {
            return Err(PeError::Truncated {
                offset: self.pos,
                wanted: len,
            });
        }
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        let bytes = self.read_exact(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        let bytes = self.read_exact(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Seek to `offset` and read a little-endian u32 there.
    pub fn read_u32_le_at(&mut self, offset: usize) -> Result<u32> {
        self.seek(offset)?;
        self.read_u32_le()
    }
}
