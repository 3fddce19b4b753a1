use crate::error::{AsmError, Result};
use crate::types::Endian;

/// Default capacity cap, enough for every script shipped by the
/// supported engines.
pub const DEFAULT_CAPACITY: usize = 0x0100_0000;

/// Growable byte buffer with a cursor and endian-aware integer writes.
///
/// The cursor can be repositioned freely (header fields are written
/// last, after every segment offset is known) and `seek`/`align`
/// zero-fill any range they skip over. Writes past the configured
/// capacity fail instead of growing forever.
pub struct CodeWriter {
    buf: Vec<u8>,
    pos: usize,
    cap: usize,
    endian: Endian,
}

impl CodeWriter {
    pub fn new(endian: Endian) -> Self {
        Self::with_capacity(endian, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(endian: Endian, cap: usize) -> Self {
        Self {
            buf: Vec::new(),
            pos: 0,
            cap,
            endian,
        }
    }

    /// Drops everything written so far and rewinds the cursor.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.pos = 0;
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to an absolute offset, zero-filling if the
    /// buffer has not reached it yet.
    pub fn set_pos(&mut self, pos: usize) -> Result<()> {
        if pos > self.cap {
            return Err(AsmError::BufferOverflow {
                at: self.pos,
                want: pos.saturating_sub(self.pos),
                cap: self.cap,
            });
        }
        if pos > self.buf.len() {
            self.buf.resize(pos, 0);
        }
        self.pos = pos;
        Ok(())
    }

    /// Advances the cursor by `n` bytes without writing anything.
    pub fn seek(&mut self, n: usize) -> Result<()> {
        self.set_pos(self.pos + n)
    }

    /// Advances the cursor to the next multiple of `n` and returns the
    /// number of pad bytes skipped.
    pub fn align(&mut self, n: usize) -> Result<usize> {
        let pad = (n - self.pos % n) % n;
        self.seek(pad)?;
        Ok(pad)
    }

    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.pos + bytes.len();
        if end > self.cap {
            return Err(AsmError::BufferOverflow {
                at: self.pos,
                want: bytes.len(),
                cap: self.cap,
            });
        }
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        self.put(&[v])
    }

    pub fn write_u16(&mut self, v: u16) -> Result<()> {
        match self.endian {
            Endian::Little => self.put(&v.to_le_bytes()),
            Endian::Big => self.put(&v.to_be_bytes()),
        }
    }

    pub fn write_i16(&mut self, v: i16) -> Result<()> {
        self.write_u16(v as u16)
    }

    /// Packed three-byte signed integer, low 24 bits of `v`.
    pub fn write_i24(&mut self, v: i32) -> Result<()> {
        match self.endian {
            Endian::Little => self.put(&v.to_le_bytes()[..3]),
            Endian::Big => self.put(&v.to_be_bytes()[1..]),
        }
    }

    pub fn write_u32(&mut self, v: u32) -> Result<()> {
        match self.endian {
            Endian::Little => self.put(&v.to_le_bytes()),
            Endian::Big => self.put(&v.to_be_bytes()),
        }
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        self.write_u32(v as u32)
    }

    pub fn write_u64(&mut self, v: u64) -> Result<()> {
        match self.endian {
            Endian::Little => self.put(&v.to_le_bytes()),
            Endian::Big => self.put(&v.to_be_bytes()),
        }
    }

    pub fn write_i64(&mut self, v: i64) -> Result<()> {
        self.write_u64(v as u64)
    }

    pub fn write_f32(&mut self, v: f32) -> Result<()> {
        match self.endian {
            Endian::Little => self.put(&v.to_le_bytes()),
            Endian::Big => self.put(&v.to_be_bytes()),
        }
    }

    /// Writes the bytes of `s` followed by a NUL terminator.
    pub fn write_cstr(&mut self, s: &[u8]) -> Result<()> {
        self.put(s)?;
        self.put(&[0])
    }

    /// The written prefix, up to the current cursor.
    pub fn data(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Moves the written prefix out as an owned vector.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.pos);
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endian_dispatch() {
        let mut w = CodeWriter::new(Endian::Little);
        w.write_u16(0x1234).unwrap();
        w.write_u32(0xAABBCCDD).unwrap();
        assert_eq!(w.data(), &[0x34, 0x12, 0xDD, 0xCC, 0xBB, 0xAA]);

        let mut w = CodeWriter::new(Endian::Big);
        w.write_u16(0x1234).unwrap();
        w.write_u32(0xAABBCCDD).unwrap();
        assert_eq!(w.data(), &[0x12, 0x34, 0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn align_returns_pad_count_and_zero_fills() {
        let mut w = CodeWriter::new(Endian::Little);
        w.write_u8(0xFF).unwrap();
        assert_eq!(w.align(4).unwrap(), 3);
        assert_eq!(w.align(4).unwrap(), 0);
        w.write_u8(0xEE).unwrap();
        assert_eq!(w.data(), &[0xFF, 0, 0, 0, 0xEE]);
    }

    #[test]
    fn seek_then_rewind_overwrite() {
        let mut w = CodeWriter::new(Endian::Little);
        w.seek(4).unwrap();
        w.write_u8(7).unwrap();
        let end = w.pos();
        w.set_pos(0).unwrap();
        w.write_u32(0x01020304).unwrap();
        w.set_pos(end).unwrap();
        assert_eq!(w.data(), &[0x04, 0x03, 0x02, 0x01, 7]);
    }

    #[test]
    fn i24_packs_low_three_bytes() {
        let mut w = CodeWriter::new(Endian::Little);
        w.write_i24(-2).unwrap();
        assert_eq!(w.data(), &[0xFE, 0xFF, 0xFF]);

        let mut w = CodeWriter::new(Endian::Big);
        w.write_i24(0x00012345).unwrap();
        assert_eq!(w.data(), &[0x01, 0x23, 0x45]);
    }

    #[test]
    fn cstr_terminates() {
        let mut w = CodeWriter::new(Endian::Little);
        assert!(w.is_empty());
        w.write_cstr(b"hi").unwrap();
        assert_eq!(w.data(), b"hi\0");
        assert_eq!(w.len(), 3);
        assert_eq!(w.into_vec(), b"hi\0");
    }

    #[test]
    fn capacity_is_enforced() {
        let mut w = CodeWriter::with_capacity(Endian::Little, 4);
        w.write_u32(1).unwrap();
        let err = w.write_u8(0).unwrap_err();
        assert!(matches!(err, AsmError::BufferOverflow { .. }));
    }
}
