//! Cursor-based byte buffer.
//!
//! Reads consume a borrowed input slice in network byte order; writes append
//! to an owned, growable output. The first failed read is sticky: every later
//! read returns the same error and every later write is a no-op, so a chain
//! of `?`-propagated reads short-circuits on the first underrun.

use crate::error::CodecError;

#[derive(Debug, Default, Clone)]
pub struct Buffer<'a> {
    input: &'a [u8],
    pos: usize,
    out: Vec<u8>,
    err: Option<CodecError>,
}

impl<'a> Buffer<'a> {
    /// Create an empty buffer, ready for writing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer reading from `bytes`.
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        let mut buf = Self::new();
        buf.init(bytes);
        buf
    }

    /// Reset to read from `bytes`: cursor at 0, error cleared, output emptied.
    pub fn init(&mut self, bytes: &'a [u8]) {
        self.input = bytes;
        self.pos = 0;
        self.out.clear();
        self.err = None;
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unread part of the input.
    pub fn remaining(&self) -> &'a [u8] {
        let input = self.input;
        &input[self.pos..]
    }

    /// First error recorded on this buffer, if any.
    pub fn err(&self) -> Option<&CodecError> {
        self.err.as_ref()
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        let [value] = self.read_array::<1>()?;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        self.read_array::<2>().map(u16::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.read_array::<4>().map(u32::from_be_bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let bytes = self.read_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    /// Consume exactly `n` bytes.
    ///
    /// # Errors
    /// Returns `CodecError::BufferUnderrun` when fewer than `n` bytes remain,
    /// or the sticky error from an earlier failure.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }
        let remaining = self.input.len() - self.pos;
        if n > remaining {
            let err = CodecError::BufferUnderrun {
                needed: n,
                remaining,
            };
            self.err = Some(err.clone());
            return Err(err);
        }
        let input = self.input;
        let bytes = &input[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value]);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_be_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.err.is_none() {
            self.out.extend_from_slice(bytes);
        }
    }

    /// Append `n` zero bytes (slot padding).
    pub fn write_zeros(&mut self, n: usize) {
        if self.err.is_none() {
            self.out.resize(self.out.len() + n, 0);
        }
    }

    /// Written bytes so far.
    pub fn as_written(&self) -> &[u8] {
        &self.out
    }

    /// Snapshot of the written bytes, independent of later writes.
    pub fn bytes(&self) -> Vec<u8> {
        self.out.clone()
    }

    /// Consume the buffer, returning the written bytes or the sticky error.
    pub fn finish(self) -> Result<Vec<u8>, CodecError> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(self.out),
        }
    }
}
