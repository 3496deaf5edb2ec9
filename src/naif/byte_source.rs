//! Offset-addressed access to the raw bytes of a kernel.
//!
//! Every read names its absolute byte offset; there is no shared cursor, so a
//! single source can serve any number of concurrent lookups through `&self`.
//!
//! All numeric data is decoded as little‑endian IEEE‑754 `f64`.
use nom::{multi::count, number::complete::le_f64};

use crate::bsp_errors::BspError;

/// Size in bytes of one DAF word (one `f64`).
pub const WORD_SIZE: usize = 8;

/// Read-only, randomly addressable bytes.
pub trait ByteSource {
    /// Total length in bytes.
    fn byte_len(&self) -> u64;

    /// Borrow `len` bytes starting at `offset`.
    ///
    /// Fails with [`BspError::TruncatedRead`] when fewer than `len` bytes remain.
    fn bytes_at(&self, offset: u64, len: usize) -> Result<&[u8], BspError>;

    /// Decode one little‑endian `f64` at `offset`.
    fn read_f64_at(&self, offset: u64) -> Result<f64, BspError> {
        let bytes = self.bytes_at(offset, WORD_SIZE)?;
        let (_, value) = le_f64::<_, nom::error::Error<_>>(bytes)?;
        Ok(value)
    }

    /// Decode `n` consecutive little‑endian `f64` starting at `offset`.
    fn read_f64s_at(&self, offset: u64, n: usize) -> Result<Vec<f64>, BspError> {
        let bytes = self.bytes_at(offset, n * WORD_SIZE)?;
        let (_, values) = count(le_f64::<_, nom::error::Error<_>>, n)(bytes)?;
        Ok(values)
    }
}

impl ByteSource for [u8] {
    fn byte_len(&self) -> u64 {
        self.len() as u64
    }

    fn bytes_at(&self, offset: u64, len: usize) -> Result<&[u8], BspError> {
        let truncated = || BspError::TruncatedRead {
            offset,
            needed: len,
            available: (self.len() as u64).saturating_sub(offset) as usize,
        };

        let start = usize::try_from(offset).map_err(|_| truncated())?;
        let end = start.checked_add(len).ok_or_else(truncated)?;
        self.get(start..end).ok_or_else(truncated)
    }
}

impl ByteSource for Vec<u8> {
    fn byte_len(&self) -> u64 {
        self.as_slice().byte_len()
    }

    fn bytes_at(&self, offset: u64, len: usize) -> Result<&[u8], BspError> {
        self.as_slice().bytes_at(offset, len)
    }
}
