//! Segment directory of an SPK type 2 segment.
//!
//! The last four words of every type 2 segment describe its records:
//!
//! ```text
//! +---------------+
//! | Record 1      |
//! +---------------+
//! | ...           |
//! +---------------+
//! | Record N      |
//! +---------------+
//! | INIT          |  start epoch of record 1 (ET seconds)
//! | INTLEN        |  seconds covered by one record
//! | RSIZE         |  words per record: 2 + 3 * (order + 1)
//! | N             |  number of records
//! +---------------+
//! ```
//!
//! The directory is re-read on every lookup; nothing here is cached.
use std::fmt;

use hifitime::{Duration, Epoch};

use crate::{
    bsp_errors::BspError,
    constants::{DIRECTORY_WORDS, RECORD_HEADER_WORDS},
};

use super::{
    byte_source::{ByteSource, WORD_SIZE},
    summary_record::SummaryRecord,
};

/// The four directory words, kept as the raw doubles found in the file.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ArrayInfo {
    pub init: f64,
    pub intlen: f64,
    pub rsize: f64,
    pub n: f64,
}

impl ArrayInfo {
    /// Byte offset of the directory: `(record_last_address - 4) * 8`.
    pub fn directory_offset(record_last_address: i32) -> Result<u64, BspError> {
        let last = u64::try_from(record_last_address)
            .ok()
            .filter(|last| *last >= DIRECTORY_WORDS as u64)
            .ok_or_else(|| {
                BspError::CorruptSegment(format!(
                    "segment last address {record_last_address} cannot hold a directory"
                ))
            })?;
        Ok((last - DIRECTORY_WORDS as u64) * WORD_SIZE as u64)
    }

    /// Read and validate the directory of the segment described by `summary`.
    pub fn read<S: ByteSource + ?Sized>(source: &S, summary: &SummaryRecord) -> Result<Self, BspError> {
        let offset = Self::directory_offset(summary.record_last_address)?;
        let words = source.read_f64s_at(offset, DIRECTORY_WORDS)?;
        let info = ArrayInfo {
            init: words[0],
            intlen: words[1],
            rsize: words[2],
            n: words[3],
        };
        info.validate()?;
        info.check_fits(summary)?;
        Ok(info)
    }

    /// Structural invariants of a type 2 directory.
    pub fn validate(&self) -> Result<(), BspError> {
        let corrupt = |what: String| Err(BspError::CorruptSegment(what));

        if !self.init.is_finite() {
            return corrupt(format!("directory init {} is not finite", self.init));
        }
        if !(self.intlen.is_finite() && self.intlen > 0.0) {
            return corrupt(format!("directory intlen {} is not a positive length", self.intlen));
        }
        if !is_whole(self.rsize) || self.rsize < (RECORD_HEADER_WORDS + 3) as f64 {
            return corrupt(format!("directory rsize {} is not a valid record size", self.rsize));
        }
        if (self.rsize as usize - RECORD_HEADER_WORDS) % 3 != 0 {
            return corrupt(format!(
                "directory rsize {} does not split into three coefficient groups",
                self.rsize
            ));
        }
        if !is_whole(self.n) || self.n < 1.0 {
            return corrupt(format!("directory record count {} is not a count", self.n));
        }
        Ok(())
    }

    /// The records plus the directory must fit between the segment addresses.
    ///
    /// The capacity test runs on the raw doubles, before any cast, so an
    /// oversized `n` or `rsize` is rejected instead of saturating.
    fn check_fits(&self, summary: &SummaryRecord) -> Result<(), BspError> {
        let available = summary.record_last_address as i64 - summary.record_start_address as i64 + 1;
        let needed = self.n * self.rsize + DIRECTORY_WORDS as f64;
        if summary.record_start_address < 1 || needed > available as f64 {
            return Err(BspError::CorruptSegment(format!(
                "segment [{}, {}] holds {available} words, directory describes {needed}",
                summary.record_start_address, summary.record_last_address
            )));
        }
        Ok(())
    }

    /// Words per record (`rsize`).
    pub fn record_size(&self) -> usize {
        self.rsize as usize
    }

    pub fn record_count(&self) -> usize {
        self.n as usize
    }

    /// Coefficients per axis: `(rsize - 2) / 3`.
    pub fn coefficients_per_axis(&self) -> usize {
        (self.record_size() - RECORD_HEADER_WORDS) / 3
    }

    /// 0-based index of the record covering `epoch`: `floor((epoch - init) / intlen)`.
    ///
    /// Fails with [`BspError::CorruptSegment`] if the index falls outside `[0, n)`.
    pub fn record_index(&self, epoch: f64) -> Result<usize, BspError> {
        let index = ((epoch - self.init) / self.intlen).floor();
        if !(index >= 0.0 && index < self.n) {
            return Err(BspError::CorruptSegment(format!(
                "record index {index} for epoch {epoch} is outside [0, {})",
                self.n
            )));
        }
        Ok(index as usize)
    }
}

fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

impl fmt::Display for ArrayInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let init = Epoch::from_et_seconds(self.init);
        let intlen = Duration::from_seconds(self.intlen);

        writeln!(f, "+--------+----------------------------+")?;
        writeln!(f, "| {:<6} | {:<26} |", "init", format!("{init}"))?;
        writeln!(f, "| {:<6} | {:<26} |", "intlen", format!("{intlen}"))?;
        writeln!(f, "| {:<6} | {:<26} |", "rsize", self.rsize)?;
        writeln!(f, "| {:<6} | {:<26} |", "n", self.n)?;
        writeln!(f, "+--------+----------------------------+")
    }
}
