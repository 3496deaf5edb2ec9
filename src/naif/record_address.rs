//! Record addressing inside a type 2 segment.
//!
//! Given the segment descriptor and its directory, the record covering an
//! epoch starts at
//!
//! ```text
//! 8 * (record_start_address + index * rsize) - 8
//! ```
//!
//! bytes from the start of the file. The trailing `- 8` converts the 1-based
//! DAF word address into a 0-based byte offset; dropping it shifts every
//! coefficient by one word and silently corrupts every position.
use tracing::debug;

use crate::bsp_errors::BspError;

use super::{
    byte_source::{ByteSource, WORD_SIZE},
    directory::ArrayInfo,
    summary_record::SummaryRecord,
};

/// One DAF word, removed from the naive record address.
const ONE_WORD_ADJUSTMENT: u64 = WORD_SIZE as u64;

/// Where the coefficients of the record covering an epoch live.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct RecordAddress {
    /// 0-based record index within the segment.
    pub index: usize,
    /// Byte offset of the record's first word (`mid`).
    pub byte_offset: u64,
    /// Words to read (`rsize`).
    pub record_size: usize,
}

impl RecordAddress {
    /// Read the segment directory and address the record covering `epoch`.
    pub fn locate<S: ByteSource + ?Sized>(
        source: &S,
        summary: &SummaryRecord,
        epoch: f64,
    ) -> Result<(Self, ArrayInfo), BspError> {
        let info = ArrayInfo::read(source, summary)?;
        let address = Self::from_directory(summary, &info, epoch)?;
        Ok((address, info))
    }

    /// Address computation alone, from an already read directory.
    pub fn from_directory(
        summary: &SummaryRecord,
        info: &ArrayInfo,
        epoch: f64,
    ) -> Result<Self, BspError> {
        if summary.record_start_address < 1 {
            return Err(BspError::CorruptSegment(format!(
                "segment start address {} is not a 1-based word address",
                summary.record_start_address
            )));
        }
        let index = info.record_index(epoch)?;
        let record_size = info.record_size();

        let byte_offset = (index as u64)
            .checked_mul(record_size as u64)
            .and_then(|words| words.checked_add(summary.record_start_address as u64))
            .and_then(|word_address| word_address.checked_mul(WORD_SIZE as u64))
            .map(|bytes| bytes - ONE_WORD_ADJUSTMENT)
            .ok_or_else(|| {
                BspError::CorruptSegment(format!(
                    "record {index} of {record_size} words overflows the file address space"
                ))
            })?;

        debug!(
            epoch,
            index,
            record_size,
            byte_offset,
            "record addressed"
        );

        Ok(RecordAddress {
            index,
            byte_offset,
            record_size,
        })
    }
}
