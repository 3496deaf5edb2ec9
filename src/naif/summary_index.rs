//! Ordered index of the segment descriptors of a kernel, and the segment locator.
//!
//! The DAF summary records form a doubly linked list of 1024‑byte records. Each
//! one starts with three control words (`next`, `prev`, `nsum`) followed by
//! `nsum` packed summaries of `ND + ceil(NI/2)` words. [`SummaryIndex::parse`]
//! walks that list from `fward` and keeps the summaries in file order.
//!
//! Lookups go through [`SummaryIndex::locate`]: first segment, in index order,
//! whose `(target, center)` matches and whose open time span contains the epoch.
//! Several segments per pair are allowed; this is how multi-span kernels are
//! laid out.
use std::collections::HashSet;

use tracing::{debug, warn};

use crate::bsp_errors::BspError;

use super::{
    byte_source::{ByteSource, WORD_SIZE},
    daf_header::{DAFHeader, DAF_RECORD_LEN},
    summary_record::SummaryRecord,
};

const CONTROL_WORDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryIndex {
    records: Vec<SummaryRecord>,
}

impl SummaryIndex {
    /// Wrap an already built list of descriptors, kept in the given order.
    pub fn from_records(records: Vec<SummaryRecord>) -> Self {
        warn_on_overlaps(&records);
        SummaryIndex { records }
    }

    /// Read every summary of the kernel, following the summary-record chain.
    ///
    /// Arguments
    /// -----------------
    /// * `source`: the whole kernel.
    /// * `header`: the already validated DAF file record.
    ///
    /// Return
    /// ----------
    /// * The index in file order, or [`BspError::CorruptSegment`] if the chain
    ///   loops, or a control word is not a valid count/pointer.
    pub fn parse<S: ByteSource + ?Sized>(source: &S, header: &DAFHeader) -> Result<Self, BspError> {
        let summary_words = header.summary_words();
        let per_record = (DAF_RECORD_LEN / WORD_SIZE - CONTROL_WORDS) / summary_words;
        let total_records = source.byte_len().div_ceil(DAF_RECORD_LEN as u64);

        let mut records = Vec::new();
        let mut visited = HashSet::new();
        let mut next = header.fward as u64;

        while next != 0 {
            if !visited.insert(next) {
                return Err(BspError::CorruptSegment(format!(
                    "summary record chain loops back to record {next}"
                )));
            }
            if next > total_records {
                return Err(BspError::CorruptSegment(format!(
                    "summary record {next} lies past the end of the file ({total_records} records)"
                )));
            }

            let offset = (next - 1) * DAF_RECORD_LEN as u64;
            let control = source.read_f64s_at(offset, CONTROL_WORDS)?;
            let nsum = as_count(control[2], "nsum")?;
            if nsum > per_record {
                return Err(BspError::CorruptSegment(format!(
                    "summary record {next} claims {nsum} summaries, at most {per_record} fit"
                )));
            }

            for i in 0..nsum {
                let summary_offset =
                    offset + ((CONTROL_WORDS + i * summary_words) * WORD_SIZE) as u64;
                let bytes = source.bytes_at(summary_offset, summary_words * WORD_SIZE)?;
                let (_, summary) = SummaryRecord::parse(bytes)?;
                records.push(summary);
            }

            next = as_count(control[0], "next")? as u64;
        }

        debug!(segments = records.len(), "summary index built");
        Ok(SummaryIndex::from_records(records))
    }

    /// Segment locator.
    ///
    /// Skips the solar-system barycenter relative to itself, then returns the
    /// first descriptor matching `(target, center)` whose open span
    /// `(segment_start_time, segment_last_time)` contains `epoch`.
    ///
    /// Return
    /// ----------
    /// * [`BspError::NotFound`] when no descriptor matches the pair,
    ///   [`BspError::OutOfRange`] when the pair exists but no span brackets `epoch`.
    pub fn locate(&self, epoch: f64, target: i32, center: i32) -> Result<&SummaryRecord, BspError> {
        let mut pair_seen = false;

        for summary in self
            .records
            .iter()
            .filter(|summary| !summary.is_self_referential())
        {
            if !summary.matches(target, center) {
                continue;
            }
            pair_seen = true;
            if summary.covers(epoch) {
                debug!(
                    target_code = target,
                    center_code = center,
                    epoch,
                    start_address = summary.record_start_address,
                    last_address = summary.record_last_address,
                    "segment selected"
                );
                return Ok(summary);
            }
        }

        if pair_seen {
            Err(BspError::OutOfRange {
                epoch,
                target,
                center,
            })
        } else {
            Err(BspError::NotFound { target, center })
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SummaryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct `(target, center)` pairs, in first-seen order.
    pub fn pairs(&self) -> Vec<(i32, i32)> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|summary| (summary.target_code, summary.center_code))
            .filter(|pair| seen.insert(*pair))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SummaryIndex {
    type Item = &'a SummaryRecord;
    type IntoIter = std::slice::Iter<'a, SummaryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn as_count(word: f64, name: &str) -> Result<usize, BspError> {
    if word.fract() != 0.0 || word < 0.0 || word > u32::MAX as f64 {
        return Err(BspError::CorruptSegment(format!(
            "summary control word {name} = {word} is not a count"
        )));
    }
    Ok(word as usize)
}

fn warn_on_overlaps(records: &[SummaryRecord]) {
    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            if a.matches(b.target_code, b.center_code)
                && a.segment_start_time < b.segment_last_time
                && b.segment_start_time < a.segment_last_time
            {
                warn!(
                    target_code = a.target_code,
                    center_code = a.center_code,
                    "overlapping segments for the same pair, the first in index order wins"
                );
            }
        }
    }
}
