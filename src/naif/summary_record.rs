//! SPK segment descriptors.
//!
//! Each summary packs two doubles (segment start and end, ET seconds) and six
//! integers: target, center, frame, data type, first and last word address of
//! the segment data.
//!
//! See also
//! ------------
//! * [`crate::naif::summary_index::SummaryIndex`] – Ordered collection and locator.
use std::fmt;

use hifitime::Epoch;
use nom::{
    number::complete::{le_f64, le_i32},
    IResult,
};

use crate::{bsp_errors::BspError, constants::SPK_CHEBYSHEV_POSITION};

use super::naif_ids::NaifId;

/// Descriptor of one SPK segment, as stored in a DAF summary record.
///
/// Addresses are 1‑based DP‑word indices into the file; times are ET seconds
/// from J2000.
#[derive(Debug, PartialEq, Clone)]
pub struct SummaryRecord {
    pub segment_start_time: f64,
    pub segment_last_time: f64,
    pub target_code: i32,
    pub center_code: i32,
    pub frame_id: i32,
    pub data_type: i32,
    pub record_start_address: i32,
    pub record_last_address: i32,
}

impl SummaryRecord {
    /// Build a type 2 descriptor in the J2000 frame.
    pub fn new(
        target_code: i32,
        center_code: i32,
        record_start_address: i32,
        record_last_address: i32,
        segment_start_time: f64,
        segment_last_time: f64,
    ) -> Self {
        SummaryRecord {
            segment_start_time,
            segment_last_time,
            target_code,
            center_code,
            frame_id: 1,
            data_type: SPK_CHEBYSHEV_POSITION,
            record_start_address,
            record_last_address,
        }
    }

    /// Decode an SPK summary (`ND = 2`, `NI = 6`).
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, segment_start_time) = le_f64(input)?;
        let (input, segment_last_time) = le_f64(input)?;

        let (input, target_code) = le_i32(input)?;
        let (input, center_code) = le_i32(input)?;
        let (input, frame_id) = le_i32(input)?;
        let (input, data_type) = le_i32(input)?;
        let (input, record_start_address) = le_i32(input)?;
        let (input, record_last_address) = le_i32(input)?;
        Ok((
            input,
            SummaryRecord {
                segment_start_time,
                segment_last_time,
                target_code,
                center_code,
                frame_id,
                data_type,
                record_start_address,
                record_last_address,
            },
        ))
    }

    /// The solar-system barycenter relative to itself: all-zero data.
    pub fn is_self_referential(&self) -> bool {
        self.target_code == 0 && self.center_code == 0
    }

    /// Same `(target, center)` pair.
    pub fn matches(&self, target: i32, center: i32) -> bool {
        self.target_code == target && self.center_code == center
    }

    /// Open-interval test: both segment bounds are excluded.
    pub fn covers(&self, epoch: f64) -> bool {
        self.segment_start_time < epoch && epoch < self.segment_last_time
    }

    /// Reject segments this crate cannot decode.
    pub fn check_data_type(&self) -> Result<(), BspError> {
        if self.data_type != SPK_CHEBYSHEV_POSITION {
            return Err(BspError::InvalidSpkDataType(self.data_type));
        }
        Ok(())
    }
}

fn body_name(code: i32) -> String {
    NaifId::from_id(code)
        .map(|id| id.to_string())
        .unwrap_or_else(|_| format!("NAIF {code}"))
}

impl fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = Epoch::from_et_seconds(self.segment_start_time);
        let end = Epoch::from_et_seconds(self.segment_last_time);

        let fields = [
            ("start", format!("{start}")),
            ("end", format!("{end}")),
            ("target", body_name(self.target_code)),
            ("center", body_name(self.center_code)),
            ("frame_id", self.frame_id.to_string()),
            ("data_type", self.data_type.to_string()),
            ("start_address", self.record_start_address.to_string()),
            ("last_address", self.record_last_address.to_string()),
        ];

        let label_width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(10);
        let value_width = fields.iter().map(|(_, v)| v.len()).max().unwrap_or(10);

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = label_width + 2,
            value = value_width + 2
        );

        writeln!(f, "{border}")?;
        for (label, value) in fields {
            writeln!(f, "| {label:<label_width$} | {value:<value_width$} |")?;
        }
        writeln!(f, "{border}")
    }
}
