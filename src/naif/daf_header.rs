//! DAF file record parsing.
//!
//! The first 1024‑byte record of a DAF container (an SPK kernel here) carries
//! the structural metadata needed to walk the file:
//!
//! * **`idword`**: format identifier, `"DAF/SPK"` for ephemerides.
//! * **`nd`** / **`ni`**: number of double / integer components per summary
//!   (`2` and `6` for SPK).
//! * **`fward`** / **`bward`**: 1‑based record numbers of the first and last
//!   summary record.
//! * **`free`**: first free DP‑word address.
//! * **`locfmt`**: binary format tag, `"LTL-IEEE"` or `"BIG-IEEE"`.
//!
//! Only little‑endian kernels are decoded by this crate; [`DAFHeader::validate`]
//! rejects anything else.
//!
//! See also
//! ------------
//! * [`crate::naif::summary_index::SummaryIndex::parse`] – Uses `fward`, `nd`, `ni`.
use std::fmt;

use nom::{bytes::complete::take, number::complete::le_i32, IResult};
use tracing::warn;

use crate::bsp_errors::BspError;

/// Length of one DAF physical record, in bytes.
pub const DAF_RECORD_LEN: usize = 1024;

const LITTLE_ENDIAN_TAG: &str = "LTL-IEEE";

/// Decoded DAF file record, with padding trimmed from the text fields.
#[derive(Debug, PartialEq, Clone)]
pub struct DAFHeader {
    /// Format identifier, e.g. `"DAF/SPK"`.
    pub idword: String,
    /// Internal kernel name.
    pub internal_filename: String,
    /// Double components per summary (ND).
    pub nd: i32,
    /// Integer components per summary (NI).
    pub ni: i32,
    /// Record number of the first summary record.
    pub fward: i32,
    /// Record number of the last summary record.
    pub bward: i32,
    /// First free DP-word address.
    pub free: i32,
    /// Binary format tag.
    pub locfmt: String,
}

impl DAFHeader {
    /// Parse the first DAF record.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: bytes from the start of the file, at least 1024 long.
    ///
    /// Return
    /// ----------
    /// * `(remaining, header)`; `remaining` starts right after the file record.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, idword) = take(8usize)(input)?;
        let (input, nd) = le_i32(input)?;
        let (input, ni) = le_i32(input)?;
        let (input, ifname) = take(60usize)(input)?;
        let (input, fward) = le_i32(input)?;
        let (input, bward) = le_i32(input)?;
        let (input, free) = le_i32(input)?;
        let (input, locfmt) = take(8usize)(input)?;
        // reserved area + FTP validation string
        let (input, _) = take(603usize + 28 + 297)(input)?;

        Ok((
            input,
            DAFHeader {
                idword: trim_field(idword),
                internal_filename: trim_field(ifname),
                nd,
                ni,
                fward,
                bward,
                free,
                locfmt: trim_field(locfmt),
            },
        ))
    }

    /// Check that the header describes a little‑endian DAF with a sane summary layout.
    pub fn validate(&self) -> Result<(), BspError> {
        if !self.idword.starts_with("DAF/") {
            return Err(BspError::InvalidIdWord(self.idword.clone()));
        }

        match self.locfmt.as_str() {
            LITTLE_ENDIAN_TAG => {}
            "" => warn!(
                idword = %self.idword,
                "DAF header has no binary format tag, assuming little-endian"
            ),
            other => return Err(BspError::UnsupportedByteOrder(other.to_string())),
        }

        // SPK summaries are always two doubles followed by six integers
        if self.nd != 2 || self.ni != 6 || self.fward < 2 {
            return Err(BspError::CorruptSegment(format!(
                "unsupported DAF layout: nd = {}, ni = {}, fward = {}",
                self.nd, self.ni, self.fward
            )));
        }
        Ok(())
    }

    /// Size of one summary in DP-words: `ND + ceil(NI / 2)`.
    pub fn summary_words(&self) -> usize {
        self.nd as usize + (self.ni as usize).div_ceil(2)
    }
}

fn trim_field(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\0', ' '])
        .trim()
        .to_string()
}

impl fmt::Display for DAFHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 14;
        const VALUE_WIDTH: usize = 36;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 2,
            value = VALUE_WIDTH + 2
        );

        let rows = [
            ("ID Word", self.idword.clone()),
            ("Internal Name", self.internal_filename.clone()),
            ("ND / NI", format!("{} / {}", self.nd, self.ni)),
            ("Summaries", format!("records {} to {}", self.fward, self.bward)),
            ("Free Addr", self.free.to_string()),
            ("Binary Format", self.locfmt.clone()),
        ];

        writeln!(f, "{border}")?;
        for (label, value) in rows {
            writeln!(
                f,
                "| {:<label_w$} | {:<value_w$} |",
                label,
                value,
                label_w = LABEL_WIDTH,
                value_w = VALUE_WIDTH
            )?;
        }
        writeln!(f, "{border}")
    }
}
