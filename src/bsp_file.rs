//! Loaded SPK kernel and the coordinate lookup.
//!
//! # Lookup pipeline
//! 1. **Segment locator** – [`SummaryIndex::locate`] picks the descriptor whose
//!    `(target, center)` matches and whose open span contains the epoch.
//! 2. **Record addressor** – [`RecordAddress::locate`] reads the four directory
//!    words and computes the byte offset of the covering record.
//! 3. **Coefficient extractor** – [`ChebyshevRecord::read`] decodes the `rsize`
//!    words of that record.
//! 4. **Assembler** – [`ChebyshevRecord::interpolate_with`] evaluates the three
//!    series and their derivatives.
//!
//! Every read is addressed by explicit offset into the immutable file bytes and
//! nothing is cached between calls, so a [`BspFile`] can be shared by reference
//! across threads and queried concurrently.
//!
//! # Units & time scales
//! * Epochs are **ET/TDB seconds from J2000**.
//! * Positions are in the kernel's length unit (km for the DE series),
//!   velocities in that unit per second.
use std::fmt;

use hifitime::Epoch;
use sha2::{Digest, Sha512};
use tracing::{debug, info};

use crate::{
    bsp_errors::BspError,
    chebyshev::{ChebyshevEvaluator, Clenshaw},
    config::KernelConfig,
    naif::{
        byte_source::ByteSource,
        daf_header::{DAFHeader, DAF_RECORD_LEN},
        ephemeris_record::ChebyshevRecord,
        naif_ids::NaifId,
        record_address::RecordAddress,
        summary_index::SummaryIndex,
    },
    position::Position,
};

/// An SPK kernel held in memory together with its segment index.
#[derive(Debug, Clone)]
pub struct BspFile {
    bytes: Vec<u8>,
    summaries: SummaryIndex,
    daf_header: Option<DAFHeader>,
    sha512: String,
}

impl BspFile {
    /// Read a kernel from disk, verify it against `config`, and index it.
    ///
    /// Arguments
    /// -----------------
    /// * `config`: path plus optional expected length and SHA-512 digest.
    ///
    /// Return
    /// ----------
    /// * The loaded kernel, or [`BspError::FileLengthMismatch`] /
    ///   [`BspError::DigestMismatch`] when a configured check fails, or any
    ///   parsing error from [`Self::from_bytes`].
    pub fn open(config: &KernelConfig) -> Result<Self, BspError> {
        let bytes = std::fs::read(&config.path)?;
        let found = bytes.len() as u64;

        if let Some(expected) = config.expected_length {
            if expected != found {
                return Err(BspError::FileLengthMismatch {
                    path: config.path.to_string(),
                    expected,
                    found,
                });
            }
        }

        let digest = sha512_hex(&bytes);
        if let Some(expected) = &config.expected_sha512 {
            if !expected.eq_ignore_ascii_case(&digest) {
                return Err(BspError::DigestMismatch {
                    path: config.path.to_string(),
                    expected: expected.clone(),
                    found: digest,
                });
            }
        }

        let kernel = Self::index(bytes, digest)?;
        info!(
            path = %config.path,
            length = found,
            segments = kernel.summaries.len(),
            "SPK kernel loaded"
        );
        Ok(kernel)
    }

    /// Parse the DAF header and the summary records of an in-memory kernel.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, BspError> {
        let digest = sha512_hex(&bytes);
        Self::index(bytes, digest)
    }

    /// Pair raw kernel bytes with an index built elsewhere; no header is read.
    pub fn from_parts(bytes: Vec<u8>, summaries: SummaryIndex) -> Self {
        let sha512 = sha512_hex(&bytes);
        BspFile {
            bytes,
            summaries,
            daf_header: None,
            sha512,
        }
    }

    fn index(bytes: Vec<u8>, sha512: String) -> Result<Self, BspError> {
        let header_bytes = bytes.as_slice().bytes_at(0, DAF_RECORD_LEN)?;
        let (_, daf_header) = DAFHeader::parse(header_bytes)?;
        daf_header.validate()?;

        let summaries = SummaryIndex::parse(bytes.as_slice(), &daf_header)?;
        debug!(
            idword = %daf_header.idword,
            internal_filename = %daf_header.internal_filename,
            segments = summaries.len(),
            "DAF kernel indexed"
        );

        Ok(BspFile {
            bytes,
            summaries,
            daf_header: Some(daf_header),
            sha512,
        })
    }

    /// Length of the kernel in bytes.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// `true` for a zero-length kernel.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hexadecimal SHA-512 of the kernel bytes.
    pub fn sha512(&self) -> &str {
        &self.sha512
    }

    /// Segment descriptors in file order.
    pub fn summaries(&self) -> &SummaryIndex {
        &self.summaries
    }

    /// `None` when the kernel was assembled with [`Self::from_parts`].
    pub fn daf_header(&self) -> Option<&DAFHeader> {
        self.daf_header.as_ref()
    }

    /// The raw kernel bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Position and velocity of `target_code` relative to `center_code` at an
    /// integer ET epoch.
    ///
    /// Arguments
    /// -----------------
    /// * `epoch_seconds`: ET seconds from J2000.
    /// * `target_code`, `center_code`: NAIF codes of the pair, as stored in the kernel.
    ///
    /// Return
    /// ----------
    /// * The state in km and km/s, or [`BspError::NotFound`] when the pair is
    ///   absent, [`BspError::OutOfRange`] when no segment spans the epoch,
    ///   [`BspError::TruncatedRead`] / [`BspError::CorruptSegment`] for damaged data.
    ///
    /// See also
    /// ------------
    /// * [`Self::state_at`] – Fractional epochs.
    /// * [`Self::ephemeris`] – Typed bodies and [`hifitime::Epoch`].
    pub fn get_coordinates(
        &self,
        epoch_seconds: i64,
        target_code: i32,
        center_code: i32,
    ) -> Result<Position, BspError> {
        self.state_at(epoch_seconds as f64, target_code, center_code)
    }

    /// Same as [`Self::get_coordinates`] for a fractional ET epoch.
    pub fn state_at(
        &self,
        et_seconds: f64,
        target_code: i32,
        center_code: i32,
    ) -> Result<Position, BspError> {
        self.get_coordinates_with(&Clenshaw, et_seconds, target_code, center_code)
    }

    /// Lookup driving a caller-supplied Chebyshev evaluator.
    pub fn get_coordinates_with<E: ChebyshevEvaluator + ?Sized>(
        &self,
        evaluator: &E,
        et_seconds: f64,
        target_code: i32,
        center_code: i32,
    ) -> Result<Position, BspError> {
        let record = self.record_at(et_seconds, target_code, center_code)?;
        record.interpolate_with(evaluator, et_seconds)
    }

    /// The decoded record covering `et_seconds` for the pair.
    pub fn record_at(
        &self,
        et_seconds: f64,
        target_code: i32,
        center_code: i32,
    ) -> Result<ChebyshevRecord, BspError> {
        let source = self.bytes.as_slice();

        let summary = self.summaries.locate(et_seconds, target_code, center_code)?;
        summary.check_data_type()?;

        let (address, _) = RecordAddress::locate(source, summary, et_seconds)?;
        ChebyshevRecord::read(source, &address)
    }

    /// Typed lookup at a [`hifitime::Epoch`], converted to ET seconds.
    pub fn ephemeris(
        &self,
        target: NaifId,
        center: NaifId,
        epoch: &Epoch,
    ) -> Result<Position, BspError> {
        self.state_at(epoch.to_et_seconds(), target.to_id(), center.to_id())
    }
}

/// Free-function form of [`BspFile::get_coordinates`].
pub fn get_coordinates(
    epoch_seconds: i64,
    target_code: i32,
    center_code: i32,
    file: &BspFile,
) -> Result<Position, BspError> {
    file.get_coordinates(epoch_seconds, target_code, center_code)
}

fn sha512_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha512::digest(bytes))
}

impl fmt::Display for BspFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+{:-^78}+", " SPK kernel ")?;
        writeln!(f, "length : {} bytes", self.len())?;
        writeln!(f, "sha512 : {}", self.sha512)?;
        if let Some(header) = &self.daf_header {
            write!(f, "{header}")?;
        }
        for summary in &self.summaries {
            writeln!(
                f,
                "+{:-^78}+",
                format!(" {} / {} ", summary.target_code, summary.center_code)
            )?;
            write!(f, "{summary}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_bsp_file {
    use super::*;
    use crate::naif::summary_record::SummaryRecord;

    /// Words 1..=15: one record of rsize 11 followed by its directory.
    fn single_record_words() -> Vec<f64> {
        let mut words = vec![
            0.0, 1000.0, // mid, radius
            10.0, 2.0, 0.5, // x
            -4.0, 1.0, 0.25, // y
            7.0, -3.0, 1.0, // z
        ];
        words.extend([-1000.0, 2000.0, 11.0, 1.0]);
        words
    }

    fn kernel() -> BspFile {
        let bytes = single_record_words()
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .collect();
        let index =
            SummaryIndex::from_records(vec![SummaryRecord::new(3, 10, 1, 15, -1000.0, 1000.0)]);
        BspFile::from_parts(bytes, index)
    }

    #[test]
    fn test_from_parts_lookup() {
        let file = kernel();
        assert!(file.daf_header().is_none());
        assert_eq!(file.len(), 15 * 8);
        assert_eq!(file.sha512().len(), 128);

        let state = get_coordinates(0, 3, 10, &file).unwrap();
        assert_eq!(state.x, 9.5);
        assert_eq!(state.velocity_x, 0.002);
    }

    #[test]
    fn test_lookup_errors() {
        let file = kernel();
        assert_eq!(
            file.get_coordinates(1000, 3, 10),
            Err(BspError::OutOfRange {
                epoch: 1000.0,
                target: 3,
                center: 10
            })
        );
        assert_eq!(
            file.get_coordinates(0, 4, 10),
            Err(BspError::NotFound {
                target: 4,
                center: 10
            })
        );
    }

    #[test]
    fn test_unsupported_data_type() {
        let mut summary = SummaryRecord::new(3, 10, 1, 15, -1000.0, 1000.0);
        summary.data_type = 3;
        let file = BspFile::from_parts(
            kernel().bytes().to_vec(),
            SummaryIndex::from_records(vec![summary]),
        );
        assert_eq!(
            file.get_coordinates(0, 3, 10),
            Err(BspError::InvalidSpkDataType(3))
        );
    }

    #[test]
    fn test_ephemeris_with_epoch() {
        let file = kernel();
        let epoch = Epoch::from_et_seconds(0.0);
        let state = file
            .ephemeris(NaifId::EarthMoonBarycenter, NaifId::Sun, &epoch)
            .unwrap();
        assert_eq!(state, file.state_at(epoch.to_et_seconds(), 3, 10).unwrap());
    }

    #[test]
    fn test_from_bytes_requires_daf_header() {
        assert!(matches!(
            BspFile::from_bytes(vec![0u8; 100]),
            Err(BspError::TruncatedRead { .. })
        ));
        assert!(matches!(
            BspFile::from_bytes(vec![0u8; 2048]),
            Err(BspError::InvalidIdWord(_))
        ));
    }

    #[test]
    fn test_sha512_of_empty_input() {
        assert_eq!(
            sha512_hex(b""),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }
}
