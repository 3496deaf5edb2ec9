use thiserror::Error;

use crate::chebyshev::ChebyshevError;

#[derive(Error, Debug)]
pub enum BspError {
    #[error("Epoch {epoch} is outside the time span covered for target {target}, center {center}")]
    OutOfRange { epoch: f64, target: i32, center: i32 },

    #[error("No segment found for target {target} relative to center {center}")]
    NotFound { target: i32, center: i32 },

    #[error("Truncated read: {needed} bytes requested at offset {offset}, only {available} available")]
    TruncatedRead {
        offset: u64,
        needed: usize,
        available: usize,
    },

    #[error("Corrupt segment: {0}")]
    CorruptSegment(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unexpected file length for {path}: expected {expected} bytes, found {found}")]
    FileLengthMismatch {
        path: String,
        expected: u64,
        found: u64,
    },

    #[error("SHA-512 digest mismatch for {path}: expected {expected}, found {found}")]
    DigestMismatch {
        path: String,
        expected: String,
        found: String,
    },

    #[error("Error during the nom parsing: {0}")]
    NomParsingError(String),

    #[error("Not a DAF file, id word: {0:?}")]
    InvalidIdWord(String),

    #[error("Unsupported binary format: {0:?} (only LTL-IEEE is supported)")]
    UnsupportedByteOrder(String),

    #[error("Invalid SPK data type: {0} (only type 2, Chebyshev position, is supported)")]
    InvalidSpkDataType(i32),

    #[error("Invalid NAIF ID: {0}")]
    InvalidNaifId(i32),

    #[error("Invalid kernel configuration: {0}")]
    InvalidConfig(String),
}

impl From<ChebyshevError> for BspError {
    fn from(err: ChebyshevError) -> Self {
        BspError::CorruptSegment(err.to_string())
    }
}

impl<E: std::fmt::Debug> From<nom::Err<E>> for BspError {
    fn from(err: nom::Err<E>) -> Self {
        BspError::NomParsingError(format!("{err:?}"))
    }
}

impl PartialEq for BspError {
    fn eq(&self, other: &Self) -> bool {
        use BspError::*;
        match (self, other) {
            (
                OutOfRange {
                    epoch: e1,
                    target: t1,
                    center: c1,
                },
                OutOfRange {
                    epoch: e2,
                    target: t2,
                    center: c2,
                },
            ) => e1 == e2 && t1 == t2 && c1 == c2,
            (
                NotFound {
                    target: t1,
                    center: c1,
                },
                NotFound {
                    target: t2,
                    center: c2,
                },
            ) => t1 == t2 && c1 == c2,
            (
                TruncatedRead {
                    offset: o1,
                    needed: n1,
                    available: a1,
                },
                TruncatedRead {
                    offset: o2,
                    needed: n2,
                    available: a2,
                },
            ) => o1 == o2 && n1 == n2 && a1 == a2,
            (CorruptSegment(a), CorruptSegment(b)) => a == b,

            // io errors carry no comparable payload: same variant is enough
            (IoError(_), IoError(_)) => true,

            (
                FileLengthMismatch {
                    path: p1,
                    expected: e1,
                    found: f1,
                },
                FileLengthMismatch {
                    path: p2,
                    expected: e2,
                    found: f2,
                },
            ) => p1 == p2 && e1 == e2 && f1 == f2,
            (
                DigestMismatch {
                    path: p1,
                    expected: e1,
                    found: f1,
                },
                DigestMismatch {
                    path: p2,
                    expected: e2,
                    found: f2,
                },
            ) => p1 == p2 && e1 == e2 && f1 == f2,
            (NomParsingError(a), NomParsingError(b)) => a == b,
            (InvalidIdWord(a), InvalidIdWord(b)) => a == b,
            (UnsupportedByteOrder(a), UnsupportedByteOrder(b)) => a == b,
            (InvalidSpkDataType(a), InvalidSpkDataType(b)) => a == b,
            (InvalidNaifId(a), InvalidNaifId(b)) => a == b,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,

            _ => false,
        }
    }
}
