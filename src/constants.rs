//! # Constants for `bsp_ephem`
//!
//! Physical constants, unit conversions and the fixed codes of the SPK format.

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// SPK data type 2: Chebyshev polynomials, position only
pub const SPK_CHEBYSHEV_POSITION: i32 = 2;

/// Mid-point and radius words at the head of each type 2 record
pub const RECORD_HEADER_WORDS: usize = 2;

/// `init`, `intlen`, `rsize`, `n` at the tail of each type 2 segment
pub const DIRECTORY_WORDS: usize = 4;
