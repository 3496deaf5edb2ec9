//! Chebyshev record extraction and state assembly.
//!
//! A type 2 record holds `rsize` little‑endian words:
//!
//! 1. `mid` (ET seconds from J2000),
//! 2. `radius` (seconds),
//! 3. `deg` coefficients for X (km),
//! 4. `deg` for Y (km),
//! 5. `deg` for Z (km),
//!
//! with `deg = (rsize - 2) / 3`. Each axis is a series of **order `deg - 1`**
//! evaluated at `tau = (et - mid) / radius`. Velocity is the derivative with
//! respect to `tau` scaled by `1 / radius`.
//!
//! ## See also
//! ------------
//! * [`crate::naif::record_address::RecordAddress`] – Where the record starts.
//! * [`crate::chebyshev::ChebyshevEvaluator`] – The polynomial evaluator driven here.
use std::fmt;

use hifitime::{Duration, Epoch};

use crate::{
    bsp_errors::BspError,
    chebyshev::{ChebyshevEvaluator, Clenshaw},
    constants::RECORD_HEADER_WORDS,
    position::Position,
};

use super::{byte_source::ByteSource, record_address::RecordAddress};

/// One decoded type 2 record.
#[derive(Debug, Clone, PartialEq)]
pub struct ChebyshevRecord {
    /// Midpoint of the record interval (ET seconds from J2000).
    pub mid: f64,
    /// Half-width of the record interval (seconds).
    pub radius: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl ChebyshevRecord {
    /// Coefficient extractor: read the `rsize` words at `address` and split them.
    ///
    /// Fails with [`BspError::TruncatedRead`] if the source ends before the
    /// last word of the record.
    pub fn read<S: ByteSource + ?Sized>(source: &S, address: &RecordAddress) -> Result<Self, BspError> {
        let words = source.read_f64s_at(address.byte_offset, address.record_size)?;
        Self::from_words(&words)
    }

    /// Split `[mid, radius, x.., y.., z..]` into a record.
    pub fn from_words(words: &[f64]) -> Result<Self, BspError> {
        let coefficients = words.len().saturating_sub(RECORD_HEADER_WORDS);
        if words.len() < RECORD_HEADER_WORDS + 3 || coefficients % 3 != 0 {
            return Err(BspError::CorruptSegment(format!(
                "a record of {} words does not hold mid, radius and three coefficient groups",
                words.len()
            )));
        }

        let (header, coeffs) = words.split_at(RECORD_HEADER_WORDS);
        let deg = coefficients / 3;
        let (x, rest) = coeffs.split_at(deg);
        let (y, z) = rest.split_at(deg);

        Ok(ChebyshevRecord {
            mid: header[0],
            radius: header[1],
            x: x.to_vec(),
            y: y.to_vec(),
            z: z.to_vec(),
        })
    }

    /// Coefficients per axis.
    pub fn coefficients_per_axis(&self) -> usize {
        self.x.len()
    }

    /// Polynomial order handed to the evaluator: one less than the coefficient count.
    pub fn order(&self) -> usize {
        self.coefficients_per_axis().saturating_sub(1)
    }

    /// Position and velocity at `epoch` with the default [`Clenshaw`] evaluator.
    pub fn interpolate(&self, epoch: f64) -> Result<Position, BspError> {
        self.interpolate_with(&Clenshaw, epoch)
    }

    /// Position and velocity at `epoch`, driving `evaluator` once per axis for
    /// the value and once per axis for the derivative.
    ///
    /// Evaluator failures surface as [`BspError::CorruptSegment`].
    pub fn interpolate_with<E: ChebyshevEvaluator + ?Sized>(
        &self,
        evaluator: &E,
        epoch: f64,
    ) -> Result<Position, BspError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(BspError::CorruptSegment(format!(
                "record radius {} is not a positive half-width",
                self.radius
            )));
        }

        let order = self.order();
        let tau = (epoch - self.mid) / self.radius;
        let factor = 1.0 / self.radius;

        let x = evaluator.value(order, tau, &self.x)?;
        let y = evaluator.value(order, tau, &self.y)?;
        let z = evaluator.value(order, tau, &self.z)?;

        let velocity_x = evaluator.derivative(order, tau, &self.x)? * factor;
        let velocity_y = evaluator.derivative(order, tau, &self.y)? * factor;
        let velocity_z = evaluator.derivative(order, tau, &self.z)? * factor;

        Ok(Position {
            x,
            y,
            z,
            velocity_x,
            velocity_y,
            velocity_z,
        })
    }
}

impl fmt::Display for ChebyshevRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mid = Epoch::from_et_seconds(self.mid);
        let radius = Duration::from_seconds(self.radius);

        writeln!(f, "Chebyshev record, order {}", self.order())?;
        writeln!(f, "  mid    : {mid}")?;
        writeln!(f, "  radius : {radius}")?;
        for (axis, coeffs) in [("x", &self.x), ("y", &self.y), ("z", &self.z)] {
            let line = coeffs
                .iter()
                .map(|c| format!("{c:>12.4e}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "  {axis} : {line}")?;
        }
        Ok(())
    }
}
