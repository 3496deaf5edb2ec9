//! Typed NAIF integer codes.
//!
//! Only the bodies of the DE planetary kernels are named; any other code is
//! still usable through the raw `i32` lookups of [`crate::bsp_file::BspFile`].
use std::fmt;

use crate::bsp_errors::BspError;

/// NAIF integer codes of the bodies carried by the DE planetary kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum NaifId {
    SolarSystemBarycenter = 0,
    MercuryBarycenter = 1,
    VenusBarycenter = 2,
    EarthMoonBarycenter = 3,
    MarsBarycenter = 4,
    JupiterBarycenter = 5,
    SaturnBarycenter = 6,
    UranusBarycenter = 7,
    NeptuneBarycenter = 8,
    PlutoBarycenter = 9,
    Sun = 10,
    Mercury = 199,
    Venus = 299,
    Moon = 301,
    Earth = 399,
}

impl NaifId {
    /// Map a NAIF integer code to its body.
    ///
    /// Return
    /// ----------
    /// * The body, or [`BspError::InvalidNaifId`] for a code outside the DE set.
    pub fn from_id(id: i32) -> Result<Self, BspError> {
        use NaifId::*;
        match id {
            0 => Ok(SolarSystemBarycenter),
            1 => Ok(MercuryBarycenter),
            2 => Ok(VenusBarycenter),
            3 => Ok(EarthMoonBarycenter),
            4 => Ok(MarsBarycenter),
            5 => Ok(JupiterBarycenter),
            6 => Ok(SaturnBarycenter),
            7 => Ok(UranusBarycenter),
            8 => Ok(NeptuneBarycenter),
            9 => Ok(PlutoBarycenter),
            10 => Ok(Sun),
            199 => Ok(Mercury),
            299 => Ok(Venus),
            301 => Ok(Moon),
            399 => Ok(Earth),
            _ => Err(BspError::InvalidNaifId(id)),
        }
    }

    /// The NAIF integer code.
    pub fn to_id(self) -> i32 {
        self as i32
    }
}

impl From<NaifId> for i32 {
    fn from(id: NaifId) -> Self {
        id.to_id()
    }
}

impl TryFrom<i32> for NaifId {
    type Error = BspError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        NaifId::from_id(id)
    }
}

impl fmt::Display for NaifId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NaifId::SolarSystemBarycenter => "Solar System Barycenter",
            NaifId::MercuryBarycenter => "Mercury Barycenter",
            NaifId::VenusBarycenter => "Venus Barycenter",
            NaifId::EarthMoonBarycenter => "Earth-Moon Barycenter",
            NaifId::MarsBarycenter => "Mars Barycenter",
            NaifId::JupiterBarycenter => "Jupiter Barycenter",
            NaifId::SaturnBarycenter => "Saturn Barycenter",
            NaifId::UranusBarycenter => "Uranus Barycenter",
            NaifId::NeptuneBarycenter => "Neptune Barycenter",
            NaifId::PlutoBarycenter => "Pluto Barycenter",
            NaifId::Sun => "Sun",
            NaifId::Mercury => "Mercury",
            NaifId::Venus => "Venus",
            NaifId::Moon => "Moon",
            NaifId::Earth => "Earth",
        };
        write!(f, "{s}")
    }
}
