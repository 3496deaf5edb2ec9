//! # bsp_ephem
//!
//! Planetary state lookup from JPL SPK/BSP binary kernels (DAF container,
//! segment type 2). Given an epoch in ET seconds from J2000 and a pair of NAIF
//! body codes, [`bsp_file::get_coordinates`] returns the position and velocity
//! of the target relative to the center.
//!
//! ```rust, no_run
//! use bsp_ephem::{bsp_file::BspFile, config::KernelConfig};
//!
//! let kernel = BspFile::open(&KernelConfig::default())?;
//! // Earth-Moon barycenter wrt the solar-system barycenter
//! let state = kernel.get_coordinates(0, 3, 0)?;
//! println!("{:?}", state.to_au());
//! # Ok::<(), bsp_ephem::bsp_errors::BspError>(())
//! ```
pub mod bsp_errors;
pub mod bsp_file;
pub mod chebyshev;
pub mod config;
pub mod constants;
pub mod naif;
pub mod position;

pub use bsp_errors::BspError;
pub use bsp_file::{get_coordinates, BspFile};
pub use position::Position;
