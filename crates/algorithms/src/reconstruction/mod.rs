//! Geodesic reconstruction
//!
//! - [`build`] / [`dual_build`]: directional propagation passes repeated
//!   until stable
//! - [`hierar_build`] / [`hierar_dual_build`]: single priority flood
//! - [`minima`], [`maxima`], [`fill_holes`]: built on reconstruction

mod build;
mod extrema;
mod hierarchical;

pub use build::{build, build_neighbor, dual_build, dual_build_neighbor, Build, BuildParams};
pub use extrema::{fill_holes, maxima, minima};
pub use hierarchical::{hierar_build, hierar_dual_build};

pub(crate) use hierarchical::reconstruct_values;
