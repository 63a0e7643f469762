//! Distance functions
//!
//! - [`compute_distance`]: grid (chamfer 1) distance to the background
//! - [`isotropic_distance`]: dodecagonal approximation of the Euclidean
//!   distance on the hexagonal grid
//! - [`geodesic_distance`]: path length inside a mask from a seed set

mod geodesic;
mod isotropic;

pub use geodesic::{compute_distance, geodesic_distance};
pub use isotropic::isotropic_distance;

use morpho_core::raster::{check_depth, check_same_size, Depth, Volume};
use morpho_core::Result;

/// A 1-bit input and a 32-bit output of the same size.
pub(crate) fn check_binary_to_long<A: Volume, B: Volume>(input: &A, out: &B) -> Result<()> {
    check_depth(input, Depth::Binary)?;
    check_depth(out, Depth::Long)?;
    check_same_size(input, out)
}
