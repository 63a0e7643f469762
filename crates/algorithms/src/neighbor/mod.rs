//! Neighbor kernels
//!
//! Every neighborhood operator reduces to "pull" row copies: destination
//! row `(y, z)` in direction `d` reads the source row reached by walking
//! the transposed direction from `(y, z)`, shifted along x by that walk.
//! Source rows outside the frame read as the edge value.

mod shift;
mod sup_inf;

pub use shift::{shift, shift_in_place, shift_vector};
pub use sup_inf::{
    inf_far_neighbor, inf_neighbor, inf_neighbor_in_place, sup_far_neighbor, sup_neighbor,
    sup_neighbor_in_place,
};

pub(crate) use shift::pull_row;

use morpho_core::raster::{check_depth, check_same_size, DirSet, Grid, Volume};
use morpho_core::{Error, Result};

/// Validate the grid against the image and the direction set against the
/// grid.
pub(crate) fn check_grid<V: Volume>(grid: Grid, dirs: DirSet) -> Result<()> {
    grid.check_dims(V::DIMS)?;
    let (_, _, z_ext) = grid.extension();
    if z_ext > 1 {
        return Err(Error::InvalidGrid {
            grid: grid.name(),
            reason: format!("z extension {} exceeds 1", z_ext),
        });
    }
    if let Some(d) = dirs.iter().find(|&d| d > grid.neighbor_count()) {
        return Err(Error::InvalidDirection {
            direction: d,
            grid: grid.name(),
        });
    }
    Ok(())
}

/// Same size and depth.
pub(crate) fn check_alike<A: Volume, B: Volume>(a: &A, b: &B) -> Result<()> {
    check_same_size(a, b)?;
    check_depth(b, a.depth())
}
