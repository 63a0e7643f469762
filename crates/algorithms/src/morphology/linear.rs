//! Linear structuring elements
//!
//! The linear element of size `n` in direction `d` is `{0, d, 2d, ..., nd}`,
//! each multiple resolved with the row or plane parity along the way.

use morpho_core::raster::{DirSet, Edge, Grid, Volume};
use morpho_core::Result;

use super::dilate::sweep;
use crate::neighbor::{check_alike, check_grid};

fn linear<V: Volume>(
    input: &V,
    out: &mut V,
    d: usize,
    size: usize,
    grid: Grid,
    edge: Edge,
    sup: bool,
) -> Result<()> {
    grid.check(d)?;
    check_grid::<V>(grid, DirSet::single(d))?;
    check_alike(input, out)?;
    out.clone_from(input);
    sweep(out, d, size, grid, edge, sup)
}

/// Dilation by the linear element of size `size` in direction `d`.
pub fn linear_dilate<V: Volume>(
    input: &V,
    out: &mut V,
    d: usize,
    size: usize,
    grid: Grid,
    edge: Edge,
) -> Result<()> {
    linear(input, out, d, size, grid, edge, true)
}

/// Erosion by the linear element of size `size` in direction `d`.
pub fn linear_erode<V: Volume>(
    input: &V,
    out: &mut V,
    d: usize,
    size: usize,
    grid: Grid,
    edge: Edge,
) -> Result<()> {
    linear(input, out, d, size, grid, edge, false)
}

/// Linear erosion in direction `d` (with `edge`) followed by the linear
/// dilation in the opposite direction.
pub fn linear_open<V: Volume>(
    input: &V,
    out: &mut V,
    d: usize,
    size: usize,
    grid: Grid,
    edge: Edge,
) -> Result<()> {
    let back = grid.transpose(d)?;
    linear_erode(input, out, d, size, grid, edge)?;
    let eroded = out.clone();
    linear_dilate(&eroded, out, back, size, grid, Edge::Empty)
}

/// Linear dilation in direction `d` followed by the linear erosion in the
/// opposite direction (with `edge`).
pub fn linear_close<V: Volume>(
    input: &V,
    out: &mut V,
    d: usize,
    size: usize,
    grid: Grid,
    edge: Edge,
) -> Result<()> {
    let back = grid.transpose(d)?;
    linear_dilate(input, out, d, size, grid, Edge::Empty)?;
    let dilated = out.clone();
    linear_erode(&dilated, out, back, size, grid, edge)
}
