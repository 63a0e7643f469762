//! One-step neighborhood sup and inf
//!
//! `sup_neighbor(in, inout, dirs)` sets `inout = max(inout, shift(in, d))`
//! for every direction `d` of `dirs`; direction 0 contributes `in` itself.
//! These are the unit dilation and erosion of every morphological filter.

use morpho_core::raster::{DirSet, Edge, Grid, Layer, PlanesMut, PlanesRef, Volume};
use morpho_core::Result;

use super::{check_alike, check_grid, pull_row};

fn combine_planes<L: Layer>(
    src: &[L],
    dst: &mut [L],
    grid: Grid,
    dirs: &[(usize, usize)],
    amplitude: usize,
    fill: u32,
    sup: bool,
) {
    let mut scratch = vec![L::Unit::default(); src[0].row_len()];
    for (z, plane) in dst.iter_mut().enumerate() {
        for y in 0..plane.height() {
            for &(_, back) in dirs {
                let o = grid.walk(back, amplitude, y as isize, z as isize);
                pull_row(src, o, y, z, fill, &mut scratch);
                if sup {
                    L::sup_row(plane.row_mut(y), &scratch);
                } else {
                    L::inf_row(plane.row_mut(y), &scratch);
                }
            }
        }
    }
}

fn combine<V: Volume>(
    input: &V,
    inout: &mut V,
    dirs: DirSet,
    amplitude: usize,
    grid: Grid,
    edge: Edge,
    sup: bool,
) -> Result<()> {
    check_grid::<V>(grid, dirs)?;
    check_alike(input, inout)?;
    let pairs = dirs
        .iter()
        .map(|d| grid.transpose(d).map(|t| (d, t)))
        .collect::<Result<Vec<_>>>()?;
    let fill = edge.fill_value(input.depth());
    match (input.planes(), inout.planes_mut()) {
        (PlanesRef::Binary(s), PlanesMut::Binary(d)) => {
            combine_planes(s, d, grid, &pairs, amplitude, fill, sup)
        }
        (PlanesRef::Grey(s), PlanesMut::Grey(d)) => {
            combine_planes(s, d, grid, &pairs, amplitude, fill, sup)
        }
        (PlanesRef::Long(s), PlanesMut::Long(d)) => {
            combine_planes(s, d, grid, &pairs, amplitude, fill, sup)
        }
        _ => {}
    }
    Ok(())
}

/// `inout = max(inout, shift(input, d))` over the directions of `dirs`.
pub fn sup_neighbor<V: Volume>(
    input: &V,
    inout: &mut V,
    dirs: DirSet,
    grid: Grid,
    edge: Edge,
) -> Result<()> {
    combine(input, inout, dirs, 1, grid, edge, true)
}

/// `inout = min(inout, shift(input, d))` over the directions of `dirs`.
pub fn inf_neighbor<V: Volume>(
    input: &V,
    inout: &mut V,
    dirs: DirSet,
    grid: Grid,
    edge: Edge,
) -> Result<()> {
    combine(input, inout, dirs, 1, grid, edge, false)
}

/// [`sup_neighbor`] with the image as its own source.
pub fn sup_neighbor_in_place<V: Volume>(
    inout: &mut V,
    dirs: DirSet,
    grid: Grid,
    edge: Edge,
) -> Result<()> {
    let snapshot = inout.clone();
    sup_neighbor(&snapshot, inout, dirs, grid, edge)
}

/// [`inf_neighbor`] with the image as its own source.
pub fn inf_neighbor_in_place<V: Volume>(
    inout: &mut V,
    dirs: DirSet,
    grid: Grid,
    edge: Edge,
) -> Result<()> {
    let snapshot = inout.clone();
    inf_neighbor(&snapshot, inout, dirs, grid, edge)
}

/// [`sup_neighbor`] with shifts of `amplitude` steps.
pub fn sup_far_neighbor<V: Volume>(
    input: &V,
    inout: &mut V,
    dirs: DirSet,
    amplitude: usize,
    grid: Grid,
    edge: Edge,
) -> Result<()> {
    combine(input, inout, dirs, amplitude, grid, edge, true)
}

/// [`inf_neighbor`] with shifts of `amplitude` steps.
pub fn inf_far_neighbor<V: Volume>(
    input: &V,
    inout: &mut V,
    dirs: DirSet,
    amplitude: usize,
    grid: Grid,
    edge: Edge,
) -> Result<()> {
    combine(input, inout, dirs, amplitude, grid, edge, false)
}
