//! Iterative geodesic reconstruction
//!
//! `build` reconstructs by dilation: the marker grows inside the mask until
//! stable. Each pass propagates along one direction at a time, visiting
//! rows in the order of that direction so a value can travel across the
//! whole image in a single pass. Passes over all directions repeat until
//! none of them changes a pixel.

use morpho_core::raster::{DirSet, Grid, Layer, PlanesMut, PlanesRef, Volume};
use morpho_core::{Algorithm, Error, Image, Result};
use tracing::debug;

use crate::neighbor::{check_alike, check_grid};

/// Parameters for geodesic reconstruction
#[derive(Debug, Clone)]
pub struct BuildParams {
    /// Grid of the propagation
    pub grid: Grid,
    /// Reconstruct by erosion instead of dilation
    pub dual: bool,
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            grid: Grid::Square,
            dual: false,
        }
    }
}

/// Geodesic reconstruction of a marker under a mask
#[derive(Debug, Clone, Default)]
pub struct Build;

impl Algorithm for Build {
    /// (mask, marker)
    type Input = (Image, Image);
    type Output = Image;
    type Params = BuildParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Build"
    }

    fn description(&self) -> &'static str {
        "Geodesic reconstruction by dilation (or erosion) of a marker under a mask"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (mask, mut marker) = input;
        if params.dual {
            dual_build(&mask, &mut marker, params.grid)?;
        } else {
            build(&mask, &mut marker, params.grid)?;
        }
        Ok(marker)
    }
}

/// One propagation pass along `d` over a stack of planes.
fn propagate_planes<L: Layer>(
    mask: &[L],
    inout: &mut [L],
    grid: Grid,
    d: usize,
    back: usize,
    dual: bool,
) -> bool {
    let width = mask[0].width();
    let height = mask[0].height();
    let length = mask.len();
    let neutral = if dual { L::DEPTH.max_value() } else { 0 };
    let dir = grid.step(d, 0, 0);
    let mut changed = false;

    if dir.dy == 0 && dir.dz == 0 {
        if dir.dx == 0 {
            return false;
        }
        for (plane, m) in inout.iter_mut().zip(mask) {
            for y in 0..height {
                changed |= L::propagate_row(plane.row_mut(y), m.row(y), dir.dx > 0, dual, width);
            }
        }
        return changed;
    }

    let zs: Vec<usize> = if dir.dz < 0 {
        (0..length).rev().collect()
    } else {
        (0..length).collect()
    };
    let ys: Vec<usize> = if dir.dy < 0 {
        (0..height).rev().collect()
    } else {
        (0..height).collect()
    };
    let mut scratch = vec![L::Unit::default(); mask[0].row_len()];
    let mut before = scratch.clone();
    for &z in &zs {
        for &y in &ys {
            let o = grid.step(back, y as isize, z as isize);
            let sy = y as isize + o.dy;
            let sz = z as isize + o.dz;
            // outside the frame nothing propagates
            if sy < 0 || sz < 0 || sy as usize >= height || sz as usize >= length {
                continue;
            }
            L::shift_row(
                inout[sz as usize].row(sy as usize),
                &mut scratch,
                -o.dx,
                neutral,
                width,
            );
            let row = inout[z].row_mut(y);
            before.copy_from_slice(row);
            if dual {
                L::inf_row(row, &scratch);
                L::sup_row(row, mask[z].row(y));
            } else {
                L::sup_row(row, &scratch);
                L::inf_row(row, mask[z].row(y));
            }
            if row[..] != before[..] {
                changed = true;
            }
        }
    }
    changed
}

fn clamp_planes<L: Layer>(mask: &[L], inout: &mut [L], dual: bool) {
    for (plane, m) in inout.iter_mut().zip(mask) {
        for y in 0..m.height() {
            if dual {
                L::sup_row(plane.row_mut(y), m.row(y));
            } else {
                L::inf_row(plane.row_mut(y), m.row(y));
            }
        }
    }
}

fn neighbor_pass<V: Volume>(mask: &V, inout: &mut V, d: usize, grid: Grid, dual: bool) -> Result<bool> {
    let back = grid.transpose(d)?;
    let changed = match (mask.planes(), inout.planes_mut()) {
        (PlanesRef::Binary(m), PlanesMut::Binary(p)) => propagate_planes(m, p, grid, d, back, dual),
        (PlanesRef::Grey(m), PlanesMut::Grey(p)) => propagate_planes(m, p, grid, d, back, dual),
        (PlanesRef::Long(m), PlanesMut::Long(p)) => propagate_planes(m, p, grid, d, back, dual),
        _ => false,
    };
    Ok(changed)
}

fn check<V: Volume>(mask: &V, inout: &V, grid: Grid) -> Result<()> {
    check_grid::<V>(grid, grid.full_set())?;
    check_alike(mask, inout)
}

fn reconstruct<V: Volume>(mask: &V, inout: &mut V, grid: Grid, dual: bool) -> Result<()> {
    check(mask, inout, grid)?;
    match (mask.planes(), inout.planes_mut()) {
        (PlanesRef::Binary(m), PlanesMut::Binary(p)) => clamp_planes(m, p, dual),
        (PlanesRef::Grey(m), PlanesMut::Grey(p)) => clamp_planes(m, p, dual),
        (PlanesRef::Long(m), PlanesMut::Long(p)) => clamp_planes(m, p, dual),
        _ => {}
    }
    let mut passes = 0usize;
    loop {
        passes += 1;
        let mut changed = false;
        for d in grid.neighbors() {
            changed |= neighbor_pass(mask, inout, d, grid, dual)?;
        }
        if !changed {
            break;
        }
    }
    debug!("{} reconstruction stable after {} passes", grid, passes);
    Ok(())
}

/// Reconstruction by dilation of the marker `inout` under `mask`.
///
/// The marker is first capped by the mask, then grown until
/// `inout = min(dilate(inout), mask)`. On 1-bit images this keeps the
/// connected components of the mask that hold a marker pixel.
pub fn build<V: Volume>(mask: &V, inout: &mut V, grid: Grid) -> Result<()> {
    reconstruct(mask, inout, grid, false)
}

/// Reconstruction by erosion of `inout` over `mask`.
pub fn dual_build<V: Volume>(mask: &V, inout: &mut V, grid: Grid) -> Result<()> {
    reconstruct(mask, inout, grid, true)
}

/// One propagation pass of the reconstruction along direction `d`.
/// Returns whether a pixel changed.
pub fn build_neighbor<V: Volume>(mask: &V, inout: &mut V, d: usize, grid: Grid) -> Result<bool> {
    grid.check(d)?;
    check_grid::<V>(grid, DirSet::single(d))?;
    check_alike(mask, inout)?;
    neighbor_pass(mask, inout, d, grid, false)
}

/// One propagation pass of the dual reconstruction along direction `d`.
pub fn dual_build_neighbor<V: Volume>(
    mask: &V,
    inout: &mut V,
    d: usize,
    grid: Grid,
) -> Result<bool> {
    grid.check(d)?;
    check_grid::<V>(grid, DirSet::single(d))?;
    check_alike(mask, inout)?;
    neighbor_pass(mask, inout, d, grid, true)
}
