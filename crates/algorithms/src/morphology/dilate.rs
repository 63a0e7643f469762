//! Iterated dilation and erosion
//!
//! `dilate(in, out, n, se)` applies the unit dilation `n` times, the
//! pixel itself always taking part. Homogeneous elements on the square,
//! cubic and (with an absorbing edge) hexagonal grids take a large path:
//! the element's `n`-fold sum is split into one-sided segments, each
//! swept by doubling shifts in `O(log n)` passes.

use morpho_core::raster::{DirSet, Edge, Grid, StructuringElement, Volume};
use morpho_core::{Algorithm, Error, Image, Result};

use crate::neighbor::{check_alike, inf_far_neighbor, inf_neighbor, sup_far_neighbor, sup_neighbor};

/// Parameters for iterated dilation
#[derive(Debug, Clone)]
pub struct DilateParams {
    /// Number of unit dilations
    pub size: usize,
    /// Structuring element
    pub element: StructuringElement,
    /// Value of pixels outside the frame
    pub edge: Edge,
}

impl Default for DilateParams {
    fn default() -> Self {
        Self {
            size: 1,
            element: StructuringElement::square3x3(),
            edge: Edge::Empty,
        }
    }
}

/// Parameters for iterated erosion
#[derive(Debug, Clone)]
pub struct ErodeParams {
    /// Number of unit erosions
    pub size: usize,
    /// Structuring element
    pub element: StructuringElement,
    /// Value of pixels outside the frame
    pub edge: Edge,
}

impl Default for ErodeParams {
    fn default() -> Self {
        Self {
            size: 1,
            element: StructuringElement::square3x3(),
            edge: Edge::Filled,
        }
    }
}

/// Dilation algorithm
#[derive(Debug, Clone, Default)]
pub struct Dilate;

impl Algorithm for Dilate {
    type Input = Image;
    type Output = Image;
    type Params = DilateParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Dilate"
    }

    fn description(&self) -> &'static str {
        "Iterated morphological dilation by a structuring element"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let mut out = input.clone();
        dilate(&input, &mut out, params.size, &params.element, params.edge)?;
        Ok(out)
    }
}

/// Erosion algorithm
#[derive(Debug, Clone, Default)]
pub struct Erode;

impl Algorithm for Erode {
    type Input = Image;
    type Output = Image;
    type Params = ErodeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Erode"
    }

    fn description(&self) -> &'static str {
        "Iterated morphological erosion by a structuring element"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let mut out = input.clone();
        erode(&input, &mut out, params.size, &params.element, params.edge)?;
        Ok(out)
    }
}

/// One-sided segments whose sum is the full neighborhood of `grid`.
fn segments(grid: Grid) -> Option<&'static [usize]> {
    match grid {
        Grid::Square => Some(&[1, 3, 5, 7]),
        Grid::Hexagonal => Some(&[2, 4, 6]),
        Grid::Cubic => Some(&[1, 3, 5, 7, 9, 18]),
        Grid::FaceCenteredCubic | Grid::CenteredCubic => None,
    }
}

/// `inout = max (or min) over j in 0..=n of shift(inout, d, j)`, by doubling.
pub(crate) fn sweep<V: Volume>(
    inout: &mut V,
    d: usize,
    n: usize,
    grid: Grid,
    edge: Edge,
    sup: bool,
) -> Result<()> {
    let dirs = DirSet::single(d);
    let mut covered = 0;
    while covered < n {
        let step = (covered + 1).min(n - covered);
        let snapshot = inout.clone();
        if sup {
            sup_far_neighbor(&snapshot, inout, dirs, step, grid, edge)?;
        } else {
            inf_far_neighbor(&snapshot, inout, dirs, step, grid, edge)?;
        }
        covered += step;
    }
    Ok(())
}

fn iterate<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
    edge: Edge,
    sup: bool,
) -> Result<()> {
    se.validate(V::DIMS)?;
    check_alike(input, out)?;
    out.clone_from(input);
    if size == 0 {
        return Ok(());
    }
    let grid = se.grid();
    // outside pixels win every comparison: the decomposition stays exact
    let absorbing = (edge == Edge::Filled) == sup;
    let large = segments(grid)
        .filter(|_| se.is_homogeneous() && size > 1)
        .filter(|_| grid != Grid::Hexagonal || absorbing);
    if let Some(parts) = large {
        for &d in parts {
            sweep(out, d, size, grid, edge, sup)?;
        }
        return Ok(());
    }
    for _ in 0..size {
        let snapshot = out.clone();
        if sup {
            sup_neighbor(&snapshot, out, se.directions(), grid, edge)?;
        } else {
            inf_neighbor(&snapshot, out, se.directions(), grid, edge)?;
        }
    }
    Ok(())
}

/// `size` successive unit dilations of `input` by `se`; size 0 copies.
pub fn dilate<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
    edge: Edge,
) -> Result<()> {
    iterate(input, out, size, se, edge, true)
}

/// `size` successive unit erosions of `input` by `se`; size 0 copies.
pub fn erode<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
    edge: Edge,
) -> Result<()> {
    iterate(input, out, size, se, edge, false)
}
