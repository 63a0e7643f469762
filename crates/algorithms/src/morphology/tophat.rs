//! Top hats
//!
//! The white top hat keeps what an opening removes (thin bright
//! structures), the black top hat what a closing fills (thin dark ones).
//! The `sup_*` forms use linear openings in every direction of the grid
//! and keep the strongest response.

use morpho_core::raster::{Edge, Grid, LogicOp, StructuringElement, Volume};
use morpho_core::{Algorithm, Error, Image, Result};

use super::linear::{linear_close, linear_open};
use super::opening::{closing, opening};
use crate::neighbor::check_alike;
use crate::point::{logic_in_place, sub};

/// Parameters for top hats
#[derive(Debug, Clone)]
pub struct TopHatParams {
    pub size: usize,
    pub element: StructuringElement,
    /// Black top hat (closing residue) instead of white
    pub black: bool,
}

impl Default for TopHatParams {
    fn default() -> Self {
        Self {
            size: 1,
            element: StructuringElement::square3x3(),
            black: false,
        }
    }
}

/// White or black top hat
#[derive(Debug, Clone, Default)]
pub struct TopHat;

impl Algorithm for TopHat {
    type Input = Image;
    type Output = Image;
    type Params = TopHatParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "TopHat"
    }

    fn description(&self) -> &'static str {
        "Residue of an opening (white) or a closing (black)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let mut out = input.clone();
        if params.black {
            black_top_hat(&input, &mut out, params.size, &params.element)?;
        } else {
            white_top_hat(&input, &mut out, params.size, &params.element)?;
        }
        Ok(out)
    }
}

/// `input - opening(input)`
pub fn white_top_hat<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
) -> Result<()> {
    let mut open = input.clone();
    opening(input, &mut open, size, se, Edge::Filled)?;
    sub(input, &open, out)
}

/// `closing(input) - input`
pub fn black_top_hat<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
) -> Result<()> {
    let mut closed = input.clone();
    closing(input, &mut closed, size, se, Edge::Filled)?;
    sub(&closed, input, out)
}

/// One direction of each opposite pair.
fn line_directions(grid: Grid) -> Result<Vec<usize>> {
    let mut dirs = Vec::new();
    for d in grid.neighbors() {
        if d < grid.transpose(d)? {
            dirs.push(d);
        }
    }
    Ok(dirs)
}

fn sup_residue<V: Volume>(input: &V, out: &mut V, size: usize, grid: Grid, white: bool) -> Result<()> {
    check_alike(input, out)?;
    out.reset();
    let mut filtered = input.clone();
    let mut residue = input.clone();
    for d in line_directions(grid)? {
        if white {
            linear_open(input, &mut filtered, d, size, grid, Edge::Filled)?;
            sub(input, &filtered, &mut residue)?;
        } else {
            linear_close(input, &mut filtered, d, size, grid, Edge::Filled)?;
            sub(&filtered, input, &mut residue)?;
        }
        logic_in_place(out, &residue, LogicOp::Sup)?;
    }
    Ok(())
}

/// Supremum over the line directions of `input - linear_open(input)`.
pub fn sup_white_top_hat<V: Volume>(input: &V, out: &mut V, size: usize, grid: Grid) -> Result<()> {
    sup_residue(input, out, size, grid, true)
}

/// Supremum over the line directions of `linear_close(input) - input`.
pub fn sup_black_top_hat<V: Volume>(input: &V, out: &mut V, size: usize, grid: Grid) -> Result<()> {
    sup_residue(input, out, size, grid, false)
}
