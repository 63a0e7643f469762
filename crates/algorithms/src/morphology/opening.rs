//! Openings and closings
//!
//! The first operator of the pair uses the caller's edge; the second runs
//! with the transposed element and the edge that cannot create values
//! (empty for the dilation, filled for the erosion).

use morpho_core::raster::{Edge, StructuringElement, Volume};
use morpho_core::{Algorithm, Error, Image, Result};

use super::dilate::{dilate, erode};
use crate::reconstruction::{build, dual_build};

/// Parameters for openings and closings
#[derive(Debug, Clone)]
pub struct OpeningParams {
    /// Size of the erosion and the dilation
    pub size: usize,
    pub element: StructuringElement,
    /// Edge of the first operator
    pub edge: Edge,
}

impl Default for OpeningParams {
    fn default() -> Self {
        Self {
            size: 1,
            element: StructuringElement::square3x3(),
            edge: Edge::Filled,
        }
    }
}

/// Morphological opening
#[derive(Debug, Clone, Default)]
pub struct Opening;

impl Algorithm for Opening {
    type Input = Image;
    type Output = Image;
    type Params = OpeningParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Opening"
    }

    fn description(&self) -> &'static str {
        "Erosion followed by the dilation with the transposed element"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let mut out = input.clone();
        opening(&input, &mut out, params.size, &params.element, params.edge)?;
        Ok(out)
    }
}

/// Morphological closing
#[derive(Debug, Clone, Default)]
pub struct Closing;

impl Algorithm for Closing {
    type Input = Image;
    type Output = Image;
    type Params = OpeningParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Closing"
    }

    fn description(&self) -> &'static str {
        "Dilation followed by the erosion with the transposed element"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let mut out = input.clone();
        closing(&input, &mut out, params.size, &params.element, params.edge)?;
        Ok(out)
    }
}

/// Opening of size `size`: anti-extensive and idempotent.
pub fn opening<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
    edge: Edge,
) -> Result<()> {
    erode(input, out, size, se, edge)?;
    let eroded = out.clone();
    dilate(&eroded, out, size, &se.transpose(), Edge::Empty)
}

/// Closing of size `size`: extensive and idempotent.
pub fn closing<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
    edge: Edge,
) -> Result<()> {
    dilate(input, out, size, se, Edge::Empty)?;
    let dilated = out.clone();
    erode(&dilated, out, size, &se.transpose(), edge)
}

/// Opening by reconstruction: erosion of size `size` rebuilt under the
/// input, so every component that survives the erosion is kept whole.
pub fn build_open<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
) -> Result<()> {
    erode(input, out, size, se, Edge::Filled)?;
    build(input, out, se.grid())
}

/// Closing by reconstruction.
pub fn build_close<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
) -> Result<()> {
    dilate(input, out, size, se, Edge::Empty)?;
    dual_build(input, out, se.grid())
}
