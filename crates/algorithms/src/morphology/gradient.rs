//! Morphological gradients

use morpho_core::raster::{Edge, StructuringElement, Volume};
use morpho_core::{Algorithm, Error, Image, Result};

use super::dilate::{dilate, erode};
use super::tophat::white_top_hat;
use crate::point::sub;

/// Side of a half gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HalfGradient {
    /// `input - erode(input)`
    #[default]
    Intern,
    /// `dilate(input) - input`
    Extern,
}

/// Parameters for the morphological gradient
#[derive(Debug, Clone)]
pub struct GradientParams {
    pub size: usize,
    pub element: StructuringElement,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            size: 1,
            element: StructuringElement::square3x3(),
        }
    }
}

/// Morphological gradient
#[derive(Debug, Clone, Default)]
pub struct Gradient;

impl Algorithm for Gradient {
    type Input = Image;
    type Output = Image;
    type Params = GradientParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Gradient"
    }

    fn description(&self) -> &'static str {
        "Difference between the dilation and the erosion"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let mut out = input.clone();
        gradient(&input, &mut out, params.size, &params.element)?;
        Ok(out)
    }
}

/// `dilate(input) - erode(input)`, both of size `size`.
pub fn gradient<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
) -> Result<()> {
    let mut dilated = input.clone();
    dilate(input, &mut dilated, size, se, Edge::Empty)?;
    let mut eroded = input.clone();
    erode(input, &mut eroded, size, se, Edge::Filled)?;
    sub(&dilated, &eroded, out)
}

/// Internal or external half gradient.
pub fn half_gradient<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
    side: HalfGradient,
) -> Result<()> {
    let mut work = input.clone();
    match side {
        HalfGradient::Intern => {
            erode(input, &mut work, size, se, Edge::Filled)?;
            sub(input, &work, out)
        }
        HalfGradient::Extern => {
            dilate(input, &mut work, size, se, Edge::Empty)?;
            sub(&work, input, out)
        }
    }
}

/// Gradient of size `size` cleared of its thick plateaus by a white top
/// hat of the same size, then thinned by an erosion of size `size - 1`.
pub fn regularised_gradient<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
) -> Result<()> {
    if size == 0 {
        return Err(Error::InvalidParameter {
            name: "size",
            value: size.to_string(),
            reason: "regularised gradient needs a size of at least 1".into(),
        });
    }
    let mut grad = input.clone();
    gradient(input, &mut grad, size, se)?;
    let mut hat = input.clone();
    white_top_hat(&grad, &mut hat, size, se)?;
    erode(&hat, out, size - 1, se, Edge::Filled)
}
