//! Iterated morphology
//!
//! Dilations and erosions of size `n` by a structuring element, and the
//! filters composed from them:
//! - Openings and closings, plain and by reconstruction
//! - Linear (one-sided segment) operators
//! - Alternate sequential filters
//! - Gradients and top hats

mod dilate;
mod filters;
mod gradient;
mod linear;
mod opening;
mod tophat;

pub use dilate::{dilate, erode, Dilate, DilateParams, Erode, ErodeParams};
pub use filters::{alternate_filter, full_alternate_filter, FilterOrder};
pub use gradient::{
    gradient, half_gradient, regularised_gradient, Gradient, GradientParams, HalfGradient,
};
pub use linear::{linear_close, linear_dilate, linear_erode, linear_open};
pub use morpho_core::raster::StructuringElement;
pub use opening::{build_close, build_open, closing, opening, Closing, Opening, OpeningParams};
pub use tophat::{
    black_top_hat, sup_black_top_hat, sup_white_top_hat, white_top_hat, TopHat, TopHatParams,
};
