//! # Morpho Algorithms
//!
//! Mathematical morphology operators over the rasters of `morpho-core`.
//!
//! ## Operator families
//!
//! - **point**: pixelwise arithmetic, logic, conversions and measures
//! - **neighbor**: shifts and one-step neighborhood sup/inf
//! - **morphology**: erosion, dilation, openings, filters, gradients, top-hats
//! - **reconstruction**: build and dual build, extrema, hole filling
//! - **distance**: grid and isotropic distance functions
//! - **labelling**: connected components and per-component measures
//! - **segmentation**: watershed flooding and basin hierarchies
//! - **hitormiss**: hit-or-miss transform, thinning, thickening, SKIZ
//!
//! Operators take their grid and edge mode explicitly; a
//! [`Context`](morpho_core::Context) carries the defaults.

mod flood;
mod maybe_rayon;

pub mod distance;
pub mod hitormiss;
pub mod labelling;
pub mod morphology;
pub mod neighbor;
pub mod point;
pub mod reconstruction;
pub mod segmentation;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::distance::{compute_distance, geodesic_distance, isotropic_distance};
    pub use crate::hitormiss::{
        fast_skiz, hit_or_miss, thick_d, thin_d, DoubleStructuringElement,
    };
    pub use crate::labelling::label;
    pub use crate::morphology::{
        closing, dilate, erode, gradient, opening, white_top_hat, Closing, Dilate, Erode,
        Gradient, Opening, TopHat,
    };
    pub use crate::reconstruction::{build, dual_build, Build};
    pub use crate::segmentation::{
        enhanced_waterfalls, marker_controlled_watershed, watershed_segment, Watershed,
    };
    pub use morpho_core::prelude::*;
}
