//! Hit-or-miss family
//!
//! Operators driven by a [`DoubleStructuringElement`]: the hit-or-miss
//! transform itself, thinning and thickening with their rotating and
//! idempotent forms, plus the particle tools built on the same kernels.

mod element;
mod particles;
mod transform;

pub use element::DoubleStructuringElement;
pub use particles::{fast_skiz, multiple_points, remove_edge_particles};
pub use transform::{
    full_thick, full_thin, hit_or_miss, rotating_thick, rotating_thin, thick, thick_d, thin,
    thin_d,
};
