//! Labelling
//!
//! Connected components of 1-bit images, flat zones of grey images, and
//! per-component measures (area, volume, inscribed radius, Feret extent).

mod components;
mod criteria;
mod union_find;

pub use components::{label, label_with_range, partition_label};
pub use criteria::{
    area_labelling, diameter_labelling, feret_diameter_labelling, volume_labelling, Axis,
};

pub(crate) use components::components;
pub(crate) use union_find::DisjointSetForest;
