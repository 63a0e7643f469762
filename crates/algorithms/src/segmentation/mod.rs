//! Watershed segmentation
//!
//! Marker flooding ([`watershed_segment`], [`basin_segment`]), its
//! marker-controlled and valued forms, and the hierarchies built on the
//! adjacency graph of the basins of all regional minima.

mod hierarchy;
mod watershed;

pub use hierarchy::{enhanced_waterfalls, extended_segment, p_algorithm, standard_segment};
pub use watershed::{
    basin_segment, marker_controlled_watershed, valued_watershed, watershed_segment, Watershed,
    WatershedParams, WATERSHED_LINE,
};

pub(crate) use watershed::flood;
