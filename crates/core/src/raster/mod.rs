//! Raster memory model and sampling grids

mod bits;
mod element;
mod grid;
mod image;
mod layer;
mod neighborhood;
mod structuring;

pub use bits::{tail_mask, BitRaster, WORD_BITS};
pub use element::{Depth, Pixel};
pub use grid::Raster;
pub use image::{check_depth, check_same_size, Image, Image3D, PlanesMut, PlanesRef, Volume};
pub use layer::{Layer, LogicOp};
pub use neighborhood::{DirSet, Edge, Grid, GridDescriptor, Offset};
pub use structuring::StructuringElement;
