//! # Morpho Core
//!
//! Core types, traits and I/O for the morpho mathematical morphology library.
//!
//! This crate provides:
//! - `Image` / `Image3D`: packed 1, 8 and 32-bit rasters behind the `Volume` trait
//! - `Grid`: square, hexagonal, cubic, face-centred cubic and centred cubic topologies
//! - `StructuringElement`: direction sets over a grid
//! - `Context`: default grid, edge mode and image naming
//! - Raw byte layout and a native container format
//! - Algorithm trait for a consistent API

pub mod context;
pub mod error;
pub mod io;
pub mod raster;

pub use context::Context;
pub use error::{Error, ErrorKind, Result};
pub use raster::{Depth, DirSet, Edge, Grid, Image, Image3D, StructuringElement, Volume};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::context::Context;
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::raster::{
        Depth, DirSet, Edge, Grid, Image, Image3D, LogicOp, StructuringElement, Volume,
    };
    pub use crate::Algorithm;
}

/// Core trait for the heavier operators.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
