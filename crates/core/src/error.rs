//! Error types for morpho

use thiserror::Error;

/// Flat classification of every failure an operator can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadSize,
    BadDepth,
    OutOfRange,
    DivByZero,
    InvalidGrid,
    InvalidDirection,
    InvalidParameter,
    AllocationFailure,
    Overflow,
    /// File layer only, never produced by an operator.
    Io,
}

/// Main error type for morpho operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image dimensions: {width}x{height}x{length}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        length: usize,
    },

    #[error("Image size mismatch: expected {expected:?}, got {actual:?}")]
    SizeMismatch {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    #[error("Depth mismatch: expected {expected}-bit, got {actual}-bit")]
    DepthMismatch { expected: u32, actual: u32 },

    #[error("{operation} does not accept depths {depths}")]
    UnsupportedDepth {
        operation: &'static str,
        depths: String,
    },

    #[error("Pixel ({x}, {y}, {z}) outside image of size {width}x{height}x{length}")]
    IndexOutOfBounds {
        x: usize,
        y: usize,
        z: usize,
        width: usize,
        height: usize,
        length: usize,
    },

    #[error("{name} = {value} is out of range (maximum {max})")]
    ValueOutOfRange {
        name: &'static str,
        value: u64,
        max: u64,
    },

    #[error("Division by zero")]
    DivByZero,

    #[error("Grid {grid} not usable here: {reason}")]
    InvalidGrid { grid: &'static str, reason: String },

    #[error("Direction {direction} is not defined on grid {grid}")]
    InvalidDirection { direction: usize, grid: &'static str },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Cannot allocate {bytes} bytes")]
    AllocationFailure { bytes: usize },

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Malformed image data: {0}")]
    Format(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDimensions { .. } | Error::SizeMismatch { .. } => ErrorKind::BadSize,
            Error::DepthMismatch { .. } | Error::UnsupportedDepth { .. } => ErrorKind::BadDepth,
            Error::IndexOutOfBounds { .. } | Error::ValueOutOfRange { .. } => ErrorKind::OutOfRange,
            Error::DivByZero => ErrorKind::DivByZero,
            Error::InvalidGrid { .. } => ErrorKind::InvalidGrid,
            Error::InvalidDirection { .. } => ErrorKind::InvalidDirection,
            Error::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Error::AllocationFailure { .. } => ErrorKind::AllocationFailure,
            Error::Overflow(_) => ErrorKind::Overflow,
            Error::Io(_) | Error::Format(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias for morpho operations
pub type Result<T> = std::result::Result<T, Error>;

/// Allocate a zeroed buffer, reporting exhaustion instead of aborting.
pub(crate) fn try_zeroed<T: Copy + Default>(len: usize) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| Error::AllocationFailure {
        bytes: len.saturating_mul(std::mem::size_of::<T>()),
    })?;
    buf.resize(len, T::default());
    Ok(buf)
}
