//! Word-aligned 8-bit and 32-bit raster planes

use crate::error::{try_zeroed, Error, Result};
use crate::raster::Pixel;
use ndarray::{ArrayView2, ArrayViewMut2, ShapeBuilder};

/// A 2D plane of 8-bit or 32-bit pixels.
///
/// Rows are stored top to bottom, each padded so the next row starts on a
/// 64-bit boundary. Padding elements are never exposed through the row
/// accessors and stay zero.
///
/// # Example
///
/// ```ignore
/// use morpho_core::raster::Raster;
///
/// let mut plane: Raster<u8> = Raster::new(100, 50)?;
/// plane.set(10, 20, 42)?;
/// assert_eq!(plane.get(10, 20)?, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster<T: Pixel> {
    width: usize,
    height: usize,
    /// Row stride in elements
    stride: usize,
    data: Vec<T>,
}

impl<T: Pixel> Raster<T> {
    /// Create a zero-filled plane.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions {
                width,
                height,
                length: 1,
            });
        }
        let stride = width.div_ceil(T::PER_WORD) * T::PER_WORD;
        let len = stride.checked_mul(height).ok_or(Error::AllocationFailure {
            bytes: usize::MAX,
        })?;
        Ok(Self {
            width,
            height,
            stride,
            data: try_zeroed(len)?,
        })
    }

    /// Create a plane filled with `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self> {
        let mut r = Self::new(width, height)?;
        r.fill(value);
        Ok(r)
    }

    /// Create a plane from unpadded row-major values.
    pub fn from_vec(width: usize, height: usize, values: Vec<T>) -> Result<Self> {
        if values.len() != width.saturating_mul(height) {
            return Err(Error::InvalidParameter {
                name: "values",
                value: values.len().to_string(),
                reason: format!("expected {} values for {}x{}", width * height, width, height),
            });
        }
        let mut r = Self::new(width, height)?;
        for (y, src) in values.chunks_exact(width).enumerate() {
            r.row_mut(y).copy_from_slice(src);
        }
        Ok(r)
    }

    // Dimensions

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in elements (a multiple of a 64-bit word)
    pub fn stride(&self) -> usize {
        self.stride
    }

    // Data access

    /// Get value at (x, y)
    pub fn get(&self, x: usize, y: usize) -> Result<T> {
        self.check(x, y)?;
        Ok(self.data[y * self.stride + x])
    }

    /// Set value at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<()> {
        self.check(x, y)?;
        self.data[y * self.stride + x] = value;
        Ok(())
    }

    fn check(&self, x: usize, y: usize) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                z: 0,
                width: self.width,
                height: self.height,
                length: 1,
            });
        }
        Ok(())
    }

    /// Row `y` without its padding.
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    /// Mutable row `y` without its padding.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    /// Iterate over rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.data
            .chunks_exact(self.stride)
            .map(move |r| &r[..self.width])
    }

    /// Set every pixel to `value`.
    pub fn fill(&mut self, value: T) {
        for y in 0..self.height {
            self.row_mut(y).fill(value);
        }
    }

    /// View the pixels as an ndarray indexed `[y, x]`.
    pub fn view(&self) -> Result<ArrayView2<'_, T>> {
        let shape = (self.height, self.width).strides((self.stride, 1));
        ArrayView2::from_shape(shape, &self.data).map_err(|e| Error::Format(e.to_string()))
    }

    /// Mutable ndarray view indexed `[y, x]`.
    pub fn view_mut(&mut self) -> Result<ArrayViewMut2<'_, T>> {
        let shape = (self.height, self.width).strides((self.stride, 1));
        ArrayViewMut2::from_shape(shape, &mut self.data).map_err(|e| Error::Format(e.to_string()))
    }
}
