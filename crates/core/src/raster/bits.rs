//! Packed 1-bit raster planes

use crate::error::{try_zeroed, Error, Result};

/// Bits per storage word.
pub const WORD_BITS: usize = 64;

/// A 2D plane of 1-bit pixels.
///
/// Pixel `x` of a row lives at bit `x % 64` of word `x / 64` (LSB first).
/// Rows are padded to a whole number of words; padding bits are kept at
/// zero by every writer so word-level reductions can ignore the width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitRaster {
    width: usize,
    height: usize,
    /// Words per row
    words: usize,
    data: Vec<u64>,
}

impl BitRaster {
    /// Create a cleared plane.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions {
                width,
                height,
                length: 1,
            });
        }
        let words = width.div_ceil(WORD_BITS);
        let len = words.checked_mul(height).ok_or(Error::AllocationFailure {
            bytes: usize::MAX,
        })?;
        Ok(Self {
            width,
            height,
            words,
            data: try_zeroed(len)?,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Words per row
    pub fn words_per_row(&self) -> usize {
        self.words
    }

    /// Mask of the valid bits in the last word of a row.
    #[inline]
    pub fn tail_mask(&self) -> u64 {
        tail_mask(self.width)
    }

    /// Get pixel at (x, y) as 0 or 1.
    pub fn get(&self, x: usize, y: usize) -> Result<bool> {
        self.check(x, y)?;
        let w = self.data[y * self.words + x / WORD_BITS];
        Ok((w >> (x % WORD_BITS)) & 1 == 1)
    }

    /// Set pixel at (x, y).
    pub fn set(&mut self, x: usize, y: usize, value: bool) -> Result<()> {
        self.check(x, y)?;
        let w = &mut self.data[y * self.words + x / WORD_BITS];
        let bit = 1u64 << (x % WORD_BITS);
        if value {
            *w |= bit;
        } else {
            *w &= !bit;
        }
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

    /// Words of row `y`, padding included.
    #[inline]
    pub fn row(&self, y: usize) -> &[u64] {
        let start = y * self.words;
        &self.data[start..start + self.words]
    }

    /// Mutable words of row `y`. Callers must leave padding bits at zero
    /// (see [`BitRaster::clear_padding`]).
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u64] {
        let start = y * self.words;
        &mut self.data[start..start + self.words]
    }

    /// Set every pixel to `value`.
    pub fn fill(&mut self, value: bool) {
        let word = if value { u64::MAX } else { 0 };
        self.data.fill(word);
        self.clear_padding();
    }

    /// Zero the padding bits of every row.
    pub fn clear_padding(&mut self) {
        let mask = self.tail_mask();
        let words = self.words;
        for row in self.data.chunks_exact_mut(words) {
            row[words - 1] &= mask;
        }
    }

    /// Number of set pixels.
    pub fn count_ones(&self) -> u64 {
        self.data.iter().map(|w| w.count_ones() as u64).sum()
    }

    /// Whether no pixel is set.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&w| w == 0)
    }
}

/// Mask of the valid bits in the last word of a `width` pixel row.
#[inline]
pub fn tail_mask(width: usize) -> u64 {
    match width % WORD_BITS {
        0 => u64::MAX,
        r => (1u64 << r) - 1,
    }
}
