//! Depth-specialised row kernels
//!
//! Every neighbor operator is written once against [`Layer`] and runs on
//! packed 1-bit planes as word operations and on 8/32-bit planes as element
//! operations.

use crate::error::Result;
use crate::raster::bits::{tail_mask, WORD_BITS};
use crate::raster::{BitRaster, Depth, Pixel, Raster};

/// Pixelwise logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
    Xor,
    /// Pointwise minimum
    Inf,
    /// Pointwise maximum
    Sup,
}

/// A single image plane of one depth, seen as rows of storage units.
pub trait Layer: Clone + Send + Sync + 'static {
    /// Storage unit of a row (`u64` word for 1-bit, the pixel otherwise).
    type Unit: Copy + Default + PartialEq + Send + Sync;

    const DEPTH: Depth;

    /// Allocate a zeroed plane.
    fn blank(width: usize, height: usize) -> Result<Self>;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn row(&self, y: usize) -> &[Self::Unit];
    fn row_mut(&mut self, y: usize) -> &mut [Self::Unit];

    /// Units in one row.
    fn row_len(&self) -> usize {
        self.row(0).len()
    }

    /// Value of pixel `x` of a row.
    fn value(row: &[Self::Unit], x: usize) -> u32;

    /// Write pixel `x` of a row, `value` masked to the depth.
    fn set_value(row: &mut [Self::Unit], x: usize, value: u32);

    /// Fill `width` pixels of a row with `value`.
    fn fill_row(row: &mut [Self::Unit], value: u32, width: usize);

    /// `dst[x] = src[x - dx]`; pixels with no source take `fill`.
    fn shift_row(src: &[Self::Unit], dst: &mut [Self::Unit], dx: isize, fill: u32, width: usize);

    /// `dst = max(dst, src)`
    fn sup_row(dst: &mut [Self::Unit], src: &[Self::Unit]);

    /// `dst = min(dst, src)`
    fn inf_row(dst: &mut [Self::Unit], src: &[Self::Unit]);

    /// `dst = op(a, b)`
    fn logic_row(dst: &mut [Self::Unit], a: &[Self::Unit], b: &[Self::Unit], op: LogicOp);

    /// `dst = max - src`
    fn negate_row(dst: &mut [Self::Unit], src: &[Self::Unit], width: usize);

    /// Sequential scan along x: `row[x] = min(max(row[x], row[x -/+ 1]), mask[x])`
    /// (`max`/`min` swapped when `dual`). `forward` runs towards increasing x.
    /// Returns whether the row changed.
    fn propagate_row(
        row: &mut [Self::Unit],
        mask: &[Self::Unit],
        forward: bool,
        dual: bool,
        width: usize,
    ) -> bool;
}

// ─── 1-bit ──────────────────────────────────────────────────────────────

fn set_bit_range(row: &mut [u64], from: usize, to: usize) {
    for x in from..to {
        row[x / WORD_BITS] |= 1u64 << (x % WORD_BITS);
    }
}

/// Kogge-Stone occluded fill of `seeds` through `mask` towards higher bits.
fn fill_up(mut g: u64, mut p: u64) -> u64 {
    g &= p;
    for s in [1, 2, 4, 8, 16, 32] {
        g |= p & (g << s);
        p &= p << s;
    }
    g
}

/// Same as [`fill_up`] towards lower bits.
fn fill_down(mut g: u64, mut p: u64) -> u64 {
    g &= p;
    for s in [1, 2, 4, 8, 16, 32] {
        g |= p & (g >> s);
        p &= p >> s;
    }
    g
}

fn propagate_words(row: &mut [u64], mask: &[u64], forward: bool) {
    let n = row.len();
    let mut carry = false;
    for k in 0..n {
        let i = if forward { k } else { n - 1 - k };
        let entry = if forward { 1u64 } else { 1u64 << 63 };
        let seeds = row[i] | if carry { entry } else { 0 };
        let g = if forward {
            fill_up(seeds, mask[i])
        } else {
            fill_down(seeds, mask[i])
        };
        carry = if forward { g >> 63 == 1 } else { g & 1 == 1 };
        row[i] = g;
    }
}

impl Layer for BitRaster {
    type Unit = u64;
    const DEPTH: Depth = Depth::Binary;

    fn blank(width: usize, height: usize) -> Result<Self> {
        BitRaster::new(width, height)
    }

    fn width(&self) -> usize {
        self.width()
    }

    fn height(&self) -> usize {
        self.height()
    }

    fn row(&self, y: usize) -> &[u64] {
        BitRaster::row(self, y)
    }

    fn row_mut(&mut self, y: usize) -> &mut [u64] {
        BitRaster::row_mut(self, y)
    }

    #[inline]
    fn value(row: &[u64], x: usize) -> u32 {
        ((row[x / WORD_BITS] >> (x % WORD_BITS)) & 1) as u32
    }

    #[inline]
    fn set_value(row: &mut [u64], x: usize, value: u32) {
        let bit = 1u64 << (x % WORD_BITS);
        if value & 1 == 1 {
            row[x / WORD_BITS] |= bit;
        } else {
            row[x / WORD_BITS] &= !bit;
        }
    }

    fn fill_row(row: &mut [u64], value: u32, width: usize) {
        let word = if value & 1 == 1 { u64::MAX } else { 0 };
        row.fill(word);
        if let Some(last) = row.last_mut() {
            *last &= tail_mask(width);
        }
    }

    fn shift_row(src: &[u64], dst: &mut [u64], dx: isize, fill: u32, width: usize) {
        let n = dst.len();
        let amount = dx.unsigned_abs();
        if amount >= width {
            Self::fill_row(dst, fill, width);
            return;
        }
        let q = amount / WORD_BITS;
        let r = amount % WORD_BITS;
        let at = |i: isize| -> u64 {
            if i < 0 || i as usize >= n {
                0
            } else {
                src[i as usize]
            }
        };
        for i in 0..n {
            let i = i as isize;
            let q = q as isize;
            dst[i as usize] = if dx >= 0 {
                let hi = at(i - q) << r;
                let lo = if r == 0 { 0 } else { at(i - q - 1) >> (WORD_BITS - r) };
                hi | lo
            } else {
                let lo = at(i + q) >> r;
                let hi = if r == 0 { 0 } else { at(i + q + 1) << (WORD_BITS - r) };
                hi | lo
            };
        }
        if let Some(last) = dst.last_mut() {
            *last &= tail_mask(width);
        }
        if fill & 1 == 1 {
            if dx >= 0 {
                set_bit_range(dst, 0, amount);
            } else {
                set_bit_range(dst, width - amount, width);
            }
        }
    }

    fn sup_row(dst: &mut [u64], src: &[u64]) {
        dst.iter_mut().zip(src).for_each(|(d, s)| *d |= *s);
    }

    fn inf_row(dst: &mut [u64], src: &[u64]) {
        dst.iter_mut().zip(src).for_each(|(d, s)| *d &= *s);
    }

    fn logic_row(dst: &mut [u64], a: &[u64], b: &[u64], op: LogicOp) {
        for ((d, &x), &y) in dst.iter_mut().zip(a).zip(b) {
            *d = match op {
                LogicOp::And | LogicOp::Inf => x & y,
                LogicOp::Or | LogicOp::Sup => x | y,
                LogicOp::Xor => x ^ y,
            };
        }
    }

    fn negate_row(dst: &mut [u64], src: &[u64], width: usize) {
        dst.iter_mut().zip(src).for_each(|(d, s)| *d = !*s);
        if let Some(last) = dst.last_mut() {
            *last &= tail_mask(width);
        }
    }

    fn propagate_row(row: &mut [u64], mask: &[u64], forward: bool, dual: bool, width: usize) -> bool {
        let before: Vec<u64> = row.to_vec();
        if dual {
            // max(min(v, prev), m) is the complement of the primal scan on
            // complemented row and mask.
            let tail = tail_mask(width);
            let last = row.len() - 1;
            let mut crow: Vec<u64> = row.iter().map(|w| !w).collect();
            let mut cmask: Vec<u64> = mask.iter().map(|w| !w).collect();
            crow[last] &= tail;
            cmask[last] &= tail;
            propagate_words(&mut crow, &cmask, forward);
            for (d, c) in row.iter_mut().zip(&crow) {
                *d = !c;
            }
            row[last] &= tail;
        } else {
            propagate_words(row, mask, forward);
        }
        row[..] != before[..]
    }
}

// ─── 8-bit and 32-bit ───────────────────────────────────────────────────

impl<T: Pixel> Layer for Raster<T> {
    type Unit = T;
    const DEPTH: Depth = T::DEPTH;

    fn blank(width: usize, height: usize) -> Result<Self> {
        Raster::new(width, height)
    }

    fn width(&self) -> usize {
        Raster::width(self)
    }

    fn height(&self) -> usize {
        Raster::height(self)
    }

    fn row(&self, y: usize) -> &[T] {
        Raster::row(self, y)
    }

    fn row_mut(&mut self, y: usize) -> &mut [T] {
        Raster::row_mut(self, y)
    }

    #[inline]
    fn value(row: &[T], x: usize) -> u32 {
        row[x].to_u32()
    }

    #[inline]
    fn set_value(row: &mut [T], x: usize, value: u32) {
        row[x] = T::from_u32(value);
    }

    fn fill_row(row: &mut [T], value: u32, width: usize) {
        row[..width].fill(T::from_u32(value));
    }

    fn shift_row(src: &[T], dst: &mut [T], dx: isize, fill: u32, width: usize) {
        let fill = T::from_u32(fill);
        let amount = dx.unsigned_abs().min(width);
        if dx >= 0 {
            dst[amount..width].copy_from_slice(&src[..width - amount]);
            dst[..amount].fill(fill);
        } else {
            dst[..width - amount].copy_from_slice(&src[amount..width]);
            dst[width - amount..width].fill(fill);
        }
    }

    fn sup_row(dst: &mut [T], src: &[T]) {
        dst.iter_mut().zip(src).for_each(|(d, &s)| {
            if s > *d {
                *d = s
            }
        });
    }

    fn inf_row(dst: &mut [T], src: &[T]) {
        dst.iter_mut().zip(src).for_each(|(d, &s)| {
            if s < *d {
                *d = s
            }
        });
    }

    fn logic_row(dst: &mut [T], a: &[T], b: &[T], op: LogicOp) {
        for ((d, &x), &y) in dst.iter_mut().zip(a).zip(b) {
            *d = match op {
                LogicOp::And => x & y,
                LogicOp::Or => x | y,
                LogicOp::Xor => x ^ y,
                LogicOp::Inf => x.min(y),
                LogicOp::Sup => x.max(y),
            };
        }
    }

    fn negate_row(dst: &mut [T], src: &[T], width: usize) {
        for (d, &s) in dst[..width].iter_mut().zip(src) {
            *d = !s;
        }
    }

    fn propagate_row(row: &mut [T], mask: &[T], forward: bool, dual: bool, width: usize) -> bool {
        let mut changed = false;
        let mut step = |x: usize, prev: usize, row: &mut [T]| {
            let v = if dual {
                row[x].min(row[prev]).max(mask[x])
            } else {
                row[x].max(row[prev]).min(mask[x])
            };
            if v != row[x] {
                row[x] = v;
                changed = true;
            }
        };
        // the first pixel of the scan is only capped
        if forward {
            step(0, 0, row);
            for x in 1..width {
                step(x, x - 1, row);
            }
        } else {
            step(width - 1, width - 1, row);
            for x in (0..width - 1).rev() {
                step(x, x + 1, row);
            }
        }
        changed
    }
}
