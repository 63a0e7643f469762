//! Pixelwise kernels
//!
//! Arithmetic, logic, conversions, plane copies and measures. Kernels that
//! mix depths read rows into `u32` buffers, combine them and write the
//! result masked to the output depth; same-depth logic runs on storage
//! units directly.

mod arith;
mod convert;
mod frame;
mod logic;
mod measure;
mod planes;

pub use arith::{
    add, add_const, ceiling_add, ceiling_add_const, div, div_const, floor_sub, floor_sub_const,
    mul, mul_const, mul_real_const, sub, sub_const, RealRounding,
};
pub use convert::{convert, convert_by_mask, threshold};
pub use frame::draw_edge;
pub use logic::{copy, logic, logic_in_place, negate};
pub use measure::{compare, compute_range, compute_volume, histogram};
pub use planes::{copy_bit_plane, copy_byte_plane, lookup};

use crate::maybe_rayon::*;
use morpho_core::raster::{Depth, Layer, PlanesMut, PlanesRef, Volume};
use morpho_core::Error;

/// Read row `y` of plane `z` as values.
pub(crate) fn read_row(planes: PlanesRef<'_>, z: usize, y: usize, out: &mut [u32]) {
    fn go<L: Layer>(planes: &[L], z: usize, y: usize, out: &mut [u32]) {
        let row = planes[z].row(y);
        for (x, v) in out.iter_mut().enumerate() {
            *v = L::value(row, x);
        }
    }
    match planes {
        PlanesRef::Binary(p) => go(p, z, y, out),
        PlanesRef::Grey(p) => go(p, z, y, out),
        PlanesRef::Long(p) => go(p, z, y, out),
    }
}

/// Write values into row `y` of plane `z`, masked to the depth.
fn write_row(planes: PlanesMut<'_>, z: usize, y: usize, values: &[u32]) {
    fn go<L: Layer>(planes: &mut [L], z: usize, y: usize, values: &[u32]) {
        let mask = L::DEPTH.max_value();
        let row = planes[z].row_mut(y);
        for (x, &v) in values.iter().enumerate() {
            L::set_value(row, x, v & mask);
        }
    }
    match planes {
        PlanesMut::Binary(p) => go(p, z, y, values),
        PlanesMut::Grey(p) => go(p, z, y, values),
        PlanesMut::Long(p) => go(p, z, y, values),
    }
}

/// Recompute every row of `out` from a row function, in parallel when
/// the `parallel` feature is on. `f(z, y, row)` fills `row` with values.
pub(crate) fn map_rows<V, F>(out: &mut V, f: F)
where
    V: Volume,
    F: Fn(usize, usize, &mut [u32]) + Sync + Send,
{
    let (width, height, length) = out.size();
    let rows: Vec<Vec<u32>> = (0..height * length)
        .into_par_iter()
        .map(|i| {
            let mut row = vec![0u32; width];
            f(i / height, i % height, &mut row);
            row
        })
        .collect();
    for (i, row) in rows.iter().enumerate() {
        write_row(out.planes_mut(), i / height, i % height, row);
    }
}

/// `out = f(a)` pixelwise.
pub(crate) fn map_values<A, V, F>(a: &A, out: &mut V, f: F)
where
    A: Volume,
    V: Volume,
    F: Fn(u32) -> u32 + Sync + Send,
{
    let pa = a.planes();
    let width = a.width();
    map_rows(out, |z, y, row| {
        let mut ra = vec![0u32; width];
        read_row(pa, z, y, &mut ra);
        for (o, &x) in row.iter_mut().zip(&ra) {
            *o = f(x);
        }
    });
}

/// `out = f(a, b)` pixelwise.
pub(crate) fn zip_values<A, B, V, F>(a: &A, b: &B, out: &mut V, f: F)
where
    A: Volume,
    B: Volume,
    V: Volume,
    F: Fn(u32, u32) -> u32 + Sync + Send,
{
    let (pa, pb) = (a.planes(), b.planes());
    let width = a.width();
    map_rows(out, |z, y, row| {
        let mut ra = vec![0u32; width];
        let mut rb = vec![0u32; width];
        read_row(pa, z, y, &mut ra);
        read_row(pb, z, y, &mut rb);
        for ((o, &x), &v) in row.iter_mut().zip(&ra).zip(&rb) {
            *o = f(x, v);
        }
    });
}

/// Error for a depth combination an operator does not accept.
pub(crate) fn unsupported(operation: &'static str, depths: &[Depth]) -> Error {
    let depths = depths
        .iter()
        .map(|d| d.bits().to_string())
        .collect::<Vec<_>>()
        .join(",");
    Error::UnsupportedDepth { operation, depths }
}

