//! Translations

use morpho_core::raster::{DirSet, Grid, Layer, Offset, PlanesMut, PlanesRef, Volume};
use morpho_core::Result;

use super::{check_alike, check_grid};

/// Fill `out` with row `(y, z)` of a volume translated by `-back`: pixel
/// `x` takes the source pixel at `(x, y, z) + back`. `back` is the walk
/// from the destination to its source.
#[inline]
pub(crate) fn pull_row<L: Layer>(
    src: &[L],
    back: Offset,
    y: usize,
    z: usize,
    fill: u32,
    out: &mut [L::Unit],
) {
    let width = src[0].width();
    let sy = y as isize + back.dy;
    let sz = z as isize + back.dz;
    if sy < 0 || sz < 0 || sy as usize >= src[0].height() || sz as usize >= src.len() {
        L::fill_row(out, fill, width);
        return;
    }
    L::shift_row(src[sz as usize].row(sy as usize), out, -back.dx, fill, width);
}

fn translate_planes<L: Layer, F>(src: &[L], dst: &mut [L], fill: u32, back: F)
where
    F: Fn(usize, usize) -> Offset,
{
    for (z, plane) in dst.iter_mut().enumerate() {
        for y in 0..plane.height() {
            pull_row(src, back(y, z), y, z, fill, plane.row_mut(y));
        }
    }
}

fn translate<V, F>(input: &V, out: &mut V, fill: u32, back: F)
where
    V: Volume,
    F: Fn(usize, usize) -> Offset,
{
    let fill = input.depth().mask(fill);
    match (input.planes(), out.planes_mut()) {
        (PlanesRef::Binary(s), PlanesMut::Binary(d)) => translate_planes(s, d, fill, back),
        (PlanesRef::Grey(s), PlanesMut::Grey(d)) => translate_planes(s, d, fill, back),
        (PlanesRef::Long(s), PlanesMut::Long(d)) => translate_planes(s, d, fill, back),
        // depths are checked by every caller
        _ => {}
    }
}

/// Translate `input` by `amplitude` steps in direction `d`; uncovered
/// pixels take `fill`. On hexagonal, face-centred and centred cubic grids
/// every step uses the offset of the row or plane it starts from.
pub fn shift<V: Volume>(
    input: &V,
    out: &mut V,
    d: usize,
    amplitude: usize,
    fill: u32,
    grid: Grid,
) -> Result<()> {
    grid.check(d)?;
    check_grid::<V>(grid, DirSet::single(d))?;
    check_alike(input, out)?;
    let back = grid.transpose(d)?;
    translate(input, out, fill, |y, z| {
        grid.walk(back, amplitude, y as isize, z as isize)
    });
    Ok(())
}

/// [`shift`] writing back into its input.
pub fn shift_in_place<V: Volume>(
    inout: &mut V,
    d: usize,
    amplitude: usize,
    fill: u32,
    grid: Grid,
) -> Result<()> {
    let snapshot = inout.clone();
    shift(&snapshot, inout, d, amplitude, fill, grid)
}

/// Translate by an arbitrary vector (square and cubic geometry):
/// `out[p + v] = input[p]`.
pub fn shift_vector<V: Volume>(input: &V, out: &mut V, vector: Offset, fill: u32) -> Result<()> {
    check_alike(input, out)?;
    translate(input, out, fill, |_, _| -vector);
    Ok(())
}
