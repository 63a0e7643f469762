//! Portable raw byte layout
//!
//! A 2D image is `height` rows of `ceil(width * depth / 8)` bytes, top to
//! bottom. 1-bit rows are packed LSB first and 32-bit pixels are little
//! endian. A 3D image is the concatenation of its planes.

use crate::error::{Error, Result};
use crate::raster::{Depth, PlanesMut, PlanesRef, Pixel, Raster, Volume};

/// Size in bytes of the raw layout of a `width x height x length` volume.
pub fn raw_size(width: usize, height: usize, length: usize, depth: Depth) -> usize {
    depth.raw_row_bytes(width) * height * length
}

/// Export the pixels of `v` in the raw layout.
pub fn extract_raw<V: Volume>(v: &V) -> Result<Vec<u8>> {
    let size = raw_size(v.width(), v.height(), v.length(), v.depth());
    let mut out = Vec::new();
    out.try_reserve_exact(size)
        .map_err(|_| Error::AllocationFailure { bytes: size })?;
    let width = v.width();
    match v.planes() {
        PlanesRef::Binary(planes) => {
            let row_bytes = Depth::Binary.raw_row_bytes(width);
            for p in planes {
                for y in 0..p.height() {
                    let bytes: Vec<u8> = p.row(y).iter().flat_map(|w| w.to_le_bytes()).collect();
                    out.extend_from_slice(&bytes[..row_bytes]);
                }
            }
        }
        PlanesRef::Grey(planes) => extract_words(planes, &mut out),
        PlanesRef::Long(planes) => extract_words(planes, &mut out),
    }
    Ok(out)
}

fn extract_words<T: Pixel>(planes: &[Raster<T>], out: &mut Vec<u8>) {
    for p in planes {
        for row in p.rows() {
            for &v in row {
                v.write_le(out);
            }
        }
    }
}

/// Overwrite the pixels of `v` from the raw layout. Padding bits of 1-bit
/// rows are ignored.
pub fn load_raw<V: Volume>(v: &mut V, bytes: &[u8]) -> Result<()> {
    let size = raw_size(v.width(), v.height(), v.length(), v.depth());
    if bytes.len() != size {
        return Err(Error::SizeMismatch {
            expected: (size, 1, 1),
            actual: (bytes.len(), 1, 1),
        });
    }
    let width = v.width();
    let row_bytes = v.depth().raw_row_bytes(width);
    let mut rows = bytes.chunks_exact(row_bytes);
    match v.planes_mut() {
        PlanesMut::Binary(planes) => {
            for p in planes.iter_mut() {
                for y in 0..p.height() {
                    let src = rows.next().unwrap_or_default();
                    let dst = p.row_mut(y);
                    dst.fill(0);
                    for (i, &b) in src.iter().enumerate() {
                        dst[i / 8] |= (b as u64) << (8 * (i % 8));
                    }
                }
                p.clear_padding();
            }
        }
        PlanesMut::Grey(planes) => load_words(planes, &mut rows),
        PlanesMut::Long(planes) => load_words(planes, &mut rows),
    }
    Ok(())
}

fn load_words<'a, T: Pixel>(
    planes: &mut [Raster<T>],
    rows: &mut impl Iterator<Item = &'a [u8]>,
) {
    let size = std::mem::size_of::<T>();
    for p in planes.iter_mut() {
        for y in 0..p.height() {
            let src = rows.next().unwrap_or_default();
            for (d, chunk) in p.row_mut(y).iter_mut().zip(src.chunks_exact(size)) {
                *d = T::read_le(chunk);
            }
        }
    }
}
