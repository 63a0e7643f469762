//! Image measures and comparison

use morpho_core::raster::{check_depth, check_same_size, Depth, Volume};
use morpho_core::Result;

use super::unsupported;

/// Find the first pixel, in plane then row-major order, where `a` and `b`
/// differ. `a`'s value there is written into `out` and its coordinates
/// `(x, y, z)` are returned; identical images give `None`.
pub fn compare<V: Volume>(a: &V, b: &V, out: &mut V) -> Result<Option<(usize, usize, usize)>> {
    check_same_size(a, b)?;
    check_same_size(a, out)?;
    check_depth(b, a.depth())?;
    check_depth(out, a.depth())?;
    let (width, height, _) = a.size();
    let va = a.to_values()?;
    let vb = b.to_values()?;
    match va.iter().zip(&vb).position(|(x, y)| x != y) {
        Some(i) => {
            let (x, y, z) = (i % width, (i / width) % height, i / (width * height));
            out.set_at(x, y, z, va[i])?;
            Ok(Some((x, y, z)))
        }
        None => Ok(None),
    }
}

/// Sum of all pixel values.
pub fn compute_volume<V: Volume>(input: &V) -> Result<u128> {
    Ok(input.to_values()?.iter().map(|&v| v as u128).sum())
}

/// (min, max) over all pixels.
pub fn compute_range<V: Volume>(input: &V) -> Result<(u32, u32)> {
    let values = input.to_values()?;
    let min = values.iter().copied().min().unwrap_or(0);
    let max = values.iter().copied().max().unwrap_or(0);
    Ok((min, max))
}

/// Pixel counts per value of an 8-bit image.
pub fn histogram<V: Volume>(input: &V) -> Result<[u64; 256]> {
    if input.depth() != Depth::Grey {
        return Err(unsupported("histogram", &[input.depth()]));
    }
    let mut hist = [0u64; 256];
    for v in input.to_values()? {
        hist[v as usize] += 1;
    }
    Ok(hist)
}
