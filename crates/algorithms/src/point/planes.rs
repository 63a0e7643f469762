//! Bit-plane and byte-plane copies, lookup tables

use morpho_core::raster::{check_same_size, Depth, Volume};
use morpho_core::{Error, Result};

use super::{map_values, unsupported, zip_values};

fn check_plane(plane: usize, count: usize) -> Result<()> {
    if plane >= count {
        return Err(Error::ValueOutOfRange {
            name: "plane",
            value: plane as u64,
            max: count as u64 - 1,
        });
    }
    Ok(())
}

/// Move bit `plane` between an 8-bit and a 1-bit image.
///
/// From 8-bit to 1-bit the bit is isolated. From 1-bit to 8-bit the bit is
/// written into the existing 8-bit image, its other seven bits untouched.
pub fn copy_bit_plane<V: Volume>(input: &V, plane: usize, out: &mut V) -> Result<()> {
    check_same_size(input, out)?;
    check_plane(plane, 8)?;
    match (input.depth(), out.depth()) {
        (Depth::Grey, Depth::Binary) => map_values(input, out, |v| (v >> plane) & 1),
        (Depth::Binary, Depth::Grey) => {
            let previous = out.clone();
            zip_values(input, &previous, out, |bit, v| (v & !(1 << plane)) | (bit << plane));
        }
        (a, b) => return Err(unsupported("copy_bit_plane", &[a, b])),
    }
    Ok(())
}

/// Move byte `plane` between a 32-bit and an 8-bit image.
///
/// From 32-bit to 8-bit the byte is extracted; from 8-bit to 32-bit it is
/// written into the existing 32-bit image, the other bytes untouched.
pub fn copy_byte_plane<V: Volume>(input: &V, plane: usize, out: &mut V) -> Result<()> {
    check_same_size(input, out)?;
    check_plane(plane, 4)?;
    let shift = 8 * plane;
    match (input.depth(), out.depth()) {
        (Depth::Long, Depth::Grey) => map_values(input, out, |v| (v >> shift) & 0xff),
        (Depth::Grey, Depth::Long) => {
            let previous = out.clone();
            zip_values(input, &previous, out, |byte, v| {
                (v & !(0xff << shift)) | (byte << shift)
            });
        }
        (a, b) => return Err(unsupported("copy_byte_plane", &[a, b])),
    }
    Ok(())
}

/// `out = table[input]` for 8-bit images; the table has 256 entries in
/// `0..=255`.
pub fn lookup<V: Volume>(input: &V, table: &[u32], out: &mut V) -> Result<()> {
    check_same_size(input, out)?;
    if input.depth() != Depth::Grey || out.depth() != Depth::Grey {
        return Err(unsupported("lookup", &[input.depth(), out.depth()]));
    }
    if table.len() != 256 {
        return Err(Error::InvalidParameter {
            name: "table",
            value: table.len().to_string(),
            reason: "a lookup table has 256 entries".into(),
        });
    }
    if let Some(&v) = table.iter().find(|&&v| v > 255) {
        return Err(Error::ValueOutOfRange {
            name: "table",
            value: v as u64,
            max: 255,
        });
    }
    map_values(input, out, |v| table[v as usize]);
    Ok(())
}
