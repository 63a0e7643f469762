//! Depth conversions and thresholding

use morpho_core::raster::{check_same_size, Depth, Volume};
use morpho_core::{Error, Result};

use super::{map_values, unsupported};

/// `out = 1` where `low <= input <= high`, else 0. Input is 8 or 32-bit,
/// output 1-bit.
pub fn threshold<V: Volume>(input: &V, low: u32, high: u32, out: &mut V) -> Result<()> {
    check_same_size(input, out)?;
    if input.depth() == Depth::Binary || out.depth() != Depth::Binary {
        return Err(unsupported("threshold", &[input.depth(), out.depth()]));
    }
    map_values(input, out, |v| (low <= v && v <= high) as u32);
    Ok(())
}

/// 0-pixels of a 1-bit image become `low`, 1-pixels become `high`.
pub fn convert_by_mask<V: Volume>(input: &V, out: &mut V, low: u32, high: u32) -> Result<()> {
    check_same_size(input, out)?;
    if input.depth() != Depth::Binary || out.depth() == Depth::Binary {
        return Err(unsupported("convert_by_mask", &[input.depth(), out.depth()]));
    }
    let max = out.depth().max_value();
    for (name, v) in [("low", low), ("high", high)] {
        if v > max {
            return Err(Error::ValueOutOfRange {
                name,
                value: v as u64,
                max: max as u64,
            });
        }
    }
    map_values(input, out, |v| if v == 1 { high } else { low });
    Ok(())
}

/// Convert between depths.
///
/// - 1 to 8 or 32: set pixels become the maximum of the output depth
/// - 8 or 32 to 1: non-zero pixels become 1
/// - 8 to 32: values are kept
/// - 32 to 8: linear rescale of `[min, max]` of the input onto `[0, 255]`;
///   a constant input gives 0
/// - same depth: copy
pub fn convert<V: Volume>(input: &V, out: &mut V) -> Result<()> {
    check_same_size(input, out)?;
    let (din, dout) = (input.depth(), out.depth());
    let top = dout.max_value();
    match (din, dout) {
        (a, b) if a == b => out.clone_from(input),
        (Depth::Binary, _) => map_values(input, out, |v| if v == 1 { top } else { 0 }),
        (_, Depth::Binary) => map_values(input, out, |v| (v != 0) as u32),
        (Depth::Grey, Depth::Long) => map_values(input, out, |v| v),
        (Depth::Long, Depth::Grey) => {
            let (min, max) = super::compute_range(input)?;
            if min == max {
                out.reset();
            } else {
                let span = (max - min) as u64;
                map_values(input, out, |v| ((v - min) as u64 * 255 / span) as u32);
            }
        }
        _ => return Err(unsupported("convert", &[din, dout])),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morpho_core::{ErrorKind, Image};

    fn ramp(depth: Depth, values: &[u32]) -> Image {
        let mut im = Image::new(values.len(), 1, depth).unwrap();
        im.load_values(values).unwrap();
        im
    }

    #[test]
    fn test_threshold_inclusive() {
        let a = ramp(Depth::Grey, &[10, 64, 100, 191, 192]);
        let mut b = Image::new(5, 1, Depth::Binary).unwrap();
        threshold(&a, 64, 191, &mut b).unwrap();
        assert_eq!(b.to_values().unwrap(), vec![0, 1, 1, 1, 0]);
        let mut g = Image::new(5, 1, Depth::Grey).unwrap();
        assert_eq!(threshold(&a, 0, 1, &mut g).unwrap_err().kind(), ErrorKind::BadDepth);
    }

    #[test]
    fn test_convert_by_mask_range() {
        let b = ramp(Depth::Binary, &[0, 1]);
        let mut g = Image::new(2, 1, Depth::Grey).unwrap();
        convert_by_mask(&b, &mut g, 10, 200).unwrap();
        assert_eq!(g.to_values().unwrap(), vec![10, 200]);
        let e = convert_by_mask(&b, &mut g, 10, 300).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_long_to_grey_rescales() {
        let a = ramp(Depth::Long, &[1000, 1500, 2000]);
        let mut g = Image::new(3, 1, Depth::Grey).unwrap();
        convert(&a, &mut g).unwrap();
        assert_eq!(g.to_values().unwrap(), vec![0, 127, 255]);
        let flat = ramp(Depth::Long, &[7, 7, 7]);
        convert(&flat, &mut g).unwrap();
        assert_eq!(g.to_values().unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn test_binary_conversions() {
        let b = ramp(Depth::Binary, &[0, 1, 1]);
        let mut g = Image::new(3, 1, Depth::Grey).unwrap();
        convert(&b, &mut g).unwrap();
        assert_eq!(g.to_values().unwrap(), vec![0, 255, 255]);
        let mut back = Image::new(3, 1, Depth::Binary).unwrap();
        convert(&g, &mut back).unwrap();
        assert_eq!(back, b);
    }
}
