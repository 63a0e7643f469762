//! Regional extrema and hole filling

use morpho_core::raster::{check_depth, check_same_size, Depth, Grid, Volume};
use morpho_core::{Error, Result};

use super::hierarchical::reconstruct_values;
use crate::flood::Lattice;
use crate::neighbor::check_alike;
use crate::point::unsupported;

fn extrema<V: Volume>(input: &V, out: &mut V, h: u32, grid: Grid, minima: bool) -> Result<()> {
    let name = if minima { "minima" } else { "maxima" };
    if input.depth() == Depth::Binary {
        return Err(unsupported(name, &[input.depth(), out.depth()]));
    }
    check_same_size(input, out)?;
    check_depth(out, Depth::Binary)?;
    if h == 0 {
        return Err(Error::InvalidParameter {
            name: "h",
            value: h.to_string(),
            reason: "height must be at least 1".into(),
        });
    }
    let lattice = Lattice::of(input, grid)?;
    let f = input.to_values()?;
    let max_level = input.depth().max_value().saturating_add(h);
    let mut r: Vec<u32> = if minima {
        f.iter().map(|v| v.saturating_add(h)).collect()
    } else {
        f.iter().map(|v| v.saturating_sub(h)).collect()
    };
    reconstruct_values(&lattice, &f, &mut r, max_level, minima);
    let flags: Vec<u32> = f
        .iter()
        .zip(&r)
        .map(|(&f, &r)| if minima { (r > f) as u32 } else { (f > r) as u32 })
        .collect();
    out.load_values(&flags)
}

/// Regional minima of an 8 or 32-bit image into a 1-bit image.
///
/// The relief raised by `h` is reconstructed by erosion over the input;
/// pixels left above the input are those of minima whose dynamic is at
/// least `h`, surrounded by their plateau up to height `h - 1`. With
/// `h = 1` these are exactly the regional minima.
pub fn minima<V: Volume>(input: &V, out: &mut V, h: u32, grid: Grid) -> Result<()> {
    extrema(input, out, h, grid, true)
}

/// Regional maxima of an 8 or 32-bit image into a 1-bit image.
pub fn maxima<V: Volume>(input: &V, out: &mut V, h: u32, grid: Grid) -> Result<()> {
    extrema(input, out, h, grid, false)
}

/// Fill the holes of `input`: the regions (or, on grey images, the
/// basins) that cannot be reached from the image frame without climbing.
pub fn fill_holes<V: Volume>(input: &V, out: &mut V, grid: Grid) -> Result<()> {
    check_alike(input, out)?;
    let lattice = Lattice::of(input, grid)?;
    let max = input.depth().max_value();
    let f = input.to_values()?;
    let mut marker: Vec<u32> = (0..f.len())
        .map(|i| if lattice.on_border(i) { f[i] } else { max })
        .collect();
    reconstruct_values(&lattice, &f, &mut marker, max, true);
    out.load_values(&marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use morpho_core::Image;

    fn grey(width: usize, values: &[u32]) -> Image {
        let mut im = Image::new(width, values.len() / width, Depth::Grey).unwrap();
        im.load_values(values).unwrap();
        im
    }

    #[test]
    fn test_minima_on_a_profile() {
        let f = grey(9, &[5, 3, 3, 6, 8, 2, 4, 4, 1]);
        let mut out = Image::new(9, 1, Depth::Binary).unwrap();
        minima(&f, &mut out, 1, Grid::Square).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![0, 1, 1, 0, 0, 1, 0, 0, 1]);
        maxima(&f, &mut out, 1, Grid::Square).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![1, 0, 0, 0, 1, 0, 1, 1, 0]);
    }

    #[test]
    fn test_minimum_at_depth_maximum() {
        let f = grey(3, &[255, 255, 255]);
        let mut out = Image::new(3, 1, Depth::Binary).unwrap();
        minima(&f, &mut out, 1, Grid::Square).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![1, 1, 1]);
    }

    #[test]
    fn test_height_widens_minima() {
        let f = grey(7, &[9, 5, 6, 9, 9, 1, 9]);
        let mut out = Image::new(7, 1, Depth::Binary).unwrap();
        minima(&f, &mut out, 1, Grid::Square).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![0, 1, 0, 0, 0, 1, 0]);
        // the shoulder at 6 is within h - 1 of the minimum at 5
        minima(&f, &mut out, 2, Grid::Square).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![0, 1, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn test_extrema_reject_binary_input() {
        let f = Image::new(3, 3, Depth::Binary).unwrap();
        let mut out = f.clone();
        assert!(minima(&f, &mut out, 1, Grid::Square).is_err());
        let g = grey(3, &[1, 2, 3]);
        let mut out = Image::new(3, 1, Depth::Binary).unwrap();
        assert!(maxima(&g, &mut out, 0, Grid::Square).is_err());
    }

    #[test]
    fn test_fill_holes_binary() {
        let mut im = Image::new(7, 7, Depth::Binary).unwrap();
        for i in 1..6 {
            for (x, y) in [(i, 1), (i, 5), (1, i), (5, i)] {
                im.set_pixel(x, y, 1).unwrap();
            }
        }
        let mut out = im.clone();
        fill_holes(&im, &mut out, Grid::Square).unwrap();
        let ones: u32 = out.to_values().unwrap().iter().sum();
        assert_eq!(ones, 25);
        assert_eq!(out.get_pixel(3, 3).unwrap(), 1);
        assert_eq!(out.get_pixel(0, 0).unwrap(), 0);
    }

    #[test]
    fn test_fill_holes_grey_basin() {
        let f = grey(5, &[4, 4, 4, 4, 4, 4, 9, 9, 9, 4, 4, 9, 2, 9, 4, 4, 9, 9, 9, 4, 4, 4, 4, 4, 4]);
        let mut out = f.clone();
        fill_holes(&f, &mut out, Grid::Square).unwrap();
        assert_eq!(out.get_pixel(2, 2).unwrap(), 9);
        assert_eq!(out.get_pixel(0, 0).unwrap(), 4);
    }
}
