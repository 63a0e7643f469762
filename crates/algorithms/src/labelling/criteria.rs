//! Component measures painted back on the components
//!
//! Each operator labels the 1-bit input, accumulates one measure per
//! component and writes that measure on every pixel of the component of
//! the 32-bit output. Background pixels get 0.

use morpho_core::raster::{check_depth, check_same_size, Depth, Edge, Grid, Volume};
use morpho_core::{Error, Result};

use super::components::{components, Components};
use crate::distance::compute_distance;
use crate::flood::Lattice;

/// Coordinate axis of a Feret diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

fn labelled<V: Volume>(input: &V, out: &V, grid: Grid) -> Result<(Lattice, Components)> {
    check_depth(input, Depth::Binary)?;
    check_depth(out, Depth::Long)?;
    check_same_size(input, out)?;
    let lattice = Lattice::of(input, grid)?;
    let fg = input.to_values()?;
    let c = components(&lattice, |i| fg[i] != 0, |_, _| true, |n| n.checked_add(1))?;
    Ok((lattice, c))
}

/// Paint `measure[label - 1]` on every labelled pixel.
fn paint<V: Volume>(out: &mut V, c: &Components, measure: &[u32]) -> Result<()> {
    let values: Vec<u32> = c
        .labels
        .iter()
        .map(|&l| if l == 0 { 0 } else { measure[l as usize - 1] })
        .collect();
    out.load_values(&values)
}

/// Number of pixels of each component.
pub fn area_labelling<V: Volume>(input: &V, out: &mut V, grid: Grid) -> Result<()> {
    let (_, c) = labelled(input, out, grid)?;
    let mut area = vec![0u32; c.count as usize];
    for &l in c.labels.iter().filter(|&&l| l != 0) {
        area[l as usize - 1] = area[l as usize - 1].saturating_add(1);
    }
    paint(out, &c, &area)
}

/// Sum of the 8 or 32-bit `mask` over each component, saturated.
pub fn volume_labelling<V: Volume>(input: &V, mask: &V, out: &mut V, grid: Grid) -> Result<()> {
    if mask.depth() == Depth::Binary {
        return Err(crate::point::unsupported("volume_labelling", &[mask.depth()]));
    }
    check_same_size(input, mask)?;
    let (_, c) = labelled(input, out, grid)?;
    let m = mask.to_values()?;
    let mut volume = vec![0u32; c.count as usize];
    for (&l, &v) in c.labels.iter().zip(&m) {
        if l != 0 {
            volume[l as usize - 1] = volume[l as usize - 1].saturating_add(v);
        }
    }
    paint(out, &c, &volume)
}

/// Radius of the largest ball inscribed in each component: the maximum
/// over the component of the grid distance to its complement.
pub fn diameter_labelling<V: Volume>(input: &V, out: &mut V, grid: Grid, edge: Edge) -> Result<()> {
    let (_, c) = labelled(input, out, grid)?;
    compute_distance(input, out, grid, edge)?;
    let dist = out.to_values()?;
    let mut radius = vec![0u32; c.count as usize];
    for (&l, &d) in c.labels.iter().zip(&dist) {
        if l != 0 {
            let r = &mut radius[l as usize - 1];
            *r = (*r).max(d);
        }
    }
    paint(out, &c, &radius)
}

/// Extent of each component along `axis`, in pixels.
pub fn feret_diameter_labelling<V: Volume>(
    input: &V,
    out: &mut V,
    axis: Axis,
    grid: Grid,
) -> Result<()> {
    if axis == Axis::Z && V::DIMS == 2 {
        return Err(Error::InvalidParameter {
            name: "axis",
            value: "Z".into(),
            reason: "2D images have no z axis".into(),
        });
    }
    let (lattice, c) = labelled(input, out, grid)?;
    let mut bounds = vec![(usize::MAX, 0usize); c.count as usize];
    for (i, &l) in c.labels.iter().enumerate() {
        if l == 0 {
            continue;
        }
        let (x, y, z) = lattice.coords(i);
        let v = match axis {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        };
        let b = &mut bounds[l as usize - 1];
        b.0 = b.0.min(v);
        b.1 = b.1.max(v);
    }
    let extent: Vec<u32> = bounds.iter().map(|&(lo, hi)| (hi - lo + 1) as u32).collect();
    paint(out, &c, &extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use morpho_core::Image;

    fn shapes() -> Image {
        // a 3x2 block and a 1x4 bar
        let mut im = Image::new(8, 6, Depth::Binary).unwrap();
        for y in 1..3 {
            for x in 1..4 {
                im.set_pixel(x, y, 1).unwrap();
            }
        }
        for y in 1..5 {
            im.set_pixel(6, y, 1).unwrap();
        }
        im
    }

    #[test]
    fn test_area() {
        let im = shapes();
        let mut out = Image::new(8, 6, Depth::Long).unwrap();
        area_labelling(&im, &mut out, Grid::Square).unwrap();
        assert_eq!(out.get_pixel(2, 2).unwrap(), 6);
        assert_eq!(out.get_pixel(6, 4).unwrap(), 4);
        assert_eq!(out.get_pixel(0, 0).unwrap(), 0);
    }

    #[test]
    fn test_volume() {
        let im = shapes();
        let mut mask = Image::new(8, 6, Depth::Grey).unwrap();
        mask.fill(10);
        mask.set_pixel(6, 1, 100).unwrap();
        let mut out = Image::new(8, 6, Depth::Long).unwrap();
        volume_labelling(&im, &mask, &mut out, Grid::Square).unwrap();
        assert_eq!(out.get_pixel(1, 1).unwrap(), 60);
        assert_eq!(out.get_pixel(6, 2).unwrap(), 130);
    }

    #[test]
    fn test_feret() {
        let im = shapes();
        let mut out = Image::new(8, 6, Depth::Long).unwrap();
        feret_diameter_labelling(&im, &mut out, Axis::X, Grid::Square).unwrap();
        assert_eq!(out.get_pixel(1, 1).unwrap(), 3);
        assert_eq!(out.get_pixel(6, 1).unwrap(), 1);
        feret_diameter_labelling(&im, &mut out, Axis::Y, Grid::Square).unwrap();
        assert_eq!(out.get_pixel(1, 1).unwrap(), 2);
        assert_eq!(out.get_pixel(6, 1).unwrap(), 4);
        assert!(feret_diameter_labelling(&im, &mut out, Axis::Z, Grid::Square).is_err());
    }

    #[test]
    fn test_inscribed_radius() {
        let mut im = Image::new(9, 9, Depth::Binary).unwrap();
        for y in 1..8 {
            for x in 1..8 {
                im.set_pixel(x, y, 1).unwrap();
            }
        }
        let mut out = Image::new(9, 9, Depth::Long).unwrap();
        diameter_labelling(&im, &mut out, Grid::Square, Edge::Empty).unwrap();
        assert_eq!(out.get_pixel(1, 1).unwrap(), 4);
        assert_eq!(out.get_pixel(0, 0).unwrap(), 0);
    }
}
