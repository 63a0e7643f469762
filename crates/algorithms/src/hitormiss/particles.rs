//! Junction points, zones of influence and border particles

use morpho_core::raster::{Depth, Edge, Grid, LogicOp, Volume};
use morpho_core::Result;
use tracing::debug;

use crate::distance::compute_distance;
use crate::flood::Lattice;
use crate::labelling::components;
use crate::neighbor::{check_alike, shift};
use crate::point::{logic, logic_in_place, negate, unsupported};
use crate::reconstruction::reconstruct_values;
use crate::segmentation::{flood, WATERSHED_LINE};

/// Pixels of the 1-bit `input` with at least three set neighbors.
///
/// Neighbor counts are kept as three bit planes (at least one, two and
/// three) updated with one shift per direction; outside pixels count as
/// clear.
pub fn multiple_points<V: Volume>(input: &V, out: &mut V, grid: Grid) -> Result<()> {
    if input.depth() != Depth::Binary {
        return Err(unsupported("multiple_points", &[input.depth(), out.depth()]));
    }
    check_alike(input, out)?;
    let blank = input.blank_like(Depth::Binary)?;
    let (mut one, mut two, mut three) = (blank.clone(), blank.clone(), blank.clone());
    let mut shifted = blank.clone();
    let mut carry = blank;
    for d in grid.neighbors() {
        shift(input, &mut shifted, d, 1, 0, grid)?;
        logic(&two, &shifted, &mut carry, LogicOp::And)?;
        logic_in_place(&mut three, &carry, LogicOp::Or)?;
        logic(&one, &shifted, &mut carry, LogicOp::And)?;
        logic_in_place(&mut two, &carry, LogicOp::Or)?;
        logic_in_place(&mut one, &shifted, LogicOp::Or)?;
    }
    logic(&three, input, out, LogicOp::And)
}

/// Skeleton by zones of influence of the particles of the 1-bit `input`.
///
/// Each particle floods the distance function of the background; the
/// pixels where two floods meet form the 1-bit `out`.
pub fn fast_skiz<V: Volume>(input: &V, out: &mut V, grid: Grid) -> Result<()> {
    if input.depth() != Depth::Binary {
        return Err(unsupported("fast_skiz", &[input.depth(), out.depth()]));
    }
    check_alike(input, out)?;
    let lattice = Lattice::of(input, grid)?;
    let f = input.to_values()?;
    let particles = components(&lattice, |i| f[i] != 0, |_, _| true, |n| n.checked_add(1))?;

    let mut background = input.blank_like(Depth::Binary)?;
    negate(input, &mut background)?;
    let mut dist = input.blank_like(Depth::Long)?;
    compute_distance(&background, &mut dist, grid, Edge::Filled)?;
    let relief = dist.to_values()?;
    let top = relief.iter().copied().max().unwrap_or(0);

    let result = flood(&lattice, &relief, particles.labels, top, u32::MAX, true);
    debug!("skiz of {} particles", particles.count);
    let lines: Vec<u32> = result
        .labels
        .iter()
        .map(|&l| (l == WATERSHED_LINE) as u32)
        .collect();
    out.load_values(&lines)
}

/// Remove the particles touching the image frame. On 8 and 32-bit images
/// the domes connected to the frame are removed the same way.
pub fn remove_edge_particles<V: Volume>(input: &V, out: &mut V, grid: Grid) -> Result<()> {
    check_alike(input, out)?;
    let lattice = Lattice::of(input, grid)?;
    let f = input.to_values()?;
    let mut touching: Vec<u32> = (0..f.len())
        .map(|i| if lattice.on_border(i) { f[i] } else { 0 })
        .collect();
    reconstruct_values(&lattice, &f, &mut touching, input.depth().max_value(), false);
    let kept: Vec<u32> = f.iter().zip(&touching).map(|(&v, &r)| v - r).collect();
    out.load_values(&kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use morpho_core::{ErrorKind, Image, Image3D};

    fn ones(im: &Image) -> u32 {
        im.to_values().unwrap().iter().sum()
    }

    #[test]
    fn test_multiple_points_plus() {
        let mut a = Image::new(7, 7, Depth::Binary).unwrap();
        for i in 1..6 {
            a.set_pixel(3, i, 1).unwrap();
            a.set_pixel(i, 3, 1).unwrap();
        }
        let mut out = a.clone();
        multiple_points(&a, &mut out, Grid::Square).unwrap();
        assert_eq!(ones(&out), 5);
        assert_eq!(out.get_pixel(3, 3).unwrap(), 1);
        assert_eq!(out.get_pixel(3, 2).unwrap(), 1);
        assert_eq!(out.get_pixel(3, 1).unwrap(), 0);
    }

    #[test]
    fn test_multiple_points_line() {
        let mut a = Image::new(9, 3, Depth::Binary).unwrap();
        for x in 0..9 {
            a.set_pixel(x, 1, 1).unwrap();
        }
        let mut out = a.clone();
        multiple_points(&a, &mut out, Grid::Hexagonal).unwrap();
        assert_eq!(ones(&out), 0);
    }

    #[test]
    fn test_skiz_between_two_dots() {
        let mut a = Image::new(9, 5, Depth::Binary).unwrap();
        a.set_pixel(1, 2, 1).unwrap();
        a.set_pixel(7, 2, 1).unwrap();
        let mut out = a.clone();
        fast_skiz(&a, &mut out, Grid::Square).unwrap();
        for y in 0..5 {
            for x in 0..9 {
                assert_eq!(out.get_pixel(x, y).unwrap(), (x == 4) as u32, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_skiz_without_particles() {
        let a = Image::new(6, 6, Depth::Binary).unwrap();
        let mut out = a.clone();
        out.fill(1);
        fast_skiz(&a, &mut out, Grid::Hexagonal).unwrap();
        assert_eq!(ones(&out), 0);
    }

    #[test]
    fn test_remove_edge_particles() {
        let mut a = Image::new(7, 7, Depth::Binary).unwrap();
        a.set_pixel(0, 3, 1).unwrap();
        a.set_pixel(1, 3, 1).unwrap();
        a.set_pixel(2, 2, 1).unwrap();
        a.set_pixel(4, 4, 1).unwrap();
        a.set_pixel(5, 4, 1).unwrap();
        let mut out = a.clone();
        remove_edge_particles(&a, &mut out, Grid::Square).unwrap();
        assert_eq!(ones(&out), 2);
        assert_eq!(out.get_pixel(4, 4).unwrap(), 1);
        assert_eq!(out.get_pixel(2, 2).unwrap(), 0);
    }

    #[test]
    fn test_remove_edge_domes_grey() {
        let mut a = Image::new(5, 3, Depth::Grey).unwrap();
        for (x, v) in [30, 10, 5, 40, 20].into_iter().enumerate() {
            a.set_pixel(x, 1, v).unwrap();
        }
        let mut out = a.clone();
        remove_edge_particles(&a, &mut out, Grid::Square).unwrap();
        assert_eq!(out.get_pixel(3, 1).unwrap(), 20);
        assert_eq!(out.to_values().unwrap().iter().sum::<u32>(), 20);
    }

    #[test]
    fn test_remove_edge_particles_3d() {
        let mut v = Image3D::new(5, 5, 5, Depth::Binary).unwrap();
        v.set_pixel(2, 2, 0, 1).unwrap();
        v.set_pixel(2, 2, 2, 1).unwrap();
        let mut out = v.clone();
        remove_edge_particles(&v, &mut out, Grid::Cubic).unwrap();
        assert_eq!(out.to_values().unwrap().iter().sum::<u32>(), 1);
        assert_eq!(out.get_pixel(2, 2, 2).unwrap(), 1);
    }

    #[test]
    fn test_grey_rejected() {
        let a = Image::new(4, 4, Depth::Grey).unwrap();
        let mut out = a.clone();
        assert_eq!(
            fast_skiz(&a, &mut out, Grid::Square).unwrap_err().kind(),
            ErrorKind::BadDepth
        );
        assert_eq!(
            multiple_points(&a, &mut out, Grid::Square).unwrap_err().kind(),
            ErrorKind::BadDepth
        );
    }
}
