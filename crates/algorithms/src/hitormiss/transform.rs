//! Hit-or-miss transform, thinning and thickening

use morpho_core::raster::{Depth, Edge, Grid, LogicOp, Volume};
use morpho_core::Result;
use tracing::debug;

use super::element::DoubleStructuringElement;
use crate::neighbor::{check_alike, inf_neighbor};
use crate::point::{compute_volume, logic, negate, sub, unsupported};

fn check_binary<V: Volume>(operation: &'static str, input: &V, out: &V) -> Result<()> {
    if input.depth() != Depth::Binary || out.depth() != Depth::Binary {
        return Err(unsupported(operation, &[input.depth(), out.depth()]));
    }
    check_alike(input, out)
}

/// Hit-or-miss transform of a 1-bit image.
///
/// A pixel is set when every foreground neighbor of `dse` is set and
/// every background neighbor is clear (direction 0 being the pixel
/// itself). Neighbors outside the frame read as `edge`.
pub fn hit_or_miss<V: Volume>(
    input: &V,
    out: &mut V,
    dse: &DoubleStructuringElement,
    edge: Edge,
) -> Result<()> {
    check_binary("hit_or_miss", input, out)?;
    let grid = dse.grid();
    out.fill(1);
    inf_neighbor(input, out, grid.transpose_set(dse.foreground()), grid, edge)?;
    let mut holes = input.blank_like(Depth::Binary)?;
    negate(input, &mut holes)?;
    inf_neighbor(
        &holes,
        out,
        grid.transpose_set(dse.background()),
        grid,
        edge.complement(),
    )
}

/// `out = input \ hit_or_miss(input)`
pub fn thin<V: Volume>(
    input: &V,
    out: &mut V,
    dse: &DoubleStructuringElement,
    edge: Edge,
) -> Result<()> {
    let mut hits = input.blank_like(Depth::Binary)?;
    hit_or_miss(input, &mut hits, dse, edge)?;
    sub(input, &hits, out)
}

/// `out = input ∪ hit_or_miss(input)`
pub fn thick<V: Volume>(
    input: &V,
    out: &mut V,
    dse: &DoubleStructuringElement,
    edge: Edge,
) -> Result<()> {
    let mut hits = input.blank_like(Depth::Binary)?;
    hit_or_miss(input, &mut hits, dse, edge)?;
    logic(input, &hits, out, LogicOp::Or)
}

type Step<V> = fn(&V, &mut V, &DoubleStructuringElement, Edge) -> Result<()>;

/// One pass of `step` for each rotation of `dse`, every pass working on
/// the result of the previous one.
fn rotating<V: Volume>(
    step: Step<V>,
    input: &V,
    out: &mut V,
    dse: &DoubleStructuringElement,
    edge: Edge,
) -> Result<()> {
    check_binary("rotating", input, out)?;
    let mut current = input.clone();
    for r in 0..dse.rotation_period()? {
        let rotated = dse.rotate(r as isize)?;
        step(&current, out, &rotated, edge)?;
        current.clone_from(out);
    }
    Ok(())
}

/// [`thin`] by every rotation of `dse` in turn.
pub fn rotating_thin<V: Volume>(
    input: &V,
    out: &mut V,
    dse: &DoubleStructuringElement,
    edge: Edge,
) -> Result<()> {
    rotating(thin, input, out, dse, edge)
}

/// [`thick`] by every rotation of `dse` in turn.
pub fn rotating_thick<V: Volume>(
    input: &V,
    out: &mut V,
    dse: &DoubleStructuringElement,
    edge: Edge,
) -> Result<()> {
    rotating(thick, input, out, dse, edge)
}

/// Rotating passes until the pixel count stops changing. Thinning only
/// removes and thickening only adds pixels, so a stable count means a
/// stable image.
fn until_stable<V: Volume>(
    step: Step<V>,
    input: &V,
    out: &mut V,
    dse: &DoubleStructuringElement,
    edge: Edge,
) -> Result<()> {
    check_binary("full", input, out)?;
    let mut current = input.clone();
    let mut count = compute_volume(&current)?;
    let mut passes = 0usize;
    loop {
        rotating(step, &current, out, dse, edge)?;
        passes += 1;
        let next = compute_volume(out)?;
        if next == count {
            break;
        }
        count = next;
        current.clone_from(out);
    }
    debug!("stable after {} rotating passes", passes);
    Ok(())
}

/// Rotating thinning iterated to idempotence.
pub fn full_thin<V: Volume>(
    input: &V,
    out: &mut V,
    dse: &DoubleStructuringElement,
    edge: Edge,
) -> Result<()> {
    until_stable(thin, input, out, dse, edge)
}

/// Rotating thickening iterated to idempotence.
pub fn full_thick<V: Volume>(
    input: &V,
    out: &mut V,
    dse: &DoubleStructuringElement,
    edge: Edge,
) -> Result<()> {
    until_stable(thick, input, out, dse, edge)
}

/// Homotopic reduction by the D element: simply connected particles
/// shrink to a single pixel on the hexagonal grid, holes are kept.
pub fn thin_d<V: Volume>(input: &V, out: &mut V, grid: Grid, edge: Edge) -> Result<()> {
    full_thin(input, out, &DoubleStructuringElement::d_element(grid)?, edge)
}

/// Dual of [`thin_d`]: homotopic growth of the background's complement.
pub fn thick_d<V: Volume>(input: &V, out: &mut V, grid: Grid, edge: Edge) -> Result<()> {
    let mut inverted = input.blank_like(Depth::Binary)?;
    negate(input, &mut inverted)?;
    let mut thinned = inverted.clone();
    thin_d(&inverted, &mut thinned, grid, edge.complement())?;
    negate(&thinned, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelling::label;
    use crate::reconstruction::fill_holes;
    use morpho_core::raster::DirSet;
    use morpho_core::{ErrorKind, Image};

    fn binary(width: usize, values: &[u32]) -> Image {
        let mut im = Image::new(width, values.len() / width, Depth::Binary).unwrap();
        im.load_values(values).unwrap();
        im
    }

    fn ones(im: &Image) -> u32 {
        im.to_values().unwrap().iter().sum()
    }

    fn east_end() -> DoubleStructuringElement {
        DoubleStructuringElement::new(Grid::Square, [0, 7].into_iter().collect(), DirSet::single(3))
            .unwrap()
    }

    #[test]
    fn test_hit_or_miss_pattern() {
        let a = binary(5, &[0, 1, 1, 1, 0]);
        let mut out = a.clone();
        hit_or_miss(&a, &mut out, &east_end(), Edge::Empty).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_hit_or_miss_edge() {
        let a = binary(4, &[0, 0, 1, 1]);
        let mut out = a.clone();
        hit_or_miss(&a, &mut out, &east_end(), Edge::Empty).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![0, 0, 0, 1]);
        hit_or_miss(&a, &mut out, &east_end(), Edge::Filled).unwrap();
        assert_eq!(ones(&out), 0);
    }

    #[test]
    fn test_thin_and_thick() {
        let a = binary(5, &[0, 1, 1, 1, 0]);
        let mut out = a.clone();
        thin(&a, &mut out, &east_end(), Edge::Empty).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![0, 1, 1, 0, 0]);

        let grow = DoubleStructuringElement::new(Grid::Square, DirSet::single(7), DirSet::single(0))
            .unwrap();
        thick(&a, &mut out, &grow, Edge::Empty).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_rejects_grey() {
        let a = Image::new(4, 4, Depth::Grey).unwrap();
        let mut out = a.clone();
        let e = hit_or_miss(&a, &mut out, &east_end(), Edge::Empty).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::BadDepth);
    }

    #[test]
    fn test_thin_d_shrinks_hex_line() {
        let mut a = Image::new(9, 3, Depth::Binary).unwrap();
        for x in 2..7 {
            a.set_pixel(x, 1, 1).unwrap();
        }
        let mut out = a.clone();
        thin_d(&a, &mut out, Grid::Hexagonal, Edge::Empty).unwrap();
        assert_eq!(ones(&out), 1);
    }

    #[test]
    fn test_thin_d_square_keeps_ring() {
        let mut a = Image::new(7, 7, Depth::Binary).unwrap();
        for i in 1..6 {
            for (x, y) in [(i, 1), (i, 5), (1, i), (5, i)] {
                a.set_pixel(x, y, 1).unwrap();
            }
        }
        let mut out = a.clone();
        thin_d(&a, &mut out, Grid::Square, Edge::Empty).unwrap();
        assert_eq!(out, a);
    }

    #[test]
    fn test_thin_d_preserves_topology() {
        let mut a = Image::new(9, 9, Depth::Binary).unwrap();
        for y in 2..7 {
            for x in 1..8 {
                a.set_pixel(x, y, 1).unwrap();
            }
        }
        let mut out = a.clone();
        thin_d(&a, &mut out, Grid::Square, Edge::Empty).unwrap();
        assert!(ones(&out) > 0 && ones(&out) < ones(&a));

        let mut removed = a.clone();
        sub(&out, &a, &mut removed).unwrap();
        assert_eq!(ones(&removed), 0);

        let mut labels = Image::new(9, 9, Depth::Long).unwrap();
        assert_eq!(label(&out, &mut labels, Grid::Square).unwrap(), 1);
        let mut filled = out.clone();
        fill_holes(&out, &mut filled, Grid::Square).unwrap();
        assert_eq!(filled, out);

        let mut again = out.clone();
        thin_d(&out, &mut again, Grid::Square, Edge::Empty).unwrap();
        assert_eq!(again, out);
    }

    #[test]
    fn test_thick_d_is_dual() {
        let mut a = Image::new(9, 3, Depth::Binary).unwrap();
        a.fill(1);
        for x in 2..7 {
            a.set_pixel(x, 1, 0).unwrap();
        }
        let mut out = a.clone();
        thick_d(&a, &mut out, Grid::Hexagonal, Edge::Filled).unwrap();
        assert_eq!(ones(&out), 27 - 1);
    }

    #[test]
    fn test_rotating_thin_removes_each_end() {
        let a = binary(7, &[0, 1, 1, 1, 1, 1, 0]);
        let mut out = a.clone();
        let dse = DoubleStructuringElement::new(
            Grid::Square,
            [0, 7].into_iter().collect(),
            [2, 3, 4].into_iter().collect(),
        )
        .unwrap();
        rotating_thin(&a, &mut out, &dse, Edge::Empty).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![0, 0, 1, 1, 1, 0, 0]);
    }
}
