//! Alternate sequential filters

use morpho_core::raster::{Edge, StructuringElement, Volume};
use morpho_core::Result;

use super::opening::{closing, opening};
use crate::neighbor::check_alike;

/// Which operator of a pair runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterOrder {
    /// Opening first
    #[default]
    OpenFirst,
    /// Closing first
    CloseFirst,
}

fn pair<V: Volume>(
    image: &mut V,
    size: usize,
    se: &StructuringElement,
    edge: Edge,
    order: FilterOrder,
    full: bool,
) -> Result<()> {
    let steps: &[bool] = match (order, full) {
        (FilterOrder::OpenFirst, false) => &[true, false],
        (FilterOrder::CloseFirst, false) => &[false, true],
        (FilterOrder::OpenFirst, true) => &[true, false, true],
        (FilterOrder::CloseFirst, true) => &[false, true, false],
    };
    for &open in steps {
        let snapshot = image.clone();
        if open {
            opening(&snapshot, image, size, se, edge)?;
        } else {
            closing(&snapshot, image, size, se, edge)?;
        }
    }
    Ok(())
}

fn sequence<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
    edge: Edge,
    order: FilterOrder,
    full: bool,
) -> Result<()> {
    se.validate(V::DIMS)?;
    check_alike(input, out)?;
    out.clone_from(input);
    for i in 1..=size {
        pair(out, i, se, edge, order, full)?;
    }
    Ok(())
}

/// Alternate sequential filter: for `i` in `1..=size`, an opening and a
/// closing of size `i` in the given order.
pub fn alternate_filter<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
    edge: Edge,
    order: FilterOrder,
) -> Result<()> {
    sequence(input, out, size, se, edge, order, false)
}

/// Like [`alternate_filter`], with the first operator repeated after the
/// second at every size (opening, closing, opening or the dual).
pub fn full_alternate_filter<V: Volume>(
    input: &V,
    out: &mut V,
    size: usize,
    se: &StructuringElement,
    edge: Edge,
    order: FilterOrder,
) -> Result<()> {
    sequence(input, out, size, se, edge, order, true)
}
