//! Connected component and flat zone labelling
//!
//! Two passes: every pixel is merged with its already visited neighbors
//! in a disjoint set forest, then roots get labels in scan order.

use morpho_core::raster::{check_depth, check_same_size, Depth, Grid, Volume};
use morpho_core::{Error, Result};
use tracing::debug;

use super::union_find::DisjointSetForest;
use crate::flood::Lattice;

/// Labelled pixels: 0 outside every component.
pub(crate) struct Components {
    pub labels: Vec<u32>,
    pub count: u32,
}

/// Label the components of the pixels where `include` holds, two
/// neighbors joining when `joins` holds. Label `n` is `next(n - 1)`.
pub(crate) fn components<I, J, N>(lattice: &Lattice, include: I, joins: J, mut next: N) -> Result<Components>
where
    I: Fn(usize) -> bool,
    J: Fn(usize, usize) -> bool,
    N: FnMut(u32) -> Option<u32>,
{
    let n = lattice.len();
    let mut forest = DisjointSetForest::new(n);
    for i in 0..n {
        if !include(i) {
            continue;
        }
        for j in lattice.neighbors(i) {
            if j < i && include(j) && joins(i, j) {
                forest.union(i, j);
            }
        }
    }
    let mut root_label = vec![0u32; n];
    let mut labels = vec![0u32; n];
    let mut last = 0u32;
    let mut count = 0u32;
    for i in 0..n {
        if !include(i) {
            continue;
        }
        let r = forest.root(i);
        if root_label[r] == 0 {
            last = next(last).ok_or_else(|| Error::Overflow("component labels".into()))?;
            root_label[r] = last;
            count += 1;
        }
        labels[i] = root_label[r];
    }
    Ok(Components { labels, count })
}

fn label_binary<V: Volume>(
    input: &V,
    out: &mut V,
    grid: Grid,
    next: impl FnMut(u32) -> Option<u32>,
) -> Result<u32> {
    check_depth(input, Depth::Binary)?;
    check_depth(out, Depth::Long)?;
    check_same_size(input, out)?;
    let lattice = Lattice::of(input, grid)?;
    let fg = input.to_values()?;
    let c = components(&lattice, |i| fg[i] != 0, |_, _| true, next)?;
    debug!("{} components on {} grid", c.count, grid);
    out.load_values(&c.labels)?;
    Ok(c.count)
}

/// Label the connected components of the 1-bit `input` into the 32-bit
/// `out` with 1, 2, ... in scan order. Returns the number of components.
pub fn label<V: Volume>(input: &V, out: &mut V, grid: Grid) -> Result<u32> {
    label_binary(input, out, grid, |n| n.checked_add(1))
}

/// Like [`label`], with labels restricted to values whose low byte lies
/// in `low..high` so that they stay visible through an 8-bit palette.
pub fn label_with_range<V: Volume>(
    input: &V,
    out: &mut V,
    low: u32,
    high: u32,
    grid: Grid,
) -> Result<u32> {
    if low >= high || high > 256 {
        return Err(Error::InvalidParameter {
            name: "range",
            value: format!("{}..{}", low, high),
            reason: "expected a non-empty window of 0..256".into(),
        });
    }
    label_binary(input, out, grid, |mut n| loop {
        n = n.checked_add(1)?;
        let byte = n & 0xff;
        if byte >= low && byte < high {
            return Some(n);
        }
    })
}

/// Label the flat zones of `input`: adjacent pixels share a label iff they
/// have the same value. Every pixel is labelled. Returns the number of
/// zones.
pub fn partition_label<V: Volume>(input: &V, out: &mut V, grid: Grid) -> Result<u32> {
    check_depth(out, Depth::Long)?;
    check_same_size(input, out)?;
    let lattice = Lattice::of(input, grid)?;
    let values = input.to_values()?;
    let c = components(&lattice, |_| true, |i, j| values[i] == values[j], |n| n.checked_add(1))?;
    out.load_values(&c.labels)?;
    Ok(c.count)
}
