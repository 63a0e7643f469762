//! Reconstruction by priority flood
//!
//! Pixels are processed from the highest value down (lowest up for the
//! dual). When a pixel is popped its value is final, and it can only raise
//! neighbors to `min(value, mask)`, so one sweep of the queue suffices.

use morpho_core::raster::{Grid, Volume};
use morpho_core::Result;

use crate::flood::{FloodQueue, Lattice, Order};
use crate::neighbor::check_alike;

/// Geodesic reconstruction on flattened values. `marker` is capped by
/// `mask` and reconstructed in place.
pub(crate) fn reconstruct_values(
    lattice: &Lattice,
    mask: &[u32],
    marker: &mut [u32],
    max_level: u32,
    dual: bool,
) {
    let order = if dual {
        Order::LowestFirst
    } else {
        Order::HighestFirst
    };
    let mut queue = FloodQueue::new(max_level, order);
    for (i, v) in marker.iter_mut().enumerate() {
        *v = if dual { (*v).max(mask[i]) } else { (*v).min(mask[i]) };
        queue.push(*v, i);
    }
    let mut done = vec![false; marker.len()];
    while let Some((level, p)) = queue.pop() {
        // stale entry of a raised pixel
        if done[p] || level != marker[p] {
            continue;
        }
        done[p] = true;
        for q in lattice.neighbors(p) {
            if done[q] {
                continue;
            }
            let (cand, better) = if dual {
                let c = level.max(mask[q]);
                (c, c < marker[q])
            } else {
                let c = level.min(mask[q]);
                (c, c > marker[q])
            };
            if better {
                marker[q] = cand;
                queue.push(cand, q);
            }
        }
    }
}

fn hierarchical<V: Volume>(mask: &V, inout: &mut V, grid: Grid, dual: bool) -> Result<()> {
    check_alike(mask, inout)?;
    let lattice = Lattice::of(mask, grid)?;
    let m = mask.to_values()?;
    let mut r = inout.to_values()?;
    reconstruct_values(&lattice, &m, &mut r, mask.depth().max_value(), dual);
    inout.load_values(&r)
}

/// Reconstruction by dilation with a priority flood; same result as
/// [`build`](super::build).
pub fn hierar_build<V: Volume>(mask: &V, inout: &mut V, grid: Grid) -> Result<()> {
    hierarchical(mask, inout, grid, false)
}

/// Reconstruction by erosion with a priority flood; same result as
/// [`dual_build`](super::dual_build).
pub fn hierar_dual_build<V: Volume>(mask: &V, inout: &mut V, grid: Grid) -> Result<()> {
    hierarchical(mask, inout, grid, true)
}
