//! Chamfer distance with dodecagonal balls
//!
//! On the hexagonal grid the six neighbors sit at distance 1 and the six
//! pixels reached by two adjacent steps at distance sqrt(3). Weighting
//! them 4 and 7 gives balls that are close to regular dodecagons.

use morpho_core::raster::{check_depth, check_same_size, Depth, Edge, Grid, Volume};
use morpho_core::Result;

use crate::flood::{FloodQueue, Lattice, Order};

const NEAR: u32 = 4;
const FAR: u32 = 7;

/// Approximate Euclidean distance of each pixel of the 2D 1-bit `input`
/// to the background, in pixels, written to the 8-bit `out` (saturated at
/// 255).
pub fn isotropic_distance<V: Volume>(input: &V, out: &mut V, edge: Edge) -> Result<()> {
    let grid = Grid::Hexagonal;
    let lattice = Lattice::of(input, grid)?;
    check_depth(input, Depth::Binary)?;
    check_depth(out, Depth::Grey)?;
    check_same_size(input, out)?;

    let fg = input.to_values()?;
    let bound = (FAR as usize)
        .saturating_mul(input.width() + input.height() + 2)
        .min(u32::MAX as usize) as u32;
    let mut queue = FloodQueue::new(bound, Order::LowestFirst);
    let mut dist = vec![u32::MAX; fg.len()];
    for (i, &v) in fg.iter().enumerate() {
        if v == 0 {
            dist[i] = 0;
            queue.push(0, i);
        } else if edge == Edge::Empty && lattice.touches_frame(i) {
            dist[i] = NEAR;
            queue.push(NEAR, i);
        }
    }

    let mut far = Vec::with_capacity(6);
    while let Some((level, p)) = queue.pop() {
        if level != dist[p] {
            continue;
        }
        far.clear();
        for d in grid.neighbors() {
            let r = grid.rotate(d)?;
            let via_d = lattice.neighbor(p, d).and_then(|a| lattice.neighbor(a, r));
            let via_r = lattice.neighbor(p, r).and_then(|a| lattice.neighbor(a, d));
            if let Some(q) = via_d.or(via_r) {
                far.push(q);
            }
        }
        let near = lattice.neighbors(p).map(|q| (q, NEAR));
        for (q, w) in near.chain(far.iter().map(|&q| (q, FAR))) {
            let cand = level + w;
            if cand < dist[q] {
                dist[q] = cand;
                queue.push(cand, q);
            }
        }
    }

    let values: Vec<u32> = dist
        .iter()
        .map(|&d| d.saturating_add(NEAR / 2) / NEAR)
        .map(|d| d.min(255))
        .collect();
    out.load_values(&values)
}
