//! Breadth-first distances

use std::collections::VecDeque;

use morpho_core::raster::{check_depth, check_same_size, Depth, Edge, Grid, Volume};
use morpho_core::Result;
use tracing::debug;

use super::check_binary_to_long;
use crate::flood::Lattice;

/// Value of foreground pixels no background pixel can reach (a full
/// image with a filled edge).
pub const UNREACHED: u32 = u32::MAX;

/// Distance of each pixel of the 1-bit `input` to the nearest 0 pixel,
/// counted in grid steps, written to the 32-bit `out`.
///
/// With an empty edge the outside of the frame counts as background.
pub fn compute_distance<V: Volume>(input: &V, out: &mut V, grid: Grid, edge: Edge) -> Result<()> {
    check_binary_to_long(input, out)?;
    let lattice = Lattice::of(input, grid)?;
    let fg = input.to_values()?;
    let mut dist = vec![UNREACHED; fg.len()];
    let mut queue = VecDeque::new();
    for (i, &v) in fg.iter().enumerate() {
        if v == 0 {
            dist[i] = 0;
            queue.push_back(i);
        }
    }
    // frame seeds queue behind the background, at distance 1
    if edge == Edge::Empty {
        for (i, &v) in fg.iter().enumerate() {
            if v != 0 && lattice.touches_frame(i) {
                dist[i] = 1;
                queue.push_back(i);
            }
        }
    }
    let mut max = 0;
    while let Some(p) = queue.pop_front() {
        let next = dist[p] + 1;
        for q in lattice.neighbors(p) {
            if dist[q] > next {
                dist[q] = next;
                max = max.max(next);
                queue.push_back(q);
            }
        }
    }
    debug!("distance on {} grid, maximum {}", grid, max);
    out.load_values(&dist)
}

/// Geodesic distance inside the 1-bit `mask` from the 1-bit `seed`.
///
/// Seed pixels inside the mask get 1, other mask pixels 1 plus the length
/// of the shortest path to a seed that stays in the mask. Pixels outside
/// the mask or cut off from every seed get 0.
pub fn geodesic_distance<V: Volume>(mask: &V, seed: &V, out: &mut V, grid: Grid) -> Result<()> {
    check_binary_to_long(mask, out)?;
    check_depth(seed, Depth::Binary)?;
    check_same_size(mask, seed)?;
    let lattice = Lattice::of(mask, grid)?;
    let m = mask.to_values()?;
    let s = seed.to_values()?;
    let mut dist = vec![0u32; m.len()];
    let mut queue = VecDeque::new();
    for i in 0..m.len() {
        if m[i] != 0 && s[i] != 0 {
            dist[i] = 1;
            queue.push_back(i);
        }
    }
    while let Some(p) = queue.pop_front() {
        let next = dist[p] + 1;
        for q in lattice.neighbors(p) {
            if m[q] != 0 && dist[q] == 0 {
                dist[q] = next;
                queue.push_back(q);
            }
        }
    }
    out.load_values(&dist)
}
