//! Hierarchical segmentations
//!
//! The relief is flooded from all its regional minima. The basins and the
//! lowest pass (saddle) between each pair of adjacent basins form a region
//! adjacency graph. Each level merges regions along the edges selected by
//! a criterion; a watershed line pixel keeps the number of the last level
//! at which it still separates two regions.
//!
//! Criteria, with `h` the altitude of a region's minimum, `m` its lowest
//! pass and `s` the saddle of an edge:
//! - enhanced waterfalls: merge when the edge is the lowest pass of both
//!   regions
//! - standard segment: a region floods up to `h + gain * (m - h)` and
//!   merges with every neighbor whose saddle it reaches (`gain = 1` is the
//!   plain waterfall)
//! - P algorithm: merge along a region's lowest pass unless it exceeds the
//!   second lowest pass of one of the two regions
//! - extended segment: standard segment that never merges two regions
//!   marked by the track image

use std::collections::BTreeMap;

use morpho_core::raster::{check_depth, check_same_size, Depth, Grid, Volume};
use morpho_core::{Error, Result};
use tracing::debug;

use super::watershed::{check_relief, flood, minima_labels, WATERSHED_LINE};
use crate::flood::Lattice;
use crate::labelling::DisjointSetForest;

#[derive(Debug, Clone, Copy)]
enum Criterion {
    Waterfalls,
    Standard { gain: f64 },
    P,
}

/// Basins, saddles and line pixels of the initial watershed.
struct Graph {
    /// Altitude of each basin's minimum, by `label - 1`
    altitude: Vec<u32>,
    /// Lowest saddle per basin pair `(a, b)`, `a < b`
    saddles: BTreeMap<(usize, usize), u32>,
    /// Line pixels with the basin pairs they separate
    lines: Vec<(usize, Vec<(usize, usize)>)>,
}

impl Graph {
    fn build(lattice: &Lattice, relief: &[u32], top: u32) -> Result<Self> {
        let (markers, count) = minima_labels(lattice, relief, top)?;
        let mut altitude = vec![u32::MAX; count as usize];
        for (&l, &v) in markers.iter().zip(relief) {
            if l != 0 {
                let a = &mut altitude[l as usize - 1];
                *a = (*a).min(v);
            }
        }
        let labels = flood(lattice, relief, markers, top, u32::MAX, true).labels;
        let mut saddles = BTreeMap::new();
        let mut lines = Vec::new();
        for (p, &l) in labels.iter().enumerate() {
            if l != WATERSHED_LINE {
                continue;
            }
            let mut around: Vec<usize> = lattice
                .neighbors(p)
                .map(|q| labels[q])
                .filter(|&l| l != 0 && l != WATERSHED_LINE)
                .map(|l| l as usize - 1)
                .collect();
            around.sort_unstable();
            around.dedup();
            let mut pairs = Vec::new();
            for (i, &a) in around.iter().enumerate() {
                for &b in &around[i + 1..] {
                    let s = saddles.entry((a, b)).or_insert(u32::MAX);
                    *s = (*s).min(relief[p]);
                    pairs.push((a, b));
                }
            }
            lines.push((p, pairs));
        }
        Ok(Self {
            altitude,
            saddles,
            lines,
        })
    }
}

/// Region edges of the current partition with their lowest saddle.
fn region_edges(graph: &Graph, forest: &mut DisjointSetForest) -> BTreeMap<(usize, usize), u32> {
    let mut edges = BTreeMap::new();
    for (&(a, b), &s) in &graph.saddles {
        let (ra, rb) = (forest.root(a), forest.root(b));
        if ra == rb {
            continue;
        }
        let key = (ra.min(rb), ra.max(rb));
        let e = edges.entry(key).or_insert(u32::MAX);
        *e = (*e).min(s);
    }
    edges
}

/// Lowest and second lowest pass of every region.
fn passes(edges: &BTreeMap<(usize, usize), u32>, n: usize) -> Vec<(u32, u32)> {
    let mut p = vec![(u32::MAX, u32::MAX); n];
    for (&(a, b), &s) in edges {
        for r in [a, b] {
            let (lo, second) = &mut p[r];
            if s < *lo {
                *second = *lo;
                *lo = s;
            } else if s < *second {
                *second = s;
            }
        }
    }
    p
}

fn selects(criterion: Criterion, s: u32, a: usize, b: usize, pass: &[(u32, u32)], altitude: &[u32]) -> bool {
    match criterion {
        Criterion::Waterfalls => s == pass[a].0 && s == pass[b].0,
        Criterion::Standard { gain } => [a, b].iter().any(|&r| {
            let h = altitude[r] as f64;
            let m = pass[r].0 as f64;
            s as f64 <= h + gain * (m - h)
        }),
        Criterion::P => {
            (s == pass[a].0 || s == pass[b].0) && s <= pass[a].1.min(pass[b].1)
        }
    }
}

/// Build the hierarchy and draw it; returns the number of levels that
/// still hold a contour.
fn hierarchy<V: Volume>(
    relief: &V,
    out: &mut V,
    grid: Grid,
    criterion: Criterion,
    track: Option<Vec<bool>>,
) -> Result<u32> {
    check_relief(relief, out)?;
    let lattice = Lattice::of(relief, grid)?;
    let top = relief.depth().max_value();
    let f = relief.to_values()?;
    let graph = Graph::build(&lattice, &f, top)?;
    let n = graph.altitude.len();

    let mut forest = DisjointSetForest::new(n);
    let mut altitude = graph.altitude.clone();
    let mut tracked = track.unwrap_or_else(|| vec![false; n]);
    let mut levels = vec![0u32; f.len()];
    let mut level = 1u32;
    for (p, _) in &graph.lines {
        levels[*p] = level;
    }
    let mut last = if graph.lines.is_empty() { 0 } else { 1 };

    loop {
        let edges = region_edges(&graph, &mut forest);
        if edges.is_empty() {
            break;
        }
        let pass = passes(&edges, n);
        let mut merged = 0usize;
        for (&(a, b), &s) in &edges {
            if !selects(criterion, s, a, b, &pass, &altitude) {
                continue;
            }
            let (ra, rb) = (forest.root(a), forest.root(b));
            if ra == rb || (tracked[ra] && tracked[rb]) {
                continue;
            }
            let (h, t) = (altitude[ra].min(altitude[rb]), tracked[ra] || tracked[rb]);
            forest.union(ra, rb);
            let r = forest.root(ra);
            altitude[r] = h;
            tracked[r] = t;
            merged += 1;
        }
        if merged == 0 {
            break;
        }
        level += 1;
        let mut contours = 0usize;
        for (p, pairs) in &graph.lines {
            if pairs.iter().any(|&(a, b)| forest.root(a) != forest.root(b)) {
                levels[*p] = level;
                contours += 1;
            }
        }
        debug!("hierarchy level {}: {} merges, {} contour pixels", level, merged, contours);
        if contours == 0 {
            break;
        }
        last = level;
    }

    let max = out.depth().max_value();
    let values: Vec<u32> = levels.iter().map(|&v| v.min(max)).collect();
    out.load_values(&values)?;
    Ok(last)
}

fn check_gain(gain: f64) -> Result<()> {
    if !gain.is_finite() || gain < 0.0 {
        return Err(Error::InvalidParameter {
            name: "gain",
            value: gain.to_string(),
            reason: "expected a finite non-negative gain".into(),
        });
    }
    Ok(())
}

/// Enhanced waterfalls hierarchy of `relief` drawn in `out`.
pub fn enhanced_waterfalls<V: Volume>(relief: &V, out: &mut V, grid: Grid) -> Result<u32> {
    hierarchy(relief, out, grid, Criterion::Waterfalls, None)
}

/// Standard segmentation hierarchy with flooding gain `gain`.
pub fn standard_segment<V: Volume>(relief: &V, out: &mut V, gain: f64, grid: Grid) -> Result<u32> {
    check_gain(gain)?;
    hierarchy(relief, out, grid, Criterion::Standard { gain }, None)
}

/// P algorithm hierarchy.
pub fn p_algorithm<V: Volume>(relief: &V, out: &mut V, grid: Grid) -> Result<u32> {
    hierarchy(relief, out, grid, Criterion::P, None)
}

/// Standard segmentation that keeps the contours between the basins
/// holding a pixel of the 1-bit `track` image.
pub fn extended_segment<V: Volume>(
    relief: &V,
    track: &V,
    out: &mut V,
    gain: f64,
    grid: Grid,
) -> Result<u32> {
    check_gain(gain)?;
    check_depth(track, Depth::Binary)?;
    check_same_size(relief, track)?;
    let lattice = Lattice::of(relief, grid)?;
    let f = relief.to_values()?;
    let top = relief.depth().max_value();
    let (markers, count) = minima_labels(&lattice, &f, top)?;
    let labels = flood(&lattice, &f, markers, top, u32::MAX, false).labels;
    let mut tracked = vec![false; count as usize];
    for (&l, &t) in labels.iter().zip(&track.to_values()?) {
        if t != 0 && l != 0 && l != WATERSHED_LINE {
            tracked[l as usize - 1] = true;
        }
    }
    hierarchy(relief, out, grid, Criterion::Standard { gain }, Some(tracked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use morpho_core::Image;

    /// Three basins at altitudes 0, 2 and 4, with passes 6 and 8.
    fn profile() -> Image {
        let mut im = Image::new(8, 1, Depth::Grey).unwrap();
        im.load_values(&[0, 0, 6, 2, 2, 8, 4, 4]).unwrap();
        im
    }

    #[test]
    fn test_enhanced_waterfalls() {
        let relief = profile();
        let mut out = Image::new(8, 1, Depth::Grey).unwrap();
        let levels = enhanced_waterfalls(&relief, &mut out, Grid::Square).unwrap();
        assert_eq!(levels, 2);
        assert_eq!(out.to_values().unwrap(), vec![0, 0, 1, 0, 0, 2, 0, 0]);
    }

    #[test]
    fn test_standard_segment_gain() {
        let relief = profile();
        let mut out = Image::new(8, 1, Depth::Grey).unwrap();
        assert_eq!(standard_segment(&relief, &mut out, 1.0, Grid::Square).unwrap(), 1);
        assert_eq!(out.to_values().unwrap(), vec![0, 0, 1, 0, 0, 1, 0, 0]);
        assert!(standard_segment(&relief, &mut out, f64::NAN, Grid::Square).is_err());
    }

    #[test]
    fn test_standard_segment_gain_changes_levels() {
        // four basins: two low passes (2 and 3) around a high one (9)
        let mut relief = Image::new(11, 1, Depth::Grey).unwrap();
        relief
            .load_values(&[0, 0, 2, 1, 1, 9, 1, 1, 3, 0, 0])
            .unwrap();
        let mut out = Image::new(11, 1, Depth::Grey).unwrap();

        assert_eq!(standard_segment(&relief, &mut out, 1.0, Grid::Square).unwrap(), 2);
        assert_eq!(out.to_values().unwrap(), vec![0, 0, 1, 0, 0, 2, 0, 0, 1, 0, 0]);

        // below 1 no region floods up to its lowest pass
        assert_eq!(standard_segment(&relief, &mut out, 0.5, Grid::Square).unwrap(), 1);
        assert_eq!(out.to_values().unwrap(), vec![0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_p_algorithm() {
        let relief = profile();
        let mut out = Image::new(8, 1, Depth::Long).unwrap();
        assert_eq!(p_algorithm(&relief, &mut out, Grid::Square).unwrap(), 1);
        assert_eq!(out.get_pixel(5, 0).unwrap(), 1);
    }

    #[test]
    fn test_extended_segment_keeps_tracked_contours() {
        let relief = profile();
        let mut track = Image::new(8, 1, Depth::Binary).unwrap();
        track.set_pixel(0, 0, 1).unwrap();
        track.set_pixel(7, 0, 1).unwrap();
        let mut out = Image::new(8, 1, Depth::Grey).unwrap();
        let levels = extended_segment(&relief, &track, &mut out, 1.0, Grid::Square).unwrap();
        assert_eq!(levels, 2);
        assert_eq!(out.get_pixel(2, 0).unwrap(), 1);
        assert_eq!(out.get_pixel(5, 0).unwrap(), 2);
    }

    #[test]
    fn test_single_basin_has_no_levels() {
        let mut relief = Image::new(4, 4, Depth::Grey).unwrap();
        relief.fill(7);
        let mut out = Image::new(4, 4, Depth::Grey).unwrap();
        assert_eq!(enhanced_waterfalls(&relief, &mut out, Grid::Square).unwrap(), 0);
        assert!(out.to_values().unwrap().iter().all(|&v| v == 0));
    }
}
