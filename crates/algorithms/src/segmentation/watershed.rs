//! Marker flooding
//!
//! Markers flood the relief by increasing altitude, ties in insertion
//! order. A pixel popped from the queue joins the basin of its labelled
//! neighbors; if those disagree it becomes a watershed line pixel and
//! stops the flood there.

use morpho_core::raster::{check_depth, check_same_size, Depth, Grid, Volume};
use morpho_core::{Algorithm, Error, Image, Result};
use tracing::debug;

use crate::flood::{FloodQueue, Lattice, Order};
use crate::labelling::{components, label};
use crate::point::unsupported;
use crate::reconstruction::reconstruct_values;

/// Label of watershed line pixels in a flooded label image.
pub const WATERSHED_LINE: u32 = u32::MAX;

/// Result of a flood on flattened values.
pub(crate) struct Flood {
    /// Basin labels, [`WATERSHED_LINE`] on lines, 0 where not reached
    pub labels: Vec<u32>,
    /// Level at which each pixel was reached (its altitude for markers)
    pub reached: Vec<u32>,
}

fn is_basin(label: u32) -> bool {
    label != 0 && label != WATERSHED_LINE
}

/// Flood `labels` over `relief`. Pixels whose flooding level would exceed
/// `cap` stay unlabelled. With `lines` off every reached pixel takes the
/// label of the pixel that reached it.
pub(crate) fn flood(
    lattice: &Lattice,
    relief: &[u32],
    mut labels: Vec<u32>,
    top: u32,
    cap: u32,
    lines: bool,
) -> Flood {
    let n = relief.len();
    let mut queue = FloodQueue::new(top, Order::LowestFirst);
    let mut queued = vec![false; n];
    let mut reached = vec![0u32; n];
    for i in 0..n {
        if is_basin(labels[i]) {
            queued[i] = true;
            queue.push(relief[i], i);
        } else if labels[i] == WATERSHED_LINE {
            queued[i] = true;
        }
    }
    while let Some((level, p)) = queue.pop() {
        reached[p] = level;
        if lines && labels[p] == 0 {
            let mut found = 0;
            for q in lattice.neighbors(p) {
                let l = labels[q];
                if !is_basin(l) {
                    continue;
                }
                if found == 0 {
                    found = l;
                } else if found != l {
                    found = WATERSHED_LINE;
                    break;
                }
            }
            labels[p] = found;
            if !is_basin(found) {
                continue;
            }
        }
        for q in lattice.neighbors(p) {
            if queued[q] || labels[q] != 0 {
                continue;
            }
            let lq = relief[q].max(level);
            if lq > cap {
                continue;
            }
            queued[q] = true;
            if !lines {
                labels[q] = labels[p];
            }
            queue.push(lq, q);
        }
    }
    Flood { labels, reached }
}

/// Labels of the regional minima of `relief`, with their count.
pub(crate) fn minima_labels(lattice: &Lattice, relief: &[u32], top: u32) -> Result<(Vec<u32>, u32)> {
    let mut raised: Vec<u32> = relief.iter().map(|v| v.saturating_add(1)).collect();
    reconstruct_values(lattice, relief, &mut raised, top.saturating_add(1), true);
    let c = components(
        lattice,
        |i| raised[i] > relief[i],
        |_, _| true,
        |n| n.checked_add(1),
    )?;
    Ok((c.labels, c.count))
}

/// Checks a relief: 8 or 32-bit, same size as `other`.
pub(crate) fn check_relief<A: Volume, B: Volume>(relief: &A, other: &B) -> Result<()> {
    if relief.depth() == Depth::Binary {
        return Err(unsupported("watershed", &[relief.depth()]));
    }
    check_same_size(relief, other)
}

fn segment<V: Volume>(
    relief: &V,
    markers: &mut V,
    grid: Grid,
    max_level: Option<u32>,
    lines: bool,
) -> Result<()> {
    check_relief(relief, markers)?;
    check_depth(markers, Depth::Long)?;
    let lattice = Lattice::of(relief, grid)?;
    let top = relief.depth().max_value();
    let cap = max_level.unwrap_or(u32::MAX);
    let f = relief.to_values()?;
    let result = flood(&lattice, &f, markers.to_values()?, top, cap, lines);
    markers.load_values(&result.labels)
}

/// Watershed of `relief` from the labelled markers of the 32-bit
/// `markers`, written in place: basins carry their marker label and the
/// lines [`WATERSHED_LINE`]. With `max_level`, pixels above that altitude
/// stay 0.
pub fn watershed_segment<V: Volume>(
    relief: &V,
    markers: &mut V,
    grid: Grid,
    max_level: Option<u32>,
) -> Result<()> {
    segment(relief, markers, grid, max_level, true)
}

/// Flood of `relief` from `markers` without watershed lines: every reached
/// pixel joins a basin.
pub fn basin_segment<V: Volume>(
    relief: &V,
    markers: &mut V,
    grid: Grid,
    max_level: Option<u32>,
) -> Result<()> {
    segment(relief, markers, grid, max_level, false)
}

/// Watershed lines of `relief` for the components of the 1-bit `markers`,
/// drawn in `out` (any depth) with its maximum value on a zero background.
/// Returns the number of markers.
pub fn marker_controlled_watershed<V: Volume>(
    relief: &V,
    markers: &V,
    out: &mut V,
    grid: Grid,
) -> Result<u32> {
    check_relief(relief, markers)?;
    check_same_size(relief, out)?;
    let (w, h, l) = relief.size();
    let mut labels = V::blank(w, h, l, Depth::Long)?;
    let count = label(markers, &mut labels, grid)?;
    watershed_segment(relief, &mut labels, grid, None)?;
    let line = out.depth().max_value();
    let values: Vec<u32> = labels
        .to_values()?
        .iter()
        .map(|&v| if v == WATERSHED_LINE { line } else { 0 })
        .collect();
    out.load_values(&values)?;
    Ok(count)
}

/// Flood of `relief` from all its regional minima; the 32-bit `out`
/// receives the level at which each pixel was reached, that is the
/// altitude on basin pixels and the flooding level on lines. Returns the
/// number of basins.
pub fn valued_watershed<V: Volume>(relief: &V, out: &mut V, grid: Grid) -> Result<u32> {
    check_relief(relief, out)?;
    check_depth(out, Depth::Long)?;
    let lattice = Lattice::of(relief, grid)?;
    let top = relief.depth().max_value();
    let f = relief.to_values()?;
    let (markers, count) = minima_labels(&lattice, &f, top)?;
    let result = flood(&lattice, &f, markers, top, u32::MAX, true);
    debug!("valued watershed: {} basins", count);
    out.load_values(&result.reached)?;
    Ok(count)
}

/// Parameters for the marker-controlled watershed
#[derive(Debug, Clone)]
pub struct WatershedParams {
    pub grid: Grid,
}

impl Default for WatershedParams {
    fn default() -> Self {
        Self { grid: Grid::Square }
    }
}

/// Marker-controlled watershed lines
#[derive(Debug, Clone, Default)]
pub struct Watershed;

impl Algorithm for Watershed {
    /// (relief, 1-bit markers)
    type Input = (Image, Image);
    /// 1-bit lines
    type Output = Image;
    type Params = WatershedParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Watershed"
    }

    fn description(&self) -> &'static str {
        "Watershed lines of a relief flooded from marker components"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        let (relief, markers) = input;
        let mut out = Image::new(relief.width(), relief.height(), Depth::Binary)?;
        marker_controlled_watershed(&relief, &markers, &mut out, params.grid)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valley() -> Image {
        let mut im = Image::new(5, 5, Depth::Grey).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                im.set_pixel(x, y, 10 * (y as i32 - 2).unsigned_abs()).unwrap();
            }
        }
        im
    }

    fn two_markers() -> Image {
        let mut m = Image::new(5, 5, Depth::Long).unwrap();
        m.set_pixel(0, 2, 1).unwrap();
        m.set_pixel(4, 2, 2).unwrap();
        m
    }

    #[test]
    fn test_line_between_two_markers() {
        let relief = valley();
        let mut m = two_markers();
        watershed_segment(&relief, &mut m, Grid::Square, None).unwrap();
        for y in 0..5 {
            assert_eq!(m.get_pixel(0, y).unwrap(), 1);
            assert_eq!(m.get_pixel(1, y).unwrap(), 1);
            assert_eq!(m.get_pixel(2, y).unwrap(), WATERSHED_LINE, "row {}", y);
            assert_eq!(m.get_pixel(3, y).unwrap(), 2);
            assert_eq!(m.get_pixel(4, y).unwrap(), 2);
        }
    }

    #[test]
    fn test_max_level_stops_the_flood() {
        let relief = valley();
        let mut m = two_markers();
        watershed_segment(&relief, &mut m, Grid::Square, Some(10)).unwrap();
        assert_eq!(m.get_pixel(0, 0).unwrap(), 0);
        assert_eq!(m.get_pixel(0, 1).unwrap(), 1);
    }

    #[test]
    fn test_basin_segment_has_no_lines() {
        let relief = valley();
        let mut m = two_markers();
        basin_segment(&relief, &mut m, Grid::Square, None).unwrap();
        let values = m.to_values().unwrap();
        assert!(values.iter().all(|&v| v == 1 || v == 2));
        assert_eq!(m.get_pixel(0, 0).unwrap(), 1);
        assert_eq!(m.get_pixel(4, 4).unwrap(), 2);
    }

    #[test]
    fn test_marker_controlled() {
        let relief = valley();
        let mut markers = Image::new(5, 5, Depth::Binary).unwrap();
        markers.set_pixel(0, 2, 1).unwrap();
        markers.set_pixel(4, 2, 1).unwrap();
        let mut out = Image::new(5, 5, Depth::Grey).unwrap();
        let n = marker_controlled_watershed(&relief, &markers, &mut out, Grid::Square).unwrap();
        assert_eq!(n, 2);
        assert_eq!(out.get_pixel(2, 3).unwrap(), 255);
        assert_eq!(out.get_pixel(1, 3).unwrap(), 0);
        let lines = Watershed.execute_default((relief, markers)).unwrap();
        assert_eq!(lines.to_values().unwrap().iter().sum::<u32>(), 5);
    }

    #[test]
    fn test_valued_watershed_on_a_ramp() {
        let mut relief = Image::new(11, 3, Depth::Grey).unwrap();
        for y in 0..3 {
            for x in 0..11 {
                relief.set_pixel(x, y, x as u32).unwrap();
            }
        }
        let mut out = Image::new(11, 3, Depth::Long).unwrap();
        let n = valued_watershed(&relief, &mut out, Grid::Square).unwrap();
        assert_eq!(n, 1);
        for x in 0..11 {
            assert_eq!(out.get_pixel(x, 1).unwrap(), x as u32);
        }
    }

    #[test]
    fn test_binary_relief_rejected() {
        let relief = Image::new(3, 3, Depth::Binary).unwrap();
        let mut m = Image::new(3, 3, Depth::Long).unwrap();
        assert!(watershed_segment(&relief, &mut m, Grid::Square, None).is_err());
    }
}
