//! Structuring elements: direction sets over a grid
//!
//! A structuring element is a set of direction codes of one grid. The unit
//! dilation by an element is the sup of the one-pixel shifts in each of
//! its directions; larger elements come from iterating it.

use crate::error::{Error, Result};
use crate::raster::{DirSet, Grid};

/// Direction set over a grid, direction 0 standing for the pixel itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructuringElement {
    grid: Grid,
    directions: DirSet,
}

impl StructuringElement {
    /// Create an element; every direction must belong to `grid`.
    pub fn new(grid: Grid, directions: DirSet) -> Result<Self> {
        if let Some(d) = directions.iter().find(|&d| d > grid.neighbor_count()) {
            return Err(Error::InvalidDirection {
                direction: d,
                grid: grid.name(),
            });
        }
        Ok(Self { grid, directions })
    }

    fn from_list(grid: Grid, dirs: &[usize]) -> Self {
        Self {
            grid,
            directions: dirs.iter().copied().collect(),
        }
    }

    /// The pixel and all its neighbors.
    pub fn full(grid: Grid) -> Self {
        Self {
            grid,
            directions: grid.full_set(),
        }
    }

    /// 3x3 square on the square grid
    pub fn square3x3() -> Self {
        Self::full(Grid::Square)
    }

    /// 2x2 square anchored at its top-left pixel
    pub fn square2x2() -> Self {
        Self::from_list(Grid::Square, &[0, 3, 4, 5])
    }

    /// Pixel and its four edge neighbors on the square grid
    pub fn cross() -> Self {
        Self::from_list(Grid::Square, &[0, 1, 3, 5, 7])
    }

    /// Pixel and its six hexagonal neighbors
    pub fn hexagon() -> Self {
        Self::full(Grid::Hexagonal)
    }

    /// Upward triangle on the hexagonal grid
    pub fn triangle() -> Self {
        Self::from_list(Grid::Hexagonal, &[0, 1, 2])
    }

    /// 3x3x3 cube
    pub fn cube3x3x3() -> Self {
        Self::full(Grid::Cubic)
    }

    /// 2x2x2 cube extending towards +x, +y and the next plane
    pub fn cube2x2x2() -> Self {
        Self::from_list(Grid::Cubic, &[0, 3, 4, 5, 9, 12, 13, 14])
    }

    /// Pixel and its twelve face-centred cubic neighbors
    pub fn cuboctahedron() -> Self {
        Self::full(Grid::FaceCenteredCubic)
    }

    /// Pixel and its fourteen centred cubic neighbors
    pub fn centered_cube() -> Self {
        Self::full(Grid::CenteredCubic)
    }

    /// Two-pixel segment `{0, d}`.
    pub fn segment(grid: Grid, d: usize) -> Result<Self> {
        grid.check(d)?;
        Ok(Self::from_list(grid, &[0, d]))
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn directions(&self) -> DirSet {
        self.directions
    }

    pub fn contains(&self, d: usize) -> bool {
        self.directions.contains(d)
    }

    /// Whether the element is the whole neighborhood of its grid.
    pub fn is_homogeneous(&self) -> bool {
        self.directions == self.grid.full_set()
    }

    /// Element reflected through its center.
    pub fn transpose(&self) -> Self {
        Self {
            grid: self.grid,
            directions: self.grid.transpose_set(self.directions),
        }
    }

    /// Element rotated `steps` times in the cyclic order of the grid.
    pub fn rotate(&self, steps: isize) -> Result<Self> {
        let mut out = DirSet::EMPTY;
        for d in self.directions.iter() {
            out.insert(self.grid.rotate_by(d, steps)?);
        }
        Ok(Self {
            grid: self.grid,
            directions: out,
        })
    }

    /// Fail unless the element can process images of `dims` dimensions.
    pub fn validate(&self, dims: usize) -> Result<()> {
        self.grid.check_dims(dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_predefined_sizes() {
        assert_eq!(StructuringElement::square3x3().directions().len(), 9);
        assert_eq!(StructuringElement::cross().directions().len(), 5);
        assert_eq!(StructuringElement::hexagon().directions().len(), 7);
        assert_eq!(StructuringElement::cube2x2x2().directions().len(), 8);
        assert_eq!(StructuringElement::cuboctahedron().directions().len(), 13);
        assert_eq!(StructuringElement::centered_cube().directions().len(), 15);
        assert!(StructuringElement::cube3x3x3().is_homogeneous());
        assert!(!StructuringElement::cross().is_homogeneous());
    }

    #[test]
    fn test_transpose_square2x2() {
        let t = StructuringElement::square2x2().transpose();
        let dirs: Vec<usize> = t.directions().iter().collect();
        assert_eq!(dirs, vec![0, 1, 7, 8]);
        assert_eq!(t.transpose(), StructuringElement::square2x2());
    }

    #[test]
    fn test_rotate_triangle() {
        let t = StructuringElement::triangle().rotate(3).unwrap();
        let dirs: Vec<usize> = t.directions().iter().collect();
        assert_eq!(dirs, vec![0, 4, 5]);
    }

    #[test]
    fn test_invalid_directions() {
        let e = StructuringElement::new(Grid::Hexagonal, DirSet::single(7)).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidDirection);
        assert!(StructuringElement::segment(Grid::Square, 9).is_err());
        let e = StructuringElement::hexagon().validate(3).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidGrid);
    }
}
