//! Double structuring elements

use morpho_core::raster::{DirSet, Grid};
use morpho_core::{Error, Result};

/// A pair of disjoint direction sets: the neighbors that must be set and
/// the neighbors that must be clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DoubleStructuringElement {
    grid: Grid,
    foreground: DirSet,
    background: DirSet,
}

impl DoubleStructuringElement {
    pub fn new(grid: Grid, foreground: DirSet, background: DirSet) -> Result<Self> {
        if let Some(d) = foreground
            .union(background)
            .iter()
            .find(|&d| d > grid.neighbor_count())
        {
            return Err(Error::InvalidDirection {
                direction: d,
                grid: grid.name(),
            });
        }
        if !foreground.intersection(background).is_empty() {
            return Err(Error::InvalidParameter {
                name: "background",
                value: format!("{:#x}", background.bits()),
                reason: "foreground and background directions overlap".into(),
            });
        }
        Ok(Self {
            grid,
            foreground,
            background,
        })
    }

    fn from_lists(grid: Grid, foreground: &[usize], background: &[usize]) -> Self {
        Self {
            grid,
            foreground: foreground.iter().copied().collect(),
            background: background.iter().copied().collect(),
        }
    }

    /// The homotopic thinning element: three neighbors on one side clear,
    /// the pixel and the opposite side set. 2D grids only.
    pub fn d_element(grid: Grid) -> Result<Self> {
        match grid {
            Grid::Square => Ok(Self::from_lists(grid, &[0, 4, 5, 6], &[8, 1, 2])),
            Grid::Hexagonal => Ok(Self::from_lists(grid, &[0, 5], &[1, 2, 3])),
            _ => Err(Error::InvalidGrid {
                grid: grid.name(),
                reason: "the D element is defined on 2D grids".into(),
            }),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn foreground(&self) -> DirSet {
        self.foreground
    }

    pub fn background(&self) -> DirSet {
        self.background
    }

    /// Both sets reflected through the center.
    pub fn transpose(&self) -> Self {
        Self {
            grid: self.grid,
            foreground: self.grid.transpose_set(self.foreground),
            background: self.grid.transpose_set(self.background),
        }
    }

    /// Both sets rotated `steps` times.
    pub fn rotate(&self, steps: isize) -> Result<Self> {
        let turn = |set: DirSet| -> Result<DirSet> {
            let mut out = DirSet::EMPTY;
            for d in set.iter() {
                out.insert(self.grid.rotate_by(d, steps)?);
            }
            Ok(out)
        };
        Ok(Self {
            grid: self.grid,
            foreground: turn(self.foreground)?,
            background: turn(self.background)?,
        })
    }

    /// Number of distinct rotations of the grid's in-plane directions.
    pub fn rotation_period(&self) -> Result<usize> {
        let mut period = 1;
        let mut d = self.grid.rotate(1)?;
        while d != 1 {
            d = self.grid.rotate(d)?;
            period += 1;
        }
        Ok(period)
    }
}
