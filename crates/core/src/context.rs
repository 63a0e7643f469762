//! Ambient processing defaults
//!
//! Operators never read process-wide state. Callers that want "current
//! grid" semantics keep a [`Context`] and pass its values explicitly.

use crate::error::{Error, Result};
use crate::raster::{Depth, Edge, Grid, Image, Image3D, StructuringElement};

/// Default grids, default edge mode and the image naming counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    grid_2d: Grid,
    grid_3d: Grid,
    edge: Edge,
    next_image: u64,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            grid_2d: Grid::Square,
            grid_3d: Grid::FaceCenteredCubic,
            edge: Edge::Filled,
            next_image: 0,
        }
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default grid for images of `dims` dimensions.
    pub fn default_grid(&self, dims: usize) -> Result<Grid> {
        match dims {
            2 => Ok(self.grid_2d),
            3 => Ok(self.grid_3d),
            _ => Err(Error::InvalidParameter {
                name: "dims",
                value: dims.to_string(),
                reason: "images have 2 or 3 dimensions".into(),
            }),
        }
    }

    /// Replace the default grid of the grid's own dimensionality and
    /// return the previous one.
    pub fn set_default_grid(&mut self, grid: Grid) -> Grid {
        let slot = if grid.dims() == 2 {
            &mut self.grid_2d
        } else {
            &mut self.grid_3d
        };
        std::mem::replace(slot, grid)
    }

    pub fn default_edge(&self) -> Edge {
        self.edge
    }

    pub fn set_default_edge(&mut self, edge: Edge) -> Edge {
        std::mem::replace(&mut self.edge, edge)
    }

    /// Full neighborhood of the default grid.
    pub fn default_element(&self, dims: usize) -> Result<StructuringElement> {
        Ok(StructuringElement::full(self.default_grid(dims)?))
    }

    /// Next automatic image name (`image0`, `image1`, ...).
    pub fn next_image_name(&mut self) -> String {
        let name = format!("image{}", self.next_image);
        self.next_image += 1;
        name
    }

    /// Allocate a zeroed 2D image together with an automatic name.
    pub fn create_image(&mut self, width: usize, height: usize, depth: Depth) -> Result<(String, Image)> {
        let image = Image::new(width, height, depth)?;
        Ok((self.next_image_name(), image))
    }

    /// Allocate a zeroed 3D image together with an automatic name.
    pub fn create_image_3d(
        &mut self,
        width: usize,
        height: usize,
        length: usize,
        depth: Depth,
    ) -> Result<(String, Image3D)> {
        let image = Image3D::new(width, height, length, depth)?;
        Ok((self.next_image_name(), image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Volume;

    #[test]
    fn test_defaults() {
        let ctx = Context::new();
        assert_eq!(ctx.default_grid(2).unwrap(), Grid::Square);
        assert_eq!(ctx.default_grid(3).unwrap(), Grid::FaceCenteredCubic);
        assert_eq!(ctx.default_edge(), Edge::Filled);
        assert!(ctx.default_grid(4).is_err());
    }

    #[test]
    fn test_set_default_grid_by_dimension() {
        let mut ctx = Context::new();
        assert_eq!(ctx.set_default_grid(Grid::Hexagonal), Grid::Square);
        assert_eq!(ctx.set_default_grid(Grid::Cubic), Grid::FaceCenteredCubic);
        assert_eq!(ctx.default_grid(2).unwrap(), Grid::Hexagonal);
        assert_eq!(ctx.default_element(3).unwrap(), StructuringElement::cube3x3x3());
    }

    #[test]
    fn test_image_names_advance() {
        let mut ctx = Context::new();
        let (a, im) = ctx.create_image(4, 3, Depth::Grey).unwrap();
        let (b, vol) = ctx.create_image_3d(4, 3, 2, Depth::Binary).unwrap();
        assert_eq!(a, "image0");
        assert_eq!(b, "image1");
        assert_eq!(im.size(), (4, 3, 1));
        assert_eq!(vol.size(), (4, 3, 2));
    }
}
