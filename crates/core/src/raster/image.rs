//! Depth-tagged images and volumes

use crate::error::{try_zeroed, Error, Result};
use crate::raster::{BitRaster, Depth, Layer, Raster};

/// A 2D image of one of the three depths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    Binary(BitRaster),
    Grey(Raster<u8>),
    Long(Raster<u32>),
}

/// Borrowed planes of a volume, tagged by depth.
#[derive(Debug, Clone, Copy)]
pub enum PlanesRef<'a> {
    Binary(&'a [BitRaster]),
    Grey(&'a [Raster<u8>]),
    Long(&'a [Raster<u32>]),
}

/// Mutably borrowed planes of a volume, tagged by depth.
#[derive(Debug)]
pub enum PlanesMut<'a> {
    Binary(&'a mut [BitRaster]),
    Grey(&'a mut [Raster<u8>]),
    Long(&'a mut [Raster<u32>]),
}

/// Common view of 2D images (one plane) and 3D images (several planes).
///
/// Operators are written once against this trait; the grid they receive
/// must have the same dimensionality as `DIMS`.
pub trait Volume: Clone + Send + Sync + Sized {
    const DIMS: usize;

    /// Allocate a zeroed volume.
    fn blank(width: usize, height: usize, length: usize, depth: Depth) -> Result<Self>;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn length(&self) -> usize;
    fn depth(&self) -> Depth;

    fn planes(&self) -> PlanesRef<'_>;
    fn planes_mut(&mut self) -> PlanesMut<'_>;

    /// (width, height, length)
    fn size(&self) -> (usize, usize, usize) {
        (self.width(), self.height(), self.length())
    }

    /// Number of pixels over all planes.
    fn pixel_count(&self) -> usize {
        self.width() * self.height() * self.length()
    }

    /// Zeroed volume of the same size at another depth.
    fn blank_like(&self, depth: Depth) -> Result<Self> {
        Self::blank(self.width(), self.height(), self.length(), depth)
    }

    /// Pixel value at (x, y) of plane z.
    fn get_at(&self, x: usize, y: usize, z: usize) -> Result<u32> {
        self.check_at(x, y, z)?;
        Ok(match self.planes() {
            PlanesRef::Binary(p) => BitRaster::value(p[z].row(y), x),
            PlanesRef::Grey(p) => Raster::<u8>::value(p[z].row(y), x),
            PlanesRef::Long(p) => Raster::<u32>::value(p[z].row(y), x),
        })
    }

    /// Write pixel (x, y) of plane z, `value` masked to the depth.
    fn set_at(&mut self, x: usize, y: usize, z: usize, value: u32) -> Result<()> {
        self.check_at(x, y, z)?;
        let value = self.depth().mask(value);
        match self.planes_mut() {
            PlanesMut::Binary(p) => BitRaster::set_value(p[z].row_mut(y), x, value),
            PlanesMut::Grey(p) => Raster::<u8>::set_value(p[z].row_mut(y), x, value),
            PlanesMut::Long(p) => Raster::<u32>::set_value(p[z].row_mut(y), x, value),
        }
        Ok(())
    }

    fn check_at(&self, x: usize, y: usize, z: usize) -> Result<()> {
        if x >= self.width() || y >= self.height() || z >= self.length() {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                z,
                width: self.width(),
                height: self.height(),
                length: self.length(),
            });
        }
        Ok(())
    }

    /// Set every pixel to `value` masked to the depth.
    fn fill(&mut self, value: u32) {
        let width = self.width();
        let value = self.depth().mask(value);
        fn go<L: Layer>(planes: &mut [L], value: u32, width: usize) {
            for p in planes {
                for y in 0..p.height() {
                    L::fill_row(p.row_mut(y), value, width);
                }
            }
        }
        match self.planes_mut() {
            PlanesMut::Binary(p) => go(p, value, width),
            PlanesMut::Grey(p) => go(p, value, width),
            PlanesMut::Long(p) => go(p, value, width),
        }
    }

    /// Set every pixel to 0.
    fn reset(&mut self) {
        self.fill(0);
    }

    /// All pixel values, plane by plane, row-major.
    fn to_values(&self) -> Result<Vec<u32>> {
        let width = self.width();
        let mut out = try_zeroed::<u32>(self.pixel_count())?;
        fn go<L: Layer>(planes: &[L], out: &mut [u32], width: usize) {
            let mut i = 0;
            for p in planes {
                for y in 0..p.height() {
                    let row = p.row(y);
                    for x in 0..width {
                        out[i] = L::value(row, x);
                        i += 1;
                    }
                }
            }
        }
        match self.planes() {
            PlanesRef::Binary(p) => go(p, &mut out, width),
            PlanesRef::Grey(p) => go(p, &mut out, width),
            PlanesRef::Long(p) => go(p, &mut out, width),
        }
        Ok(out)
    }

    /// Overwrite every pixel from values laid out as in [`Volume::to_values`].
    /// Values are masked to the depth.
    fn load_values(&mut self, values: &[u32]) -> Result<()> {
        if values.len() != self.pixel_count() {
            return Err(Error::InvalidParameter {
                name: "values",
                value: values.len().to_string(),
                reason: format!("expected {} values", self.pixel_count()),
            });
        }
        let width = self.width();
        let mask = self.depth().max_value();
        fn go<L: Layer>(planes: &mut [L], values: &[u32], width: usize, mask: u32) {
            let mut i = 0;
            for p in planes {
                for y in 0..p.height() {
                    let row = p.row_mut(y);
                    for x in 0..width {
                        L::set_value(row, x, values[i] & mask);
                        i += 1;
                    }
                }
            }
        }
        match self.planes_mut() {
            PlanesMut::Binary(p) => go(p, values, width, mask),
            PlanesMut::Grey(p) => go(p, values, width, mask),
            PlanesMut::Long(p) => go(p, values, width, mask),
        }
        Ok(())
    }
}

/// Fail unless both volumes have the same width, height and length.
pub fn check_same_size<A: Volume, B: Volume>(a: &A, b: &B) -> Result<()> {
    if a.size() != b.size() {
        return Err(Error::SizeMismatch {
            expected: a.size(),
            actual: b.size(),
        });
    }
    Ok(())
}

/// Fail unless `v` has the given depth.
pub fn check_depth<V: Volume>(v: &V, depth: Depth) -> Result<()> {
    if v.depth() != depth {
        return Err(Error::DepthMismatch {
            expected: depth.bits(),
            actual: v.depth().bits(),
        });
    }
    Ok(())
}

impl Image {
    /// Create a zero-filled image.
    pub fn new(width: usize, height: usize, depth: Depth) -> Result<Self> {
        Ok(match depth {
            Depth::Binary => Image::Binary(BitRaster::new(width, height)?),
            Depth::Grey => Image::Grey(Raster::new(width, height)?),
            Depth::Long => Image::Long(Raster::new(width, height)?),
        })
    }

    /// Pixel value at (x, y)
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<u32> {
        self.get_at(x, y, 0)
    }

    /// Set pixel (x, y); the value is masked to the depth.
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u32) -> Result<()> {
        self.set_at(x, y, 0, value)
    }

    pub fn as_binary(&self) -> Result<&BitRaster> {
        match self {
            Image::Binary(b) => Ok(b),
            other => Err(depth_error(Depth::Binary, other.depth())),
        }
    }

    pub fn as_grey(&self) -> Result<&Raster<u8>> {
        match self {
            Image::Grey(r) => Ok(r),
            other => Err(depth_error(Depth::Grey, other.depth())),
        }
    }

    pub fn as_long(&self) -> Result<&Raster<u32>> {
        match self {
            Image::Long(r) => Ok(r),
            other => Err(depth_error(Depth::Long, other.depth())),
        }
    }
}

fn depth_error(expected: Depth, actual: Depth) -> Error {
    Error::DepthMismatch {
        expected: expected.bits(),
        actual: actual.bits(),
    }
}

impl From<BitRaster> for Image {
    fn from(r: BitRaster) -> Self {
        Image::Binary(r)
    }
}

impl From<Raster<u8>> for Image {
    fn from(r: Raster<u8>) -> Self {
        Image::Grey(r)
    }
}

impl From<Raster<u32>> for Image {
    fn from(r: Raster<u32>) -> Self {
        Image::Long(r)
    }
}

impl Volume for Image {
    const DIMS: usize = 2;

    fn blank(width: usize, height: usize, length: usize, depth: Depth) -> Result<Self> {
        if length != 1 {
            return Err(Error::InvalidDimensions {
                width,
                height,
                length,
            });
        }
        Image::new(width, height, depth)
    }

    fn width(&self) -> usize {
        match self {
            Image::Binary(r) => r.width(),
            Image::Grey(r) => r.width(),
            Image::Long(r) => r.width(),
        }
    }

    fn height(&self) -> usize {
        match self {
            Image::Binary(r) => r.height(),
            Image::Grey(r) => r.height(),
            Image::Long(r) => r.height(),
        }
    }

    fn length(&self) -> usize {
        1
    }

    fn depth(&self) -> Depth {
        match self {
            Image::Binary(_) => Depth::Binary,
            Image::Grey(_) => Depth::Grey,
            Image::Long(_) => Depth::Long,
        }
    }

    fn planes(&self) -> PlanesRef<'_> {
        match self {
            Image::Binary(r) => PlanesRef::Binary(std::slice::from_ref(r)),
            Image::Grey(r) => PlanesRef::Grey(std::slice::from_ref(r)),
            Image::Long(r) => PlanesRef::Long(std::slice::from_ref(r)),
        }
    }

    fn planes_mut(&mut self) -> PlanesMut<'_> {
        match self {
            Image::Binary(r) => PlanesMut::Binary(std::slice::from_mut(r)),
            Image::Grey(r) => PlanesMut::Grey(std::slice::from_mut(r)),
            Image::Long(r) => PlanesMut::Long(std::slice::from_mut(r)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stack {
    Binary(Vec<BitRaster>),
    Grey(Vec<Raster<u8>>),
    Long(Vec<Raster<u32>>),
}

/// A 3D image: a non-empty stack of planes sharing width, height and depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image3D {
    width: usize,
    height: usize,
    stack: Stack,
}

fn stack_of<L: Layer>(width: usize, height: usize, length: usize) -> Result<Vec<L>> {
    let mut planes = Vec::new();
    planes
        .try_reserve_exact(length)
        .map_err(|_| Error::AllocationFailure { bytes: length })?;
    for _ in 0..length {
        planes.push(L::blank(width, height)?);
    }
    Ok(planes)
}

impl Image3D {
    /// Create a zero-filled volume of `length` planes.
    pub fn new(width: usize, height: usize, length: usize, depth: Depth) -> Result<Self> {
        if width == 0 || height == 0 || length == 0 {
            return Err(Error::InvalidDimensions {
                width,
                height,
                length,
            });
        }
        let stack = match depth {
            Depth::Binary => Stack::Binary(stack_of(width, height, length)?),
            Depth::Grey => Stack::Grey(stack_of(width, height, length)?),
            Depth::Long => Stack::Long(stack_of(width, height, length)?),
        };
        Ok(Self {
            width,
            height,
            stack,
        })
    }

    /// Stack 2D images; they must agree on size and depth.
    pub fn from_planes(planes: Vec<Image>) -> Result<Self> {
        let first = planes.first().ok_or(Error::InvalidDimensions {
            width: 0,
            height: 0,
            length: 0,
        })?;
        let (width, height, depth) = (first.width(), first.height(), first.depth());
        for p in &planes {
            check_same_size(first, p)?;
            if p.depth() != depth {
                return Err(depth_error(depth, p.depth()));
            }
        }
        let stack = match depth {
            Depth::Binary => Stack::Binary(
                planes
                    .into_iter()
                    .filter_map(|p| match p {
                        Image::Binary(r) => Some(r),
                        _ => None,
                    })
                    .collect(),
            ),
            Depth::Grey => Stack::Grey(
                planes
                    .into_iter()
                    .filter_map(|p| match p {
                        Image::Grey(r) => Some(r),
                        _ => None,
                    })
                    .collect(),
            ),
            Depth::Long => Stack::Long(
                planes
                    .into_iter()
                    .filter_map(|p| match p {
                        Image::Long(r) => Some(r),
                        _ => None,
                    })
                    .collect(),
            ),
        };
        Ok(Self {
            width,
            height,
            stack,
        })
    }

    /// Copy of plane `z` as a 2D image.
    pub fn plane(&self, z: usize) -> Result<Image> {
        self.check_plane(z)?;
        Ok(match &self.stack {
            Stack::Binary(p) => Image::Binary(p[z].clone()),
            Stack::Grey(p) => Image::Grey(p[z].clone()),
            Stack::Long(p) => Image::Long(p[z].clone()),
        })
    }

    /// Replace plane `z` with a 2D image of the same size and depth.
    pub fn set_plane(&mut self, z: usize, image: &Image) -> Result<()> {
        self.check_plane(z)?;
        if image.width() != self.width || image.height() != self.height {
            return Err(Error::SizeMismatch {
                expected: (self.width, self.height, 1),
                actual: image.size(),
            });
        }
        let depth = self.depth();
        match (&mut self.stack, image) {
            (Stack::Binary(p), Image::Binary(r)) => p[z] = r.clone(),
            (Stack::Grey(p), Image::Grey(r)) => p[z] = r.clone(),
            (Stack::Long(p), Image::Long(r)) => p[z] = r.clone(),
            (_, other) => return Err(depth_error(depth, other.depth())),
        }
        Ok(())
    }

    fn check_plane(&self, z: usize) -> Result<()> {
        if z >= self.length() {
            return Err(Error::ValueOutOfRange {
                name: "plane",
                value: z as u64,
                max: self.length() as u64 - 1,
            });
        }
        Ok(())
    }

    /// Pixel value at (x, y, z)
    pub fn get_pixel(&self, x: usize, y: usize, z: usize) -> Result<u32> {
        self.get_at(x, y, z)
    }

    /// Set pixel (x, y, z); the value is masked to the depth.
    pub fn set_pixel(&mut self, x: usize, y: usize, z: usize, value: u32) -> Result<()> {
        self.set_at(x, y, z, value)
    }
}

impl Volume for Image3D {
    const DIMS: usize = 3;

    fn blank(width: usize, height: usize, length: usize, depth: Depth) -> Result<Self> {
        Image3D::new(width, height, length, depth)
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn length(&self) -> usize {
        match &self.stack {
            Stack::Binary(p) => p.len(),
            Stack::Grey(p) => p.len(),
            Stack::Long(p) => p.len(),
        }
    }

    fn depth(&self) -> Depth {
        match &self.stack {
            Stack::Binary(_) => Depth::Binary,
            Stack::Grey(_) => Depth::Grey,
            Stack::Long(_) => Depth::Long,
        }
    }

    fn planes(&self) -> PlanesRef<'_> {
        match &self.stack {
            Stack::Binary(p) => PlanesRef::Binary(p),
            Stack::Grey(p) => PlanesRef::Grey(p),
            Stack::Long(p) => PlanesRef::Long(p),
        }
    }

    fn planes_mut(&mut self) -> PlanesMut<'_> {
        match &mut self.stack {
            Stack::Binary(p) => PlanesMut::Binary(p),
            Stack::Grey(p) => PlanesMut::Grey(p),
            Stack::Long(p) => PlanesMut::Long(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_new_is_zeroed() {
        for depth in [Depth::Binary, Depth::Grey, Depth::Long] {
            let im = Image::new(7, 3, depth).unwrap();
            assert_eq!(im.depth(), depth);
            assert!(im.to_values().unwrap().iter().all(|&v| v == 0));
        }
    }

    #[test]
    fn test_set_pixel_masks_value() {
        let mut im = Image::new(4, 4, Depth::Grey).unwrap();
        im.set_pixel(1, 2, 0x1ff).unwrap();
        assert_eq!(im.get_pixel(1, 2).unwrap(), 0xff);
        let mut b = Image::new(4, 4, Depth::Binary).unwrap();
        b.set_pixel(3, 3, 2).unwrap();
        assert_eq!(b.get_pixel(3, 3).unwrap(), 0);
        assert_eq!(b.get_pixel(4, 0).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_values_roundtrip() {
        let mut im = Image::new(3, 2, Depth::Long).unwrap();
        im.load_values(&[1, 2, 3, 4, 5, u32::MAX]).unwrap();
        assert_eq!(im.get_pixel(2, 1).unwrap(), u32::MAX);
        assert_eq!(im.to_values().unwrap(), vec![1, 2, 3, 4, 5, u32::MAX]);
        assert!(im.load_values(&[1]).is_err());
    }

    #[test]
    fn test_fill_and_reset() {
        let mut im = Image3D::new(5, 4, 3, Depth::Binary).unwrap();
        im.fill(1);
        assert_eq!(im.to_values().unwrap().iter().sum::<u32>(), 60);
        im.reset();
        assert_eq!(im.get_pixel(4, 3, 2).unwrap(), 0);
    }

    #[test]
    fn test_from_planes_checks_uniformity() {
        let a = Image::new(4, 4, Depth::Grey).unwrap();
        let b = Image::new(4, 4, Depth::Long).unwrap();
        let c = Image::new(4, 5, Depth::Grey).unwrap();
        assert_eq!(
            Image3D::from_planes(vec![a.clone(), b]).unwrap_err().kind(),
            ErrorKind::BadDepth
        );
        assert_eq!(
            Image3D::from_planes(vec![a.clone(), c]).unwrap_err().kind(),
            ErrorKind::BadSize
        );
        assert!(Image3D::from_planes(Vec::new()).is_err());
        let v = Image3D::from_planes(vec![a.clone(), a]).unwrap();
        assert_eq!(v.size(), (4, 4, 2));
    }

    #[test]
    fn test_plane_access() {
        let mut v = Image3D::new(3, 3, 2, Depth::Grey).unwrap();
        let mut p = Image::new(3, 3, Depth::Grey).unwrap();
        p.set_pixel(1, 1, 42).unwrap();
        v.set_plane(1, &p).unwrap();
        assert_eq!(v.get_pixel(1, 1, 1).unwrap(), 42);
        assert_eq!(v.plane(1).unwrap(), p);
        assert_eq!(v.plane(2).unwrap_err().kind(), ErrorKind::OutOfRange);
        let wrong = Image::new(3, 3, Depth::Binary).unwrap();
        assert_eq!(v.set_plane(0, &wrong).unwrap_err().kind(), ErrorKind::BadDepth);
    }

    #[test]
    fn test_image_rejects_length() {
        assert!(Image::blank(2, 2, 3, Depth::Grey).is_err());
        assert!(Image3D::new(2, 2, 0, Depth::Grey).is_err());
    }
}
