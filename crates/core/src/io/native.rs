//! Native image container
//!
//! A 20-byte header followed by the raw layout of [`super::raw`]:
//!
//! | offset | size | field |
//! |--------|------|-------|
//! | 0 | 4 | magic `MRPH` |
//! | 4 | 1 | format version (1) |
//! | 5 | 1 | depth in bits (1, 8 or 32) |
//! | 6 | 2 | reserved, zero |
//! | 8 | 4 | width, little endian |
//! | 12 | 4 | height, little endian |
//! | 16 | 4 | length (planes), little endian |

use crate::error::{Error, Result};
use crate::io::raw::{extract_raw, load_raw, raw_size};
use crate::raster::{Depth, Image, Image3D, Volume};
use std::fs;
use std::path::Path;

const MAGIC: &[u8; 4] = b"MRPH";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 20;

/// Geometry recorded in a container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: usize,
    pub height: usize,
    pub length: usize,
    pub depth: Depth,
}

impl Header {
    fn encode(&self) -> Result<[u8; HEADER_LEN]> {
        let field = |name: &'static str, v: usize| -> Result<[u8; 4]> {
            u32::try_from(v)
                .map(u32::to_le_bytes)
                .map_err(|_| Error::ValueOutOfRange {
                    name,
                    value: v as u64,
                    max: u32::MAX as u64,
                })
        };
        let mut out = [0u8; HEADER_LEN];
        out[..4].copy_from_slice(MAGIC);
        out[4] = VERSION;
        out[5] = self.depth.bits() as u8;
        out[8..12].copy_from_slice(&field("width", self.width)?);
        out[12..16].copy_from_slice(&field("height", self.height)?);
        out[16..20].copy_from_slice(&field("length", self.length)?);
        Ok(out)
    }

    /// Parse the header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(Error::Format(format!(
                "truncated header ({} bytes)",
                data.len()
            )));
        }
        if &data[..4] != MAGIC {
            return Err(Error::Format("missing MRPH signature".into()));
        }
        if data[4] != VERSION {
            return Err(Error::Format(format!("unsupported version {}", data[4])));
        }
        let depth = Depth::from_bits(data[5] as u32)
            .ok_or_else(|| Error::Format(format!("unsupported depth {}", data[5])))?;
        let read = |at: usize| {
            let mut b = [0u8; 4];
            b.copy_from_slice(&data[at..at + 4]);
            u32::from_le_bytes(b) as usize
        };
        Ok(Self {
            width: read(8),
            height: read(12),
            length: read(16),
            depth,
        })
    }
}

/// Encode a 2D or 3D image into a container buffer.
pub fn write_to_buffer<V: Volume>(v: &V) -> Result<Vec<u8>> {
    let header = Header {
        width: v.width(),
        height: v.height(),
        length: v.length(),
        depth: v.depth(),
    };
    let mut out = header.encode()?.to_vec();
    out.extend_from_slice(&extract_raw(v)?);
    Ok(out)
}

/// Decode a container buffer into a volume (a 2D image decodes to one plane).
pub fn read_from_buffer(data: &[u8]) -> Result<Image3D> {
    let header = Header::parse(data)?;
    let body = &data[HEADER_LEN..];
    let expected = raw_size(header.width, header.height, header.length, header.depth);
    if body.len() != expected {
        return Err(Error::Format(format!(
            "expected {} bytes of pixels, found {}",
            expected,
            body.len()
        )));
    }
    let mut v = Image3D::new(header.width, header.height, header.length, header.depth)?;
    load_raw(&mut v, body)?;
    Ok(v)
}

/// Read a 2D image; fails if the file holds more than one plane.
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<Image> {
    let v = read_image_3d(path)?;
    if v.length() != 1 {
        return Err(Error::Format(format!(
            "file holds {} planes, expected a 2D image",
            v.length()
        )));
    }
    v.plane(0)
}

/// Read a 3D image.
pub fn read_image_3d<P: AsRef<Path>>(path: P) -> Result<Image3D> {
    let data = fs::read(path.as_ref())?;
    read_from_buffer(&data)
}

/// Write a 2D or 3D image.
pub fn write_image<V: Volume, P: AsRef<Path>>(path: P, v: &V) -> Result<()> {
    fs::write(path.as_ref(), write_to_buffer(v)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_buffer_roundtrip() {
        let mut im = Image::new(5, 3, Depth::Long).unwrap();
        im.set_pixel(4, 2, 123_456).unwrap();
        let buf = write_to_buffer(&im).unwrap();
        assert_eq!(&buf[..4], b"MRPH");
        assert_eq!(buf.len(), 20 + 5 * 3 * 4);
        let back = read_from_buffer(&buf).unwrap();
        assert_eq!(back.plane(0).unwrap(), im);
    }

    #[test]
    fn test_corrupt_headers() {
        assert_eq!(read_from_buffer(b"MRPH").unwrap_err().kind(), ErrorKind::Io);
        let mut buf = write_to_buffer(&Image::new(2, 2, Depth::Grey).unwrap()).unwrap();
        buf[5] = 16;
        assert!(matches!(read_from_buffer(&buf), Err(Error::Format(_))));
        buf[5] = 8;
        buf.pop();
        assert!(matches!(read_from_buffer(&buf), Err(Error::Format(_))));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("morpho-native-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cube.mrph");
        let mut v = Image3D::new(3, 3, 2, Depth::Binary).unwrap();
        v.set_pixel(2, 1, 1, 1).unwrap();
        write_image(&path, &v).unwrap();
        assert_eq!(read_image_3d(&path).unwrap(), v);
        assert!(read_image(&path).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
