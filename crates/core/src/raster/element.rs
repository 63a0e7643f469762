//! Pixel element trait and depth tags

use num_traits::{Bounded, PrimInt, Unsigned, WrappingAdd, WrappingMul, WrappingSub};
use std::fmt::Debug;

/// Pixel depth of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    /// 1-bit packed
    Binary,
    /// 8-bit greyscale
    Grey,
    /// 32-bit
    Long,
}

impl Depth {
    /// Bits per pixel.
    pub const fn bits(self) -> u32 {
        match self {
            Depth::Binary => 1,
            Depth::Grey => 8,
            Depth::Long => 32,
        }
    }

    /// Largest pixel value, also the value of FILLED virtual pixels.
    pub const fn max_value(self) -> u32 {
        match self {
            Depth::Binary => 1,
            Depth::Grey => u8::MAX as u32,
            Depth::Long => u32::MAX,
        }
    }

    /// Mask a value to this depth.
    pub const fn mask(self, value: u32) -> u32 {
        value & self.max_value()
    }

    /// Depth from a bit count.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            1 => Some(Depth::Binary),
            8 => Some(Depth::Grey),
            32 => Some(Depth::Long),
            _ => None,
        }
    }

    /// Bytes of one row of `width` pixels in the raw layout.
    pub const fn raw_row_bytes(self, width: usize) -> usize {
        (width * self.bits() as usize + 7) / 8
    }
}

/// Trait for the word-aligned pixel types (8 and 32 bit).
///
/// The 1-bit depth is not a `Pixel`: it lives packed in
/// [`BitRaster`](super::BitRaster).
pub trait Pixel:
    PrimInt + Unsigned + Bounded + WrappingAdd + WrappingSub + WrappingMul + Default + Debug + Send + Sync + 'static
{
    /// Depth tag of this pixel type
    const DEPTH: Depth;

    /// Elements per 64-bit word, used to align row strides.
    const PER_WORD: usize;

    /// Truncate a 32-bit value to this type.
    fn from_u32(value: u32) -> Self;

    /// Widen to 32 bits.
    fn to_u32(self) -> u32;

    /// Little-endian bytes into `out`.
    fn write_le(self, out: &mut Vec<u8>);

    /// Read from little-endian bytes, `bytes` has exactly the pixel size.
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_pixel {
    ($t:ty, $depth:expr) => {
        impl Pixel for $t {
            const DEPTH: Depth = $depth;
            const PER_WORD: usize = 8 / std::mem::size_of::<$t>();

            #[inline]
            fn from_u32(value: u32) -> Self {
                value as $t
            }

            #[inline]
            fn to_u32(self) -> u32 {
                self as u32
            }

            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            fn read_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(bytes);
                <$t>::from_le_bytes(buf)
            }
        }
    };
}

impl_pixel!(u8, Depth::Grey);
impl_pixel!(u32, Depth::Long);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_constants() {
        assert_eq!(Depth::Binary.max_value(), 1);
        assert_eq!(Depth::Grey.max_value(), 255);
        assert_eq!(Depth::Long.max_value(), u32::MAX);
        assert_eq!(Depth::Grey.mask(0x1ff), 0xff);
        assert_eq!(Depth::from_bits(8), Some(Depth::Grey));
        assert_eq!(Depth::from_bits(16), None);
    }

    #[test]
    fn test_raw_row_bytes() {
        assert_eq!(Depth::Binary.raw_row_bytes(1), 1);
        assert_eq!(Depth::Binary.raw_row_bytes(9), 2);
        assert_eq!(Depth::Grey.raw_row_bytes(5), 5);
        assert_eq!(Depth::Long.raw_row_bytes(3), 12);
    }

    #[test]
    fn test_pixel_roundtrip_le() {
        let mut out = Vec::new();
        0x0102_0304u32.write_le(&mut out);
        assert_eq!(out, vec![4, 3, 2, 1]);
        assert_eq!(u32::read_le(&out), 0x0102_0304);
        assert_eq!(u8::from_u32(300), 44);
        assert_eq!(<u8 as Pixel>::PER_WORD, 8);
        assert_eq!(<u32 as Pixel>::PER_WORD, 2);
    }
}
