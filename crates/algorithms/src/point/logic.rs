//! Pixelwise logic on images of one depth

use morpho_core::raster::{check_depth, check_same_size, Layer, LogicOp, PlanesMut, PlanesRef, Volume};
use morpho_core::Result;

use super::unsupported;

fn logic_planes<L: Layer>(a: &[L], b: &[L], out: &mut [L], op: LogicOp) {
    for ((pa, pb), po) in a.iter().zip(b).zip(out.iter_mut()) {
        for y in 0..po.height() {
            L::logic_row(po.row_mut(y), pa.row(y), pb.row(y), op);
        }
    }
}

fn negate_planes<L: Layer>(input: &[L], out: &mut [L]) {
    for (pi, po) in input.iter().zip(out.iter_mut()) {
        let width = pi.width();
        for y in 0..po.height() {
            L::negate_row(po.row_mut(y), pi.row(y), width);
        }
    }
}

fn check_alike<V: Volume>(a: &V, b: &V) -> Result<()> {
    check_same_size(a, b)?;
    check_depth(b, a.depth())
}

/// `out = op(a, b)`; all three images share one depth.
pub fn logic<V: Volume>(a: &V, b: &V, out: &mut V, op: LogicOp) -> Result<()> {
    check_alike(a, b)?;
    check_alike(a, out)?;
    let depth = a.depth();
    match (a.planes(), b.planes(), out.planes_mut()) {
        (PlanesRef::Binary(pa), PlanesRef::Binary(pb), PlanesMut::Binary(po)) => {
            logic_planes(pa, pb, po, op)
        }
        (PlanesRef::Grey(pa), PlanesRef::Grey(pb), PlanesMut::Grey(po)) => {
            logic_planes(pa, pb, po, op)
        }
        (PlanesRef::Long(pa), PlanesRef::Long(pb), PlanesMut::Long(po)) => {
            logic_planes(pa, pb, po, op)
        }
        _ => return Err(unsupported("logic", &[depth])),
    }
    Ok(())
}

/// `inout = op(inout, other)`
pub fn logic_in_place<V: Volume>(inout: &mut V, other: &V, op: LogicOp) -> Result<()> {
    let snapshot = inout.clone();
    logic(&snapshot, other, inout, op)
}

/// Bitwise complement: `out = max - input`.
pub fn negate<V: Volume>(input: &V, out: &mut V) -> Result<()> {
    check_alike(input, out)?;
    let depth = input.depth();
    match (input.planes(), out.planes_mut()) {
        (PlanesRef::Binary(pi), PlanesMut::Binary(po)) => negate_planes(pi, po),
        (PlanesRef::Grey(pi), PlanesMut::Grey(po)) => negate_planes(pi, po),
        (PlanesRef::Long(pi), PlanesMut::Long(po)) => negate_planes(pi, po),
        _ => return Err(unsupported("negate", &[depth])),
    }
    Ok(())
}

/// Copy `input` into an image of the same size and depth.
pub fn copy<V: Volume>(input: &V, out: &mut V) -> Result<()> {
    check_alike(input, out)?;
    out.clone_from(input);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morpho_core::raster::Depth;
    use morpho_core::{ErrorKind, Image, Image3D};

    fn grey(values: &[u32]) -> Image {
        let mut im = Image::new(values.len(), 1, Depth::Grey).unwrap();
        im.load_values(values).unwrap();
        im
    }

    #[test]
    fn test_inf_sup() {
        let a = grey(&[1, 9, 4, 200]);
        let b = grey(&[3, 2, 4, 100]);
        let mut out = grey(&[0; 4]);
        logic(&a, &b, &mut out, LogicOp::Inf).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![1, 2, 4, 100]);
        logic(&a, &b, &mut out, LogicOp::Sup).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![3, 9, 4, 200]);
        logic(&a, &b, &mut out, LogicOp::Xor).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![2, 11, 0, 172]);
    }

    #[test]
    fn test_negate_binary_keeps_padding_clear() {
        let mut a = Image3D::new(70, 2, 2, Depth::Binary).unwrap();
        a.set_pixel(3, 1, 1, 1).unwrap();
        let mut out = a.blank_like(Depth::Binary).unwrap();
        negate(&a, &mut out).unwrap();
        let ones: u32 = out.to_values().unwrap().iter().sum();
        assert_eq!(ones, 70 * 2 * 2 - 1);
        assert_eq!(out.get_pixel(3, 1, 1).unwrap(), 0);
    }

    #[test]
    fn test_depth_mismatch() {
        let a = grey(&[1, 2]);
        let b = Image::new(2, 1, Depth::Long).unwrap();
        let mut out = grey(&[0, 0]);
        assert_eq!(
            logic(&a, &b, &mut out, LogicOp::And).unwrap_err().kind(),
            ErrorKind::BadDepth
        );
        let mut other = Image::new(2, 1, Depth::Long).unwrap();
        assert_eq!(copy(&a, &mut other).unwrap_err().kind(), ErrorKind::BadDepth);
    }

    #[test]
    fn test_in_place() {
        let mut a = grey(&[5, 6]);
        let b = grey(&[1, 7]);
        logic_in_place(&mut a, &b, LogicOp::Sup).unwrap();
        assert_eq!(a.to_values().unwrap(), vec![5, 7]);
    }
}
