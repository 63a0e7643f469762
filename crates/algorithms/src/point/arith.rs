//! Pixelwise arithmetic
//!
//! A 1-bit operand takes part in mixed-depth arithmetic with its value 0
//! or 1. Results written to 1-bit or 8-bit images saturate; results
//! written to 32-bit images wrap, except for the `ceiling_*` and
//! `floor_*` forms which saturate at every depth.

use morpho_core::raster::{check_same_size, Depth, Volume};
use morpho_core::{Error, Result};

use super::{map_values, unsupported, zip_values};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arith {
    Add,
    Sub,
    CeilingAdd,
    FloorSub,
    Mul,
    Div,
}

impl Arith {
    fn name(self) -> &'static str {
        match self {
            Arith::Add => "add",
            Arith::Sub => "sub",
            Arith::CeilingAdd => "ceiling_add",
            Arith::FloorSub => "floor_sub",
            Arith::Mul => "mul",
            Arith::Div => "div",
        }
    }

    /// Whether (a, b, out) is a legal depth combination.
    fn accepts(self, a: Depth, b: Depth, out: Depth) -> bool {
        use Depth::*;
        match self {
            Arith::Add | Arith::Sub => matches!(
                (a, b, out),
                (Binary, Binary, Binary)
                    | (Binary, Grey, Grey)
                    | (Grey, Binary, Grey)
                    | (Grey, Grey, Grey)
                    | (Grey, Grey, Long)
                    | (Grey, Long, Long)
                    | (Long, Grey, Long)
                    | (Long, Long, Long)
            ),
            Arith::CeilingAdd | Arith::FloorSub => {
                matches!((a, b, out), (Long, Long, Long) | (Grey, Grey, Grey))
            }
            Arith::Mul => matches!(
                (a, b, out),
                (Grey, Grey, Grey) | (Grey, Grey, Long) | (Long, Long, Long)
            ),
            Arith::Div => matches!((a, b, out), (Grey, Grey, Grey) | (Long, Long, Long)),
        }
    }

    /// Whether `input -> out` is legal for the constant form.
    fn accepts_const(self, input: Depth, out: Depth) -> bool {
        use Depth::*;
        match self {
            Arith::Add | Arith::Sub => matches!(
                (input, out),
                (Binary, Binary) | (Grey, Grey) | (Grey, Long) | (Long, Long)
            ),
            Arith::CeilingAdd | Arith::FloorSub | Arith::Div => {
                matches!((input, out), (Grey, Grey) | (Long, Long))
            }
            Arith::Mul => matches!((input, out), (Grey, Grey) | (Grey, Long) | (Long, Long)),
        }
    }

    /// Combine two values for an output of depth `out`. `y` is non-zero
    /// for `Div`.
    #[inline]
    fn apply(self, x: u32, y: u32, out: Depth) -> u32 {
        let (x, y) = (x as u64, y as u64);
        let max = out.max_value() as u64;
        let saturate =
            out != Depth::Long || matches!(self, Arith::CeilingAdd | Arith::FloorSub);
        let v = match self {
            Arith::Add | Arith::CeilingAdd => {
                let s = x + y;
                if saturate {
                    s.min(max)
                } else {
                    s & max
                }
            }
            Arith::Sub | Arith::FloorSub => {
                if saturate {
                    x.saturating_sub(y)
                } else {
                    x.wrapping_sub(y) & max
                }
            }
            Arith::Mul => {
                let p = x * y;
                if saturate {
                    p.min(max)
                } else {
                    p & max
                }
            }
            Arith::Div => (x / y).min(max),
        };
        v as u32
    }
}

fn binary_op<V: Volume>(op: Arith, a: &V, b: &V, out: &mut V) -> Result<()> {
    check_same_size(a, b)?;
    check_same_size(a, out)?;
    let (da, db, dout) = (a.depth(), b.depth(), out.depth());
    if !op.accepts(da, db, dout) {
        return Err(unsupported(op.name(), &[da, db, dout]));
    }
    if op == Arith::Div && b.to_values()?.contains(&0) {
        return Err(Error::DivByZero);
    }
    zip_values(a, b, out, |x, y| op.apply(x, y, dout));
    Ok(())
}

fn const_op<V: Volume>(op: Arith, input: &V, value: u32, out: &mut V) -> Result<()> {
    check_same_size(input, out)?;
    let (din, dout) = (input.depth(), out.depth());
    if !op.accepts_const(din, dout) {
        return Err(unsupported(op.name(), &[din, dout]));
    }
    if op == Arith::Div && value == 0 {
        return Err(Error::DivByZero);
    }
    map_values(input, out, |x| op.apply(x, value, dout));
    Ok(())
}

/// `out = a + b`
pub fn add<V: Volume>(a: &V, b: &V, out: &mut V) -> Result<()> {
    binary_op(Arith::Add, a, b, out)
}

/// `out = a - b`
pub fn sub<V: Volume>(a: &V, b: &V, out: &mut V) -> Result<()> {
    binary_op(Arith::Sub, a, b, out)
}

/// `out = min(a + b, max)`
pub fn ceiling_add<V: Volume>(a: &V, b: &V, out: &mut V) -> Result<()> {
    binary_op(Arith::CeilingAdd, a, b, out)
}

/// `out = max(a - b, 0)`
pub fn floor_sub<V: Volume>(a: &V, b: &V, out: &mut V) -> Result<()> {
    binary_op(Arith::FloorSub, a, b, out)
}

/// `out = a * b`
pub fn mul<V: Volume>(a: &V, b: &V, out: &mut V) -> Result<()> {
    binary_op(Arith::Mul, a, b, out)
}

/// `out = a / b` (floor). Fails with `DivByZero` before writing if any
/// pixel of `b` is zero.
pub fn div<V: Volume>(a: &V, b: &V, out: &mut V) -> Result<()> {
    binary_op(Arith::Div, a, b, out)
}

pub fn add_const<V: Volume>(input: &V, value: u32, out: &mut V) -> Result<()> {
    const_op(Arith::Add, input, value, out)
}

pub fn sub_const<V: Volume>(input: &V, value: u32, out: &mut V) -> Result<()> {
    const_op(Arith::Sub, input, value, out)
}

pub fn ceiling_add_const<V: Volume>(input: &V, value: u32, out: &mut V) -> Result<()> {
    const_op(Arith::CeilingAdd, input, value, out)
}

pub fn floor_sub_const<V: Volume>(input: &V, value: u32, out: &mut V) -> Result<()> {
    const_op(Arith::FloorSub, input, value, out)
}

pub fn mul_const<V: Volume>(input: &V, value: u32, out: &mut V) -> Result<()> {
    const_op(Arith::Mul, input, value, out)
}

/// Floor division by a constant; a zero divisor fails with `DivByZero`.
pub fn div_const<V: Volume>(input: &V, value: u32, out: &mut V) -> Result<()> {
    const_op(Arith::Div, input, value, out)
}

/// Rounding applied by [`mul_real_const`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RealRounding {
    /// Toward zero
    #[default]
    Trunc,
    /// To nearest, halves away from zero
    Round,
}

/// Multiply every pixel by a non-negative real factor and saturate to the
/// output depth.
pub fn mul_real_const<V: Volume>(
    input: &V,
    factor: f64,
    rounding: RealRounding,
    out: &mut V,
) -> Result<()> {
    check_same_size(input, out)?;
    let (din, dout) = (input.depth(), out.depth());
    if !Arith::Mul.accepts_const(din, dout) {
        return Err(unsupported("mul_real_const", &[din, dout]));
    }
    if !factor.is_finite() || factor < 0.0 {
        return Err(Error::InvalidParameter {
            name: "factor",
            value: factor.to_string(),
            reason: "must be a finite non-negative number".into(),
        });
    }
    let max = dout.max_value() as f64;
    map_values(input, out, |x| {
        let v = x as f64 * factor;
        let v = match rounding {
            RealRounding::Trunc => v.trunc(),
            RealRounding::Round => v.round(),
        };
        v.min(max) as u32
    });
    Ok(())
}
