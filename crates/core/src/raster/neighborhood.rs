//! Sampling grids: direction codes, neighbor offsets and edge policy
//!
//! Each grid is described by a static [`GridDescriptor`]. Hexagonal rows
//! are staggered (odd rows sit half a pixel to the right), so the hexagonal
//! and face-centred cubic offsets depend on the row parity; the centred
//! cubic offsets depend on the plane parity. The tables are indexed by that
//! parity ("phase") and by direction code, direction 0 being the pixel
//! itself.

use std::fmt;
use std::ops::{Add, Mul, Neg};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::raster::Depth;

/// Policy for virtual pixels outside the image frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Edge {
    /// Outside pixels are 0
    Empty,
    /// Outside pixels hold the maximum value of the depth
    #[default]
    Filled,
}

impl Edge {
    /// Value of a virtual pixel at `depth`.
    pub const fn fill_value(self, depth: Depth) -> u32 {
        match self {
            Edge::Empty => 0,
            Edge::Filled => depth.max_value(),
        }
    }

    /// The other edge mode.
    pub const fn complement(self) -> Self {
        match self {
            Edge::Empty => Edge::Filled,
            Edge::Filled => Edge::Empty,
        }
    }
}

impl FromStr for Edge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "empty" => Ok(Edge::Empty),
            "filled" | "fill" => Ok(Edge::Filled),
            _ => Err(Error::InvalidParameter {
                name: "edge",
                value: s.to_string(),
                reason: "expected empty or filled".into(),
            }),
        }
    }
}

/// A signed displacement in pixels (x right, y down, z to the next plane).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub dx: isize,
    pub dy: isize,
    pub dz: isize,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0, dy: 0, dz: 0 };

    pub const fn new(dx: isize, dy: isize, dz: isize) -> Self {
        Self { dx, dy, dz }
    }

    const fn from_table(o: [i8; 3]) -> Self {
        Self::new(o[0] as isize, o[1] as isize, o[2] as isize)
    }
}

impl Add for Offset {
    type Output = Offset;
    fn add(self, o: Offset) -> Offset {
        Offset::new(self.dx + o.dx, self.dy + o.dy, self.dz + o.dz)
    }
}

impl Neg for Offset {
    type Output = Offset;
    fn neg(self) -> Offset {
        Offset::new(-self.dx, -self.dy, -self.dz)
    }
}

impl Mul<isize> for Offset {
    type Output = Offset;
    fn mul(self, k: isize) -> Offset {
        Offset::new(self.dx * k, self.dy * k, self.dz * k)
    }
}

/// A set of direction codes, bit `d` standing for direction `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirSet(u32);

impl DirSet {
    pub const EMPTY: DirSet = DirSet(0);

    /// Raw mask, bit 0 is the pixel itself.
    pub const fn from_bits(bits: u32) -> Self {
        DirSet(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn single(d: usize) -> Self {
        DirSet(1 << d)
    }

    pub fn contains(self, d: usize) -> bool {
        d < 32 && self.0 & (1 << d) != 0
    }

    pub fn insert(&mut self, d: usize) {
        self.0 |= 1 << d;
    }

    pub fn remove(&mut self, d: usize) {
        self.0 &= !(1 << d);
    }

    pub const fn union(self, other: DirSet) -> DirSet {
        DirSet(self.0 | other.0)
    }

    pub const fn intersection(self, other: DirSet) -> DirSet {
        DirSet(self.0 & other.0)
    }

    pub const fn without_self(self) -> DirSet {
        DirSet(self.0 & !1)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Directions in increasing order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..32).filter(move |&d| self.0 & (1 << d) != 0)
    }
}

impl FromIterator<usize> for DirSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut s = DirSet::EMPTY;
        for d in iter {
            s.insert(d);
        }
        s
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Single,
    Row,
    Plane,
}

/// Static description of a sampling grid.
#[derive(Debug)]
pub struct GridDescriptor {
    pub name: &'static str,
    pub dims: usize,
    pub neighbor_count: usize,
    /// Maximum offset magnitude on each axis
    pub extension: (usize, usize, usize),
    phase: Phase,
    offsets: [&'static [[i8; 3]]; 2],
    transpose: &'static [u8],
    rotate: &'static [u8],
}

const SQUARE_OFFSETS: [[i8; 3]; 9] = [
    [0, 0, 0], [0, -1, 0], [1, -1, 0], [1, 0, 0], [1, 1, 0],
    [0, 1, 0], [-1, 1, 0], [-1, 0, 0], [-1, -1, 0],
];

const HEX_EVEN: [[i8; 3]; 7] = [
    [0, 0, 0], [0, -1, 0], [1, 0, 0], [0, 1, 0], [-1, 1, 0], [-1, 0, 0], [-1, -1, 0],
];

const HEX_ODD: [[i8; 3]; 7] = [
    [0, 0, 0], [1, -1, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0], [-1, 0, 0], [0, -1, 0],
];

const CUBIC_OFFSETS: [[i8; 3]; 27] = [
    [0, 0, 0],
    [0, -1, 0], [1, -1, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0], [-1, 1, 0], [-1, 0, 0], [-1, -1, 0],
    [0, 0, 1],
    [0, -1, 1], [1, -1, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1], [-1, 1, 1], [-1, 0, 1], [-1, -1, 1],
    [0, 0, -1],
    [0, -1, -1], [1, -1, -1], [1, 0, -1], [1, 1, -1], [0, 1, -1], [-1, 1, -1], [-1, 0, -1], [-1, -1, -1],
];

// Hexagonal planes in ABC stacking: the three upper neighbors are the
// pixel above and the one above its W and NW neighbors, the three lower
// ones mirror them.
const FCC_EVEN: [[i8; 3]; 13] = [
    [0, 0, 0], [0, -1, 0], [1, 0, 0], [0, 1, 0], [-1, 1, 0], [-1, 0, 0], [-1, -1, 0],
    [0, 0, 1], [-1, 0, 1], [-1, -1, 1],
    [0, 0, -1], [1, 0, -1], [0, 1, -1],
];

const FCC_ODD: [[i8; 3]; 13] = [
    [0, 0, 0], [1, -1, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0], [-1, 0, 0], [0, -1, 0],
    [0, 0, 1], [-1, 0, 1], [0, -1, 1],
    [0, 0, -1], [1, 0, -1], [1, 1, -1],
];

// Even planes reach the next plane through a cross, odd planes through an X.
const CC_EVEN: [[i8; 3]; 15] = [
    [0, 0, 0], [0, -1, 0], [1, 0, 0], [0, 1, 0], [-1, 0, 0],
    [0, 0, 1], [0, -1, 1], [1, 0, 1], [0, 1, 1], [-1, 0, 1],
    [0, 0, -1], [-1, 1, -1], [-1, -1, -1], [1, -1, -1], [1, 1, -1],
];

const CC_ODD: [[i8; 3]; 15] = [
    [0, 0, 0], [0, -1, 0], [1, 0, 0], [0, 1, 0], [-1, 0, 0],
    [0, 0, 1], [1, -1, 1], [1, 1, 1], [-1, 1, 1], [-1, -1, 1],
    [0, 0, -1], [0, 1, -1], [-1, 0, -1], [0, -1, -1], [1, 0, -1],
];

static SQUARE: GridDescriptor = GridDescriptor {
    name: "Square",
    dims: 2,
    neighbor_count: 8,
    extension: (1, 1, 1),
    phase: Phase::Single,
    offsets: [&SQUARE_OFFSETS, &SQUARE_OFFSETS],
    transpose: &[0, 5, 6, 7, 8, 1, 2, 3, 4],
    rotate: &[0, 2, 3, 4, 5, 6, 7, 8, 1],
};

static HEXAGONAL: GridDescriptor = GridDescriptor {
    name: "Hexagonal",
    dims: 2,
    neighbor_count: 6,
    extension: (1, 1, 1),
    phase: Phase::Row,
    offsets: [&HEX_EVEN, &HEX_ODD],
    transpose: &[0, 4, 5, 6, 1, 2, 3],
    rotate: &[0, 2, 3, 4, 5, 6, 1],
};

static CUBIC: GridDescriptor = GridDescriptor {
    name: "Cubic",
    dims: 3,
    neighbor_count: 26,
    extension: (1, 1, 1),
    phase: Phase::Single,
    offsets: [&CUBIC_OFFSETS, &CUBIC_OFFSETS],
    transpose: &[
        0, 5, 6, 7, 8, 1, 2, 3, 4, 18, 23, 24, 25, 26, 19, 20, 21, 22, 9, 14, 15, 16, 17, 10, 11,
        12, 13,
    ],
    rotate: &[
        0, 2, 3, 4, 5, 6, 7, 8, 1, 9, 11, 12, 13, 14, 15, 16, 17, 10, 18, 20, 21, 22, 23, 24, 25,
        26, 19,
    ],
};

static FACE_CENTERED_CUBIC: GridDescriptor = GridDescriptor {
    name: "FaceCenteredCubic",
    dims: 3,
    neighbor_count: 12,
    extension: (1, 1, 1),
    phase: Phase::Row,
    offsets: [&FCC_EVEN, &FCC_ODD],
    transpose: &[0, 4, 5, 6, 1, 2, 3, 10, 11, 12, 7, 8, 9],
    rotate: &[0, 2, 3, 4, 5, 6, 1, 8, 9, 7, 11, 12, 10],
};

static CENTERED_CUBIC: GridDescriptor = GridDescriptor {
    name: "CenteredCubic",
    dims: 3,
    neighbor_count: 14,
    extension: (1, 1, 1),
    phase: Phase::Plane,
    offsets: [&CC_EVEN, &CC_ODD],
    transpose: &[0, 3, 4, 1, 2, 10, 11, 12, 13, 14, 5, 6, 7, 8, 9],
    rotate: &[0, 2, 3, 4, 1, 5, 7, 8, 9, 6, 10, 12, 13, 14, 11],
};

/// Neighbor topology of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grid {
    /// 2D, 8 neighbors
    Square,
    /// 2D, 6 neighbors, odd rows shifted right by half a pixel
    Hexagonal,
    /// 3D, 26 neighbors
    Cubic,
    /// 3D, 12 neighbors
    FaceCenteredCubic,
    /// 3D, 14 neighbors
    CenteredCubic,
}

impl Grid {
    pub const ALL: [Grid; 5] = [
        Grid::Square,
        Grid::Hexagonal,
        Grid::Cubic,
        Grid::FaceCenteredCubic,
        Grid::CenteredCubic,
    ];

    pub fn descriptor(self) -> &'static GridDescriptor {
        match self {
            Grid::Square => &SQUARE,
            Grid::Hexagonal => &HEXAGONAL,
            Grid::Cubic => &CUBIC,
            Grid::FaceCenteredCubic => &FACE_CENTERED_CUBIC,
            Grid::CenteredCubic => &CENTERED_CUBIC,
        }
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn dims(self) -> usize {
        self.descriptor().dims
    }

    pub fn neighbor_count(self) -> usize {
        self.descriptor().neighbor_count
    }

    pub fn extension(self) -> (usize, usize, usize) {
        self.descriptor().extension
    }

    /// All direction codes including 0.
    pub fn directions(self) -> std::ops::RangeInclusive<usize> {
        0..=self.neighbor_count()
    }

    /// Direction codes of the neighbors (excluding 0).
    pub fn neighbors(self) -> std::ops::RangeInclusive<usize> {
        1..=self.neighbor_count()
    }

    /// Every direction of the grid, self included.
    pub fn full_set(self) -> DirSet {
        self.directions().collect()
    }

    /// Fail unless `d` is a direction of this grid.
    pub fn check(self, d: usize) -> Result<()> {
        if d > self.neighbor_count() {
            return Err(Error::InvalidDirection {
                direction: d,
                grid: self.name(),
            });
        }
        Ok(())
    }

    /// Fail unless the grid has `dims` dimensions.
    pub fn check_dims(self, dims: usize) -> Result<()> {
        if self.dims() != dims {
            return Err(Error::InvalidGrid {
                grid: self.name(),
                reason: format!("a {}D grid cannot process {}D images", self.dims(), dims),
            });
        }
        Ok(())
    }

    /// Opposite direction.
    pub fn transpose(self, d: usize) -> Result<usize> {
        self.check(d)?;
        Ok(self.descriptor().transpose[d] as usize)
    }

    /// Next direction in the cyclic order of the grid.
    pub fn rotate(self, d: usize) -> Result<usize> {
        self.check(d)?;
        Ok(self.descriptor().rotate[d] as usize)
    }

    /// `steps` successive rotations (negative steps rotate backwards).
    pub fn rotate_by(self, d: usize, steps: isize) -> Result<usize> {
        self.check(d)?;
        let table = self.descriptor().rotate;
        let mut cycle = 1;
        let mut cur = table[d] as usize;
        while cur != d {
            cur = table[cur] as usize;
            cycle += 1;
        }
        let mut out = d;
        for _ in 0..steps.rem_euclid(cycle) {
            out = table[out] as usize;
        }
        Ok(out)
    }

    /// Transpose every direction of a set.
    pub fn transpose_set(self, set: DirSet) -> DirSet {
        let table = self.descriptor().transpose;
        set.iter()
            .filter(|&d| d < table.len())
            .map(|d| table[d] as usize)
            .collect()
    }

    fn phase(self, y: isize, z: isize) -> usize {
        match self.descriptor().phase {
            Phase::Single => 0,
            Phase::Row => y.rem_euclid(2) as usize,
            Phase::Plane => z.rem_euclid(2) as usize,
        }
    }

    /// Offset of direction `d` from a pixel in row `y` of plane `z`.
    pub fn offset(self, d: usize, y: isize, z: isize) -> Result<Offset> {
        self.check(d)?;
        Ok(self.step(d, y, z))
    }

    /// Unchecked form of [`Grid::offset`]; `d` must be a direction of the
    /// grid.
    #[inline]
    pub fn step(self, d: usize, y: isize, z: isize) -> Offset {
        let desc = self.descriptor();
        Offset::from_table(desc.offsets[self.phase(y, z)][d])
    }

    /// Displacement of `amplitude` successive steps in direction `d`
    /// starting from row `y` of plane `z`, parity resolved at each step.
    pub fn walk(self, d: usize, amplitude: usize, y: isize, z: isize) -> Offset {
        if amplitude == 0 {
            return Offset::ZERO;
        }
        let first = self.step(d, y, z);
        let second = self.step(d, y + first.dy, z + first.dz);
        // a direction moves y (or z) by the same amount in both phases, so
        // the phase repeats every two steps
        let pairs = (amplitude / 2) as isize;
        let pair = first + second;
        let mut total = pair * pairs;
        if amplitude % 2 == 1 {
            total = total + first;
        }
        total
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "square" | "sq" => Ok(Grid::Square),
            "hexagonal" | "hex" => Ok(Grid::Hexagonal),
            "cubic" => Ok(Grid::Cubic),
            "fcc" | "facecenteredcubic" | "face_centered_cubic" => Ok(Grid::FaceCenteredCubic),
            "cc" | "centeredcubic" | "centered_cubic" => Ok(Grid::CenteredCubic),
            _ => Err(Error::InvalidParameter {
                name: "grid",
                value: s.to_string(),
                reason: "expected square, hexagonal, cubic, fcc or cc".into(),
            }),
        }
    }
}
