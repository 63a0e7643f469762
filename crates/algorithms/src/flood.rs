//! Flattened pixel lattices and flood queues
//!
//! The geodesic operators (hierarchical reconstruction, distances,
//! labelling, watershed) work on the pixel values of a volume flattened in
//! plane, row, column order. [`Lattice`] maps flat indices to coordinates
//! and resolves grid neighbors with the row or plane parity of the pixel.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use morpho_core::raster::{Grid, Volume};
use morpho_core::Result;

/// Geometry of a flattened volume under a grid.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lattice {
    pub width: usize,
    pub height: usize,
    pub length: usize,
    pub grid: Grid,
}

impl Lattice {
    /// Lattice of `v`; fails if the grid does not match its dimensionality.
    pub fn of<V: Volume>(v: &V, grid: Grid) -> Result<Self> {
        grid.check_dims(V::DIMS)?;
        Ok(Self {
            width: v.width(),
            height: v.height(),
            length: v.length(),
            grid,
        })
    }

    pub fn len(&self) -> usize {
        self.width * self.height * self.length
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.height + y) * self.width + x
    }

    #[inline]
    pub fn coords(&self, i: usize) -> (usize, usize, usize) {
        let plane = self.width * self.height;
        let z = i / plane;
        let r = i % plane;
        (r % self.width, r / self.width, z)
    }

    /// Neighbor of pixel `i` in direction `d`, `None` outside the frame.
    #[inline]
    pub fn neighbor(&self, i: usize, d: usize) -> Option<usize> {
        let (x, y, z) = self.coords(i);
        let o = self.grid.step(d, y as isize, z as isize);
        let nx = x as isize + o.dx;
        let ny = y as isize + o.dy;
        let nz = z as isize + o.dz;
        if nx < 0
            || ny < 0
            || nz < 0
            || nx as usize >= self.width
            || ny as usize >= self.height
            || nz as usize >= self.length
        {
            return None;
        }
        Some(self.index(nx as usize, ny as usize, nz as usize))
    }

    /// In-frame neighbors of `i`, direction 0 excluded.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.grid.neighbors().filter_map(move |d| self.neighbor(i, d))
    }

    /// Whether `i` lies on the outer frame of the image (first or last
    /// column, row or, for 3D images, plane).
    pub fn on_border(&self, i: usize) -> bool {
        let (x, y, z) = self.coords(i);
        x == 0
            || y == 0
            || x + 1 == self.width
            || y + 1 == self.height
            || (self.grid.dims() == 3 && (z == 0 || z + 1 == self.length))
    }

    /// Whether some neighbor of `i` lies outside the frame.
    pub fn touches_frame(&self, i: usize) -> bool {
        self.grid.neighbors().any(|d| self.neighbor(i, d).is_none())
    }
}

/// Processing order of a flood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Order {
    LowestFirst,
    HighestFirst,
}

/// Heap entry: priority first, then insertion order.
#[derive(Debug, Clone, Copy)]
struct Entry {
    key: u32,
    seq: u64,
    index: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the max-heap pops the smallest key, oldest first
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

enum Store {
    /// One FIFO per level, for small level ranges
    Buckets {
        buckets: Vec<VecDeque<usize>>,
        current: usize,
    },
    Heap {
        heap: BinaryHeap<Entry>,
        seq: u64,
    },
}

/// Hierarchical queue: pixels come out by level, FIFO within a level.
pub(crate) struct FloodQueue {
    store: Store,
    order: Order,
    len: usize,
}

impl FloodQueue {
    /// Queue for levels in `0..=max_level`: buckets when the range is
    /// small, a binary heap otherwise.
    pub fn new(max_level: u32, order: Order) -> Self {
        let store = if max_level <= 1 << 16 {
            Store::Buckets {
                buckets: vec![VecDeque::new(); max_level as usize + 1],
                current: 0,
            }
        } else {
            Store::Heap {
                heap: BinaryHeap::new(),
                seq: 0,
            }
        };
        Self {
            store,
            order,
            len: 0,
        }
    }

    fn key(&self, level: u32, top: u32) -> u32 {
        match self.order {
            Order::LowestFirst => level,
            Order::HighestFirst => top - level,
        }
    }

    fn top(&self) -> u32 {
        match &self.store {
            Store::Buckets { buckets, .. } => buckets.len() as u32 - 1,
            Store::Heap { .. } => u32::MAX,
        }
    }

    pub fn push(&mut self, level: u32, index: usize) {
        let top = self.top();
        let key = self.key(level.min(top), top);
        match &mut self.store {
            Store::Buckets { buckets, current } => {
                let k = key as usize;
                buckets[k].push_back(index);
                if k < *current {
                    *current = k;
                }
            }
            Store::Heap { heap, seq } => {
                heap.push(Entry {
                    key,
                    seq: *seq,
                    index,
                });
                *seq += 1;
            }
        }
        self.len += 1;
    }

    /// Next pixel with its level.
    pub fn pop(&mut self) -> Option<(u32, usize)> {
        if self.len == 0 {
            return None;
        }
        let top = self.top();
        let (key, index) = match &mut self.store {
            Store::Buckets { buckets, current } => {
                while buckets[*current].is_empty() {
                    *current += 1;
                }
                let index = buckets[*current].pop_front()?;
                (*current as u32, index)
            }
            Store::Heap { heap, .. } => {
                let e = heap.pop()?;
                (e.key, e.index)
            }
        };
        self.len -= 1;
        let level = match self.order {
            Order::LowestFirst => key,
            Order::HighestFirst => top - key,
        };
        Some((level, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morpho_core::raster::Depth;
    use morpho_core::Image;

    #[test]
    fn test_lattice_neighbors_respect_frame() {
        let im = Image::new(3, 3, Depth::Binary).unwrap();
        let lat = Lattice::of(&im, Grid::Square).unwrap();
        assert_eq!(lat.neighbors(4).count(), 8);
        assert_eq!(lat.neighbors(0).count(), 3);
        assert!(lat.touches_frame(0));
        assert!(!lat.touches_frame(4));
        assert!(lat.on_border(3));
        assert!(!lat.on_border(4));
        assert_eq!(lat.coords(lat.index(2, 1, 0)), (2, 1, 0));
    }

    #[test]
    fn test_lattice_rejects_wrong_grid() {
        let im = Image::new(3, 3, Depth::Binary).unwrap();
        assert!(Lattice::of(&im, Grid::Cubic).is_err());
    }

    #[test]
    fn test_hexagonal_neighbor_parity() {
        let im = Image::new(4, 4, Depth::Grey).unwrap();
        let lat = Lattice::of(&im, Grid::Hexagonal).unwrap();
        // NE of (1, 2) is (1, 1) on even rows, of (1, 1) it is (2, 0)
        assert_eq!(lat.neighbor(lat.index(1, 2, 0), 1), Some(lat.index(1, 1, 0)));
        assert_eq!(lat.neighbor(lat.index(1, 1, 0), 1), Some(lat.index(2, 0, 0)));
    }

    #[test]
    fn test_bucket_queue_order() {
        let mut q = FloodQueue::new(255, Order::LowestFirst);
        q.push(5, 1);
        q.push(2, 2);
        q.push(5, 3);
        q.push(0, 4);
        let out: Vec<(u32, usize)> = std::iter::from_fn(|| q.pop()).collect();
        assert_eq!(out, vec![(0, 4), (2, 2), (5, 1), (5, 3)]);
    }

    #[test]
    fn test_heap_queue_highest_first_is_fifo_within_level() {
        let mut q = FloodQueue::new(u32::MAX, Order::HighestFirst);
        q.push(7, 1);
        q.push(100_000, 2);
        q.push(7, 3);
        assert_eq!(q.pop(), Some((100_000, 2)));
        assert_eq!(q.pop(), Some((7, 1)));
        assert_eq!(q.pop(), Some((7, 3)));
        assert_eq!(q.pop(), None);
    }
}
