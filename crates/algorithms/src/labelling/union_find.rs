//! Disjoint set forest for the labelling passes

/// Union by size with path halving.
#[derive(Debug, Clone)]
pub(crate) struct DisjointSetForest {
    /// `parent[i] == i` for roots
    parent: Vec<usize>,
    /// Size of the tree rooted at `i`; meaningless for other nodes
    tree_size: Vec<usize>,
}

impl DisjointSetForest {
    /// Forest of `count` singletons.
    pub fn new(count: usize) -> Self {
        Self {
            parent: (0..count).collect(),
            tree_size: vec![1; count],
        }
    }

    /// Root of the tree holding `i`.
    pub fn root(&mut self, i: usize) -> usize {
        let mut j = i;
        loop {
            let p = self.parent[j];
            self.parent[j] = self.parent[p];
            if j == p {
                return j;
            }
            j = p;
        }
    }

    /// Merge the trees holding `i` and `j`.
    pub fn union(&mut self, i: usize, j: usize) {
        let p = self.root(i);
        let q = self.root(j);
        if p == q {
            return;
        }
        let (small, large) = if self.tree_size[p] < self.tree_size[q] {
            (p, q)
        } else {
            (q, p)
        };
        self.parent[small] = large;
        self.tree_size[large] += self.tree_size[small];
    }

    /// Number of trees.
    #[cfg(test)]
    pub fn num_trees(&self) -> usize {
        self.parent
            .iter()
            .enumerate()
            .filter(|(i, p)| i == *p)
            .count()
    }
}
