/// Iterates every `k`-element subset of the indices `0..n` in lexicographic
/// order, e.g. `(0,1,2) (0,1,3) ... (n-3,n-2,n-1)` for `k = 3`.
///
/// The generator is iterative, finite (`C(n, k)` items) and can be restarted
/// with [`Combinations::reset`].
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..k).collect(),
            exhausted: k > n,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.n, self.k);
    }

    /// Total number of subsets, `C(n, k)`.
    pub fn count_total(&self) -> usize {
        if self.k > self.n {
            return 0;
        }
        let k = self.k.min(self.n - self.k);
        (0..k).fold(1, |acc, i| acc * (self.n - i) / (i + 1))
    }

    fn advance(&mut self) {
        // Rightmost index that can still move right.
        let Some(pos) = (0..self.k)
            .rev()
            .find(|&i| self.indices[i] < self.n - self.k + i)
        else {
            self.exhausted = true;
            return;
        };

        self.indices[pos] += 1;
        for i in pos + 1..self.k {
            self.indices[i] = self.indices[i - 1] + 1;
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.indices.clone();
        self.advance();
        Some(current)
    }
}
