//! Steinhaus–Johnson–Trotter enumeration with Even's speedup.
//!
//! # Algorithm
//!
//! Every value `1..=L` carries a direction (initially left). A value is
//! *mobile* when the neighbor its direction points at exists and holds a
//! smaller value. Each step:
//!
//! 1. Find the largest mobile value `v`
//! 2. Swap `v` with the neighbor it points at
//! 3. Reverse the direction of every value greater than `v`
//!
//! Enumeration stops when no value is mobile, after exactly `L!`
//! permutations (the identity counts as the first).
//!
//! # Complexity
//!
//! O(L) per step worst case, O(L · L!) total.

use super::factorial;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

impl Direction {
    fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Restartable iterator over all `L!` permutations of `1..=L`.
///
/// Starts at the identity; each subsequent permutation differs from the
/// previous one by swapping two adjacent positions.
///
/// # Examples
///
/// ```
/// use u_windowopt::permutation::Permutations;
///
/// let all: Vec<Vec<u8>> = Permutations::new(3).collect();
/// assert_eq!(
///     all,
///     vec![
///         vec![1, 2, 3],
///         vec![1, 3, 2],
///         vec![3, 1, 2],
///         vec![3, 2, 1],
///         vec![2, 3, 1],
///         vec![2, 1, 3],
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Permutations {
    perm: Vec<u8>,
    /// `position[v]` is the index of value `v` in `perm`; index 0 unused.
    position: Vec<usize>,
    /// `direction[v]`; index 0 unused.
    direction: Vec<Direction>,
    started: bool,
    exhausted: bool,
    produced: usize,
}

impl Permutations {
    /// Creates an enumerator for permutations of `1..=length`.
    ///
    /// `length == 0` yields an empty sequence.
    ///
    /// # Panics
    ///
    /// Panics if `length > 255`.
    pub fn new(length: usize) -> Self {
        assert!(length <= u8::MAX as usize, "length must fit in u8");
        Self {
            perm: super::identity(length),
            position: (0..=length).map(|v| v.saturating_sub(1)).collect(),
            direction: vec![Direction::Left; length + 1],
            started: false,
            exhausted: length == 0,
            produced: 0,
        }
    }

    /// Number of content values being permuted.
    pub fn length(&self) -> usize {
        self.perm.len()
    }

    /// The most recently produced permutation.
    ///
    /// Before the first call to [`advance`](Self::advance) or
    /// [`next`](Iterator::next) this is the identity.
    pub fn current(&self) -> &[u8] {
        &self.perm
    }

    /// Resets to the identity so the sequence can be replayed.
    pub fn restart(&mut self) {
        *self = Self::new(self.length());
    }

    /// Moves to the next permutation.
    ///
    /// The first call produces the identity and returns `Some(None)`.
    /// Later calls return `Some(Some(i))` where positions `i` and `i + 1`
    /// were swapped. Returns `None` once all `L!` permutations are spent.
    pub fn advance(&mut self) -> Option<Option<usize>> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            self.produced = 1;
            return Some(None);
        }

        let Some(value) = self.largest_mobile() else {
            self.exhausted = true;
            return None;
        };

        let from = self.position[value];
        let to = match self.direction[value] {
            Direction::Left => from - 1,
            Direction::Right => from + 1,
        };
        let other = self.perm[to] as usize;
        self.perm.swap(from, to);
        self.position[value] = to;
        self.position[other] = from;

        for larger in value + 1..=self.length() {
            self.direction[larger] = self.direction[larger].reversed();
        }

        self.produced += 1;
        Some(Some(from.min(to)))
    }

    fn largest_mobile(&self) -> Option<usize> {
        let n = self.length();
        (2..=n).rev().find(|&value| {
            let at = self.position[value];
            let neighbor = match self.direction[value] {
                Direction::Left if at > 0 => at - 1,
                Direction::Right if at + 1 < n => at + 1,
                _ => return false,
            };
            (self.perm[neighbor] as usize) < value
        })
    }
}

impl Iterator for Permutations {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Vec<u8>> {
        self.advance().map(|_| self.perm.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        match factorial(self.length()) {
            Some(total) => {
                let left = total - self.produced;
                (left, Some(left))
            }
            None => (usize::MAX, None),
        }
    }
}
