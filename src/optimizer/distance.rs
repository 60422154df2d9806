//! Pairwise distance oracles.

/// Symmetric pairwise distance between tour nodes.
///
/// Must be stable for the duration of one `apply` call. Implemented for
/// every `Fn(usize, usize) -> i64` closure.
///
/// # Examples
///
/// ```
/// use u_windowopt::optimizer::DistanceOracle;
///
/// let manhattan = |a: usize, b: usize| (a as i64 - b as i64).abs();
/// assert_eq!(manhattan.distance(2, 7), 5);
/// ```
pub trait DistanceOracle {
    fn distance(&self, a: usize, b: usize) -> i64;
}

impl<F> DistanceOracle for F
where
    F: Fn(usize, usize) -> i64,
{
    fn distance(&self, a: usize, b: usize) -> i64 {
        self(a, b)
    }
}

/// Dense symmetric distance matrix indexed by node id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<i64>,
}

impl DistanceMatrix {
    /// All-zero matrix over `size` nodes.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![0; size * size],
        }
    }

    /// Fills entry `(a, b)` with `f(a, b)` for every pair.
    pub fn from_fn<F: Fn(usize, usize) -> i64>(size: usize, f: F) -> Self {
        let mut data = Vec::with_capacity(size * size);
        for a in 0..size {
            for b in 0..size {
                data.push(f(a, b));
            }
        }
        Self { size, data }
    }

    /// Rounded Euclidean distances (TSPLIB `EUC_2D`).
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        Self::from_fn(points.len(), |a, b| {
            let (dx, dy) = (points[a].0 - points[b].0, points[a].1 - points[b].1);
            (dx * dx + dy * dy).sqrt().round() as i64
        })
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn get(&self, a: usize, b: usize) -> i64 {
        self.data[a * self.size + b]
    }

    /// Sets both `(a, b)` and `(b, a)`.
    pub fn set(&mut self, a: usize, b: usize, distance: i64) {
        self.data[a * self.size + b] = distance;
        self.data[b * self.size + a] = distance;
    }

    /// Length of the closed tour visiting `tour` in order.
    pub fn tour_length(&self, tour: &[usize]) -> i64 {
        if tour.len() < 2 {
            return 0;
        }
        let closing = self.get(tour[tour.len() - 1], tour[0]);
        tour.windows(2).map(|w| self.get(w[0], w[1])).sum::<i64>() + closing
    }
}

impl DistanceOracle for DistanceMatrix {
    #[inline]
    fn distance(&self, a: usize, b: usize) -> i64 {
        self.get(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_oracle() {
        let oracle = |a: usize, b: usize| (a * 10 + b) as i64;
        assert_eq!(oracle.distance(3, 4), 34);
    }

    #[test]
    fn test_set_is_symmetric() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 2, 7);
        assert_eq!(dm.get(0, 2), 7);
        assert_eq!(dm.get(2, 0), 7);
        assert_eq!(dm.get(1, 1), 0);
    }

    #[test]
    fn test_from_points_rounds() {
        let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 4.0), (1.0, 1.0)]);
        assert_eq!(dm.get(0, 1), 5);
        assert_eq!(dm.get(0, 2), 1); // sqrt(2) rounds to 1
        assert_eq!(dm.distance(1, 0), 5);
    }

    #[test]
    fn test_tour_length_closes_cycle() {
        let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
        assert_eq!(dm.tour_length(&[0, 1, 2]), 3 + 4 + 5);
        assert_eq!(dm.tour_length(&[1]), 0);
    }
}
