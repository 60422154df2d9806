//! Packed permutation keys.

/// A permutation of at most 15 values packed into a single `u64`.
///
/// Position `i` occupies bits `4i..4i+4`. Values must be in `1..=15`, so
/// an all-zero nibble marks an unused position and keys of different
/// lengths never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PermutationKey(u64);

impl PermutationKey {
    /// Maximum number of positions a key can hold.
    pub const MAX_LEN: usize = 15;

    /// Packs `perm` into a key.
    ///
    /// # Panics
    ///
    /// Panics if `perm` is longer than [`Self::MAX_LEN`] or holds a value
    /// outside `1..=15`.
    pub fn from_slice(perm: &[u8]) -> Self {
        assert!(
            perm.len() <= Self::MAX_LEN,
            "permutation of {} values does not fit a key",
            perm.len()
        );
        let mut bits = 0u64;
        for (i, &value) in perm.iter().enumerate() {
            assert!(
                (1..=15).contains(&value),
                "value {value} at position {i} outside 1..=15"
            );
            bits |= (value as u64) << (4 * i);
        }
        PermutationKey(bits)
    }

    /// Value at position `i` (0 when the position is unused).
    pub fn get(self, i: usize) -> u8 {
        ((self.0 >> (4 * i)) & 0xF) as u8
    }

    pub fn bits(self) -> u64 {
        self.0
    }
}
