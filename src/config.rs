//! Per-trie configuration.

/// Which child a bit value selects.
///
/// Both conventions are internally consistent; a trie fixes one at
/// construction and never mixes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// `0` selects the left child, `1` the right child.
    #[default]
    ZeroLeft,
    /// `0` selects the right child, `1` the left child.
    ZeroRight,
}

/// One of a node's two child pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl Orientation {
    /// Side followed for bit value `bit`.
    #[inline]
    pub fn side(self, bit: u8) -> Side {
        match (self, bit) {
            (Orientation::ZeroLeft, 0) | (Orientation::ZeroRight, 1) => Side::Left,
            _ => Side::Right,
        }
    }
}

/// Configuration for a [`PatriciaTrie`](crate::PatriciaTrie).
#[derive(Debug, Clone)]
pub struct TrieConfig {
    /// Bit-direction convention.
    pub orientation: Orientation,
    /// Initial node capacity hint.
    pub initial_capacity: usize,
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            initial_capacity: 16,
        }
    }
}

impl TrieConfig {
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}
