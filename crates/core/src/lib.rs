#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod item;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use item::{ItemId, ItemStack, DEFAULT_STACK_SIZE};

/// Integer position of a block in the world.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct BlockPos {
    /// East/west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North/south axis.
    pub z: i32,
}

impl BlockPos {
    /// The world origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a position from components.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Translate by an arbitrary component offset.
    pub fn add(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Step `distance` blocks in the given facing direction.
    pub fn offset(self, facing: Facing, distance: i32) -> Self {
        let (dx, dy, dz) = facing.unit_vector();
        self.add(dx * distance, dy * distance, dz * distance)
    }
}

/// One of the four horizontal directions a block machine can be installed to face.
///
/// The horizontal index order (`0=North, 1=South, 2=West, 3=East`) matches the
/// engine's encoding and is load-bearing for [`Facing::from_meta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Toward negative z.
    North,
    /// Toward positive z.
    South,
    /// Toward negative x.
    West,
    /// Toward positive x.
    East,
}

impl Facing {
    /// Get the facing for a horizontal index (wraps into `0..=3`).
    pub fn from_horizontal_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Facing::North,
            1 => Facing::South,
            2 => Facing::West,
            _ => Facing::East,
        }
    }

    /// The horizontal index of this facing.
    pub fn horizontal_index(self) -> i32 {
        match self {
            Facing::North => 0,
            Facing::South => 1,
            Facing::West => 2,
            Facing::East => 3,
        }
    }

    /// Decode raw rotation metadata into a facing.
    ///
    /// Rotation metadata uses a different horizontal order than
    /// [`Facing::from_horizontal_index`]; the two shifts below move between
    /// them. The mapping was derived for the engine's state encoding and must
    /// stay exactly as-is (for metadata `0..=3` it is the permutation
    /// `0→2, 1→0, 2→1, 3→3`).
    pub fn from_meta(raw: i32) -> Self {
        let mut index = raw;
        if index < 3 {
            index -= 1;
        }
        if index < 0 {
            index += 3;
        }
        Self::from_horizontal_index(index)
    }

    /// Unit vector pointing in this direction.
    pub fn unit_vector(self) -> (i32, i32, i32) {
        match self {
            Facing::North => (0, 0, -1),
            Facing::South => (0, 0, 1),
            Facing::West => (-1, 0, 0),
            Facing::East => (1, 0, 0),
        }
    }

    /// The opposite facing.
    pub fn opposite(self) -> Self {
        match self {
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::West => Facing::East,
            Facing::East => Facing::West,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_pos_offset() {
        let pos = BlockPos::new(1, 2, 3);
        assert_eq!(pos.offset(Facing::North, 2), BlockPos::new(1, 2, 1));
        assert_eq!(pos.offset(Facing::South, 2), BlockPos::new(1, 2, 5));
        assert_eq!(pos.offset(Facing::West, 5), BlockPos::new(-4, 2, 3));
        assert_eq!(pos.offset(Facing::East, 5), BlockPos::new(6, 2, 3));
    }

    #[test]
    fn test_from_meta_table() {
        // The full decode table for the expected metadata domain.
        assert_eq!(Facing::from_meta(0), Facing::West);
        assert_eq!(Facing::from_meta(1), Facing::North);
        assert_eq!(Facing::from_meta(2), Facing::South);
        assert_eq!(Facing::from_meta(3), Facing::East);
    }

    #[test]
    fn test_from_meta_is_bijection() {
        let mut seen = [false; 4];
        for meta in 0..4 {
            let index = Facing::from_meta(meta).horizontal_index() as usize;
            assert!(!seen[index], "facing {} produced twice", index);
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_from_meta_out_of_domain_is_still_valid() {
        for meta in -8..16 {
            let facing = Facing::from_meta(meta);
            assert!((0..4).contains(&facing.horizontal_index()));
        }
    }

    #[test]
    fn test_horizontal_index_roundtrip() {
        for index in 0..4 {
            assert_eq!(
                Facing::from_horizontal_index(index).horizontal_index(),
                index
            );
        }
    }

    #[test]
    fn test_unit_vectors() {
        assert_eq!(Facing::North.unit_vector(), (0, 0, -1));
        assert_eq!(Facing::South.unit_vector(), (0, 0, 1));
        assert_eq!(Facing::West.unit_vector(), (-1, 0, 0));
        assert_eq!(Facing::East.unit_vector(), (1, 0, 0));
    }

    #[test]
    fn test_opposite() {
        for index in 0..4 {
            let facing = Facing::from_horizontal_index(index);
            assert_eq!(facing.opposite().opposite(), facing);
        }
    }
}
