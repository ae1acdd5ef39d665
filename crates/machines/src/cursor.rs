//! Row-major scan cursor over a square grid of cell offsets.

use serde::{Deserialize, Serialize};

/// A resumable 2D offset iterator bounded by a radius.
///
/// Both components range over `[-radius, radius]`. The cursor wraps the first
/// component before the second and cycles forever; a full cycle visits every
/// cell of the `(2r+1)²` grid exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanCursor {
    radius: i32,
    x: i32,
    y: i32,
}

impl ScanCursor {
    /// Create a cursor at the start of its cycle.
    pub fn new(radius: i32) -> Self {
        Self {
            radius,
            x: -radius,
            y: -radius,
        }
    }

    /// Rebuild a cursor from persisted components.
    ///
    /// Out-of-range components mean the save is from a different radius or
    /// was corrupted; the cursor restarts its cycle instead of failing.
    pub fn from_saved(radius: i32, x: i32, y: i32) -> Self {
        if x < -radius || x > radius || y < -radius || y > radius {
            return Self::new(radius);
        }
        Self { radius, x, y }
    }

    /// The scan radius this cursor was built for.
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Current first (east/west) offset component.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Current second (north/south) offset component.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Number of cells in one full cycle.
    pub fn cell_count(&self) -> u64 {
        let side = (2 * self.radius + 1) as u64;
        side * side
    }

    /// Return the current offset, then step to the next cell.
    pub fn advance(&mut self) -> (i32, i32) {
        let current = (self.x, self.y);

        self.x += 1;
        if self.x > self.radius {
            self.x = -self.radius;
            self.y += 1;
            if self.y > self.radius {
                self.y = -self.radius;
            }
        }

        current
    }

    /// Restart the cycle at `(-radius, -radius)`.
    pub fn reset(&mut self) {
        self.x = -self.radius;
        self.y = -self.radius;
    }
}
