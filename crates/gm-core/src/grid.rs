//! Grid geometry: positions, 8-way directions, and coarse cell coordinates.
//!
//! The whole core reasons in **Chebyshev distance** — `max(|dx|, |dy|)` — the
//! natural metric for 8-directional, uniform-cost movement: every step to any
//! of the 8 neighbors reduces it by at most 1, so it doubles as a consistent
//! A* heuristic.

use std::fmt;

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the 8 grid directions, clockwise from north.
///
/// The discriminant doubles as the wire encoding of a direction argument
/// (see `gm-behavior`'s action encoding), so the order is part of the
/// external contract and must not change.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    /// All 8 directions in discriminant order.  Iterating this table gives
    /// every movement routine the same deterministic candidate order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// `(dx, dy)` unit offset.  North is −y.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Direction matching a unit offset, or `None` for `(0, 0)` or any
    /// non-unit delta.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| d.delta() == (dx, dy))
    }

    /// The direction pointing the opposite way.
    #[inline]
    pub fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 4) % 8]
    }

    /// Discriminant as a `usize`, for table indexing.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction from a discriminant, for decoding.  `None` if out of range.
    pub fn from_index(i: u8) -> Option<Direction> {
        Direction::ALL.get(i as usize).copied()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
        };
        f.write_str(s)
    }
}

// ── GridPos ───────────────────────────────────────────────────────────────────

/// A tile coordinate.  Signed so off-map arithmetic (e.g. neighbor probing at
/// the border) never underflows; the world view decides what is in bounds.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: `max(|dx|, |dy|)`.
    #[inline]
    pub fn chebyshev(self, other: GridPos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// The position one step in `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> GridPos {
        let (dx, dy) = dir.delta();
        GridPos::new(self.x + dx, self.y + dy)
    }

    /// All 8 neighboring positions, in [`Direction::ALL`] order.
    pub fn neighbors8(self) -> [GridPos; 8] {
        Direction::ALL.map(|d| self.step(d))
    }

    /// `true` if `other` is one of the 8 neighbors (distance exactly 1).
    #[inline]
    pub fn adjacent(self, other: GridPos) -> bool {
        self.chebyshev(other) == 1
    }

    /// Direction of the single step from `self` toward `other`, clamping each
    /// axis delta to ±1.  `None` when the positions coincide.
    pub fn direction_to(self, other: GridPos) -> Option<Direction> {
        let dx = (other.x - self.x).signum();
        let dy = (other.y - self.y).signum();
        Direction::from_delta(dx, dy)
    }

    /// The coarse spatial cell containing this position.
    ///
    /// Uses euclidean (floor) division so negative coordinates land in the
    /// correct cell rather than sharing cell 0 with positives.
    #[inline]
    pub fn cell(self, cell_size: i32) -> CellCoord {
        CellCoord {
            cx: self.x.div_euclid(cell_size),
            cy: self.y.div_euclid(cell_size),
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── CellCoord ─────────────────────────────────────────────────────────────────

/// Coordinate of one coarse bucket in the spatial index's cell grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub cx: i32,
    pub cy: i32,
}

impl CellCoord {
    /// Chebyshev distance in whole cells.
    #[inline]
    pub fn chebyshev(self, other: CellCoord) -> i32 {
        (self.cx - other.cx).abs().max((self.cy - other.cy).abs())
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell({}, {})", self.cx, self.cy)
    }
}
