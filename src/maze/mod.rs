use std::fmt;

use enumset::{enum_set, EnumSet, EnumSetType};

mod layout;
pub use layout::*;

mod state;
pub use state::*;

/// A cell of the maze. `x` grows eastwards, `y` grows southwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    #[inline]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn manhattan_distance(self, other: Position) -> u16 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    #[inline]
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Hash, PartialOrd, Ord, EnumSetType)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// Directions that change the agent's cell.
    pub const MOVES: EnumSet<Direction> = enum_set!(Direction::North | Direction::South | Direction::East | Direction::West);

    #[inline]
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }
}

/// Row-major rectangular grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![T::default(); width * height],
        }
    }
}

impl<T: Copy> Grid<T> {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, position: Position) -> Option<usize> {
        let (x, y) = (usize::try_from(position.x).ok()?, usize::try_from(position.y).ok()?);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// `None` outside the grid.
    #[inline]
    pub fn get(&self, position: Position) -> Option<T> {
        self.index(position).map(|i| self.cells[i])
    }

    /// Returns `false` if `position` is outside the grid.
    #[inline]
    pub fn set(&mut self, position: Position, value: T) -> bool {
        let Some(i) = self.index(position) else {
            return false;
        };
        self.cells[i] = value;
        true
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x as i16, y as i16)))
    }
}
