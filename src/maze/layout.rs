use std::sync::Arc;

use crate::data_structures::SmallList;

use super::{Grid, MazeState, Position};

/// Indicates a maze layout could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,
    #[error("layout is too large: {width}x{height}")]
    TooLarge { width: usize, height: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("unknown glyph {glyph:?} at {position}")]
    UnknownGlyph { glyph: char, position: Position },
    #[error("layout has no protagonist ('P')")]
    MissingProtagonist,
    #[error("second protagonist at {0}")]
    DuplicateProtagonist(Position),
}

/// Static description of a maze and its starting configuration.
///
/// Parsed from the classic text format:
/// `%` wall, `.` food, `o` capsule, `P` protagonist, `G` adversary, space for an empty cell.
/// Adversaries are numbered `1, 2, ...` in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub walls: Arc<Grid<bool>>,
    pub food: Grid<bool>,
    pub capsules: SmallList<Position>,
    pub protagonist: Position,
    pub adversaries: SmallList<Position>,
}

impl Layout {
    pub fn parse(text: &str) -> Result<Layout, LayoutError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .skip_while(|line| line.trim().is_empty())
            .collect();
        let rows = match rows.iter().rposition(|line| !line.trim().is_empty()) {
            Some(last) => &rows[..=last],
            None => return Err(LayoutError::Empty),
        };

        let width = rows[0].chars().count();
        let height = rows.len();
        if width > i16::MAX as usize || height > i16::MAX as usize {
            return Err(LayoutError::TooLarge { width, height });
        }

        let mut walls = Grid::new(width, height);
        let mut food = Grid::new(width, height);
        let mut capsules = SmallList::new();
        let mut protagonist = None;
        let mut adversaries = SmallList::new();
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, glyph) in row.chars().enumerate() {
                let position = Position::new(x as i16, y as i16);
                match glyph {
                    '%' => {
                        walls.set(position, true);
                    }
                    '.' => {
                        food.set(position, true);
                    }
                    'o' => capsules.push(position),
                    'G' => adversaries.push(position),
                    'P' => {
                        if protagonist.is_some() {
                            return Err(LayoutError::DuplicateProtagonist(position));
                        }
                        protagonist = Some(position);
                    }
                    ' ' => {}
                    glyph => return Err(LayoutError::UnknownGlyph { glyph, position }),
                }
            }
        }

        let protagonist = protagonist.ok_or(LayoutError::MissingProtagonist)?;
        Ok(Layout {
            walls: Arc::new(walls),
            food,
            capsules,
            protagonist,
            adversaries,
        })
    }

    #[inline]
    pub fn num_agents(&self) -> usize {
        1 + self.adversaries.len()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.walls.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.walls.height()
    }

    /// The initial state of a game on this layout.
    pub fn start(&self) -> MazeState {
        MazeState::new(self)
    }
}
