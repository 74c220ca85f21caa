//! Boards described as ASCII art.
//!
//! ```text
//! S..#....
//! .#.#.1..
//! .#...#.E
//! ```
//!
//! `.` is an empty cell, `#` a barrier, `S` the start, `1`–`9` via-points
//! visited in digit order and `E` the end. A layout containing `E` is
//! finalized after loading. Lines must all have the same width; `\n` and
//! `\r\n` line endings are both accepted.
//!
//! Via-points are numbered by placement, so only their relative order
//! survives loading: `S.2.E` renders back as `S.1.E`.

use std::collections::BTreeMap;

use thiserror::Error;
use waypath_core::{Coord, GridConfig, Role};

use crate::board::Board;
use crate::error::CommandError;

/// Errors that can occur when loading a layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,
    /// Line `line` (0-based) differs in width from the first line.
    #[error("layout line {line} has width {width}, expected {expected}")]
    InconsistentSize {
        line: usize,
        width: usize,
        expected: usize,
    },
    #[error("layout contains invalid character \u{201c}{ch}\u{201d} at {coord}")]
    InvalidChar { ch: char, coord: Coord },
    #[error("stop \u{201c}{0}\u{201d} appears more than once")]
    DuplicateStop(char),
    #[error(transparent)]
    Command(#[from] CommandError),
}

// Sort keys for stops: start first, end last.
const START_KEY: u32 = 0;
const END_KEY: u32 = u32::MAX;

impl Board {
    /// Build a board from an ASCII layout.
    ///
    /// Leading and trailing blank lines are ignored; leading and trailing
    /// whitespace inside lines is not.
    pub fn from_ascii(s: &str) -> Result<Board, LayoutError> {
        let lines: Vec<&str> = s.trim_matches(['\r', '\n']).lines().collect();
        let Some(first) = lines.first() else {
            return Err(LayoutError::Empty);
        };
        let expected = first.chars().count();
        if expected == 0 {
            return Err(LayoutError::Empty);
        }

        let mut barriers = Vec::new();
        let mut stops: BTreeMap<u32, Coord> = BTreeMap::new();

        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != expected {
                return Err(LayoutError::InconsistentSize {
                    line: row,
                    width,
                    expected,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let coord = Coord::new(row as i32, col as i32);
                let key = match ch {
                    '.' => continue,
                    '#' => {
                        barriers.push(coord);
                        continue;
                    }
                    'S' => START_KEY,
                    'E' => END_KEY,
                    '1'..='9' => ch as u32 - '0' as u32,
                    _ => return Err(LayoutError::InvalidChar { ch, coord }),
                };
                if stops.insert(key, coord).is_some() {
                    return Err(LayoutError::DuplicateStop(ch));
                }
            }
        }

        let config = GridConfig::default()
            .with_rows(lines.len() as i32)
            .with_cols(expected as i32);
        let mut board = Board::new(config);
        for c in barriers {
            board.place_barrier(c, &mut ())?;
        }
        for &c in stops.values() {
            board.place_waypoint(c, &mut ())?;
        }
        if stops.contains_key(&END_KEY) {
            board.finalize_stops(&mut ())?;
        }
        log::debug!(
            "loaded {} layout with {} stops",
            config.bounds(),
            stops.len()
        );
        Ok(board)
    }

    /// Render the board back to ASCII, drawing the last route as `*`.
    ///
    /// Via-points above 9 are drawn as `+`.
    pub fn render_ascii(&self) -> String {
        let grid = self.grid();
        let mut out = String::with_capacity(grid.bounds().len() + grid.rows() as usize);
        for (c, cell) in grid.iter() {
            if c.col == 0 && c.row > 0 {
                out.push('\n');
            }
            let ch = match cell.role {
                Role::Barrier => '#',
                Role::Waypoint(Some(0)) => 'S',
                Role::Waypoint(None) => 'E',
                Role::Waypoint(Some(n)) => char::from_digit(n, 10).unwrap_or('+'),
                Role::Empty if self.route().is_some_and(|r| r.contains(c)) => '*',
                Role::Empty => '.',
            };
            out.push(ch);
        }
        out
    }
}
