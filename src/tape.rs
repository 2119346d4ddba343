//! The machine's tape: a sequence of cells that is conceptually infinite in both
//! directions but only materialized as far as the head has travelled.

use crate::types::Direction;
use std::collections::VecDeque;
use std::fmt;

/// A growable tape with a read/write head.
///
/// Cells live in a `VecDeque` so growth at either end is O(1) amortized and the head
/// is a plain index. The tape never shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<char>,
    head: usize,
    blank: char,
}

impl Tape {
    /// Creates a tape holding `input` with the head on the first cell.
    /// An empty input yields a tape with a single blank cell.
    pub fn new(input: &str, blank: char) -> Self {
        let mut cells: VecDeque<char> = input.chars().collect();
        if cells.is_empty() {
            cells.push_back(blank);
        }

        Self {
            cells,
            head: 0,
            blank,
        }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.cells[self.head]
    }

    /// Overwrites the symbol under the head.
    pub fn write(&mut self, symbol: char) {
        self.cells[self.head] = symbol;
    }

    /// Moves the head one cell. Stepping past either end first materializes
    /// one blank cell there.
    pub fn shift(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.head == 0 {
                    // The new cell takes index 0, so the head index stays put.
                    self.cells.push_front(self.blank);
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => {
                if self.head + 1 == self.cells.len() {
                    self.cells.push_back(self.blank);
                }
                self.head += 1;
            }
        }
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a tape holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn blank(&self) -> char {
        self.blank
    }

    pub fn cells(&self) -> impl Iterator<Item = char> + '_ {
        self.cells.iter().copied()
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cells.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
