//! Search states and the write-once discovery ledger.

use crate::grid::{Color, Position, PuzzleMap};
use crate::solver::SearchError;
use serde::Serialize;
use std::fmt;

/// Orthogonal step direction, in the order neighbors are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Expansion order used by the solver.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// `(row, col)` delta of one step.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }
}

/// The agent standing at `pos` with active color `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SearchState {
    pub color: Color,
    #[serde(flatten)]
    pub pos: Position,
}

impl SearchState {
    pub fn new(color: Color, pos: Position) -> Self {
        Self { color, pos }
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, ({}, {}))", self.color, self.pos.row, self.pos.col)
    }
}

/// How a state was first reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Marker {
    #[default]
    Undiscovered,
    /// The initial state
    Start,
    /// Reached by a move; the predecessor lies one step in this direction.
    FromDirection(Direction),
    /// Reached by pressing this cell's button while in the given color.
    FromColor(Color),
}

impl Marker {
    pub fn is_discovered(self) -> bool {
        self != Marker::Undiscovered
    }
}

/// One [`Marker`] per `(color, row, col)`, each written at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backtrace {
    layers: usize,
    height: usize,
    width: usize,
    markers: Vec<Marker>,
    discovered: usize,
}

impl Backtrace {
    /// Empty ledger sized for `map`.
    pub fn new(map: &PuzzleMap) -> Self {
        Self {
            layers: map.layer_count(),
            height: map.height(),
            width: map.width(),
            markers: vec![Marker::Undiscovered; map.state_count()],
            discovered: 0,
        }
    }

    fn index(&self, state: SearchState) -> usize {
        debug_assert!(state.color.index() < self.layers);
        debug_assert!(state.pos.row < self.height && state.pos.col < self.width);
        (state.color.index() * self.height + state.pos.row) * self.width + state.pos.col
    }

    /// Marker for `state`. Panics when the state lies outside the ledger.
    pub fn marker(&self, state: SearchState) -> Marker {
        self.markers[self.index(state)]
    }

    pub fn is_discovered(&self, state: SearchState) -> bool {
        self.marker(state).is_discovered()
    }

    /// Record how `state` was reached. The entry must still be undiscovered
    /// and `marker` must describe an actual discovery.
    pub fn record(&mut self, state: SearchState, marker: Marker) -> Result<(), SearchError> {
        if !marker.is_discovered() {
            return Err(SearchError::CorruptBacktrace {
                state,
                reason: "recorded an undiscovered marker",
            });
        }
        let index = self.index(state);
        if self.markers[index].is_discovered() {
            return Err(SearchError::Rediscovered(state));
        }
        self.discovered += 1;
        self.markers[index] = marker;
        Ok(())
    }

    /// Number of states discovered so far.
    pub fn discovered_count(&self) -> usize {
        self.discovered
    }

    /// Whether any color layer discovered the cell at `pos`.
    pub fn is_cell_discovered(&self, pos: Position) -> bool {
        (0..self.layers).any(|layer| {
            let color = Color::from_index(layer as u8);
            self.is_discovered(SearchState::new(color, pos))
        })
    }

    /// Number of color layers.
    pub fn layers(&self) -> usize {
        self.layers
    }
}
