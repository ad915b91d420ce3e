//! Colored-button maze engine.
//!
//! A puzzle is a grid of walls, floors, colored buttons and doors, trapdoors,
//! a start and a target. Standing on a button switches the active color, and
//! the active color decides which doors are open. The engine searches the
//! `(color, row, col)` state space, records how each state was first reached
//! in a write-once [`Backtrace`], and renders the reconstructed [`Path`].

mod backtrace;
mod frontier;
mod grid;
mod path;
mod render;
mod solver;

pub use backtrace::{Backtrace, Direction, Marker, SearchState};
pub use frontier::{Frontier, SearchMode};
pub use grid::{CellKind, Color, GridError, Position, PuzzleMap, MAX_COLORS};
pub use path::Path;
pub use render::{render_list, render_map, render_no_solution, OutputMode};
pub use solver::{Search, SearchError, SearchOutcome, SearchStats, SolveReport, Solver};
