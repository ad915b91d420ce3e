//! Search engine.
//!
//! Explores `(color, row, col)` states from the start until the target is
//! discovered or the frontier runs dry. Every state is discovered at most
//! once, so the search is linear in the size of the state space.

use crate::backtrace::{Backtrace, Direction, Marker, SearchState};
use crate::frontier::{Frontier, SearchMode};
use crate::grid::{CellKind, Color, PuzzleMap};
use crate::path::Path;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

/// Internal invariant violations. Never caused by user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("state {0} was discovered twice")]
    Rediscovered(SearchState),
    #[error("corrupt backtrace at {state}: {reason}")]
    CorruptBacktrace {
        state: SearchState,
        reason: &'static str,
    },
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The target was reached in this state.
    Solved(SearchState),
    /// Every reachable state was explored without reaching the target.
    Exhausted,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States written to the backtrace
    pub discovered: usize,
    /// States popped from the frontier
    pub expanded: usize,
    /// Largest frontier length observed
    pub peak_frontier: usize,
}

/// Result of [`Solver::solve`]: the outcome plus the filled ledger.
#[derive(Debug, Clone)]
pub struct Search {
    pub mode: SearchMode,
    pub outcome: SearchOutcome,
    pub backtrace: Backtrace,
    pub stats: SearchStats,
}

impl Search {
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<SearchState> {
        match self.outcome {
            SearchOutcome::Solved(state) => Some(state),
            SearchOutcome::Exhausted => None,
        }
    }

    /// Reconstruct the path to the solution, if there is one.
    pub fn path(&self, map: &PuzzleMap) -> Result<Option<Path>, SearchError> {
        self.solution()
            .map(|state| Path::reconstruct(map, &self.backtrace, state))
            .transpose()
    }

    /// Serializable summary of this search.
    pub fn report(&self, map: &PuzzleMap) -> Result<SolveReport, SearchError> {
        let path = self.path(map)?;
        let discovered_cells = map
            .positions()
            .filter(|&pos| self.backtrace.is_cell_discovered(pos))
            .count();
        Ok(SolveReport {
            solved: path.is_some(),
            mode: self.mode,
            path: path.map(|p| p.states().to_vec()).unwrap_or_default(),
            discovered_cells,
            stats: self.stats,
        })
    }
}

/// Machine-readable summary of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    pub solved: bool,
    pub mode: SearchMode,
    /// Start to target; empty when unsolved
    pub path: Vec<SearchState>,
    /// Grid cells discovered in at least one color
    pub discovered_cells: usize,
    pub stats: SearchStats,
}

/// Searches a [`PuzzleMap`] with a fixed [`SearchMode`].
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    mode: SearchMode,
}

impl Solver {
    pub fn new(mode: SearchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Run the search to completion.
    pub fn solve(&self, map: &PuzzleMap) -> Result<Search, SearchError> {
        let mut backtrace = Backtrace::new(map);
        let mut frontier = Frontier::new(self.mode);
        let mut stats = SearchStats::default();

        let start = SearchState::new(Color::TRAPDOOR, map.start());
        backtrace.record(start, Marker::Start)?;
        frontier.push(start);

        debug!(
            mode = %self.mode,
            colors = map.num_colors(),
            height = map.height(),
            width = map.width(),
            "starting search"
        );

        let outcome = loop {
            stats.peak_frontier = stats.peak_frontier.max(frontier.len());
            let Some(current) = frontier.pop() else {
                break SearchOutcome::Exhausted;
            };
            stats.expanded += 1;

            if let Some(solution) = expand(map, &mut backtrace, &mut frontier, current)? {
                break SearchOutcome::Solved(solution);
            }
        };
        stats.discovered = backtrace.discovered_count();

        match outcome {
            SearchOutcome::Solved(state) => debug!(
                %state,
                discovered = stats.discovered,
                expanded = stats.expanded,
                "target reached"
            ),
            SearchOutcome::Exhausted => debug!(
                discovered = stats.discovered,
                expanded = stats.expanded,
                "frontier exhausted"
            ),
        }

        Ok(Search {
            mode: self.mode,
            outcome,
            backtrace,
            stats,
        })
    }
}

/// Expand one popped state. Returns the solution state once the target is hit.
fn expand(
    map: &PuzzleMap,
    backtrace: &mut Backtrace,
    frontier: &mut Frontier,
    current: SearchState,
) -> Result<Option<SearchState>, SearchError> {
    let cell = map.cell(current.pos);

    // Standing on a button of another color presses it; no movement this turn.
    if let Some(pressed) = cell.press_color().filter(|&c| c != current.color) {
        let next = SearchState::new(pressed, current.pos);
        if !backtrace.is_discovered(next) {
            backtrace.record(next, Marker::FromColor(current.color))?;
            trace!(from = %current, to = %next, "button pressed");
            frontier.push(next);
        }
        return Ok(None);
    }

    if cell == CellKind::Target {
        return Ok(Some(current));
    }

    let doors_closed = cell == CellKind::Trapdoor;
    for dir in Direction::ALL {
        let Some(pos) = map.neighbor(current.pos, dir) else {
            continue;
        };
        let next = SearchState::new(current.color, pos);
        if backtrace.is_discovered(next) {
            continue;
        }

        let kind = map.cell(pos);
        if !is_passable(kind, current.color, doors_closed) {
            continue;
        }

        backtrace.record(next, Marker::FromDirection(dir.opposite()))?;
        trace!(state = %next, "discovered");
        frontier.push(next);

        if kind == CellKind::Target {
            return Ok(Some(next));
        }
    }

    Ok(None)
}

/// Whether a cell of `kind` can be entered while the active color is `color`.
pub(crate) fn is_passable(kind: CellKind, color: Color, doors_closed: bool) -> bool {
    match kind {
        CellKind::Floor | CellKind::Button(_) | CellKind::Trapdoor | CellKind::Target => true,
        CellKind::Door(door) => door == color && !doors_closed,
        // the start is solid only in its own colorless state
        CellKind::Start => !color.is_trapdoor(),
        CellKind::Wall => false,
    }
}
