//! Backward reconstruction of the solution path from the backtrace.

use crate::backtrace::{Backtrace, Marker, SearchState};
use crate::grid::{Color, PuzzleMap};
use crate::solver::SearchError;
use serde::Serialize;

/// States from the start to a solution, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path {
    states: Vec<SearchState>,
}

impl Path {
    /// Follow the markers back from `end` to the start state.
    ///
    /// Fails when the ledger does not describe a walk back to the start,
    /// which means the search bookkeeping is broken.
    pub fn reconstruct(
        map: &PuzzleMap,
        backtrace: &Backtrace,
        end: SearchState,
    ) -> Result<Self, SearchError> {
        let corrupt = |state: SearchState, reason: &'static str| {
            SearchError::CorruptBacktrace { state, reason }
        };

        if !map.contains(end.pos) || end.color.value() > map.num_colors() {
            return Err(corrupt(end, "state outside the map"));
        }

        let mut states = vec![end];
        let mut current = end;
        loop {
            current = match backtrace.marker(current) {
                Marker::Start => {
                    if current != SearchState::new(Color::TRAPDOOR, map.start()) {
                        return Err(corrupt(current, "start marker away from the start"));
                    }
                    break;
                }
                Marker::Undiscovered => return Err(corrupt(current, "undiscovered state")),
                Marker::FromDirection(dir) => {
                    let pos = map
                        .neighbor(current.pos, dir)
                        .ok_or_else(|| corrupt(current, "step leaves the grid"))?;
                    SearchState::new(current.color, pos)
                }
                Marker::FromColor(color) => {
                    if color == current.color || color.value() > map.num_colors() {
                        return Err(corrupt(current, "invalid color change"));
                    }
                    SearchState::new(color, current.pos)
                }
            };

            // a walk longer than the state space can only be a cycle
            if states.len() >= map.state_count() {
                return Err(corrupt(current, "cycle in backtrace"));
            }
            states.push(current);
        }

        states.reverse();
        Ok(Self { states })
    }

    pub fn states(&self) -> &[SearchState] {
        &self.states
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchState> {
        self.states.iter()
    }

    /// Number of states, start and end included.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Moves plus button presses.
    pub fn transitions(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    /// Number of color changes along the path.
    pub fn presses(&self) -> usize {
        self.states
            .windows(2)
            .filter(|pair| pair[0].color != pair[1].color)
            .count()
    }

    pub fn contains(&self, state: &SearchState) -> bool {
        self.states.contains(state)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a SearchState;
    type IntoIter = std::slice::Iter<'a, SearchState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtrace::Direction;
    use crate::grid::Position;

    fn state(color: u8, row: usize, col: usize) -> SearchState {
        SearchState::new(Color::from_index(color), Position::new(row, col))
    }

    fn corridor() -> (PuzzleMap, Backtrace) {
        let map = PuzzleMap::parse("1 1 3\n@a?\n").unwrap();
        let backtrace = Backtrace::new(&map);
        (map, backtrace)
    }

    fn reason(err: SearchError) -> &'static str {
        match err {
            SearchError::CorruptBacktrace { reason, .. } => reason,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_reconstruct_moves_and_presses() {
        let (map, mut bt) = corridor();
        bt.record(state(0, 0, 0), Marker::Start).unwrap();
        bt.record(state(0, 0, 1), Marker::FromDirection(Direction::West)).unwrap();
        bt.record(state(1, 0, 1), Marker::FromColor(Color::TRAPDOOR)).unwrap();
        bt.record(state(1, 0, 2), Marker::FromDirection(Direction::West)).unwrap();

        let path = Path::reconstruct(&map, &bt, state(1, 0, 2)).unwrap();
        assert_eq!(
            path.states(),
            &[state(0, 0, 0), state(0, 0, 1), state(1, 0, 1), state(1, 0, 2)]
        );
        assert_eq!(path.transitions(), 3);
        assert_eq!(path.presses(), 1);
        assert!(path.contains(&state(1, 0, 1)));
        assert!(!path.contains(&state(1, 0, 0)));
        assert_eq!(path.iter().count(), 4);
    }

    #[test]
    fn test_start_only_path() {
        let (map, mut bt) = corridor();
        bt.record(state(0, 0, 0), Marker::Start).unwrap();
        let path = Path::reconstruct(&map, &bt, state(0, 0, 0)).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.transitions(), 0);
    }

    #[test]
    fn test_undiscovered_state_is_corrupt() {
        let (map, bt) = corridor();
        let err = Path::reconstruct(&map, &bt, state(0, 0, 2)).unwrap_err();
        assert_eq!(reason(err), "undiscovered state");
    }

    #[test]
    fn test_step_off_grid_is_corrupt() {
        let (map, mut bt) = corridor();
        bt.record(state(0, 0, 2), Marker::FromDirection(Direction::East)).unwrap();
        let err = Path::reconstruct(&map, &bt, state(0, 0, 2)).unwrap_err();
        assert_eq!(reason(err), "step leaves the grid");
    }

    #[test]
    fn test_bad_color_is_corrupt() {
        let (map, mut bt) = corridor();
        bt.record(state(1, 0, 2), Marker::FromColor(Color::from_index(1))).unwrap();
        let err = Path::reconstruct(&map, &bt, state(1, 0, 2)).unwrap_err();
        assert_eq!(reason(err), "invalid color change");

        let err = Path::reconstruct(&map, &bt, state(5, 0, 2)).unwrap_err();
        assert_eq!(reason(err), "state outside the map");
    }

    #[test]
    fn test_cycle_is_corrupt() {
        let (map, mut bt) = corridor();
        bt.record(state(0, 0, 1), Marker::FromDirection(Direction::East)).unwrap();
        bt.record(state(0, 0, 2), Marker::FromDirection(Direction::West)).unwrap();
        let err = Path::reconstruct(&map, &bt, state(0, 0, 2)).unwrap_err();
        assert_eq!(reason(err), "cycle in backtrace");
    }

    #[test]
    fn test_misplaced_start_marker_is_corrupt() {
        let (map, mut bt) = corridor();
        bt.record(state(0, 0, 2), Marker::Start).unwrap();
        let err = Path::reconstruct(&map, &bt, state(0, 0, 2)).unwrap_err();
        assert_eq!(reason(err), "start marker away from the start");
    }
}
