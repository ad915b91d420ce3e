//! Pending states of the search.

use crate::backtrace::SearchState;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// Order in which discovered states are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// FIFO, breadth-first. Finds a path with the fewest transitions.
    Queue,
    /// LIFO, depth-first. Finds some path.
    Stack,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Queue => write!(f, "queue"),
            SearchMode::Stack => write!(f, "stack"),
        }
    }
}

/// Double-ended container of states: always pushed at the back, popped from
/// the front (queue) or the back (stack).
#[derive(Debug, Clone)]
pub struct Frontier {
    mode: SearchMode,
    states: VecDeque<SearchState>,
}

impl Frontier {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            states: VecDeque::new(),
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn push(&mut self, state: SearchState) {
        self.states.push_back(state);
    }

    /// Next state to expand, or `None` once the frontier is exhausted.
    pub fn pop(&mut self) -> Option<SearchState> {
        match self.mode {
            SearchMode::Queue => self.states.pop_front(),
            SearchMode::Stack => self.states.pop_back(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Color, Position};

    fn states() -> [SearchState; 3] {
        [
            SearchState::new(Color::TRAPDOOR, Position::new(0, 0)),
            SearchState::new(Color::TRAPDOOR, Position::new(0, 1)),
            SearchState::new(Color::from_index(1), Position::new(0, 1)),
        ]
    }

    fn drain(frontier: &mut Frontier) -> Vec<SearchState> {
        std::iter::from_fn(|| frontier.pop()).collect()
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut frontier = Frontier::new(SearchMode::Queue);
        for state in states() {
            frontier.push(state);
        }
        assert_eq!(frontier.len(), 3);
        assert_eq!(drain(&mut frontier), states().to_vec());
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_stack_is_lifo() {
        let mut frontier = Frontier::new(SearchMode::Stack);
        for state in states() {
            frontier.push(state);
        }
        let mut expected = states().to_vec();
        expected.reverse();
        assert_eq!(drain(&mut frontier), expected);
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_interleaved_queue() {
        let [a, b, c] = states();
        let mut frontier = Frontier::new(SearchMode::Queue);
        frontier.push(a);
        frontier.push(b);
        assert_eq!(frontier.pop(), Some(a));
        frontier.push(c);
        assert_eq!(frontier.pop(), Some(b));
        assert_eq!(frontier.pop(), Some(c));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(SearchMode::Queue.to_string(), "queue");
        assert_eq!(Frontier::new(SearchMode::Stack).mode(), SearchMode::Stack);
    }
}
