//! Text renderings of a finished search.
//!
//! Map legend, per color layer:
//!
//! | symbol | on the path                                              |
//! |--------|----------------------------------------------------------|
//! | `@`    | the start (colorless layer) or a button pressed into this layer |
//! | `+`    | a cell walked over in this layer, own-color buttons included |
//! | `%`    | a button pressed to leave this layer                     |
//! | `?`    | the target                                               |
//!
//! Off the path, buttons and doors of the layer's own color and the start
//! are drawn as `.`; every other cell keeps its original symbol.

use crate::backtrace::{Backtrace, Marker, SearchState};
use crate::grid::{CellKind, Color, Position, PuzzleMap};
use crate::path::Path;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::io::{self, Write};

/// How a solved search is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One annotated grid per color layer
    #[default]
    Map,
    /// One `(color, (row, col))` line per path state
    List,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Map => write!(f, "map"),
            OutputMode::List => write!(f, "list"),
        }
    }
}

/// Print the path as `(color, (row, col))` lines, start first.
pub fn render_list<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    for state in path {
        writeln!(out, "{}", state)?;
    }
    Ok(())
}

/// Print one annotated grid per color layer, each under a `// color` header.
pub fn render_map<W: Write>(
    out: &mut W,
    map: &PuzzleMap,
    backtrace: &Backtrace,
    path: &Path,
) -> io::Result<()> {
    let on_path: HashSet<SearchState> = path.iter().copied().collect();

    for color in map.colors() {
        writeln!(out, "// color {}", color)?;
        for row in 0..map.height() {
            let line: String = (0..map.width())
                .map(|col| {
                    let state = SearchState::new(color, Position::new(row, col));
                    if on_path.contains(&state) {
                        path_symbol(map, backtrace, state)
                    } else {
                        off_path_symbol(map.cell(state.pos), color)
                    }
                })
                .collect();
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Print the no-solution report: the grid with cells that no color layer
/// ever reached drawn as `#`.
pub fn render_no_solution<W: Write>(
    out: &mut W,
    map: &PuzzleMap,
    backtrace: &Backtrace,
) -> io::Result<()> {
    writeln!(out, "No solution.")?;
    writeln!(out, "Discovered:")?;
    for row in 0..map.height() {
        let line: String = (0..map.width())
            .map(|col| {
                let pos = Position::new(row, col);
                if backtrace.is_cell_discovered(pos) {
                    map.cell(pos).symbol()
                } else {
                    '#'
                }
            })
            .collect();
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn path_symbol(map: &PuzzleMap, backtrace: &Backtrace, state: SearchState) -> char {
    let cell = map.cell(state.pos);
    match cell {
        CellKind::Target => '?',
        CellKind::Start if state.color.is_trapdoor() => '@',
        CellKind::Start | CellKind::Floor | CellKind::Door(_) => '+',
        CellKind::Button(_) | CellKind::Trapdoor => {
            if cell.press_color() != Some(state.color) {
                // pressed here to switch away from this layer
                '%'
            } else if matches!(backtrace.marker(state), Marker::FromColor(_)) {
                '@'
            } else {
                '+'
            }
        }
        CellKind::Wall => '#',
    }
}

fn off_path_symbol(cell: CellKind, color: Color) -> char {
    match cell {
        CellKind::Start => '.',
        CellKind::Door(c) | CellKind::Button(c) if c == color => '.',
        CellKind::Trapdoor if color.is_trapdoor() => '.',
        other => other.symbol(),
    }
}
