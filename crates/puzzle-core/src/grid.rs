//! Puzzle map: colors, cell kinds and the text parser.
//!
//! Characters are decoded once into [`CellKind`] when the map is built; the
//! search and the renderers only ever look at the decoded variants.

use crate::backtrace::Direction;
use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::str::FromStr;
use thiserror::Error;

/// Highest number of button/door colors a map may declare (`a`..`z`).
pub const MAX_COLORS: u8 = 26;

/// Active color of the agent.
///
/// `0` is the colorless color the agent starts in, and the color granted by
/// trapdoors. `1..=26` correspond to the letters `a`..`z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Color(u8);

impl Color {
    /// The colorless color, shared by the start state and trapdoors.
    pub const TRAPDOOR: Color = Color(0);

    /// Color with index `0..=MAX_COLORS`, or `None` past the last letter.
    pub fn new(index: u8) -> Option<Self> {
        (index <= MAX_COLORS).then_some(Self(index))
    }

    /// Unchecked constructor for indices already known to be in range.
    pub(crate) const fn from_index(index: u8) -> Self {
        Self(index)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Layer index of this color in per-color tables.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_trapdoor(self) -> bool {
        self.0 == 0
    }

    /// Button symbol: `^` for the trapdoor color, otherwise a lowercase letter.
    pub fn symbol(self) -> char {
        if self.0 == 0 {
            '^'
        } else {
            char::from(b'a' + self.0 - 1)
        }
    }

    /// Door symbol (uppercase letter). The trapdoor color has no doors.
    pub fn door_symbol(self) -> Option<char> {
        if self.0 == 0 {
            None
        } else {
            Some(self.symbol().to_ascii_uppercase())
        }
    }

    /// Color of a letter offset (`0` for `a`/`A`), if the map declares it.
    fn from_letter(offset: u8, num_colors: u8) -> Option<Self> {
        let index = offset + 1;
        (index <= num_colors).then_some(Self(index))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// What occupies a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// `#`
    Wall,
    /// `.`
    Floor,
    /// `@`
    Start,
    /// `?`
    Target,
    /// `^`: a button for the colorless color that also closes doors while stood on
    Trapdoor,
    /// `A`..`Z`: passable only in its own color
    Door(Color),
    /// `a`..`z`: switches the active color when stood on in any other color
    Button(Color),
}

impl CellKind {
    /// Decode a map character. Letters beyond `num_colors` are rejected.
    pub fn from_symbol(ch: char, num_colors: u8) -> Option<Self> {
        match ch {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Floor),
            '@' => Some(Self::Start),
            '?' => Some(Self::Target),
            '^' => Some(Self::Trapdoor),
            'a'..='z' => Color::from_letter(ch as u8 - b'a', num_colors).map(Self::Button),
            'A'..='Z' => Color::from_letter(ch as u8 - b'A', num_colors).map(Self::Door),
            _ => None,
        }
    }

    /// The character this cell was read from.
    pub fn symbol(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Floor => '.',
            Self::Start => '@',
            Self::Target => '?',
            Self::Trapdoor => '^',
            Self::Door(color) => color.door_symbol().unwrap_or('#'),
            Self::Button(color) => color.symbol(),
        }
    }

    /// Color granted by standing on this cell (buttons and trapdoors only).
    pub fn press_color(self) -> Option<Color> {
        match self {
            Self::Button(color) => Some(color),
            Self::Trapdoor => Some(Color::TRAPDOOR),
            _ => None,
        }
    }
}

/// Grid coordinate, row-major from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Errors produced while reading a puzzle description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("must specify num_colors, height, width")]
    Header,
    #[error("must have 0 <= num_colors <= 26, got {0}")]
    ColorCount(u64),
    #[error("grid dimensions {height}x{width} must be >= 1 and fit in memory")]
    Dimensions { height: usize, width: usize },
    #[error("expected {expected} grid rows, found {found}")]
    MissingRows { expected: usize, found: usize },
    #[error("row {row} has {found} characters, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid char '{ch}' in line {line}")]
    InvalidChar { ch: char, row: usize, line: String },
    #[error("expected exactly one '@', found {0}")]
    StartCount(usize),
    #[error("expected exactly one '?', found {0}")]
    TargetCount(usize),
    #[error("failed to read puzzle: {0}")]
    Io(String),
}

/// Immutable puzzle description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleMap {
    num_colors: u8,
    height: usize,
    width: usize,
    /// Row-major cells, `height * width` long
    cells: Vec<CellKind>,
    start: Position,
    target: Position,
}

impl PuzzleMap {
    /// Parse the textual format:
    ///
    /// ```text
    /// <num_colors> <height> <width>
    /// // comments and blank lines before the grid are skipped
    /// <height rows of exactly width characters>
    /// ```
    pub fn parse(input: &str) -> Result<Self, GridError> {
        let mut lines = input.lines();

        let mut header = Vec::with_capacity(3);
        while header.len() < 3 {
            let line = lines.next().ok_or(GridError::Header)?;
            header.extend(line.split_whitespace());
        }
        if header.len() != 3 {
            return Err(GridError::Header);
        }

        let num_colors: u64 = header[0].parse().map_err(|_| GridError::Header)?;
        let height: usize = header[1].parse().map_err(|_| GridError::Header)?;
        let width: usize = header[2].parse().map_err(|_| GridError::Header)?;

        let num_colors = u8::try_from(num_colors)
            .ok()
            .filter(|&n| n <= MAX_COLORS)
            .ok_or(GridError::ColorCount(num_colors))?;
        let cell_count = height
            .checked_mul(width)
            .filter(|&n| n > 0)
            .filter(|&n| n.checked_mul(usize::from(num_colors) + 1).is_some())
            .ok_or(GridError::Dimensions { height, width })?;

        let mut rows = lines.map(|line| line.trim_end_matches('\r')).skip_while(|line| {
            line.is_empty() || line.starts_with("//")
        });

        // the header is untrusted; never reserve more than the body can fill
        let mut cells = Vec::with_capacity(cell_count.min(input.len()));
        let mut starts = Vec::new();
        let mut targets = Vec::new();

        for row in 0..height {
            let line = rows.next().ok_or(GridError::MissingRows {
                expected: height,
                found: row,
            })?;

            let found = line.chars().count();
            if found != width {
                return Err(GridError::RowLength {
                    row,
                    expected: width,
                    found,
                });
            }

            for (col, ch) in line.chars().enumerate() {
                let kind =
                    CellKind::from_symbol(ch, num_colors).ok_or_else(|| GridError::InvalidChar {
                        ch,
                        row,
                        line: line.to_string(),
                    })?;
                match kind {
                    CellKind::Start => starts.push(Position::new(row, col)),
                    CellKind::Target => targets.push(Position::new(row, col)),
                    _ => {}
                }
                cells.push(kind);
            }
        }

        let start = match starts.as_slice() {
            [start] => *start,
            _ => return Err(GridError::StartCount(starts.len())),
        };
        let target = match targets.as_slice() {
            [target] => *target,
            _ => return Err(GridError::TargetCount(targets.len())),
        };

        Ok(Self {
            num_colors,
            height,
            width,
            cells,
            start,
            target,
        })
    }

    /// Read the whole stream and parse it.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, GridError> {
        let mut input = String::new();
        reader
            .read_to_string(&mut input)
            .map_err(|e| GridError::Io(e.to_string()))?;
        Self::parse(&input)
    }

    pub fn num_colors(&self) -> u8 {
        self.num_colors
    }

    /// Every color a search state can have, colorless first.
    pub fn colors(&self) -> impl Iterator<Item = Color> {
        (0..=self.num_colors).map(Color)
    }

    /// Number of per-color layers (`num_colors + 1`).
    pub fn layer_count(&self) -> usize {
        self.num_colors as usize + 1
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn target(&self) -> Position {
        self.target
    }

    /// Size of the `(color, row, col)` state space.
    pub fn state_count(&self) -> usize {
        self.layer_count() * self.height * self.width
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Cell at `pos`. Panics when `pos` lies outside the grid.
    pub fn cell(&self, pos: Position) -> CellKind {
        debug_assert!(self.contains(pos));
        self.cells[pos.row * self.width + pos.col]
    }

    /// The adjacent position in `dir`, if it is inside the grid.
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dr, dc) = dir.offset();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Position::new(row, col);
        self.contains(next).then_some(next)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Position::new(row, col)))
    }
}

impl FromStr for PuzzleMap {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PuzzleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {}", self.num_colors, self.height, self.width)?;
        for row in self.cells.chunks(self.width) {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
