use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use crate::EmptyShapeError;

use super::{BOARD_HEIGHT, BOARD_WIDTH, packed_row::PackedRow};

/// A rigid set of blocks normalized to its minimal bounding box.
///
/// Rows are stored bottom-up (row 0 is the shape's own bottom), matching the
/// board's row indexing so placement math needs no inversion. Construction
/// strips all empty border rows and columns, so two padded variants of the
/// same block pattern compare equal:
///
/// ```
/// use gridfall_engine::Shape;
///
/// let tight = Shape::from_ascii("##.\n.##").unwrap();
/// let padded = Shape::from_ascii("....\n.##.\n..##").unwrap();
/// assert_eq!(tight, padded);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: Vec<PackedRow>,
    bottom_profile: ArrayVec<usize, BOARD_WIDTH>,
}

impl Shape {
    /// Builds a shape from a rectangular boolean grid, rows given visually
    /// top to bottom. Arbitrary empty padding is allowed and stripped.
    ///
    /// Returns [`EmptyShapeError`] if no cell is filled.
    ///
    /// # Panics
    ///
    /// Panics if the grid rows have unequal lengths.
    pub fn from_grid(grid: &[&[bool]]) -> Result<Self, EmptyShapeError> {
        let grid_height = grid.len();
        let grid_width = grid.first().map_or(0, |row| row.len());
        for row in grid {
            assert_eq!(row.len(), grid_width, "shape grid rows must have equal length");
        }

        // tight bounding box of filled cells
        let mut min_col = grid_width;
        let mut max_col = 0;
        let mut top_row = grid_height;
        let mut bottom_row = 0;
        for (row_index, row) in grid.iter().enumerate() {
            for (col_index, &cell) in row.iter().enumerate() {
                if cell {
                    min_col = min_col.min(col_index);
                    max_col = max_col.max(col_index);
                    if top_row == grid_height {
                        top_row = row_index;
                    }
                    bottom_row = row_index;
                }
            }
        }
        if top_row == grid_height {
            return Err(EmptyShapeError);
        }

        let width = max_col - min_col + 1;
        let height = bottom_row - top_row + 1;
        debug_assert!(width <= BOARD_WIDTH && height <= BOARD_HEIGHT);

        // flip to bottom-up rows, recording each column's lowest filled cell
        let mut rows = vec![PackedRow::EMPTY; height];
        let mut bottom_profile: ArrayVec<usize, BOARD_WIDTH> =
            (0..width).map(|_| BOARD_HEIGHT).collect();
        for (row_offset, packed) in rows.iter_mut().enumerate() {
            let grid_row = grid[bottom_row - row_offset];
            for col in min_col..=max_col {
                if grid_row[col] {
                    let shifted_col = col - min_col;
                    packed.occupy_cell(shifted_col);
                    if bottom_profile[shifted_col] == BOARD_HEIGHT {
                        bottom_profile[shifted_col] = row_offset;
                    }
                }
            }
        }

        // trimming leaves no empty column, so every profile entry was written
        debug_assert!(bottom_profile.iter().all(|&offset| offset < height));

        Ok(Self {
            rows,
            bottom_profile,
        })
    }

    /// Builds a shape from ASCII art, `#` for filled and `.` for empty.
    /// Blank lines and other characters (indentation) are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the art rows have unequal lengths.
    pub fn from_ascii(art: &str) -> Result<Self, EmptyShapeError> {
        let grid: Vec<Vec<bool>> = art
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.chars()
                    .filter(|c| *c == '#' || *c == '.')
                    .map(|c| c == '#')
                    .collect()
            })
            .collect();
        let grid: Vec<&[bool]> = grid.iter().map(Vec::as_slice).collect();
        Self::from_grid(&grid)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.bottom_profile.len()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// For each column, the row offset (0 = shape bottom) of its lowest
    /// filled cell. Determines how deep that column can descend before
    /// colliding.
    #[must_use]
    pub fn bottom_profile(&self) -> &[usize] {
        &self.bottom_profile
    }

    /// Returns the row at the given offset (0 = shape bottom).
    #[must_use]
    pub fn row(&self, row: usize) -> PackedRow {
        self.rows[row]
    }
}

/// The seven standard shapes, keyed by the letters the drivers speak.
///
/// `Q` is the 2×2 square, `I` the 4×1 bar; the rest are the usual
/// tetromino silhouettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    Q,
    Z,
    S,
    T,
    L,
    J,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        match rng.random_range(0..=6) {
            0 => ShapeKind::I,
            1 => ShapeKind::Q,
            2 => ShapeKind::Z,
            3 => ShapeKind::S,
            4 => ShapeKind::T,
            5 => ShapeKind::L,
            _ => ShapeKind::J,
        }
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::Q,
        Self::Z,
        Self::S,
        Self::T,
        Self::L,
        Self::J,
    ];

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::I => 'I',
            Self::Q => 'Q',
            Self::Z => 'Z',
            Self::S => 'S',
            Self::T => 'T',
            Self::L => 'L',
            Self::J => 'J',
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::I),
            'Q' => Some(Self::Q),
            'Z' => Some(Self::Z),
            'S' => Some(Self::S),
            'T' => Some(Self::T),
            'L' => Some(Self::L),
            'J' => Some(Self::J),
            _ => None,
        }
    }

    /// Builds the normalized shape for this kind.
    #[must_use]
    pub fn shape(self) -> Shape {
        let art = match self {
            Self::I => "####",
            Self::Q => "##\n##",
            Self::Z => "##.\n.##",
            Self::S => ".##\n##.",
            Self::T => "###\n.#.",
            Self::L => "#.\n#.\n##",
            Self::J => ".#\n.#\n##",
        };
        Shape::from_ascii(art).expect("standard shapes have filled cells")
    }
}

// Extra letters available in interactive mode: a gapped bar, a hollow box,
// a cup, a corner, a tall bar, stairs, a heavily padded vertical bar, and a
// single cell.
const EXTENDED_SHAPES: &[(char, &str)] = &[
    ('a', "##.##"),
    (
        'b',
        "######\n\
         #....#\n\
         #.##.#\n\
         #.##.#\n\
         #....#\n\
         ######",
    ),
    (
        'c',
        "####\n\
         #..#\n\
         #..#",
    ),
    ('d', "##\n.#"),
    ('f', "#\n#\n#\n#\n#\n#"),
    (
        's',
        "....#\n\
         ...#.\n\
         ##.#.",
    ),
    (
        'v',
        "...\n\
         .#.\n\
         .#.\n\
         .#.\n\
         .#.\n\
         .#.\n\
         .#.\n\
         ...",
    ),
    ('x', "#"),
];

/// Letter-keyed shape lookup for the drivers.
#[derive(Debug, Clone)]
pub struct ShapeTable {
    entries: Vec<(char, Shape)>,
}

impl ShapeTable {
    /// The seven standard shapes under their uppercase letters.
    #[must_use]
    pub fn standard() -> Self {
        let entries = ShapeKind::ALL
            .iter()
            .map(|&kind| (kind.as_char(), kind.shape()))
            .collect();
        Self { entries }
    }

    /// The standard shapes plus the interactive-mode extras.
    #[must_use]
    pub fn extended() -> Self {
        let mut table = Self::standard();
        for &(letter, art) in EXTENDED_SHAPES {
            let shape = Shape::from_ascii(art).expect("extended shapes have filled cells");
            table.entries.push((letter, shape));
        }
        table
    }

    #[must_use]
    pub fn get(&self, letter: char) -> Option<&Shape> {
        self.entries
            .iter()
            .find(|(c, _)| *c == letter)
            .map(|(_, shape)| shape)
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }
}
