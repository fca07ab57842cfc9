use std::fmt;

use super::{BOARD_HEIGHT, BOARD_WIDTH, packed_row::PackedRow, shape::Shape};

/// The fixed-size simulation board.
///
/// Rows are stored bottom-up in a flat array, keeping the whole board
/// linear in memory; row deletion shifts rows in place rather than
/// reallocating. A `heights` array tracks one past the topmost filled cell
/// of each column, and `fill_height` bounds every scan: rows at or above it
/// are guaranteed empty.
///
/// Contract violations (a column that does not fit the board, a drop that
/// would overflow the top) are caller bugs, checked with debug assertions.
/// Callers that take user input are expected to validate before calling in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [PackedRow; BOARD_HEIGHT],
    heights: [usize; BOARD_WIDTH],
    fill_height: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: [PackedRow::EMPTY; BOARD_HEIGHT],
            heights: [0; BOARD_WIDTH],
            fill_height: 0,
        }
    }

    /// Drops `shape` straight down with its left column at `location`,
    /// rests it on the existing terrain, and clears any rows the drop
    /// completed.
    ///
    /// `location + shape.width()` must fit the board, and the resting
    /// position must not overflow the top (debug-asserted).
    pub fn drop(&mut self, shape: &Shape, location: usize) {
        debug_assert!(location + shape.width() <= BOARD_WIDTH);

        // the tightest per-column constraint decides the resting row
        let mut placement_row = 0;
        for (col, &profile) in shape.bottom_profile().iter().enumerate() {
            let height = self.heights[location + col];
            if height > profile {
                placement_row = placement_row.max(height - profile);
            }
        }

        debug_assert!(placement_row + shape.height() <= BOARD_HEIGHT);

        // stamp the shape; higher cells of a column overwrite the height
        for row in 0..shape.height() {
            for col in 0..shape.width() {
                if shape.row(row).is_cell_occupied(col) {
                    self.rows[placement_row + row].occupy_cell(location + col);
                    self.heights[location + col] = placement_row + row + 1;
                }
            }
        }
        self.fill_height = self.fill_height.max(placement_row + shape.height());

        // only rows inside the placement window can have been completed;
        // scan them bottom-up, shifting survivors down over deleted rows
        let mut deletion_count = 0;
        for i in 0..shape.height() {
            let row = placement_row + i - deletion_count;
            if deletion_count > 0 {
                self.rows[row] = self.rows[row + deletion_count];
            }
            if self.rows[row].is_filled() {
                self.repair_heights(row);
                deletion_count += 1;
            }
        }

        if deletion_count > 0 {
            // rows above the window were never scanned; move them verbatim
            for row in placement_row + shape.height()..self.fill_height {
                self.rows[row - deletion_count] = self.rows[row];
            }
            // the topmost shifted-out rows still hold stale contents
            for row in self.fill_height - deletion_count..self.fill_height {
                self.rows[row].reset();
            }
            self.fill_height -= deletion_count;
        }
    }

    // Height bookkeeping for deleting `row`: everything above drops by one;
    // a column whose topmost cell sat exactly on the deleted row rescans
    // downward (only that column, only below the row) to its next filled
    // cell or the floor.
    fn repair_heights(&mut self, row: usize) {
        for col in 0..BOARD_WIDTH {
            if self.heights[col] > row + 1 {
                self.heights[col] -= 1;
            } else if self.heights[col] == row + 1 {
                let mut look_down = row;
                while look_down > 0 && !self.rows[look_down - 1].is_cell_occupied(col) {
                    look_down -= 1;
                }
                self.heights[col] = look_down;
            }
        }
    }

    /// The smallest row index above which the board is entirely empty
    /// (0 for an empty board).
    #[must_use]
    pub fn fill_height(&self) -> usize {
        self.fill_height
    }

    /// Per column, one past the topmost filled cell (0 for an empty column).
    #[must_use]
    pub fn heights(&self) -> &[usize; BOARD_WIDTH] {
        &self.heights
    }

    /// Returns the row at the given index (0 = bottom).
    #[must_use]
    pub fn row(&self, row: usize) -> PackedRow {
        self.rows[row]
    }
}

/// Debugging render: occupied rows top-down with their indices, a footer
/// rule, and the per-column heights. Not a stable format.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_digits = self.fill_height.saturating_sub(1).to_string().len();
        for row in (0..self.fill_height).rev() {
            // glyphs come lowest-bit-rightmost; flip so column 0 is leftmost
            let cells: String = self.row(row).to_glyphs(' ', 'X').chars().rev().collect();
            writeln!(f, "{row:>row_digits$} |{cells}|")?;
        }
        writeln!(f, "{:>row_digits$} |{}|", "", "-".repeat(BOARD_WIDTH))?;
        write!(f, "heights:")?;
        for height in self.heights {
            write!(f, " {height}")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::shape::ShapeTable;

    use super::*;

    fn replay(moves: &str) -> Board {
        let table = ShapeTable::standard();
        let mut board = Board::new();
        for token in moves.split(',').filter(|t| !t.is_empty()) {
            let mut chars = token.chars();
            let letter = chars.next().unwrap();
            let column: usize = chars.as_str().parse().unwrap();
            board.drop(table.get(letter).unwrap(), column);
        }
        board
    }

    #[test]
    fn fresh_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.fill_height(), 0);
        assert_eq!(board.heights(), &[0; BOARD_WIDTH]);
        for row in 0..BOARD_HEIGHT {
            assert_eq!(board.row(row), PackedRow::EMPTY);
        }
    }

    #[test]
    fn canonical_drop_sequences() {
        let cases: &[(&str, usize)] = &[
            ("", 0),
            ("Q0", 2),
            ("Q0,Q1", 4),
            ("Q0,Q2,Q4,Q6,Q8", 0),
            ("Q0,Q2,Q4,Q6,Q8,Q1", 2),
            ("Q0,Q2,Q4,Q6,Q8,Q1,Q1", 4),
            ("I0,I4,Q8", 1),
            ("I0,I4,Q8,I0,I4", 0),
            ("L0,J2,L4,J6,Q8", 2),
            ("L0,Z1,Z3,Z5,Z7", 2),
            ("T0,T3", 2),
            ("T0,T3,I6,I6", 1),
            ("I0,I6,S4", 1),
            ("T1,Z3,I4", 4),
            ("L0,J3,L5,J8,T1", 3),
            ("L0,J3,L5,J8,T1,T6", 1),
            ("L0,J3,L5,J8,T1,T6,J2,L6,T0,T7", 2),
            ("L0,J3,L5,J8,T1,T6,J2,L6,T0,T7,Q4", 1),
            ("S0,S2,S4,S6", 8),
            ("S0,S2,S4,S5,Q8,Q8,Q8,Q8,T1,Q1,I0,Q4", 8),
            ("L0,J3,L5,J8,T1,T6,S2,Z5,T0,T7", 0),
            ("Q0,I2,I6,I0,I6,I6,Q2,Q4", 3),
        ];

        for &(moves, expected) in cases {
            assert_eq!(replay(moves).fill_height(), expected, "sequence {moves:?}");
        }
    }

    #[test]
    fn repeated_drops_stack_by_shape_height() {
        let table = ShapeTable::standard();
        let square = table.get('Q').unwrap();
        let mut board = Board::new();

        for stacked in 1..=10 {
            board.drop(square, 0);
            assert_eq!(board.fill_height(), stacked * 2);
            assert_eq!(board.heights()[0], stacked * 2);
            assert_eq!(board.heights()[1], stacked * 2);
        }
    }

    #[test]
    fn drop_rests_on_uneven_terrain() {
        // Z's left column hangs one row above its bottom; dropped onto a
        // square it must rest where that overhang meets the stack
        let board = replay("Q0,Z1");
        assert_eq!(board.heights(), &[2, 3, 3, 2, 0, 0, 0, 0, 0, 0]);
        assert_eq!(board.fill_height(), 3);
        // the overhung cell below the Z's right edge stays empty
        assert!(board.row(1).is_cell_occupied(3));
        assert!(!board.row(0).is_cell_occupied(3));
    }

    #[test]
    fn five_squares_clear_two_rows() {
        let board = replay("Q0,Q2,Q4,Q6,Q8");
        assert_eq!(board.fill_height(), 0);
        assert_eq!(board.heights(), &[0; BOARD_WIDTH]);
        for row in 0..4 {
            assert_eq!(board.row(row), PackedRow::EMPTY);
        }
    }

    #[test]
    fn clearing_bottom_row_drops_the_remainder() {
        // two bars and a square fill row 0; the square's top half survives
        // as the new bottom row
        let board = replay("I0,I4,Q8");
        assert_eq!(board.fill_height(), 1);
        assert_eq!(board.heights(), &[0, 0, 0, 0, 0, 0, 0, 0, 1, 1]);
        assert!(board.row(0).is_cell_occupied(8));
        assert!(board.row(0).is_cell_occupied(9));
        assert!(!board.row(0).is_cell_occupied(0));
    }

    #[test]
    fn cleared_row_above_a_hole_rescans_to_the_floor() {
        // the corner shape leaves a hole at (row 0, col 0); squares then
        // complete row 1, whose deletion must rescan column 0 down through
        // the hole to the floor while the others stop at row 0
        let corner = Shape::from_ascii(
            "##\n\
             .#",
        )
        .unwrap();
        let table = ShapeTable::standard();
        let square = table.get('Q').unwrap();

        let mut board = Board::new();
        board.drop(&corner, 0);
        assert_eq!(board.heights()[..2], [2, 2]);
        assert!(!board.row(0).is_cell_occupied(0));

        for location in [2, 4, 6, 8] {
            board.drop(square, location);
        }

        assert_eq!(board.fill_height(), 1);
        assert_eq!(board.heights(), &[0, 1, 1, 1, 1, 1, 1, 1, 1, 1]);
        assert!(!board.row(0).is_cell_occupied(0));
        assert!(board.row(0).is_cell_occupied(1));
    }

    #[test]
    fn rows_above_the_window_shift_down_verbatim() {
        // stack a tall bar on column 0, then clear row 0 underneath it;
        // the bar must come down one row unchanged
        let bar = Shape::from_ascii("#\n#\n#\n#\n#\n#").unwrap();
        let wide = Shape::from_ascii("#########").unwrap();

        let mut board = Board::new();
        board.drop(&bar, 0);
        assert_eq!(board.fill_height(), 6);

        board.drop(&wide, 1);
        assert_eq!(board.fill_height(), 5);
        assert_eq!(board.heights(), &[5, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        for row in 0..5 {
            assert!(board.row(row).is_cell_occupied(0), "bar cell at row {row}");
        }
        assert_eq!(board.row(5), PackedRow::EMPTY);
    }

    #[test]
    fn replaying_a_sequence_is_deterministic() {
        let moves = "L0,J3,L5,J8,T1,T6,J2,L6,T0,T7,Q4";
        let first = replay(moves);
        let second = replay(moves);

        assert_eq!(first, second);
        assert_eq!(first.heights(), second.heights());
        assert_eq!(first.fill_height(), second.fill_height());
    }

    #[test]
    fn fill_height_bounds_all_content() {
        let board = replay("S0,S2,S4,S5,Q8,Q8,Q8,Q8,T1,Q1,I0,Q4");
        let max_height = *board.heights().iter().max().unwrap();
        assert!(max_height <= board.fill_height());
        for row in board.fill_height()..BOARD_HEIGHT {
            assert_eq!(board.row(row), PackedRow::EMPTY);
        }
    }

    #[test]
    fn render_shows_rows_top_down_with_heights() {
        let board = replay("Q0");
        let rendered = board.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "1 |XX        |");
        assert_eq!(lines[1], "0 |XX        |");
        assert_eq!(lines[2], "  |----------|");
        assert_eq!(lines[3], "heights: 2 2 0 0 0 0 0 0 0 0");
    }

    #[test]
    fn render_of_empty_board_is_just_the_footer() {
        let board = Board::new();
        let rendered = board.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "  |----------|");
        assert_eq!(lines[1], "heights: 0 0 0 0 0 0 0 0 0 0");
    }
}
