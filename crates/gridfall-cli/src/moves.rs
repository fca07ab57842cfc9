use anyhow::{Context as _, bail, ensure};
use gridfall_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board, Shape, ShapeTable};

/// One decoded drop instruction: a shape letter and a target column.
///
/// The engine treats out-of-range input as a contract violation, so all
/// validation against a concrete shape table and board happens here, before
/// anything is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub letter: char,
    pub column: usize,
}

/// Splits a drop sequence into moves.
///
/// The grammar is a shape letter immediately followed by a decimal column
/// number, with moves separated by commas or whitespace: `"Q0,I4"` and
/// `"Q0 I4"` decode identically.
pub fn parse_moves(line: &str) -> anyhow::Result<Vec<Move>> {
    line.split([',', ' ', '\t'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_move)
        .collect()
}

/// Decodes a single `letter` + `column` token such as `Q0` or `I12`.
pub fn parse_move(token: &str) -> anyhow::Result<Move> {
    let mut chars = token.chars();
    let letter = chars.next().context("empty move")?;
    let number = chars.as_str();
    ensure!(!number.is_empty(), "move {token:?} is missing a column number");
    let column = number
        .parse()
        .with_context(|| format!("move {token:?} has an invalid column number"))?;
    Ok(Move { letter, column })
}

/// Resolves the letter against `table` and bounds-checks the column.
pub fn resolve<'a>(table: &'a ShapeTable, mv: Move) -> anyhow::Result<&'a Shape> {
    let Some(shape) = table.get(mv.letter) else {
        bail!("unknown shape letter {:?}", mv.letter);
    };
    ensure!(
        mv.column + shape.width() <= BOARD_WIDTH,
        "column {} leaves no room for shape {:?} (width {})",
        mv.column,
        mv.letter,
        shape.width()
    );
    Ok(shape)
}

/// Rejects a drop that could overflow the board's top.
///
/// A shape can never rest above the current fill height, so
/// `fill_height + shape height` is a safe (if slightly conservative) bound.
pub fn ensure_capacity(board: &Board, shape: &Shape) -> anyhow::Result<()> {
    ensure!(
        board.fill_height() + shape.height() <= BOARD_HEIGHT,
        "board is too full to take another shape of height {}",
        shape.height()
    );
    Ok(())
}
