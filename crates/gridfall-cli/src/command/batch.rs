use std::io::{self, BufRead as _};

use anyhow::Context as _;
use gridfall_engine::{Board, ShapeTable};

use crate::moves;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct BatchArg {}

/// Replays each stdin line on a fresh board and prints its fill height.
pub(crate) fn run(_arg: &BatchArg) -> anyhow::Result<()> {
    let table = ShapeTable::standard();
    let stdin = io::stdin().lock();

    for (index, line) in stdin.lines().enumerate() {
        let line = line.context("failed to read stdin")?;
        let height = replay_line(&table, &line).with_context(|| format!("line {}", index + 1))?;
        println!("{height}");
    }
    Ok(())
}

fn replay_line(table: &ShapeTable, line: &str) -> anyhow::Result<usize> {
    let mut board = Board::new();
    for mv in moves::parse_moves(line)? {
        let shape = moves::resolve(table, mv)?;
        moves::ensure_capacity(&board, shape)?;
        board.drop(shape, mv.column);
    }
    Ok(board.fill_height())
}
