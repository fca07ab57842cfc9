use std::io::{self, BufRead as _, Write as _};

use gridfall_engine::{Board, Shape, ShapeTable};

use crate::moves;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct InteractiveArg {}

/// Prompt loop over a single long-lived board: one move per line, rendered
/// after every successful drop. Bad input gets a message and a new prompt;
/// an empty line or EOF quits.
pub(crate) fn run(_arg: &InteractiveArg) -> anyhow::Result<()> {
    let table = ShapeTable::extended();
    let mut board = Board::new();

    print!("shape letters:");
    for letter in table.letters() {
        print!(" {letter}");
    }
    println!();
    println!("enter a shape letter and a column (e.g. Q0) - empty line quits");

    let mut stdin = io::stdin().lock();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        match decode(&table, &board, line) {
            Ok((shape, column)) => {
                board.drop(shape, column);
                println!("{board}");
            }
            Err(err) => println!("{err:#}, try again"),
        }
    }
    Ok(())
}

fn decode<'a>(
    table: &'a ShapeTable,
    board: &Board,
    line: &str,
) -> anyhow::Result<(&'a Shape, usize)> {
    let mv = moves::parse_move(line)?;
    let shape = moves::resolve(table, mv)?;
    moves::ensure_capacity(board, shape)?;
    Ok((shape, mv.column))
}
