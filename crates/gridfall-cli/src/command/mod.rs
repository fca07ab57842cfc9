use clap::{Parser, Subcommand};

use self::{batch::BatchArg, interactive::InteractiveArg, sample::SampleArg};

mod batch;
mod interactive;
mod sample;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Read drop sequences from stdin, one per line, and print each line's
    /// final stack height
    Batch(#[clap(flatten)] BatchArg),
    /// Drop shapes one at a time, rendering the board after each move
    Interactive(#[clap(flatten)] InteractiveArg),
    /// Estimate the stack-height distribution of random drop sequences
    Sample(#[clap(flatten)] SampleArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Batch(BatchArg::default())) {
        Mode::Batch(arg) => batch::run(&arg),
        Mode::Interactive(arg) => interactive::run(&arg),
        Mode::Sample(arg) => sample::run(&arg),
    }
}
