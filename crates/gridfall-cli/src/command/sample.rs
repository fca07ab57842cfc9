use std::path::PathBuf;

use anyhow::Context as _;
use gridfall_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board, Shape, ShapeKind};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::{stats::SampleSummary, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SampleArg {
    /// Number of independent drop sequences to simulate
    #[arg(long, default_value_t = 10_000)]
    trials: usize,
    /// Drops per sequence
    #[arg(long, default_value_t = 32)]
    drops: usize,
    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Write the summary as JSON to this file instead of printing the report
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Replays `--trials` random drop sequences and summarizes where the stack
/// ends up.
pub(crate) fn run(arg: &SampleArg) -> anyhow::Result<()> {
    let mut rng = match arg.seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_os_rng(),
    };

    // build each shape once; every drop only borrows it
    let shapes: Vec<Shape> = ShapeKind::ALL.iter().map(|kind| kind.shape()).collect();

    let fill_heights: Vec<usize> = (0..arg.trials)
        .map(|_| random_sequence_height(&mut rng, &shapes, arg.drops))
        .collect();

    let summary =
        SampleSummary::new(arg.drops, &fill_heights).context("--trials must be at least 1")?;
    match &arg.output {
        Some(path) => {
            util::save_json(&summary, Some(path.as_path()))?;
            eprintln!("saved summary to {}", path.display());
        }
        None => print!("{summary}"),
    }
    Ok(())
}

fn random_sequence_height<R>(rng: &mut R, shapes: &[Shape], drops: usize) -> usize
where
    R: Rng,
{
    let mut board = Board::new();
    for _ in 0..drops {
        let kind: ShapeKind = rng.random();
        let shape = &shapes[kind as usize];
        // a topped-out board ends the sequence early instead of overflowing
        if board.fill_height() + shape.height() > BOARD_HEIGHT {
            break;
        }
        let location = rng.random_range(0..=BOARD_WIDTH - shape.width());
        board.drop(shape, location);
    }
    board.fill_height()
}
