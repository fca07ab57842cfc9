mod command;
mod moves;
mod stats;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
