use std::{
    fs::File,
    io::{self, BufWriter},
    path::Path,
};

use anyhow::Context as _;

/// Writes `value` as pretty JSON to `path`, or to stdout when no path is
/// given.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            write_json(BufWriter::new(file), value)
                .with_context(|| format!("failed to write JSON to {}", path.display()))
        }
        None => write_json(io::stdout().lock(), value).context("failed to write JSON to stdout"),
    }
}

fn write_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: io::Write,
    T: serde::Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(&mut writer)?;
    writer.flush()?;
    Ok(())
}
