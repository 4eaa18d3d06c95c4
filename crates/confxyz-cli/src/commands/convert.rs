use crate::cli::ConvertArgs;
use crate::error::{CliError, Result};
use confxyz::XyzError;
use confxyz::core::io::xyz::write_all;
use confxyz::workflows::ingest::load_configurations;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

pub fn run(args: ConvertArgs) -> Result<()> {
    let configs = load_configurations(&args.input)
        .map_err(|e| CliError::file_parsing(&args.input, e))?;

    let file = File::create(&args.output)?;
    let mut writer = BufWriter::new(file);
    write_all(&configs, &mut writer).map_err(|e| match e {
        XyzError::Io(io) => CliError::Io(io),
        other => CliError::Other(anyhow::anyhow!(other)),
    })?;
    writer.flush()?;

    info!(
        "Rewrote {} records from '{}' to '{}'.",
        configs.len(),
        args.input.display(),
        args.output.display()
    );
    println!(
        "Normalized {} records into '{}'.",
        configs.len(),
        args.output.display()
    );
    Ok(())
}
