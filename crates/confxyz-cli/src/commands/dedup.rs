use crate::cli::DedupArgs;
use crate::error::{CliError, Result};
use confxyz::ScalarValue;
use confxyz::workflows::dedup::{find_duplicates, load_reference_column};
use confxyz::workflows::ingest::load_configurations;
use tracing::warn;

pub fn run(args: DedupArgs) -> Result<()> {
    let configs = load_configurations(&args.input)
        .map_err(|e| CliError::file_parsing(&args.input, e))?;

    let mut candidates = Vec::new();
    let mut skipped = 0usize;
    for config in &configs {
        match config.metadata.get(&args.key).and_then(ScalarValue::as_str) {
            Some(value) => candidates.push(value),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(
            "{} of {} records lack a string value for key '{}' and were skipped.",
            skipped,
            configs.len(),
            args.key
        );
    }
    if candidates.is_empty() {
        return Err(CliError::Argument(format!(
            "no record in '{}' carries a string value for metadata key '{}'",
            args.input.display(),
            args.key
        )));
    }

    let reference = load_reference_column(&args.reference, &args.column)?;
    let duplicates = find_duplicates(candidates.iter().copied(), &reference);

    println!("Molecules checked: {}", candidates.len());
    println!("Already submitted: {}", duplicates.len());
    for molecule in &duplicates {
        println!("  {}", molecule);
    }
    Ok(())
}
