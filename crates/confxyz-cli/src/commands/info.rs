use crate::cli::InfoArgs;
use crate::error::{CliError, Result};
use crate::utils::progress;
use confxyz::XyzReader;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    let reader = XyzReader::from_path(&args.input)
        .map_err(|e| CliError::file_parsing(&args.input, e))?;

    let spinner = progress::scan_spinner("Scanning records...");
    let mut records = 0usize;
    let mut atoms = 0usize;
    let mut elements: BTreeMap<String, usize> = BTreeMap::new();
    let mut keys: BTreeSet<String> = BTreeSet::new();

    for result in reader {
        let config = result.map_err(|e| CliError::file_parsing(&args.input, e))?;
        records += 1;
        atoms += config.atom_count();
        for (symbol, _) in config.atoms() {
            *elements.entry(symbol.to_string()).or_insert(0) += 1;
        }
        for (key, _) in config.metadata.iter() {
            keys.insert(key.to_string());
        }
        spinner.inc(1);
    }
    spinner.finish_and_clear();
    info!("Summarized {} records from '{}'.", records, args.input.display());

    println!("File:          {}", args.input.display());
    println!("Records:       {}", records);
    println!("Atoms:         {}", atoms);
    if !elements.is_empty() {
        let tally: Vec<String> = elements
            .iter()
            .map(|(element, count)| format!("{} x{}", element, count))
            .collect();
        println!("Elements:      {}", tally.join(", "));
    }
    if !keys.is_empty() {
        let names: Vec<&str> = keys.iter().map(String::as_str).collect();
        println!("Metadata keys: {}", names.join(", "));
    }

    Ok(())
}
