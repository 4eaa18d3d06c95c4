use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DedupError {
    #[error("Failed to read reference table: {0}")]
    Reference(#[from] csv::Error),
    #[error("Reference table has no column named '{column}'")]
    MissingColumn { column: String },
}

/// Loads one column of a CSV reference table into a lookup set.
///
/// Used to check newly parsed molecules against a table of prior submissions
/// (e.g., a `SMILES` column). The first row is treated as the header.
///
/// # Arguments
///
/// * `path` - Path to the CSV file.
/// * `column` - Header name of the column to collect.
///
/// # Errors
///
/// Fails if the file cannot be read as CSV or the named column is absent.
pub fn load_reference_column<P: AsRef<Path>>(
    path: P,
    column: &str,
) -> Result<HashSet<String>, DedupError> {
    let mut reader = csv::Reader::from_path(path)?;
    let index = reader
        .headers()?
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| DedupError::MissingColumn {
            column: column.to_string(),
        })?;

    let mut reference = HashSet::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(index) {
            reference.insert(value.to_string());
        }
    }
    debug!(
        "Loaded {} reference entries from column '{}'.",
        reference.len(),
        column
    );
    Ok(reference)
}

/// Returns the candidates that already appear in the reference set.
///
/// Keeps first-occurrence order and drops repeated candidates, so the result
/// is deterministic for a given input sequence.
pub fn find_duplicates<'a, I>(candidates: I, reference: &HashSet<String>) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let duplicates: Vec<String> = candidates
        .into_iter()
        .filter(|candidate| reference.contains(*candidate) && seen.insert(*candidate))
        .map(str::to_string)
        .collect();
    info!("Found {} duplicated molecules.", duplicates.len());
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn reference_csv(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("submissions.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "CID,SMILES\n1,CCO\n2,c1ccccc1\n3,CC(=O)O\n"
        )
        .unwrap();
        path
    }

    #[test]
    fn loads_named_column() {
        let dir = tempfile::tempdir().unwrap();
        let reference = load_reference_column(reference_csv(&dir), "SMILES").unwrap();
        assert_eq!(reference.len(), 3);
        assert!(reference.contains("CCO"));
        assert!(reference.contains("c1ccccc1"));
    }

    #[test]
    fn missing_column_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_reference_column(reference_csv(&dir), "InChI").unwrap_err();
        assert!(matches!(err, DedupError::MissingColumn { column } if column == "InChI"));
    }

    #[test]
    fn missing_file_fails() {
        assert!(load_reference_column("no/such/table.csv", "SMILES").is_err());
    }

    #[test]
    fn find_duplicates_keeps_candidate_order_and_dedupes() {
        let reference: HashSet<String> =
            ["CCO", "CC(=O)O"].into_iter().map(String::from).collect();
        let candidates = ["CC(=O)O", "CCN", "CCO", "CC(=O)O"];

        let duplicates = find_duplicates(candidates, &reference);
        assert_eq!(duplicates, vec!["CC(=O)O", "CCO"]);
    }

    #[test]
    fn no_duplicates_is_empty() {
        let reference: HashSet<String> = ["CCO".to_string()].into_iter().collect();
        assert!(find_duplicates(["CCN"], &reference).is_empty());
    }
}
