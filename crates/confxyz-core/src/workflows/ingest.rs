use crate::core::io::xyz::{XyzError, XyzReader};
use crate::core::models::record::Configuration;
use std::path::Path;
use tracing::{info, instrument};

/// Eagerly loads every configuration record from a file.
///
/// Convenience for callers that want the whole file in memory; streaming
/// consumers should iterate an [`XyzReader`] directly.
///
/// # Arguments
///
/// * `path` - Path to the extended-XYZ configuration file.
///
/// # Errors
///
/// Returns the first error encountered: the file failing to open, or any
/// record failing to parse. No partial record list is returned on failure.
#[instrument(skip_all, name = "ingest_workflow")]
pub fn load_configurations<P: AsRef<Path>>(path: P) -> Result<Vec<Configuration>, XyzError> {
    let path = path.as_ref();
    let configs = XyzReader::from_path(path)?.collect::<Result<Vec<_>, _>>()?;
    info!(
        "Loaded {} configurations ({} atoms) from '{}'.",
        configs.len(),
        configs.iter().map(Configuration::atom_count).sum::<usize>(),
        path.display()
    );
    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_all_records_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.xyz");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "1\nname=a\nC 0.0 0.0 0.0\n1\nname=b\nN 1.0 1.0 1.0\n"
        )
        .unwrap();

        let configs = load_configurations(&path).unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].symbols, vec!["C"]);
        assert_eq!(configs[1].symbols, vec!["N"]);
    }

    #[test]
    fn empty_file_loads_as_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xyz");
        std::fs::File::create(&path).unwrap();

        assert!(load_configurations(&path).unwrap().is_empty());
    }

    #[test]
    fn parse_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xyz");
        std::fs::write(&path, "1\nk=1\nC 0.0 0.0\n").unwrap();

        assert!(load_configurations(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_configurations("definitely/not/here.xyz");
        assert!(matches!(result, Err(XyzError::Io(_))));
    }
}
