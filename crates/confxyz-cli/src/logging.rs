use crate::error::Result;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Installs the global tracing subscriber for the CLI.
///
/// Verbosity maps `-v` counts onto levels (WARN by default, up to TRACE);
/// `--quiet` turns logging off entirely. Console output goes to stderr so it
/// never mixes with command output on stdout. An optional log file gets a
/// second, more detailed layer.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let level_filter = match (quiet, verbosity) {
        (true, _) => LevelFilter::OFF,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let registry = tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer);

    match log_file {
        Some(path) => {
            let file = File::create(&path)?;
            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true);
            registry.with(file_layer).init();
        }
        None => registry.init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{info, warn};

    static INIT: Once = Once::new();

    #[test]
    #[serial]
    fn global_subscriber_installs_once() {
        INIT.call_once(|| {
            setup_logging(2, false, None).expect("logger should install");
        });
        warn!("scan produced no records");
        info!("parsed 3 configurations");
    }

    #[test]
    #[serial]
    fn file_layer_captures_events() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("confxyz.log");

        let file = File::create(&log_path).unwrap();
        let file_layer = fmt::layer().with_writer(file).with_ansi(false);
        let subscriber = tracing_subscriber::registry().with(file_layer);

        tracing::subscriber::with_default(subscriber, || {
            info!("deduplicated 7 molecules");
        });

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("deduplicated 7 molecules"));
    }

    #[test]
    #[serial]
    fn unwritable_log_file_is_an_io_error() {
        let dir_as_file = PathBuf::from("/");
        if cfg!(unix) && dir_as_file.is_dir() {
            let result = setup_logging(0, false, Some(dir_as_file));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }
}
