use crate::error::{CliError, Result};
use std::cmp;
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self},
    prelude::*,
    registry::LookupSpan,
};

/// Environment variable that, when set, replaces the `-v`/`-q` derived stderr filter.
pub const LOG_ENV_VAR: &str = "CHEMSCREEN_LOG";

/// The log file always records at least round starts and summaries.
const MIN_FILE_LEVEL: LevelFilter = LevelFilter::INFO;

#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub stderr_level: LevelFilter,
    pub file: Option<PathBuf>,
}

impl LogSettings {
    pub fn from_flags(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Self {
        let stderr_level = if quiet {
            LevelFilter::OFF
        } else {
            match verbosity {
                0 => LevelFilter::WARN,
                1 => LevelFilter::INFO,
                2 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            }
        };
        Self {
            stderr_level,
            file: log_file,
        }
    }

    /// Level for the file layer: never quieter than INFO, even under `--quiet`.
    pub fn file_level(&self) -> LevelFilter {
        cmp::max(self.stderr_level, MIN_FILE_LEVEL)
    }
}

pub fn setup_logging(settings: LogSettings) -> Result<()> {
    let stderr_filter = EnvFilter::builder()
        .with_default_directive(settings.stderr_level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(stderr_filter);

    let file_output = match &settings.file {
        Some(path) => {
            let file = File::create(path).map_err(CliError::Io)?;
            Some(file_layer(file, settings.file_level()))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_output)
        .try_init()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}

/// Plain-text layer that tags each line with the worker thread that produced it.
fn file_layer<S>(file: File, level: LevelFilter) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_target(true)
        .with_filter(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{debug, error, info, trace, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            setup_logging(LogSettings::from_flags(3, false, None))
                .expect("Failed to set up global logger for tests");
        });
    }

    #[test]
    fn flags_map_to_stderr_levels() {
        let level = |v, q| LogSettings::from_flags(v, q, None).stderr_level;
        assert_eq!(level(0, false), LevelFilter::WARN);
        assert_eq!(level(1, false), LevelFilter::INFO);
        assert_eq!(level(2, false), LevelFilter::DEBUG);
        assert_eq!(level(7, false), LevelFilter::TRACE);
        assert_eq!(level(3, true), LevelFilter::OFF);
    }

    #[test]
    fn file_level_keeps_round_summaries_when_stderr_is_quiet() {
        let quiet = LogSettings::from_flags(0, true, Some(PathBuf::from("run.log")));
        assert_eq!(quiet.file_level(), LevelFilter::INFO);

        let verbose = LogSettings::from_flags(2, false, None);
        assert_eq!(verbose.file_level(), LevelFilter::DEBUG);
    }

    #[test]
    #[serial]
    fn initialization_and_macros_work() {
        ensure_global_logger_is_set();

        error!("This is an error");
        warn!("This is a warning");
        info!(n = 2, "This is info");
        debug!("This is debug");
        trace!("This is trace");
    }

    #[test]
    #[serial]
    fn file_layer_filters_by_level_and_names_threads() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("screen.log");
        let file = File::create(&log_path).unwrap();

        std::thread::Builder::new()
            .name("chemscreen-worker-0".to_string())
            .spawn(move || {
                let subscriber =
                    tracing_subscriber::registry().with(file_layer(file, LevelFilter::INFO));
                tracing::subscriber::with_default(subscriber, || {
                    info!(n = 3, count = 17, "Counting round finished.");
                    debug!("Batch counted.");
                });
            })
            .unwrap()
            .join()
            .unwrap();

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Counting round finished."));
        assert!(content.contains("count=17"));
        assert!(!content.contains("Batch counted."));
        assert!(content.contains("chemscreen-worker-0"));
        assert!(!content.contains("\u{1b}["));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let invalid_path = PathBuf::from("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(LogSettings::from_flags(0, false, Some(invalid_path)));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }
}
