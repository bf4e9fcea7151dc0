//!
//! Stand up the reference backend from configuration.
//!

use std::{collections::HashMap, sync::Arc};

use serde_json::Value;
use tracing_appender::non_blocking::WorkerGuard;

use super::{
    backend::{Backend, Record},
    formatter::JsonBackend,
    handle::Logger,
    types::Severity,
};
use crate::config;

/// Keeps the non-blocking writer threads alive. Dropping the guard flushes
/// buffered records, so hold it for the lifetime of the application.
#[derive(Debug)]
pub struct LogGuard {
    _log_guards: Vec<WorkerGuard>,
}

/// Failure while standing up the logging outputs.
///
/// Construction is the only fallible part of the crate; logging itself never
/// returns errors.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The log file directory could not be created.
    #[error("failed to prepare log file directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Build a root [`Logger`] from `conf`.
///
/// Console output goes to stdout through a non-blocking writer; file output
/// is rolled hourly below `conf.file.path`. With every destination disabled
/// the returned handle is [`Logger::unbound`].
pub fn setup(conf: &config::Log) -> Result<(Logger, LogGuard), SetupError> {
    setup_with_default_fields(conf, HashMap::new())
}

/// Like [`setup`], additionally stamping `default_fields` onto every record
/// of every destination.
pub fn setup_with_default_fields(
    conf: &config::Log,
    default_fields: HashMap<String, Value>,
) -> Result<(Logger, LogGuard), SetupError> {
    let mut guards = Vec::new();
    let mut backends: Vec<Arc<dyn Backend>> = Vec::new();

    if conf.console.enabled {
        let (console_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        backends.push(Arc::new(JsonBackend::with_default_fields(
            conf.console.level,
            console_writer,
            default_fields.clone(),
        )));
    }

    if conf.file.enabled {
        let mut path = config::workspace_path();
        path.push(&conf.file.path);
        std::fs::create_dir_all(&path)?;

        let file_appender = tracing_appender::rolling::hourly(&path, &conf.file.file_name);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        guards.push(guard);

        backends.push(Arc::new(JsonBackend::with_default_fields(
            conf.file.level,
            file_writer,
            default_fields,
        )));
    }

    let logger = match backends.len() {
        0 => Logger::unbound(),
        1 => Logger::new(backends.remove(0)),
        _ => Logger::new(Arc::new(Fanout { backends })),
    };

    Ok((
        logger,
        LogGuard {
            _log_guards: guards,
        },
    ))
}

/// Replicates records to several destinations, each gated by its own
/// threshold.
struct Fanout {
    backends: Vec<Arc<dyn Backend>>,
}

impl Backend for Fanout {
    /// The most permissive member threshold; members stricter than the
    /// record's severity re-suppress in [`Fanout::emit`].
    fn threshold(&self) -> Severity {
        self.backends
            .iter()
            .map(|backend| backend.threshold())
            .min()
            .unwrap_or(Severity::Error)
    }

    fn emit(&self, record: &Record<'_>) {
        for backend in &self.backends {
            if record.severity >= backend.threshold() {
                backend.emit(record);
            }
        }
    }
}
