//!
//! Reference backend emitting one flat JSON object per record.
//!

use std::{collections::HashMap, io::Write};

use once_cell::sync::Lazy;
use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::fmt::MakeWriter;

use super::{
    backend::{Backend, Record},
    types::Severity,
};

// Implicit keys

const LEVEL: &str = "level";
const MSG: &str = "msg";
const TIME: &str = "time";
const NAME: &str = "name";
const ERROR: &str = "error";

/// Keys the formatter owns. User fields colliding with them are skipped so a
/// record can never carry, say, two `level` entries.
pub static RESERVED_KEYS: Lazy<rustc_hash::FxHashSet<&str>> = Lazy::new(|| {
    let mut set = rustc_hash::FxHashSet::default();

    set.insert(LEVEL);
    set.insert(MSG);
    set.insert(TIME);
    set.insert(NAME);
    set.insert(ERROR);

    set
});

/// JSON-line backend writing each record with a single `write_all` call.
///
/// The single write keeps concurrent records from interleaving; everything
/// else is delegated to the writer produced by `W`, typically a
/// [`tracing_appender`](https://docs.rs/tracing-appender) non-blocking
/// writer.
#[derive(Debug)]
pub struct JsonBackend<W>
where
    W: for<'a> MakeWriter<'a> + 'static,
{
    threshold: Severity,
    dst_writer: W,
    default_fields: HashMap<String, Value>,
}

impl<W> JsonBackend<W>
where
    W: for<'a> MakeWriter<'a> + 'static,
{
    /// Backend emitting records at or above `threshold` into `dst_writer`.
    ///
    /// ## Example
    /// ```rust
    /// let backend = log_bridge::JsonBackend::new(log_bridge::Severity::Info, std::io::stdout);
    /// ```
    pub fn new(threshold: Severity, dst_writer: W) -> Self {
        Self::with_default_fields(threshold, dst_writer, HashMap::new())
    }

    /// Backend additionally stamping `default_fields` onto every record.
    /// Reserved keys among them are skipped.
    pub fn with_default_fields(
        threshold: Severity,
        dst_writer: W,
        default_fields: HashMap<String, Value>,
    ) -> Self {
        Self {
            threshold,
            dst_writer,
            default_fields,
        }
    }

    /// Serialize one record into a memory buffer.
    fn serialize(&self, record: &Record<'_>) -> Result<Vec<u8>, std::io::Error> {
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::new(&mut buffer);
        let mut map_serializer = serializer.serialize_map(None)?;

        map_serializer.serialize_entry(LEVEL, &format_args!("{}", record.severity))?;
        map_serializer.serialize_entry(MSG, record.msg)?;
        if let Ok(time) = time::OffsetDateTime::now_utc().format(&Rfc3339) {
            map_serializer.serialize_entry(TIME, &time)?;
        }
        if let Some(name) = &record.name {
            map_serializer.serialize_entry(NAME, name)?;
        }
        if let Some(error) = &record.error {
            map_serializer.serialize_entry(ERROR, error)?;
        }

        for (key, value) in &self.default_fields {
            if !RESERVED_KEYS.contains(key.as_str()) {
                map_serializer.serialize_entry(key, value)?;
            }
        }

        for (key, value) in record.fields.iter() {
            if !RESERVED_KEYS.contains(key) {
                map_serializer.serialize_entry(key, value)?;
            }
        }

        map_serializer.end()?;
        Ok(buffer)
    }

    ///
    /// Flush the buffer into the output stream trailing it with a newline.
    ///
    /// Done with a single `write_all` call to avoid fragmentation of the log
    /// line under concurrent writers.
    ///
    fn flush(&self, mut buffer: Vec<u8>) -> Result<(), std::io::Error> {
        buffer.write_all(b"\n")?;
        self.dst_writer.make_writer().write_all(&buffer)
    }
}

impl<W> Backend for JsonBackend<W>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn emit(&self, record: &Record<'_>) {
        // Fire-and-forget: a record that fails to serialize or write is
        // dropped rather than surfaced.
        if let Ok(formatted) = self.serialize(record) {
            let _ = self.flush(formatted);
        }
    }
}
