//! Types.

use serde::Deserialize;
use strum::{Display, EnumString};

/// Backend-native severity, ordered from least to most severe.
///
/// The ordering drives threshold gating: a record is emitted only when its
/// severity is at or above the backend's configured minimum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    /// Most verbose.
    Trace,
    /// Developer-facing detail.
    Debug,
    /// Normal operation.
    Info,
    /// Something suspicious, still operating.
    Warn,
    /// Most severe.
    Error,
}

impl Severity {
    /// Map a facade verbosity level onto a backend severity.
    ///
    /// The table is fixed: 0 is `info`, 1 is `debug`, and everything at or
    /// beyond 2 collapses to `trace` since the backend has no severity below
    /// its floor.
    pub fn from_verbosity(level: u8) -> Self {
        match level {
            0 => Self::Info,
            1 => Self::Debug,
            _ => Self::Trace,
        }
    }
}
