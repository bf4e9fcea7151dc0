//!
//! Seam between the facade and concrete severity-based backends.
//!

use super::{fields::FieldSet, types::Severity};

/// One structured record handed to a backend for emission.
///
/// The facade resolves suppression before constructing a `Record`, so a
/// backend receiving one may assume the severity already passed its
/// threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'a> {
    /// Severity the record is emitted at.
    pub severity: Severity,
    /// Human-readable message.
    pub msg: &'a str,
    /// Dot-joined logger name chain, absent for the root logger.
    pub name: Option<String>,
    /// String rendering of the error, present only for error records.
    pub error: Option<String>,
    /// Contextual and call-site fields, in emission order.
    pub fields: FieldSet,
}

/// A severity-based structured logger the facade writes through.
///
/// Implementations must be safe for concurrent callers; the facade performs
/// no synchronization of its own.
pub trait Backend: Send + Sync {
    /// Minimum severity the backend will emit. Read on every call, so a
    /// backend may change its threshold at runtime.
    fn threshold(&self) -> Severity;

    /// Write one record. Infallible by contract: failures are swallowed.
    fn emit(&self, record: &Record<'_>);
}
