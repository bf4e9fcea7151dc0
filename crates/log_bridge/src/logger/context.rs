//!
//! Explicit carrier for request-scoped log fields.
//!

use super::fields::FieldSet;

/// Immutable key/value carrier passed explicitly through request scopes.
///
/// Fields accumulate along the parent chain: [`LogContext::with_fields`]
/// returns a child carrying the parent's fields first, with the new fields
/// appended or overriding by key. The carrier is only reachable through the
/// values it was handed to; nothing is ambient or global.
///
/// Attach a context to a handle with
/// [`Logger::contextualize`](super::handle::Logger::contextualize).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext {
    fields: FieldSet,
}

impl LogContext {
    /// A context carrying no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Child context with `fields` merged after the parent's. The parent is
    /// untouched.
    pub fn with_fields(&self, fields: FieldSet) -> Self {
        let mut merged = self.fields.clone();
        merged.extend_from(&fields);
        Self { fields: merged }
    }

    /// Accumulated fields, parent-first.
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }
}
