//!
//! The facade's logger handle: immutable, cheaply derivable, unbound-safe.
//!

use std::{error::Error, fmt, sync::Arc};

use super::{
    backend::{Backend, Record},
    context::LogContext,
    fields::FieldSet,
    types::Severity,
};

/// Immutable logger handle.
///
/// Every derivation (`v`, `with_name`, `with_values`, `contextualize`)
/// returns a new handle and leaves the original untouched, so handles can be
/// shared across threads freely. A handle without a backend
/// ([`Logger::unbound`]) turns every operation into a no-op; handles derived
/// from it stay no-ops.
#[derive(Clone)]
pub struct Logger {
    state: State,
}

#[derive(Clone)]
enum State {
    /// No backend attached; all operations are pure no-ops.
    Unbound,
    Bound(Bound),
}

#[derive(Clone)]
struct Bound {
    backend: Arc<dyn Backend>,
    names: Vec<String>,
    fields: FieldSet,
    verbosity: u8,
}

impl Logger {
    /// A handle bound to `backend`, at verbosity 0 with no name or fields.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            state: State::Bound(Bound {
                backend,
                names: Vec::new(),
                fields: FieldSet::new(),
                verbosity: 0,
            }),
        }
    }

    /// The explicit no-op handle.
    pub fn unbound() -> Self {
        Self {
            state: State::Unbound,
        }
    }

    /// Whether the handle has a backend. Does not consult the backend's
    /// threshold: a bound handle at a suppressed verbosity is still enabled.
    pub fn enabled(&self) -> bool {
        matches!(self.state, State::Bound(_))
    }

    /// Derive a handle `level` steps more verbose.
    ///
    /// Levels accumulate: `v(1).v(1)` is as verbose as `v(2)`. Suppression is
    /// resolved at emission time against the backend's current threshold.
    pub fn v(&self, level: u8) -> Self {
        self.derive(|bound| bound.verbosity = bound.verbosity.saturating_add(level))
    }

    /// Derive a handle with `segment` appended to the name chain. Segments
    /// are joined with `"."` into the record's `name` field.
    pub fn with_name(&self, segment: &str) -> Self {
        self.derive(|bound| bound.names.push(segment.to_owned()))
    }

    /// Derive a handle carrying `kvs` in addition to its current fields;
    /// `kvs` wins on key collision.
    pub fn with_values(&self, kvs: FieldSet) -> Self {
        self.derive(|bound| bound.fields.extend_from(&kvs))
    }

    /// Derive a handle carrying the context's fields ahead of the handle's
    /// own, so explicit `with_values` fields override same-key context
    /// fields. A context without fields leaves the handle unchanged.
    pub fn contextualize(&self, ctx: &LogContext) -> Self {
        if ctx.fields().is_empty() {
            return self.clone();
        }
        self.derive(|bound| {
            let mut fields = ctx.fields().clone();
            fields.extend_from(&bound.fields);
            bound.fields = fields;
        })
    }

    /// Emit `msg` at the severity mapped from the handle's verbosity,
    /// subject to the backend's threshold.
    pub fn info(&self, msg: &str, kvs: FieldSet) {
        if let State::Bound(bound) = &self.state {
            bound.emit(Severity::from_verbosity(bound.verbosity), msg, None, kvs);
        }
    }

    /// Emit `msg` at `error` severity with the error's string rendering
    /// under the `error` field. Never filtered by verbosity.
    pub fn error(&self, err: &dyn Error, msg: &str, kvs: FieldSet) {
        if let State::Bound(bound) = &self.state {
            bound.emit(Severity::Error, msg, Some(err.to_string()), kvs);
        }
    }

    fn derive(&self, apply: impl FnOnce(&mut Bound)) -> Self {
        match &self.state {
            State::Unbound => self.clone(),
            State::Bound(bound) => {
                let mut bound = bound.clone();
                apply(&mut bound);
                Self {
                    state: State::Bound(bound),
                }
            }
        }
    }
}

impl Bound {
    fn emit(&self, severity: Severity, msg: &str, error: Option<String>, kvs: FieldSet) {
        if severity < self.backend.threshold() {
            return;
        }

        let mut fields = self.fields.clone();
        fields.extend_from(&kvs);
        let name = if self.names.is_empty() {
            None
        } else {
            Some(self.names.join("."))
        };

        self.backend.emit(&Record {
            severity,
            msg,
            name,
            error,
            fields,
        });
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Unbound => f.debug_struct("Logger").field("bound", &false).finish(),
            State::Bound(bound) => f
                .debug_struct("Logger")
                .field("bound", &true)
                .field("names", &bound.names)
                .field("fields", &bound.fields)
                .field("verbosity", &bound.verbosity)
                .finish(),
        }
    }
}
