//!
//! Logging facade and its backend seam.
//!

pub mod backend;
pub mod context;
pub mod fields;
pub mod formatter;
pub mod handle;
pub mod setup;
pub mod types;

pub use self::{
    backend::{Backend, Record},
    context::LogContext,
    fields::FieldSet,
    formatter::JsonBackend,
    handle::Logger,
    setup::{setup, setup_with_default_fields, LogGuard, SetupError},
    types::Severity,
};
