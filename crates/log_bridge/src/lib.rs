#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

//!
//! Verbosity-to-severity logging bridge: facade handles, field plumbing and a
//! JSON-line reference backend.
//!

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/", "README.md"))]

pub mod config;
pub mod logger;

#[doc(inline)]
pub use logger::*;
pub use serde_json;
pub use tracing_appender;
