//! # fieldman - Typed Configuration Field Manager
//!
//! A small, framework-agnostic library for validating a configuration
//! object's fields against declared defaults and constraints, and for
//! persisting the full field set to a flat `key = value` text file.
//!
//! ## Features
//!
//! - **Declarative field catalog**: each configuration type declares its
//!   fields once as typed descriptors (name, default, constraints)
//! - **Validated fallback**: a bad value never fails hard; fields degrade to
//!   their declared default with a warning, and out-of-range numbers are
//!   clamped to the nearest bound instead of rejected
//! - **Flat-file persistence**: ordered `key = value` records with atomic
//!   writes and tolerant reads
//! - **Import/merge**: apply a record subset or copy fields straight from
//!   another instance, with validation as a separate explicit pass
//! - **Round-trip self-test**: conformance harness any configuration type
//!   can run against itself
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldman::{
//!     FieldChecker, FieldDescriptor, FieldSchema, FieldValue, LogSink, fields,
//! };
//!
//! struct AppConfig {
//!     enabled: bool,
//!     max_retry: f64,
//! }
//!
//! impl FieldSchema for AppConfig {
//!     fn catalog() -> Vec<FieldDescriptor> {
//!         fields![
//!             FieldDescriptor::logical("ENABLED", true),
//!             FieldDescriptor::number("MAX_RETRY", 3.0)
//!                 .limits(0.0, 10.0)
//!                 .valid_set([0.0, 5.0, 10.0]),
//!         ]
//!     }
//!
//!     fn field(&self, name: &str) -> Option<FieldValue> {
//!         match name {
//!             "ENABLED" => Some(self.enabled.into()),
//!             "MAX_RETRY" => Some(self.max_retry.into()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set_field(&mut self, name: &str, value: FieldValue) -> fieldman::Result<()> {
//!         match name {
//!             "ENABLED" => self.enabled = value.as_logical().unwrap_or(self.enabled),
//!             "MAX_RETRY" => self.max_retry = value.as_number().unwrap_or(self.max_retry),
//!             _ => return Err(fieldman::Error::FieldNotFound(name.to_string())),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let sink = LogSink::default();
//! let mut config = AppConfig { enabled: true, max_retry: 15.0 };
//!
//! // 15 is out of range: clamped to 10, which is in the valid set.
//! let checker = FieldChecker::new(&sink);
//! checker.check_all(&mut config).unwrap();
//! assert_eq!(config.max_retry, 10.0);
//! ```
//!
//! ## Persistence
//!
//! ```rust,no_run
//! use fieldman::{load_config, save_config};
//! # use fieldman::{FieldDescriptor, FieldSchema, FieldValue, fields};
//! # #[derive(Default)] struct AppConfig;
//! # impl FieldSchema for AppConfig {
//! #     fn catalog() -> Vec<FieldDescriptor> { fields![] }
//! #     fn field(&self, _: &str) -> Option<FieldValue> { None }
//! #     fn set_field(&mut self, _: &str, _: FieldValue) -> fieldman::Result<()> { Ok(()) }
//! # }
//!
//! # fn example() -> fieldman::Result<()> {
//! let mut config = AppConfig::default();
//! let store = save_config(&config, "/tmp/app.cfg")?;
//! println!("{}", store.dump());
//!
//! load_config(&mut config, "/tmp/app.cfg")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Self-Test
//!
//! ```rust,no_run
//! use fieldman::{LogSink, selftest};
//! # use fieldman::{FieldDescriptor, FieldSchema, FieldValue, fields};
//! # #[derive(Default)] struct AppConfig;
//! # impl FieldSchema for AppConfig {
//! #     fn catalog() -> Vec<FieldDescriptor> { fields![] }
//! #     fn field(&self, _: &str) -> Option<FieldValue> { None }
//! #     fn set_field(&mut self, _: &str, _: FieldValue) -> fieldman::Result<()> { Ok(()) }
//! # }
//!
//! let sink = LogSink::default();
//! let mut config = AppConfig::default();
//! let report = selftest::round_trip(&mut config, &sink);
//! assert!(report.passed);
//! ```

// Core modules
mod checker;
mod error;
mod record;
mod schema;
pub mod selftest;
mod sink;
mod store;
pub mod validate;

// Re-exports from core
pub use checker::FieldChecker;
pub use error::{Error, Result};
pub use record::{Record, export, import_from, import_records};
pub use schema::{
    FieldConstraints, FieldDescriptor, FieldKind, FieldSchema, FieldValue, Limits,
    NumberConstraints, TextConstraints,
};
pub use selftest::{SelfTestReport, round_trip};
pub use sink::{DiagnosticSink, LogSink, MemorySink, VerbosityGuard, verbosity};
pub use store::{RecordStore, load_config, save_config};
pub use validate::{FsProbe, Outcome, PathProbe};
