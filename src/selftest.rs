//! Round-trip conformance self-test
//!
//! Exercises the full export → persist → reload → import → compare cycle for
//! any [`FieldSchema`] type, as a conformance check a concrete configuration
//! type can run against itself. Failures are captured into the returned
//! [`SelfTestReport`] and reported to the sink as errors; nothing
//! propagates. The sink's verbosity is raised to maximum for the duration
//! and restored on every exit path.

use crate::record;
use crate::schema::FieldSchema;
use crate::sink::{DiagnosticSink, VerbosityGuard, verbosity};
use crate::store::{RecordStore, save_config};

use log::debug;

/// Outcome of [`round_trip`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestReport {
    /// Whether every step succeeded and the reloaded copy matched
    pub passed: bool,

    /// Human-readable dump of the persisted store (empty on early failure)
    pub dump: String,

    /// Description of the first failing step, if any
    pub failure: Option<String>,
}

/// Run the round-trip self-test on a configuration instance
///
/// Steps: export `cfg`, persist to a temporary file, reload the store,
/// import into a fresh default instance, compare that copy's fields against
/// the original's, import the copy back into `cfg` via the
/// copy-from-instance path, dump the store, and delete the temporary file.
///
/// The test is diagnostic, not destructive: on success `cfg` ends up with
/// the same field values it started with.
pub fn round_trip<C>(cfg: &mut C, sink: &dyn DiagnosticSink) -> SelfTestReport
where
    C: FieldSchema + Default,
{
    let _verbosity = VerbosityGuard::new(sink, verbosity::MAX);

    match run_steps(cfg) {
        Ok(dump) => {
            debug!("round-trip self-test passed");
            SelfTestReport {
                passed: true,
                dump,
                failure: None,
            }
        }
        Err(failure) => {
            sink.add_error(&format!("round-trip self-test failed: {failure}"));
            SelfTestReport {
                passed: false,
                dump: String::new(),
                failure: Some(failure),
            }
        }
    }
}

fn run_steps<C>(cfg: &mut C) -> Result<String, String>
where
    C: FieldSchema + Default,
{
    let dir = tempfile::tempdir().map_err(|e| format!("temp dir: {e}"))?;
    let path = dir.path().join("roundtrip.cfg");

    let store = save_config(cfg, &path).map_err(|e| e.to_string())?;

    let reloaded = RecordStore::load(&path).map_err(|e| e.to_string())?;

    let mut copy = C::default();
    record::import_records(&mut copy, reloaded.records()).map_err(|e| e.to_string())?;

    for descriptor in C::catalog() {
        let original = cfg.field(&descriptor.name);
        let roundtripped = copy.field(&descriptor.name);
        if original != roundtripped {
            return Err(format!(
                "field {name} mismatch after reload: {original:?} != {roundtripped:?}",
                name = descriptor.name
            ));
        }
    }

    // Copy-from-instance path back into the original.
    record::import_from(cfg, &copy).map_err(|e| e.to_string())?;

    let dump = store.dump();

    store.remove_file().map_err(|e| e.to_string())?;

    Ok(dump)
}

// =============================================================================
// Tests
// =============================================================================
