//! Field accessor bridge
//!
//! [`FieldChecker`] connects the pure validators to a concrete configuration
//! instance: it resolves a field's current value and declared default from
//! the type's catalog, runs the matching check, writes the accepted value
//! back, and forwards any correction message to the diagnostic sink as a
//! warning.
//!
//! A bad field value never produces an `Err` here; the field simply ends up
//! holding the default (or a clamped value). Only malformed invocations, an
//! unknown field name or an ill-formed descriptor, abort, and they do so
//! before the field is touched.

use crate::error::{Error, Result};
use crate::schema::{FieldKind, FieldSchema, FieldValue};
use crate::sink::DiagnosticSink;
use crate::validate::{self, FsProbe, PathProbe};

use log::debug;

/// Validates fields of a [`FieldSchema`] instance in place
pub struct FieldChecker<'a> {
    sink: &'a dyn DiagnosticSink,
    probe: &'a dyn PathProbe,
}

impl<'a> FieldChecker<'a> {
    /// Create a checker probing the real filesystem
    #[must_use]
    pub fn new(sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            sink,
            probe: &FsProbe,
        }
    }

    /// Create a checker with a custom filesystem probe
    #[must_use]
    pub fn with_probe(sink: &'a dyn DiagnosticSink, probe: &'a dyn PathProbe) -> Self {
        Self { sink, probe }
    }

    /// Validate one field and write the accepted value back
    ///
    /// Returns the value the field holds after the check. If the current
    /// value was invalid the field now holds the declared default (or, for
    /// an out-of-range number, the clamped value) and a warning naming the
    /// field has been sent to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldNotFound`] for a name missing from the catalog
    /// and descriptor errors such as [`Error::InvalidLimits`]; the field is
    /// not mutated in those cases. Errors are also reported to the sink.
    pub fn check_field<C: FieldSchema>(&self, cfg: &mut C, name: &str) -> Result<FieldValue> {
        let result = self.check_field_inner(cfg, name);
        if let Err(ref e) = result {
            self.sink.add_error(&e.to_string());
        }
        result
    }

    /// Validate every field in the catalog, in catalog order
    ///
    /// # Errors
    ///
    /// Stops at the first malformed invocation; invalid values alone never
    /// fail.
    pub fn check_all<C: FieldSchema>(&self, cfg: &mut C) -> Result<()> {
        for descriptor in C::catalog() {
            self.check_field(cfg, &descriptor.name)?;
        }
        debug!("checked all cataloged fields");
        Ok(())
    }

    fn check_field_inner<C: FieldSchema>(&self, cfg: &mut C, name: &str) -> Result<FieldValue> {
        let descriptor =
            C::descriptor(name).ok_or_else(|| Error::FieldNotFound(name.to_string()))?;
        descriptor.validate_schema()?;

        let current = cfg.field(name);

        let (accepted, corrected, message) = match descriptor.kind() {
            FieldKind::Logical => {
                let default = descriptor.default.as_logical().unwrap_or_default();
                let outcome = validate::check_logical(current.as_ref(), default);
                (
                    FieldValue::Logical(outcome.accepted),
                    outcome.corrected,
                    outcome.message,
                )
            }
            FieldKind::Text => {
                let default = descriptor.default.as_text().unwrap_or_default();
                let outcome = validate::check_text(
                    current.as_ref(),
                    default,
                    &descriptor.constraints.text,
                    self.probe,
                );
                (
                    FieldValue::Text(outcome.accepted),
                    outcome.corrected,
                    outcome.message,
                )
            }
            FieldKind::Number => {
                let default = descriptor.default.as_number().unwrap_or_default();
                let outcome = validate::check_number(
                    current.as_ref(),
                    default,
                    &descriptor.constraints.number,
                )?;
                (
                    FieldValue::Number(outcome.accepted),
                    outcome.corrected,
                    outcome.message,
                )
            }
        };

        cfg.set_field(name, accepted.clone())?;

        if corrected {
            let detail = message.unwrap_or_else(|| "corrected".to_string());
            self.sink.add_warning(&format!("field {name}: {detail}"));
        }

        Ok(accepted)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use crate::schema::FieldDescriptor;
    use crate::sink::MemorySink;
    use std::path::Path;

    /// Minimal configuration type used by bridge tests
    #[derive(Debug, Clone, PartialEq)]
    struct Sample {
        enabled: FieldValue,
        retry: FieldValue,
        path: FieldValue,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self {
                enabled: FieldValue::Logical(true),
                retry: FieldValue::Number(3.0),
                path: FieldValue::Text("/fallback".into()),
            }
        }
    }

    impl FieldSchema for Sample {
        fn catalog() -> Vec<FieldDescriptor> {
            fields![
                FieldDescriptor::logical("ENABLED", true),
                FieldDescriptor::number("MAX_RETRY", 3.0)
                    .limits(0.0, 10.0)
                    .valid_set([0.0, 5.0, 10.0]),
                FieldDescriptor::text("DATA_PATH", "/fallback").require_existence(),
            ]
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "ENABLED" => Some(self.enabled.clone()),
                "MAX_RETRY" => Some(self.retry.clone()),
                "DATA_PATH" => Some(self.path.clone()),
                _ => None,
            }
        }

        fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
            match name {
                "ENABLED" => self.enabled = value,
                "MAX_RETRY" => self.retry = value,
                "DATA_PATH" => self.path = value,
                _ => return Err(Error::FieldNotFound(name.to_string())),
            }
            Ok(())
        }
    }

    struct AlwaysThere;

    impl PathProbe for AlwaysThere {
        fn exists(&self, _path: &Path) -> bool {
            true
        }
    }

    #[test]
    fn test_valid_fields_pass_untouched() {
        let sink = MemorySink::new();
        let checker = FieldChecker::with_probe(&sink, &AlwaysThere);
        let mut cfg = Sample::default();

        checker.check_all(&mut cfg).unwrap();

        assert_eq!(cfg, Sample::default());
        assert!(sink.warnings().is_empty());
        assert!(sink.errors().is_empty());
    }

    #[test]
    fn test_out_of_range_number_is_clamped_and_warned() {
        let sink = MemorySink::new();
        let checker = FieldChecker::with_probe(&sink, &AlwaysThere);
        let mut cfg = Sample {
            retry: FieldValue::Number(15.0),
            ..Sample::default()
        };

        let accepted = checker.check_field(&mut cfg, "MAX_RETRY").unwrap();

        assert_eq!(accepted, FieldValue::Number(10.0));
        assert_eq!(cfg.retry, FieldValue::Number(10.0));
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("MAX_RETRY"));
    }

    #[test]
    fn test_missing_path_degrades_to_default() {
        struct NeverThere;
        impl PathProbe for NeverThere {
            fn exists(&self, _path: &Path) -> bool {
                false
            }
        }

        let sink = MemorySink::new();
        let checker = FieldChecker::with_probe(&sink, &NeverThere);
        let mut cfg = Sample {
            path: FieldValue::Text("/nope".into()),
            ..Sample::default()
        };

        checker.check_field(&mut cfg, "DATA_PATH").unwrap();

        assert_eq!(cfg.path, FieldValue::Text("/fallback".into()));
        assert!(sink.warnings()[0].contains("/nope"));
    }

    #[test]
    fn test_unknown_field_is_error_without_mutation() {
        let sink = MemorySink::new();
        let checker = FieldChecker::new(&sink);
        let mut cfg = Sample::default();

        let err = checker.check_field(&mut cfg, "NO_SUCH_FIELD").unwrap_err();

        assert!(matches!(err, Error::FieldNotFound(_)));
        assert_eq!(cfg, Sample::default());
        assert_eq!(sink.errors().len(), 1);
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_wrong_kind_value_degrades_to_default() {
        let sink = MemorySink::new();
        let checker = FieldChecker::with_probe(&sink, &AlwaysThere);
        let mut cfg = Sample {
            enabled: FieldValue::Number(1.0),
            ..Sample::default()
        };

        checker.check_field(&mut cfg, "ENABLED").unwrap();

        assert_eq!(cfg.enabled, FieldValue::Logical(true));
        assert_eq!(sink.warnings().len(), 1);
    }
}
