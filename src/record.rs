//! Record serialization
//!
//! Converts a configuration instance's fields into an ordered sequence of
//! key/value text [`Record`]s and back. Canonical text forms: logical fields
//! render as `"0"`/`"1"`, text fields as the raw string, number fields via
//! `f64` display (shortest round-tripping form).
//!
//! Import never validates. Unknown record keys are ignored and keys absent
//! from the input leave the corresponding field untouched, so a subset of
//! records is always safe to apply. Callers wanting validated values run a
//! [`FieldChecker`](crate::FieldChecker) afterwards.

use crate::error::{Error, Result};
use crate::schema::{FieldKind, FieldSchema, FieldValue};
use serde::{Deserialize, Serialize};

/// One key/value text line of the persistence format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub value: String,
}

impl Record {
    /// Create a record
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Canonical Text Forms
// =============================================================================

/// Render a field value in its canonical text form
#[must_use]
pub fn render(value: &FieldValue) -> String {
    match value {
        FieldValue::Logical(true) => "1".to_string(),
        FieldValue::Logical(false) => "0".to_string(),
        FieldValue::Text(s) => s.clone(),
        FieldValue::Number(n) => n.to_string(),
    }
}

/// Parse canonical text into a value of the given kind
///
/// Logical parsing accepts `0`/`1` and `true`/`false`.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the text has no reading in the field's
/// kind; `field` names the offender in the message.
pub fn parse(field: &str, kind: FieldKind, text: &str) -> Result<FieldValue> {
    let parse_error = || Error::Parse {
        field: field.to_string(),
        value: text.to_string(),
        expected: kind.as_str().to_string(),
    };

    match kind {
        FieldKind::Logical => match text {
            "1" | "true" => Ok(FieldValue::Logical(true)),
            "0" | "false" => Ok(FieldValue::Logical(false)),
            _ => Err(parse_error()),
        },
        FieldKind::Text => Ok(FieldValue::Text(text.to_string())),
        FieldKind::Number => text
            .parse::<f64>()
            .map(FieldValue::Number)
            .map_err(|_| parse_error()),
    }
}

// =============================================================================
// Export / Import
// =============================================================================

/// Export every cataloged field as one record, in catalog order
///
/// # Errors
///
/// Returns [`Error::FieldNotFound`] if the instance fails to produce a value
/// for a cataloged field (the catalog and the instance disagree).
pub fn export<C: FieldSchema>(cfg: &C) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for descriptor in C::catalog() {
        let value = cfg
            .field(&descriptor.name)
            .ok_or_else(|| Error::FieldNotFound(descriptor.name.clone()))?;
        records.push(Record::new(descriptor.name, render(&value)));
    }
    Ok(records)
}

/// Set fields from a record sequence
///
/// Records whose key is not in the catalog are skipped; cataloged fields
/// with no matching record keep their current value. Values are parsed
/// according to the field's declared kind but not otherwise validated.
///
/// # Errors
///
/// Returns [`Error::Parse`] when a matched record's value has no reading in
/// the field's kind. Records before the offender are already applied.
pub fn import_records<C: FieldSchema>(cfg: &mut C, records: &[Record]) -> Result<()> {
    for record in records {
        let Some(descriptor) = C::descriptor(&record.key) else {
            continue;
        };
        let value = parse(&record.key, descriptor.kind(), &record.value)?;
        cfg.set_field(&record.key, value)?;
    }
    Ok(())
}

/// Copy field values directly from another instance, bypassing the text
/// round trip
///
/// # Errors
///
/// Returns [`Error::FieldNotFound`] if `other` fails to produce a value for
/// a cataloged field.
pub fn import_from<C: FieldSchema>(cfg: &mut C, other: &C) -> Result<()> {
    for descriptor in C::catalog() {
        let value = other
            .field(&descriptor.name)
            .ok_or_else(|| Error::FieldNotFound(descriptor.name.clone()))?;
        cfg.set_field(&descriptor.name, value)?;
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
