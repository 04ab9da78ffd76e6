//! Pure field validation
//!
//! The check functions in this module are the validation core: given a
//! candidate value, a declared default and the field's constraints, each
//! returns an [`Outcome`] carrying the accepted value and, when the input had
//! to be corrected, a human-readable message. They perform no I/O themselves;
//! filesystem existence is delegated to a [`PathProbe`] collaborator.
//!
//! A bad value is never an error: logical and text checks fall fully back to
//! the default, while numeric checks first clamp into the declared range and
//! only fall back to the default when the (possibly clamped) value misses the
//! discrete valid set. Clamping runs before the set-membership check, so an
//! out-of-range value can be clamped into range and still be rejected.

use crate::error::Result;
use crate::schema::{FieldValue, NumberConstraints, TextConstraints};
use std::path::Path;

// =============================================================================
// Validation Outcome
// =============================================================================

/// Result of checking one candidate value
///
/// `accepted` is always usable: the supplied value, a clamp of it, or the
/// declared default. `message` is present exactly when the value was
/// corrected.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    /// The value the field should hold
    pub accepted: T,

    /// Whether the supplied value was replaced or clamped
    pub corrected: bool,

    /// Warning message describing the correction
    pub message: Option<String>,
}

impl<T> Outcome<T> {
    fn accepted(value: T) -> Self {
        Self {
            accepted: value,
            corrected: false,
            message: None,
        }
    }

    fn corrected(value: T, message: String) -> Self {
        Self {
            accepted: value,
            corrected: true,
            message: Some(message),
        }
    }
}

// =============================================================================
// Filesystem Probe
// =============================================================================

/// Filesystem-existence collaborator for text fields with
/// `require_existence`
///
/// The default implementation asks the real filesystem; tests substitute
/// their own.
pub trait PathProbe {
    /// Whether `path` exists
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

// =============================================================================
// Check Functions
// =============================================================================

/// Check a logical field value
///
/// A present boolean is accepted as-is; an absent value or one of another
/// kind falls back to the default.
pub fn check_logical(value: Option<&FieldValue>, default: bool) -> Outcome<bool> {
    match value.and_then(FieldValue::as_logical) {
        Some(b) => Outcome::accepted(b),
        None => Outcome::corrected(default, format!("invalid value => using default {default}")),
    }
}

/// Check a text field value
///
/// Accepted iff the value is textual, non-empty (unless `empty_is_valid`)
/// and, when `require_existence` is set, names a path the probe can find.
/// A failed probe is a rejection reason, not an error.
pub fn check_text(
    value: Option<&FieldValue>,
    default: &str,
    constraints: &TextConstraints,
    probe: &dyn PathProbe,
) -> Outcome<String> {
    let fallback = |reason: &str| {
        Outcome::corrected(
            default.to_string(),
            format!("{reason} => using default '{default}'"),
        )
    };

    let Some(text) = value.and_then(FieldValue::as_text) else {
        return fallback("invalid value");
    };

    if text.is_empty() && !constraints.empty_is_valid {
        return fallback("empty value not permitted");
    }

    if constraints.require_existence && !probe.exists(Path::new(text)) {
        return fallback(&format!("path '{text}' does not exist"));
    }

    Outcome::accepted(text.to_string())
}

/// Check a number field value
///
/// A non-finite, absent or wrong-kind value falls back to the default.
/// Otherwise the value is clamped into `limits`, and afterwards rejected in
/// favor of the default if a `valid_set` is declared and the clamped value
/// is not a member.
///
/// # Errors
///
/// Returns [`Error::InvalidLimits`](crate::Error::InvalidLimits) when the
/// declared range is inverted (`low > high`); the caller must not mutate the
/// field in that case.
pub fn check_number(
    value: Option<&FieldValue>,
    default: f64,
    constraints: &NumberConstraints,
) -> Result<Outcome<f64>> {
    if let Some(limits) = constraints.limits {
        limits.validate()?;
    }

    let Some(number) = value.and_then(FieldValue::as_number).filter(|n| n.is_finite()) else {
        return Ok(Outcome::corrected(
            default,
            format!("invalid value => using default {default}"),
        ));
    };

    // Range violations self-heal toward the nearest bound instead of
    // falling back to the default.
    let (clamped, mut message) = match constraints.limits {
        Some(limits) if !limits.contains(number) => {
            let clamped = limits.clamp(number);
            (
                clamped,
                Some(format!(
                    "{number} outside [{low}, {high}] => clamped to {clamped}",
                    low = limits.low,
                    high = limits.high
                )),
            )
        }
        _ => (number, None),
    };

    // Set membership is checked after clamping; a clamped value can still be
    // rejected here, in which case the fallback is the full default.
    if let Some(ref set) = constraints.valid_set {
        if !set.contains(&clamped) {
            let permitted = set
                .iter()
                .map(f64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Ok(Outcome::corrected(
                default,
                format!("{clamped} not in permitted set {{{permitted}}} => using default {default}"),
            ));
        }
    }

    Ok(match message.take() {
        Some(msg) => Outcome::corrected(clamped, msg),
        None => Outcome::accepted(clamped),
    })
}

// =============================================================================
// Tests
// =============================================================================
