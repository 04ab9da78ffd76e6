//! Field catalog types and the `FieldSchema` trait
//!
//! A configuration type declares its fields once, as a statically built
//! catalog of [`FieldDescriptor`] entries: field name, typed default and
//! constraints. Catalog order is authoritative for export. The descriptor's
//! default doubles as the fallback used whenever validation rejects the
//! current value.
//!
//! ```rust
//! use fieldman::{fields, FieldDescriptor};
//!
//! let catalog = fields![
//!     FieldDescriptor::logical("ENABLED", true),
//!     FieldDescriptor::number("MAX_RETRY", 3.0)
//!         .limits(0.0, 10.0)
//!         .valid_set([0.0, 5.0, 10.0]),
//!     FieldDescriptor::text("LOG_PATH", "/var/log/app.log").require_existence(),
//! ];
//! assert_eq!(catalog.len(), 3);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Field Kinds and Values
// =============================================================================

/// Kind of a configuration field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Boolean toggle
    Logical,
    /// Text value, optionally required to exist as a filesystem path
    Text,
    /// Finite floating-point number
    Number,
}

impl FieldKind {
    /// Lowercase name used in diagnostics
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Logical => "logical",
            FieldKind::Text => "text",
            FieldKind::Number => "number",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Logical(bool),
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Kind of this value
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Logical(_) => FieldKind::Logical,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
        }
    }

    /// Get as bool if this is a logical value
    #[must_use]
    pub fn as_logical(&self) -> Option<bool> {
        match self {
            FieldValue::Logical(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as &str if this is a text value
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get as f64 if this is a number value
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Logical(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

// =============================================================================
// Constraints
// =============================================================================

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub low: f64,
    pub high: f64,
}

impl Limits {
    /// Create a new inclusive range
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Reject non-finite bounds and inverted ranges; precondition for
    /// [`Limits::clamp`], which would otherwise panic on a NaN bound
    pub fn validate(&self) -> Result<()> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low > self.high {
            return Err(Error::InvalidLimits {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }

    /// Whether `value` lies inside the range (inclusive)
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Snap `value` to the nearest bound if outside the range
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.low, self.high)
    }
}

/// Constraints for Number fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberConstraints {
    /// Inclusive range; out-of-range values are clamped, not rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<Limits>,

    /// Discrete set of permitted values, checked after clamping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_set: Option<Vec<f64>>,
}

/// Constraints for Text fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextConstraints {
    /// Accept the empty string (default: rejected)
    pub empty_is_valid: bool,

    /// Require the value to exist as a filesystem path
    pub require_existence: bool,
}

/// Per-kind constraints carried by a descriptor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldConstraints {
    /// Number constraints (ignored for other kinds)
    #[serde(flatten)]
    pub number: NumberConstraints,

    /// Text constraints (ignored for other kinds)
    #[serde(flatten)]
    pub text: TextConstraints,
}

// =============================================================================
// Field Descriptor
// =============================================================================

/// Declaration of a single configuration field: name, typed default and
/// constraints
///
/// # Example
///
/// ```rust
/// use fieldman::FieldDescriptor;
///
/// let retry = FieldDescriptor::number("MAX_RETRY", 3.0)
///     .limits(0.0, 10.0)
///     .valid_set([0.0, 5.0, 10.0]);
///
/// let path = FieldDescriptor::text("CONFIG_DIR", "/etc/app")
///     .require_existence();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, unique within the owning catalog
    pub name: String,

    /// Declared default; also fixes the field's kind
    pub default: FieldValue,

    /// Type-specific constraints
    #[serde(flatten)]
    pub constraints: FieldConstraints,
}

impl FieldDescriptor {
    // =========================================================================
    // Kind-specific constructors
    // =========================================================================

    /// Declare a logical (boolean) field
    pub fn logical(name: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            default: FieldValue::Logical(default),
            constraints: FieldConstraints::default(),
        }
    }

    /// Declare a text field
    pub fn text(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: FieldValue::Text(default.into()),
            constraints: FieldConstraints::default(),
        }
    }

    /// Declare a number field
    pub fn number(name: impl Into<String>, default: f64) -> Self {
        Self {
            name: name.into(),
            default: FieldValue::Number(default),
            constraints: FieldConstraints::default(),
        }
    }

    // =========================================================================
    // Constraint setters (builder pattern)
    // =========================================================================

    /// Set the inclusive range for a Number field
    #[must_use]
    pub fn limits(mut self, low: f64, high: f64) -> Self {
        self.constraints.number.limits = Some(Limits::new(low, high));
        self
    }

    /// Set the discrete permitted set for a Number field
    #[must_use]
    pub fn valid_set(mut self, set: impl IntoIterator<Item = f64>) -> Self {
        self.constraints.number.valid_set = Some(set.into_iter().collect());
        self
    }

    /// Accept the empty string for a Text field
    #[must_use]
    pub fn allow_empty(mut self) -> Self {
        self.constraints.text.empty_is_valid = true;
        self
    }

    /// Require a Text field's value to exist as a filesystem path
    #[must_use]
    pub fn require_existence(mut self) -> Self {
        self.constraints.text.require_existence = true;
        self
    }

    /// Kind of this field, implied by its default
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.default.kind()
    }

    // =========================================================================
    // Schema validation
    // =========================================================================

    /// Validate the descriptor itself
    ///
    /// Checks that constraints agree with the field's kind, that limits are
    /// not inverted, and that a valid set is not empty.
    pub fn validate_schema(&self) -> Result<()> {
        let kind = self.kind();

        if kind != FieldKind::Number
            && (self.constraints.number.limits.is_some()
                || self.constraints.number.valid_set.is_some())
        {
            return Err(Error::InvalidDescriptor {
                name: self.name.clone(),
                reason: format!("number constraints declared on a {kind} field"),
            });
        }

        if kind != FieldKind::Text
            && (self.constraints.text.empty_is_valid || self.constraints.text.require_existence)
        {
            return Err(Error::InvalidDescriptor {
                name: self.name.clone(),
                reason: format!("text constraints declared on a {kind} field"),
            });
        }

        if let Some(limits) = self.constraints.number.limits {
            limits.validate()?;
        }

        if let Some(ref set) = self.constraints.number.valid_set {
            if set.is_empty() {
                return Err(Error::InvalidDescriptor {
                    name: self.name.clone(),
                    reason: "valid set cannot be empty".into(),
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
// Field Schema Trait
// =============================================================================

/// Trait implemented by configuration types whose fields this library
/// validates and persists
///
/// The catalog is built once per call and its order defines export order.
/// `field`/`set_field` give the library by-name access to the instance's
/// current values; the instance itself stays externally owned.
pub trait FieldSchema {
    /// Ordered field catalog for this type
    fn catalog() -> Vec<FieldDescriptor>;

    /// Current value of the named field, if the field exists
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Overwrite the named field's current value
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldNotFound`] for an unknown name and
    /// [`Error::KindMismatch`] if `value` has the wrong kind for the field.
    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()>;

    /// Look up the catalog descriptor for one field
    fn descriptor(name: &str) -> Option<FieldDescriptor> {
        Self::catalog().into_iter().find(|d| d.name == name)
    }

    /// Validate every descriptor in the catalog
    ///
    /// Useful as a startup assertion for concrete configuration types.
    fn validate_catalog() -> Result<()> {
        for descriptor in Self::catalog() {
            descriptor.validate_schema()?;
        }
        Ok(())
    }
}

// =============================================================================
// Helper Macro
// =============================================================================

/// Macro for building a field catalog more cleanly
///
/// # Example
/// ```rust
/// use fieldman::{fields, FieldDescriptor};
///
/// let catalog = fields![
///     FieldDescriptor::logical("ENABLED", true),
///     FieldDescriptor::number("PORT", 8080.0).limits(1.0, 65535.0),
/// ];
/// ```
#[macro_export]
macro_rules! fields {
    ($($descriptor:expr),* $(,)?) => {
        vec![$($descriptor),*]
    };
}

// =============================================================================
// Tests
// =============================================================================
