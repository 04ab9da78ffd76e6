//! Common test utilities for fieldman integration tests
//!
//! Provides a shared configuration fixture implementing `FieldSchema`.

#![allow(dead_code)]

use fieldman::{Error, FieldDescriptor, FieldSchema, FieldValue, Result, fields};

/// A demo configuration covering all three field kinds and both constraint
/// families
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub enabled: bool,
    pub label: String,
    pub data_dir: String,
    pub max_retry: f64,
    pub timeout_secs: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            label: String::new(),
            data_dir: "/tmp".to_string(),
            max_retry: 3.0,
            timeout_secs: 30.0,
        }
    }
}

impl FieldSchema for DemoConfig {
    fn catalog() -> Vec<FieldDescriptor> {
        fields![
            FieldDescriptor::logical("ENABLED", true),
            FieldDescriptor::text("LABEL", "").allow_empty(),
            FieldDescriptor::text("DATA_DIR", "/tmp").require_existence(),
            FieldDescriptor::number("MAX_RETRY", 3.0)
                .limits(0.0, 10.0)
                .valid_set([0.0, 5.0, 10.0]),
            FieldDescriptor::number("TIMEOUT_SECS", 30.0).limits(1.0, 600.0),
        ]
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "ENABLED" => Some(self.enabled.into()),
            "LABEL" => Some(self.label.clone().into()),
            "DATA_DIR" => Some(self.data_dir.clone().into()),
            "MAX_RETRY" => Some(self.max_retry.into()),
            "TIMEOUT_SECS" => Some(self.timeout_secs.into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        let mismatch = |expected: &str| Error::KindMismatch {
            name: name.to_string(),
            expected: expected.to_string(),
            actual: value.kind().as_str().to_string(),
        };

        match name {
            "ENABLED" => self.enabled = value.as_logical().ok_or_else(|| mismatch("logical"))?,
            "LABEL" => {
                self.label = value
                    .as_text()
                    .ok_or_else(|| mismatch("text"))?
                    .to_string();
            }
            "DATA_DIR" => {
                self.data_dir = value
                    .as_text()
                    .ok_or_else(|| mismatch("text"))?
                    .to_string();
            }
            "MAX_RETRY" => self.max_retry = value.as_number().ok_or_else(|| mismatch("number"))?,
            "TIMEOUT_SECS" => {
                self.timeout_secs = value.as_number().ok_or_else(|| mismatch("number"))?;
            }
            _ => return Err(Error::FieldNotFound(name.to_string())),
        }
        Ok(())
    }
}
