//! Validation abstraction for documents and block data.
//!
//! A [`Validator`] inspects a JSON value and returns a [`Validation`] report.
//! The report can be consumed leniently ([`Validation::is_valid`],
//! [`Validation::errors`]) or strictly ([`Validation::strict`]), which turns a
//! failing report into a [`SchemaError`].
//!
//! The bundled validators check data by deserializing it into typed structs
//! and then applying semantic rules with [`validate_with`]. Any other engine
//! can be plugged in by implementing [`Validator`].

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Schema violation reported by strict validation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SchemaError {
    message: String,
}

impl SchemaError {
    /// Create an error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The violation message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of validating a value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Validation {
    errors: Vec<String>,
}

impl Validation {
    /// A passing report.
    pub fn new() -> Self {
        Self::default()
    }

    /// A report with a single error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    /// Record an error.
    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record an error unless `condition` holds.
    pub fn ensure(&mut self, condition: bool, message: impl FnOnce() -> String) {
        if !condition {
            self.errors.push(message());
        }
    }

    /// Prefix every message, e.g. with the block type.
    pub fn prefixed(self, prefix: &str) -> Self {
        Self {
            errors: self
                .errors
                .into_iter()
                .map(|e| format!("{prefix}: {e}"))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// Strict mode: a failing report becomes a single [`SchemaError`].
    ///
    /// Multiple messages are joined with `"; "`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the report contains any error.
    pub fn strict(self) -> Result<(), SchemaError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::new(self.errors.join("; ")))
        }
    }
}

/// Checks a JSON value against some schema.
pub trait Validator: Send + Sync {
    /// Validate `data`, collecting every violation.
    fn validate(&self, data: &Value) -> Validation;
}

/// Deserialize `data` into `T`, then apply `rules` to the typed value.
///
/// Deserialization failures are reported as a single error carrying the
/// serde message; `rules` only runs for well-typed data.
pub fn validate_with<T, F>(data: &Value, rules: F) -> Validation
where
    T: DeserializeOwned,
    F: FnOnce(&T, &mut Validation),
{
    match T::deserialize(data) {
        Ok(value) => {
            let mut report = Validation::new();
            rules(&value, &mut report);
            report
        }
        Err(e) => Validation::failed(e.to_string()),
    }
}

/// Validator that only checks that data deserializes into `T`.
pub struct TypedValidator<T> {
    _schema: PhantomData<fn() -> T>,
}

impl<T> TypedValidator<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _schema: PhantomData,
        }
    }
}

impl<T> Default for TypedValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TypedValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedValidator")
            .field("schema", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> Validator for TypedValidator<T> {
    fn validate(&self, data: &Value) -> Validation {
        validate_with::<T, _>(data, |_, _| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Point {
        x: i64,
        y: i64,
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = Validation::new();
        assert!(report.is_valid());
        assert!(report.strict().is_ok());
    }

    #[test]
    fn test_strict_joins_messages() {
        let mut report = Validation::failed("first");
        report.push("second");
        assert!(!report.is_valid());
        assert_eq!(report.strict().unwrap_err().message(), "first; second");
    }

    #[test]
    fn test_ensure() {
        let mut report = Validation::new();
        report.ensure(true, || "never".to_owned());
        report.ensure(false, || "broken".to_owned());
        assert_eq!(report.errors(), ["broken".to_owned()]);
    }

    #[test]
    fn test_prefixed() {
        let report = Validation::failed("text is required").prefixed("paragraph");
        assert_eq!(report.into_errors(), vec!["paragraph: text is required"]);
    }

    #[test]
    fn test_validate_with_runs_rules_on_typed_value() {
        let report = validate_with::<Point, _>(&json!({"x": 1, "y": -1}), |p, report| {
            report.ensure(p.x >= 0, || format!("x must be positive, got {}", p.x));
            report.ensure(p.y >= 0, || format!("y must be positive, got {}", p.y));
        });
        assert_eq!(report.errors(), ["y must be positive, got -1".to_owned()]);
    }

    #[test]
    fn test_validate_with_reports_type_errors() {
        let mut rules_ran = false;
        let report = validate_with::<Point, _>(&json!({"x": "one"}), |_, _| rules_ran = true);
        assert!(!rules_ran);
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors()[0].contains("invalid type"));
    }

    #[test]
    fn test_typed_validator() {
        let validator = TypedValidator::<Point>::new();
        assert!(validator.validate(&json!({"x": 1, "y": 2})).is_valid());
        let report = validator.validate(&json!({"x": 1}));
        assert!(report.errors()[0].contains("missing field `y`"));
    }
}
