use crate::types::{AttributePath, Diagnostic, Diagnostics};
use serde_json::Value;

/// Validator performs validation on configured attribute values
pub trait Validator: Send + Sync {
    /// Human-readable description
    fn description(&self) -> String;

    fn validate(&self, value: &Value, path: &AttributePath, diagnostics: &mut Diagnostics);
}

pub struct StringLengthValidator {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl StringLengthValidator {
    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

impl Validator for StringLengthValidator {
    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("length between {} and {}", min, max),
            (Some(min), None) => format!("length of at least {}", min),
            (None, Some(max)) => format!("length of at most {}", max),
            (None, None) => "any length".to_string(),
        }
    }

    fn validate(&self, value: &Value, path: &AttributePath, diagnostics: &mut Diagnostics) {
        let Some(s) = value.as_str() else {
            return;
        };
        if let Some(min) = self.min {
            if s.len() < min {
                diagnostics.push(
                    Diagnostic::error(
                        format!("{} must have minimum length of {}", path, min),
                        format!("Got length {}", s.len()),
                    )
                    .with_attribute(path.clone()),
                );
            }
        }
        if let Some(max) = self.max {
            if s.len() > max {
                diagnostics.push(
                    Diagnostic::error(
                        format!("{} must have maximum length of {}", path, max),
                        format!("Got length {}", s.len()),
                    )
                    .with_attribute(path.clone()),
                );
            }
        }
    }
}

pub struct StringInSliceValidator {
    pub values: Vec<String>,
    pub ignore_case: bool,
}

impl StringInSliceValidator {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            ignore_case: false,
        }
    }
}

impl Validator for StringInSliceValidator {
    fn description(&self) -> String {
        format!("one of {:?}", self.values)
    }

    fn validate(&self, value: &Value, path: &AttributePath, diagnostics: &mut Diagnostics) {
        let Some(s) = value.as_str() else {
            return;
        };
        let found = self.values.iter().any(|allowed| {
            if self.ignore_case {
                allowed.eq_ignore_ascii_case(s)
            } else {
                allowed == s
            }
        });
        if !found {
            diagnostics.push(
                Diagnostic::error(
                    format!("{} must be {}", path, self.description()),
                    format!("Got '{}'", s),
                )
                .with_attribute(path.clone()),
            );
        }
    }
}

pub struct StringPatternValidator {
    pub pattern: regex::Regex,
    pub description: String,
}

impl StringPatternValidator {
    pub fn new(pattern: regex::Regex, description: impl Into<String>) -> Self {
        Self {
            pattern,
            description: description.into(),
        }
    }
}

impl Validator for StringPatternValidator {
    fn description(&self) -> String {
        self.description.clone()
    }

    fn validate(&self, value: &Value, path: &AttributePath, diagnostics: &mut Diagnostics) {
        if let Some(s) = value.as_str() {
            if !self.pattern.is_match(s) {
                diagnostics.push(
                    Diagnostic::error(
                        format!("{} must be {}", path, self.description),
                        format!("Value '{}' does not match pattern", s),
                    )
                    .with_attribute(path.clone()),
                );
            }
        }
    }
}

pub struct NumberRangeValidator {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Reject values with a fractional part
    pub integer: bool,
}

impl NumberRangeValidator {
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
            integer: false,
        }
    }

    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }
}

impl Validator for NumberRangeValidator {
    fn description(&self) -> String {
        let kind = if self.integer { "whole number" } else { "number" };
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("{} between {} and {}", kind, min, max),
            (Some(min), None) => format!("{} of at least {}", kind, min),
            (None, Some(max)) => format!("{} of at most {}", kind, max),
            (None, None) => kind.to_string(),
        }
    }

    fn validate(&self, value: &Value, path: &AttributePath, diagnostics: &mut Diagnostics) {
        if value.is_null() {
            return;
        }
        let Some(n) = value.as_f64() else {
            diagnostics.push(
                Diagnostic::error(
                    format!("{} must be a number", path),
                    format!("Got {}", value),
                )
                .with_attribute(path.clone()),
            );
            return;
        };
        if self.integer && n.fract() != 0.0 {
            diagnostics.push(
                Diagnostic::error(
                    format!("{} must be a whole number", path),
                    format!("Got {}", n),
                )
                .with_attribute(path.clone()),
            );
        }
        if let Some(min) = self.min {
            if n < min {
                diagnostics.push(
                    Diagnostic::error(
                        format!("{} must be at least {}", path, min),
                        format!("Got {}", n),
                    )
                    .with_attribute(path.clone()),
                );
            }
        }
        if let Some(max) = self.max {
            if n > max {
                diagnostics.push(
                    Diagnostic::error(
                        format!("{} must be at most {}", path, max),
                        format!("Got {}", n),
                    )
                    .with_attribute(path.clone()),
                );
            }
        }
    }
}
