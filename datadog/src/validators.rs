//! Validators specific to Datadog attributes

use regex::Regex;
use std::sync::LazyLock;
use tfplug::{NumberRangeValidator, StringPatternValidator};

/// `local@domain.tld`: exactly one `@`, no whitespace, and a dot in the domain
/// with characters on both sides.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.][^@\s]*\.[^@\s]*[^@\s.]$").expect("email pattern compiles")
});

pub fn basic_email() -> StringPatternValidator {
    StringPatternValidator::new(EMAIL_PATTERN.clone(), "a valid email address")
}

/// Whole seconds, 0 meaning no timeout
pub fn timeout_seconds() -> NumberRangeValidator {
    NumberRangeValidator::at_least(0.0).integer()
}
