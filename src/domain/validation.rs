//! Shape validation for short paths and destination URLs.
//!
//! All functions here are pure: no I/O, no store access. Every rule for a
//! field is evaluated so callers get the full list of reasons, not only the
//! first one. `Ok(())` always means "valid".

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

use crate::domain::entities::ShortUrl;

/// Maximum number of characters in a short path.
pub const MAX_PATH_LENGTH: usize = 10;

/// Allowed path alphabet.
static PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]*$").unwrap());

/// A single reason a candidate value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailure {
    EmptyOrNull,
    TooLong,
    InvalidCharacters,
    MalformedUrl,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EmptyOrNull => write!(f, "Value cannot be null or empty"),
            Self::TooLong => write!(
                f,
                "Path cannot be longer than {} characters",
                MAX_PATH_LENGTH
            ),
            Self::InvalidCharacters => write!(
                f,
                "Path can only contain alphanumeric characters, underscores and dashes"
            ),
            Self::MalformedUrl => write!(f, "Destination has to be a valid absolute URL"),
        }
    }
}

/// The field of a [`ShortUrl`] a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Path,
    Destination,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// Validation failures grouped by field.
///
/// Only fields that failed are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, Vec<ValidationFailure>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates errors for a single field.
    pub fn for_field(field: Field, failures: Vec<ValidationFailure>) -> Self {
        let mut errors = Self::new();
        errors.add(field, failures);
        errors
    }

    /// Records failures for a field. Empty lists are ignored.
    pub fn add(&mut self, field: Field, failures: Vec<ValidationFailure>) {
        if failures.is_empty() {
            return;
        }
        self.0.entry(field).or_default().extend(failures);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failures recorded for `field`; empty when the field is valid.
    pub fn field(&self, field: Field) -> &[ValidationFailure] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &[ValidationFailure])> {
        self.0.iter().map(|(field, failures)| (*field, failures.as_slice()))
    }

    /// Human-readable reasons keyed by field name, suitable for JSON details.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .0
            .iter()
            .map(|(field, failures)| {
                let reasons = failures
                    .iter()
                    .map(|failure| serde_json::Value::String(failure.to_string()))
                    .collect();
                (field.to_string(), serde_json::Value::Array(reasons))
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (field, failures) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, join_reasons(failures))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Joins failure messages with commas.
pub fn join_reasons(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks that a destination is a non-empty, absolute URL with a host.
///
/// # Errors
///
/// - [`ValidationFailure::EmptyOrNull`] for `None` or `""`
/// - [`ValidationFailure::MalformedUrl`] for relative URLs, URLs without a
///   host, or candidates containing whitespace
///
/// # Examples
///
/// ```
/// use short_url::domain::validation::{validate_destination, ValidationFailure};
///
/// assert!(validate_destination("https://example.com").is_ok());
/// assert_eq!(
///     validate_destination("example.com"),
///     Err(vec![ValidationFailure::MalformedUrl])
/// );
/// assert_eq!(validate_destination(None), Err(vec![ValidationFailure::EmptyOrNull]));
/// ```
pub fn validate_destination<'a>(
    candidate: impl Into<Option<&'a str>>,
) -> Result<(), Vec<ValidationFailure>> {
    let destination = match candidate.into() {
        Some(d) if !d.is_empty() => d,
        _ => return Err(vec![ValidationFailure::EmptyOrNull]),
    };

    // The URL parser silently strips surrounding and embedded whitespace.
    if destination.chars().any(char::is_whitespace) {
        return Err(vec![ValidationFailure::MalformedUrl]);
    }

    let url = Url::parse(destination).map_err(|_| vec![ValidationFailure::MalformedUrl])?;

    if !url.host_str().is_some_and(|host| !host.is_empty()) {
        return Err(vec![ValidationFailure::MalformedUrl]);
    }

    // The parser also accepts `https:/host` and `https:host`, which clients
    // would resolve against the redirecting host.
    let has_authority = destination
        .split_once(':')
        .is_some_and(|(scheme, rest)| {
            scheme.eq_ignore_ascii_case(url.scheme()) && rest.starts_with("//")
        });
    if !has_authority {
        return Err(vec![ValidationFailure::MalformedUrl]);
    }

    Ok(())
}

/// Checks that a path is non-empty, at most [`MAX_PATH_LENGTH`] characters
/// and drawn from `[a-zA-Z0-9_-]`.
///
/// Length and alphabet are both checked, so a path can fail with
/// [`ValidationFailure::TooLong`] and [`ValidationFailure::InvalidCharacters`]
/// at once.
///
/// # Examples
///
/// ```
/// use short_url::domain::validation::{validate_path, ValidationFailure};
///
/// assert!(validate_path("go-1").is_ok());
/// assert_eq!(validate_path("this-is-too-long"), Err(vec![ValidationFailure::TooLong]));
/// assert_eq!(validate_path("a b"), Err(vec![ValidationFailure::InvalidCharacters]));
/// ```
pub fn validate_path<'a>(candidate: impl Into<Option<&'a str>>) -> Result<(), Vec<ValidationFailure>> {
    let path = match candidate.into() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(vec![ValidationFailure::EmptyOrNull]),
    };

    let mut failures = Vec::new();

    if path.chars().count() > MAX_PATH_LENGTH {
        failures.push(ValidationFailure::TooLong);
    }

    if !PATH_REGEX.is_match(path) {
        failures.push(ValidationFailure::InvalidCharacters);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

impl ShortUrl {
    /// Validates both fields, collecting failures per field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(failures) = validate_path(self.path.as_str()) {
            errors.add(Field::Path, failures);
        }
        if let Err(failures) = validate_destination(self.destination.as_str()) {
            errors.add(Field::Destination, failures);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_accepts_absolute_urls() {
        assert!(validate_destination("https://example.com").is_ok());
        assert!(validate_destination("http://example.com/path?q=1#frag").is_ok());
        assert!(validate_destination("https://golang.org").is_ok());
        assert!(validate_destination("ftp://files.example.com/a.txt").is_ok());
        assert!(validate_destination("http://localhost:8080").is_ok());
    }

    #[test]
    fn test_destination_empty_or_null() {
        assert_eq!(
            validate_destination(""),
            Err(vec![ValidationFailure::EmptyOrNull])
        );
        assert_eq!(
            validate_destination(None),
            Err(vec![ValidationFailure::EmptyOrNull])
        );
    }

    #[test]
    fn test_destination_rejects_relative() {
        assert_eq!(
            validate_destination("example.com"),
            Err(vec![ValidationFailure::MalformedUrl])
        );
        assert_eq!(
            validate_destination("/relative/path"),
            Err(vec![ValidationFailure::MalformedUrl])
        );
        assert_eq!(
            validate_destination("http:example.com"),
            Err(vec![ValidationFailure::MalformedUrl])
        );
        assert_eq!(
            validate_destination("https:/example.com"),
            Err(vec![ValidationFailure::MalformedUrl])
        );
        assert!(validate_destination("HTTPS://example.com/path").is_ok());
    }

    #[test]
    fn test_destination_requires_host() {
        assert!(validate_destination("mailto:someone@example.com").is_err());
        assert!(validate_destination("data:text/plain,hello").is_err());
    }

    #[test]
    fn test_destination_rejects_whitespace() {
        assert!(validate_destination(" https://example.com").is_err());
        assert!(validate_destination("https://example.com/a b").is_err());
    }

    #[test]
    fn test_path_accepts_valid_tokens() {
        assert!(validate_path("go-1").is_ok());
        assert!(validate_path("a").is_ok());
        assert!(validate_path("ABC_def-09").is_ok());
    }

    #[test]
    fn test_path_empty_or_null() {
        assert_eq!(validate_path(""), Err(vec![ValidationFailure::EmptyOrNull]));
        assert_eq!(validate_path(None), Err(vec![ValidationFailure::EmptyOrNull]));
    }

    #[test]
    fn test_path_length_boundary() {
        assert!(validate_path("abcdefghij").is_ok());
        assert_eq!(
            validate_path("abcdefghijk"),
            Err(vec![ValidationFailure::TooLong])
        );
        assert_eq!(
            validate_path("this-is-too-long"),
            Err(vec![ValidationFailure::TooLong])
        );
    }

    #[test]
    fn test_path_invalid_characters() {
        assert_eq!(
            validate_path("a b"),
            Err(vec![ValidationFailure::InvalidCharacters])
        );
        assert!(validate_path("a/b").is_err());
        assert!(validate_path("a.b").is_err());
        assert!(validate_path("ü").is_err());
    }

    #[test]
    fn test_path_reports_both_failures() {
        assert_eq!(
            validate_path("has spaces and is long"),
            Err(vec![
                ValidationFailure::TooLong,
                ValidationFailure::InvalidCharacters
            ])
        );
    }

    #[test]
    fn test_path_length_counts_characters() {
        // 10 multi-byte characters: invalid alphabet, but not too long.
        assert_eq!(
            validate_path("éééééééééé"),
            Err(vec![ValidationFailure::InvalidCharacters])
        );
    }

    #[test]
    fn test_short_url_validate_ok() {
        let short_url = ShortUrl::new("go", "https://golang.org");
        assert!(short_url.validate().is_ok());
    }

    #[test]
    fn test_short_url_validate_collects_per_field() {
        let short_url = ShortUrl::new("bad path!!!", "not-a-url");
        let errors = short_url.validate().unwrap_err();

        assert_eq!(
            errors.field(Field::Path),
            &[
                ValidationFailure::TooLong,
                ValidationFailure::InvalidCharacters
            ]
        );
        assert_eq!(
            errors.field(Field::Destination),
            &[ValidationFailure::MalformedUrl]
        );
    }

    #[test]
    fn test_short_url_validate_only_failing_fields_present() {
        let short_url = ShortUrl::new("ok", "");
        let errors = short_url.validate().unwrap_err();

        assert!(errors.field(Field::Path).is_empty());
        assert_eq!(errors.fields().count(), 1);
    }

    #[test]
    fn test_validation_errors_display_and_json() {
        let errors = ShortUrl::new("", "example.com").validate().unwrap_err();

        let text = errors.to_string();
        assert!(text.contains("path: Value cannot be null or empty"));
        assert!(text.contains("destination: Destination has to be a valid absolute URL"));

        let json = errors.to_json();
        assert_eq!(json["path"][0], "Value cannot be null or empty");
        assert_eq!(
            json["destination"][0],
            "Destination has to be a valid absolute URL"
        );
    }
}
