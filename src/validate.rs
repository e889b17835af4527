//! Field narrowing for untyped entry content.
//!
//! An entry file parses into a [`serde_yml::Value`]. Each function here takes
//! one field of that tree and either returns the strongly-typed value or a
//! [`FieldError`] naming both the field and the file, so an author can find
//! the mistake without reading Rust.
//!
//! | Field | Accepts | Normalization |
//! |-------|---------|---------------|
//! | strings | YAML string | trimmed |
//! | `size` | finite number, or a string holding one | parsed to `f64` |
//! | `category` | string in the allow-list (any case) | canonical spelling |
//! | `scala3AdoptionStatus` | null, blank, or allow-listed string | `None` when null/blank |
//! | `sources` | null, string, or list of strings | always a `Vec<String>` |

use crate::types::{AdoptionStatus, Category};
use serde_yml::Value;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FieldError {
    #[error("Field \"{field}\" in {file} must be a string")]
    NotAString { field: String, file: String },
    #[error("Field \"{field}\" in {file} must be a number")]
    NotANumber { field: String, file: String },
    #[error("Field \"{field}\" in {file} must be a list of strings")]
    NotAList { field: String, file: String },
    #[error("Invalid {field} \"{value}\" in {file}. Allowed values: {allowed}")]
    InvalidChoice {
        field: String,
        value: String,
        file: String,
        allowed: String,
    },
}

/// Require a string and trim it. `None` (missing key) is not a string.
pub fn validate_string(
    value: Option<&Value>,
    field: &str,
    file: &str,
) -> Result<String, FieldError> {
    raw_string(value, field, file).map(|s| s.trim().to_string())
}

fn raw_string<'a>(
    value: Option<&'a Value>,
    field: &str,
    file: &str,
) -> Result<&'a str, FieldError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        _ => Err(FieldError::NotAString {
            field: field.to_string(),
            file: file.to_string(),
        }),
    }
}

/// Accept a finite number, or a string that trims to one.
pub fn validate_number(
    value: Option<&Value>,
    field: &str,
    file: &str,
) -> Result<f64, FieldError> {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| FieldError::NotANumber {
            field: field.to_string(),
            file: file.to_string(),
        })
}

/// Resolve the required `category` field.
pub fn parse_category(value: Option<&Value>, file: &str) -> Result<Category, FieldError> {
    let raw = raw_string(value, "category", file)?;
    Category::lookup(raw.trim()).ok_or_else(|| FieldError::InvalidChoice {
        field: "category".to_string(),
        value: raw.to_string(),
        file: file.to_string(),
        allowed: allowed_list(Category::ALL.iter().map(|c| c.as_str())),
    })
}

/// Resolve the optional `scala3AdoptionStatus` field.
///
/// Null, a missing key, and a blank string all mean "unknown" and yield
/// `Ok(None)`.
pub fn parse_adoption_status(
    value: Option<&Value>,
    file: &str,
) -> Result<Option<AdoptionStatus>, FieldError> {
    match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        _ => {}
    }
    let raw = raw_string(value, "scala3AdoptionStatus", file)?;
    match AdoptionStatus::lookup(raw.trim()) {
        Some(status) => Ok(Some(status)),
        None => Err(FieldError::InvalidChoice {
            field: "scala3AdoptionStatus".to_string(),
            value: raw.to_string(),
            file: file.to_string(),
            allowed: allowed_list(AdoptionStatus::ALL.iter().map(|s| s.as_str())),
        }),
    }
}

/// Resolve `sources` into a list, wrapping a bare string.
pub fn parse_sources(value: Option<&Value>, file: &str) -> Result<Vec<String>, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| validate_string(Some(item), &format!("sources[{idx}]"), file))
            .collect(),
        Some(Value::String(_)) => Ok(vec![validate_string(value, "sources", file)?]),
        Some(_) => Err(FieldError::NotAList {
            field: "sources".to_string(),
            file: file.to_string(),
        }),
    }
}

fn allowed_list<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}
