//! Form types and their validation rules.
//!
//! Every form collects its errors per field into [`FormErrors`] instead of
//! stopping at the first failure, so the caller can show all of them at once.

pub mod contact;
pub mod product;
pub mod product_filter;
pub mod promotion;
pub mod registration;
pub mod validators;

pub use contact::*;
pub use product::*;
pub use product_filter::*;
pub use promotion::*;
pub use registration::*;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, msgs)| format!("{field}: {}", msgs.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

pub(crate) const REQUIRED: &str = "Acest câmp este obligatoriu.";

/// Trimmed value, `None` for missing or blank input.
pub(crate) fn non_blank(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub(crate) fn required<'a>(
    errors: &mut FormErrors,
    field: &str,
    raw: &'a Option<String>,
) -> Option<&'a str> {
    let value = non_blank(raw);
    if value.is_none() {
        errors.add(field, REQUIRED);
    }
    value
}

pub(crate) fn max_length(errors: &mut FormErrors, field: &str, value: &str, max: usize) -> bool {
    let len = value.chars().count();
    if len > max {
        errors.add(
            field,
            format!("Asigurați-vă că valoarea are cel mult {max} caractere (are {len})."),
        );
        return false;
    }
    true
}

/// Parses an optional numeric field, recording a message on failure.
pub(crate) fn parse_number<T: FromStr>(
    errors: &mut FormErrors,
    field: &str,
    raw: &Option<String>,
    message: &str,
) -> Option<T> {
    let value = non_blank(raw)?;
    match value.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            errors.add(field, message);
            None
        }
    }
}

pub(crate) fn parse_float(errors: &mut FormErrors, field: &str, raw: &Option<String>) -> Option<f64> {
    let v: f64 = parse_number(errors, field, raw, "Introduceți un număr.")?;
    if !v.is_finite() {
        errors.add(field, "Introduceți un număr.");
        return None;
    }
    Some(v)
}

pub(crate) fn parse_date(
    errors: &mut FormErrors,
    field: &str,
    raw: &Option<String>,
) -> Option<chrono::NaiveDate> {
    let value = non_blank(raw)?;
    match chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            errors.add(field, "Introduceți o dată validă.");
            None
        }
    }
}
