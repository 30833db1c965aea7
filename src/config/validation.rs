//! Range checks shared by the section validators.
//!
//! Bounds are inclusive. NaN fails every check; infinities are compared
//! like any other value.

use crate::error::{ArlNetError, Result};
use std::path::Path;

pub fn ensure_positive_f64(field: &str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ArlNetError::NotPositive {
            field: field.to_string(),
            value,
        })
    }
}

pub fn ensure_non_negative(field: &str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ArlNetError::Negative {
            field: field.to_string(),
            value,
        })
    }
}

pub fn ensure_in_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ArlNetError::OutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        })
    }
}

pub fn ensure_unit_interval(field: &str, value: f64) -> Result<()> {
    ensure_in_range(field, value, 0.0, 1.0)
}

pub fn ensure_positive_count(field: &str, value: usize) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(ArlNetError::NotPositive {
            field: field.to_string(),
            value: 0.0,
        })
    }
}

/// Only the empty string counts as missing; whitespace is a value.
pub fn ensure_not_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        Err(ArlNetError::MissingValue {
            field: field.to_string(),
        })
    } else {
        Ok(())
    }
}

pub fn ensure_path_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ArlNetError::CredentialsNotFound {
            path: path.display().to_string(),
        })
    }
}
