//! Input checks for values typed by the user
//!
//! The store accepts any number; range limits live here, in front of it.

use crate::metric::Metric;
use crate::profile::UserProfile;
use crate::{Error, Result};

pub const MAX_AGE: i64 = 150;
pub const MAX_HEIGHT_INCHES: f64 = 120.0;

/// Parse an entry value for `metric` and check it lies in `(0, max]`
pub fn parse_entry_value(metric: Metric, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("please enter a number (e.g. 2.5), got '{}'", raw.trim())))?;
    check_entry_value(metric, value)?;
    Ok(value)
}

pub fn check_entry_value(metric: Metric, value: f64) -> Result<()> {
    let max = metric.max_value();
    if !value.is_finite() || value <= 0.0 || value > max {
        return Err(Error::InvalidInput(format!(
            "enter {} between 0 and {:.2}",
            metric.label().to_lowercase(),
            max
        )));
    }
    Ok(())
}

/// Blank means "not given"; otherwise a whole number in `0..=150`
pub fn parse_age(raw: &str) -> Result<Option<i64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let age: i64 = raw
        .parse()
        .map_err(|_| Error::InvalidInput("age must be a whole number".to_string()))?;
    if !(0..=MAX_AGE).contains(&age) {
        return Err(Error::InvalidInput(format!("enter an age between 0 and {MAX_AGE}")));
    }
    Ok(Some(age))
}

/// Blank means "not given"; otherwise inches in `(0, 120]`
pub fn parse_height_inches(raw: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let height: f64 = raw
        .parse()
        .map_err(|_| Error::InvalidInput("height must be a number (e.g. 68)".to_string()))?;
    if !height.is_finite() || height <= 0.0 || height > MAX_HEIGHT_INCHES {
        return Err(Error::InvalidInput(format!(
            "enter height in inches between 1 and {MAX_HEIGHT_INCHES}"
        )));
    }
    Ok(Some(height))
}

/// Raw profile form fields as typed
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub age: String,
    pub height_inches: String,
}

impl ProfileForm {
    /// Check every field and build the profile to save
    pub fn into_profile(self) -> Result<UserProfile> {
        Ok(UserProfile {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            gender: self.gender.trim().to_string(),
            age: parse_age(&self.age)?,
            height_inches: parse_height_inches(&self.height_inches)?,
        })
    }
}
