//! Metric types
//!
//! Three independently tracked measurements share one storage shape:
//! - `Weight`: body weight, `tbl_weight.weight`
//! - `Water`: water intake in ounces, `tbl_water.ounces`
//! - `Distance`: distance covered in miles, `tbl_distance.miles`

use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A tracked measurement type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Weight,
    Water,
    Distance,
}

impl Metric {
    /// Get the string representation of the metric
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::Water => "water",
            Metric::Distance => "distance",
        }
    }

    /// Table holding this metric's entries
    pub fn table(&self) -> &'static str {
        match self {
            Metric::Weight => "tbl_weight",
            Metric::Water => "tbl_water",
            Metric::Distance => "tbl_distance",
        }
    }

    /// Name of the value column in [`Metric::table`]
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::Water => "ounces",
            Metric::Distance => "miles",
        }
    }

    /// Human-readable unit label
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Weight => "lbs",
            Metric::Water => "oz",
            Metric::Distance => "mi",
        }
    }

    /// Heading used for the value column in tables and charts
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Weight => "Weight",
            Metric::Water => "Ounces",
            Metric::Distance => "Miles",
        }
    }

    /// Largest value the entry form accepts
    pub fn max_value(&self) -> f64 {
        match self {
            Metric::Weight => 1500.0,
            Metric::Water | Metric::Distance => 999.99,
        }
    }

    /// Get all metrics
    pub fn all() -> &'static [Metric] {
        &[Metric::Weight, Metric::Water, Metric::Distance]
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weight" | "w" => Ok(Metric::Weight),
            "water" | "ounces" | "oz" => Ok(Metric::Water),
            "distance" | "miles" | "mi" => Ok(Metric::Distance),
            _ => Err(Error::UnknownMetric(s.to_string())),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Round to two decimal places, ties to even.
///
/// Rounding works on the exact binary value, so `2.675` (stored as
/// 2.67499...) becomes `2.67` while an exact tie like `0.125` becomes `0.12`.
/// Scaling by 100 first would not do: `2.675 * 100.0` lands exactly on 267.5.
pub fn round2(value: f64) -> f64 {
    // `{:.2}` formats the exact expansion and breaks exact ties to even
    format!("{value:.2}").parse().unwrap_or(value)
}

/// One stored sample, including its row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub created_at: NaiveDateTime,
    pub value: f64,
}

/// One sample as used for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub created_at: NaiveDateTime,
    pub value: f64,
}

impl From<Entry> for HistoryPoint {
    fn from(entry: Entry) -> Self {
        Self {
            created_at: entry.created_at,
            value: entry.value,
        }
    }
}
