// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for calculation and storage.

use crate::error::InvalidActivityError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of supported exercise types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Running,
    Walking,
    Swimming,
}

impl ActivityKind {
    /// All kinds, in the order the insert form offers them.
    pub const ALL: [ActivityKind; 3] = [Self::Running, Self::Walking, Self::Swimming];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Walking => "Walking",
            Self::Swimming => "Swimming",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = InvalidActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InvalidActivityError::UnknownKind(s.to_string()))
    }
}

/// One validated exercise: kind plus positive measurements.
///
/// Weight is in pounds, distance in miles, time in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityRecord {
    pub kind: ActivityKind,
    pub weight: f64,
    pub distance: f64,
    pub time: f64,
}

impl ActivityRecord {
    /// Build a record, rejecting unknown kinds and non-positive measurements.
    pub fn new(
        kind: &str,
        weight: f64,
        distance: f64,
        time: f64,
    ) -> Result<Self, InvalidActivityError> {
        Ok(Self {
            kind: kind.parse()?,
            weight: positive("weight", weight)?,
            distance: positive("distance", distance)?,
            time: positive("time", time)?,
        })
    }

    /// Build a record from raw form values.
    pub fn parse(
        kind: &str,
        weight: &str,
        distance: &str,
        time: &str,
    ) -> Result<Self, InvalidActivityError> {
        Self::new(
            kind,
            parse_measurement("weight", weight)?,
            parse_measurement("distance", distance)?,
            parse_measurement("time", time)?,
        )
    }
}

fn parse_measurement(field: &'static str, raw: &str) -> Result<f64, InvalidActivityError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidActivityError::Missing(field));
    }
    trimmed
        .parse()
        .map_err(|_| InvalidActivityError::NotANumber {
            field,
            value: raw.to_string(),
        })
}

fn positive(field: &'static str, value: f64) -> Result<f64, InvalidActivityError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidActivityError::NotPositive { field, value })
    }
}

/// Nested `activity` object of a stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityType {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Stored activity document in the `activities` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDocument {
    pub activity: ActivityType,
    /// Pounds
    pub weight: f64,
    /// Miles
    pub distance: f64,
    /// Minutes
    pub time: f64,
    /// Submitting user's name
    pub user: String,
}

impl ActivityDocument {
    pub fn new(record: &ActivityRecord, user: &str) -> Self {
        Self {
            activity: ActivityType {
                kind: record.kind.as_str().to_string(),
            },
            weight: record.weight,
            distance: record.distance,
            time: record.time,
            user: user.to_string(),
        }
    }

    /// Re-validate a stored document into a record.
    pub fn to_record(&self) -> Result<ActivityRecord, InvalidActivityError> {
        ActivityRecord::new(&self.activity.kind, self.weight, self.distance, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_is_exact() {
        assert_eq!("Running".parse::<ActivityKind>(), Ok(ActivityKind::Running));
        assert_eq!("Swimming".parse::<ActivityKind>(), Ok(ActivityKind::Swimming));
        assert_eq!(
            "running".parse::<ActivityKind>(),
            Err(InvalidActivityError::UnknownKind("running".to_string()))
        );
        assert!("Cycling".parse::<ActivityKind>().is_err());
    }

    #[test]
    fn test_record_parse_trims_values() {
        let record = ActivityRecord::parse("Walking", " 150 ", "2.5", "40").unwrap();
        assert_eq!(record.kind, ActivityKind::Walking);
        assert_eq!(record.weight, 150.0);
        assert_eq!(record.distance, 2.5);
        assert_eq!(record.time, 40.0);
    }

    #[test]
    fn test_record_rejects_bad_measurements() {
        assert_eq!(
            ActivityRecord::parse("Running", "", "3", "30"),
            Err(InvalidActivityError::Missing("weight"))
        );
        assert!(matches!(
            ActivityRecord::parse("Running", "150", "three", "30"),
            Err(InvalidActivityError::NotANumber { field: "distance", .. })
        ));
        assert!(matches!(
            ActivityRecord::parse("Running", "150", "3", "-30"),
            Err(InvalidActivityError::NotPositive { field: "time", .. })
        ));
        assert!(ActivityRecord::parse("Running", "0", "3", "30").is_err());
        assert!(ActivityRecord::parse("Running", "NaN", "3", "30").is_err());
        assert!(ActivityRecord::parse("Running", "inf", "3", "30").is_err());
    }

    #[test]
    fn test_document_shape() {
        let record = ActivityRecord::parse("Running", "150", "3", "30").unwrap();
        let doc = ActivityDocument::new(&record, "Sam");

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "activity": { "type": "Running" },
                "weight": 150.0,
                "distance": 3.0,
                "time": 30.0,
                "user": "Sam",
            })
        );
        assert_eq!(doc.to_record().unwrap(), record);
    }
}
