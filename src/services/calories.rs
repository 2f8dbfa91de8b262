// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calorie estimates per activity kind.
//!
//! Running and walking use the per-mile rule of thumb (calories scale with
//! body weight and distance); swimming uses a MET value over elapsed time.

use crate::error::InvalidActivityError;
use crate::models::{ActivityKind, ActivityRecord};

/// Calories per pound of body weight per mile.
const RUNNING_CAL_PER_LB_MILE: f64 = 0.63;
const WALKING_CAL_PER_LB_MILE: f64 = 0.30;

/// Metabolic equivalent for moderate lap swimming.
const SWIMMING_MET: f64 = 6.0;
const KG_PER_LB: f64 = 0.453_592;

/// Estimated calories burned for a validated record.
pub fn calories(record: &ActivityRecord) -> f64 {
    match record.kind {
        ActivityKind::Running => RUNNING_CAL_PER_LB_MILE * record.weight * record.distance,
        ActivityKind::Walking => WALKING_CAL_PER_LB_MILE * record.weight * record.distance,
        ActivityKind::Swimming => SWIMMING_MET * record.weight * KG_PER_LB * (record.time / 60.0),
    }
}

/// Validate the inputs and compute calories in one step.
pub fn calculate(
    kind: &str,
    weight: f64,
    distance: f64,
    time: f64,
) -> Result<f64, InvalidActivityError> {
    ActivityRecord::new(kind, weight, distance, time).map(|record| calories(&record))
}

/// Format a calorie figure for display.
pub fn format_calories(value: f64) -> String {
    format!("{:.1}", value)
}
