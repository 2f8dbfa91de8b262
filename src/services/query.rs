// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-field equality filters for activity searches.

use std::fmt;

/// Properties whose values are compared as text; every other property is numeric.
pub const TEXT_PROPERTIES: [&str; 2] = ["user", "activity.type"];

/// Properties the search form offers.
pub const SEARCHABLE_PROPERTIES: [&str; 5] = ["user", "activity.type", "weight", "distance", "time"];

/// Typed right-hand side of an equality filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    /// May be NaN when the raw value didn't parse; a NaN filter matches nothing.
    Number(f64),
}

impl FilterValue {
    /// Whether this value can never equal a stored value.
    pub fn matches_nothing(&self) -> bool {
        matches!(self, FilterValue::Number(n) if n.is_nan())
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            FilterValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// `{ field: value }` equality condition against a (possibly dotted) field path.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFilter {
    pub field: String,
    pub value: FilterValue,
}

/// Sort direction for `find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Everything the store needs to run one search.
#[derive(Debug, Clone, PartialEq)]
pub struct FindQuery {
    pub filter: QueryFilter,
    /// Top-level fields to return; internal ids are never included.
    pub projection: Vec<&'static str>,
    pub sort: Option<(&'static str, SortDirection)>,
}

impl FindQuery {
    /// The search page query: activity fields only, longest distance first.
    pub fn for_search(filter: QueryFilter) -> Self {
        Self {
            filter,
            projection: vec!["activity", "distance", "user", "time", "weight"],
            sort: Some(("distance", SortDirection::Descending)),
        }
    }
}

/// Build an equality filter, coercing the value by property name.
///
/// Numeric properties never reject input: a value that doesn't parse becomes
/// NaN and the search simply finds nothing.
pub fn build_filter(property: &str, raw_value: &str) -> QueryFilter {
    let value = if TEXT_PROPERTIES.contains(&property) {
        FilterValue::Text(raw_value.to_string())
    } else {
        FilterValue::Number(coerce_number(raw_value))
    };

    QueryFilter {
        field: property.to_string(),
        value,
    }
}

/// Lenient numeric coercion with the usual browser-side number rules:
/// surrounding whitespace is ignored, an empty string is zero, `0x`/`0o`/`0b`
/// prefixes select a radix and `Infinity` is accepted by name.
fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&trimmed[2..], radix).unwrap_or(f64::NAN);
    }

    // `str::parse` also takes "inf" and "nan", which are not numbers here.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Unsigned integer digits in the given radix, without overflow.
fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0, |acc: f64, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}
