// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! URL-encoded form bodies: buffering, decoding and completeness checks.

use crate::error::{AppError, Result};
use axum::body::Body;
use futures_util::StreamExt;
use std::collections::BTreeMap;
use std::time::Duration;

/// Limits applied while a request body is being accumulated.
#[derive(Debug, Clone, Copy)]
pub struct BodyLimits {
    pub max_bytes: usize,
    pub idle_timeout: Duration,
}

/// Accumulate a request body chunk by chunk into a buffer owned by this call.
///
/// Fails if the body grows past `max_bytes`, if the client goes quiet for
/// longer than `idle_timeout` between chunks, or if the body is not UTF-8.
pub async fn read_body(body: Body, limits: BodyLimits) -> Result<String> {
    let mut stream = body.into_data_stream();
    let mut buf: Vec<u8> = Vec::new();

    loop {
        let next = tokio::time::timeout(limits.idle_timeout, stream.next())
            .await
            .map_err(|_| AppError::RequestTimeout)?;

        let Some(chunk) = next else {
            break;
        };
        let chunk = chunk.map_err(|e| AppError::BadRequest(format!("Body read failed: {}", e)))?;

        if buf.len() + chunk.len() > limits.max_bytes {
            return Err(AppError::PayloadTooLarge(limits.max_bytes));
        }
        buf.extend_from_slice(&chunk);
    }

    String::from_utf8(buf).map_err(|_| AppError::BadRequest("Body is not valid UTF-8".to_string()))
}

/// Decoded key/value pairs from one form body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: BTreeMap<String, String>,
}

impl FormFields {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Like `get`, but an absent field is an error.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| AppError::Validation(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when no decoded field is blank and every `required` key is present.
    pub fn is_complete(&self, required: &[&str]) -> bool {
        self.first_problem(required).is_none()
    }

    /// Name of the first blank decoded field or absent required field.
    pub fn first_problem<'a>(&'a self, required: &[&'a str]) -> Option<&'a str> {
        self.fields
            .iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| key.as_str())
            .or_else(|| {
                required
                    .iter()
                    .copied()
                    .find(|key| !self.fields.contains_key(*key))
            })
    }
}

/// Decode an `application/x-www-form-urlencoded` body.
///
/// Repeated keys keep every value, joined with `,`.
pub fn decode(raw: &str) -> FormFields {
    let mut fields: BTreeMap<String, String> = BTreeMap::new();

    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key);
        let value = decode_component(value);

        fields
            .entry(key)
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    FormFields { fields }
}

/// `+` means space; malformed percent escapes pass through untouched.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
