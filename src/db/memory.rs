// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process activity store.
//!
//! Keeps documents as JSON so rows are decoded on the way out, the same way
//! a remote store hands back whatever was written to it.

use crate::db::{ActivityStore, DocumentStream};
use crate::error::AppError;
use crate::models::ActivityDocument;
use crate::services::query::{FilterValue, FindQuery, QueryFilter, SortDirection};
use async_trait::async_trait;
use futures_util::{stream, StreamExt};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use tokio::sync::RwLock;

/// Internal document id field, never projected.
const ID_FIELD: &str = "_id";

/// In-memory store.
#[derive(Default)]
pub struct MemoryDb {
    docs: RwLock<Vec<Value>>,
    next_id: AtomicU64,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an arbitrary JSON document, bypassing the typed model.
    pub async fn insert_raw(&self, doc: Value) -> Result<(), AppError> {
        let Value::Object(mut fields) = doc else {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Document must be a JSON object"
            )));
        };
        let id = self.next_id.fetch_add(1, AtomicOrdering::Relaxed);
        fields.insert(ID_FIELD.to_string(), Value::from(id));
        self.docs.write().await.push(Value::Object(fields));
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ActivityStore for MemoryDb {
    async fn insert_one(&self, doc: &ActivityDocument) -> Result<(), AppError> {
        let value = serde_json::to_value(doc)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JSON error: {}", e)))?;
        self.insert_raw(value).await
    }

    async fn find<'a>(&'a self, query: &FindQuery) -> Result<DocumentStream<'a>, AppError> {
        let mut rows: Vec<Value> = self
            .docs
            .read()
            .await
            .iter()
            .filter(|doc| matches_filter(doc, &query.filter))
            .cloned()
            .collect();

        if let Some((field, direction)) = query.sort {
            rows.sort_by(|a, b| {
                let ord = compare_numbers(lookup(a, field), lookup(b, field));
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        let projection = query.projection.clone();
        let rows = rows.into_iter().map(move |doc| {
            serde_json::from_value::<ActivityDocument>(project(doc, &projection))
                .map_err(|e| AppError::Database(format!("Malformed activity document: {}", e)))
        });

        Ok(stream::iter(rows).boxed())
    }
}

/// Resolve a dotted field path such as `activity.type`.
fn lookup<'v>(doc: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(doc, |value, key| value.get(key))
}

fn matches_filter(doc: &Value, filter: &QueryFilter) -> bool {
    match (lookup(doc, &filter.field), &filter.value) {
        (Some(Value::String(stored)), FilterValue::Text(wanted)) => stored == wanted,
        (Some(Value::Number(stored)), FilterValue::Number(wanted)) => {
            stored.as_f64() == Some(*wanted)
        }
        _ => false,
    }
}

/// Numbers sort by value; anything else sorts below every number.
fn compare_numbers(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.and_then(Value::as_f64);
    let b = b.and_then(Value::as_f64);
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Keep only the projected top-level fields.
fn project(doc: Value, projection: &[&str]) -> Value {
    match doc {
        Value::Object(fields) => {
            let kept: Map<String, Value> = fields
                .into_iter()
                .filter(|(key, _)| projection.contains(&key.as_str()))
                .collect();
            Value::Object(kept)
        }
        other => other,
    }
}
