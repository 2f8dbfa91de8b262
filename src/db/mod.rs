// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: the activity store boundary and its backends.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use crate::models::ActivityDocument;
use crate::services::query::FindQuery;
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use std::sync::Arc;

/// Collection names as constants.
pub mod collections {
    pub const ACTIVITIES: &str = "activities";
}

/// Lazily produced search results. Each item may fail independently.
pub type DocumentStream<'a> = BoxStream<'a, Result<ActivityDocument, AppError>>;

/// Document store holding the `activities` collection.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Store one document. Each insert is independent; there is no batching.
    async fn insert_one(&self, doc: &ActivityDocument) -> Result<(), AppError>;

    /// Run an equality search with projection and sort, yielding rows lazily.
    async fn find<'a>(&'a self, query: &FindQuery) -> Result<DocumentStream<'a>, AppError>;
}

/// Open the configured store once at startup.
///
/// A Firestore connection failure is logged and the server keeps running in
/// offline mode, where every store operation fails.
pub async fn connect(config: &Config) -> Arc<dyn ActivityStore> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory activity store");
            Arc::new(MemoryDb::new())
        }
        StoreBackend::Firestore => {
            match FirestoreDb::new(&config.gcp_project_id, &config.database_name).await {
                Ok(db) => Arc::new(db),
                Err(e) => {
                    tracing::error!(error = %e, "Storage connection failed, continuing offline");
                    Arc::new(FirestoreDb::new_mock())
                }
            }
        }
    }
}
