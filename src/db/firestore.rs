// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper for the `activities` collection.

use crate::db::{collections, ActivityStore, DocumentStream};
use crate::error::AppError;
use crate::models::ActivityDocument;
use crate::services::query::{FilterValue, FindQuery, SortDirection};
use async_trait::async_trait;
use futures_util::{stream, StreamExt};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client for one database of a project.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str, database_id: &str) -> Result<Self, AppError> {
        let options = firestore::FirestoreDbOptions::new(project_id.to_string())
            .with_database_id(database_id.to_string());

        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id, options).await;
        }

        let client = firestore::FirestoreDb::with_options(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(
            project = project_id,
            database = database_id,
            "Connected to Firestore"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(
        project_id: &str,
        options: firestore::FirestoreDbOptions,
    ) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client.
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }
}

impl From<SortDirection> for firestore::FirestoreQueryDirection {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => firestore::FirestoreQueryDirection::Ascending,
            SortDirection::Descending => firestore::FirestoreQueryDirection::Descending,
        }
    }
}

#[async_trait]
impl ActivityStore for FirestoreDb {
    async fn insert_one(&self, doc: &ActivityDocument) -> Result<(), AppError> {
        let _: ActivityDocument = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::ACTIVITIES)
            .generate_document_id()
            .object(doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(user = %doc.user, kind = %doc.activity.kind, "Activity inserted");
        Ok(())
    }

    async fn find<'a>(&'a self, query: &FindQuery) -> Result<DocumentStream<'a>, AppError> {
        let client = self.get_client()?;

        // Firestore rejects equality against NaN; such a filter matches nothing anyway.
        if query.filter.value.matches_nothing() {
            return Ok(stream::empty().boxed());
        }

        let field = query.filter.field.clone();
        let value = query.filter.value.clone();

        let select = client
            .fluent()
            .select()
            .fields(query.projection.iter().copied())
            .from(collections::ACTIVITIES)
            .filter(move |q| match &value {
                FilterValue::Text(text) => q.field(field.as_str()).eq(text.clone()),
                FilterValue::Number(number) => q.field(field.as_str()).eq(*number),
            });

        let select = match query.sort {
            Some((sort_field, direction)) => {
                select.order_by([(sort_field, firestore::FirestoreQueryDirection::from(direction))])
            }
            None => select,
        };

        let rows = select
            .obj::<ActivityDocument>()
            .stream_query_with_errors()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows
            .map(|row| row.map_err(|e| AppError::Database(e.to_string())))
            .boxed())
    }
}
