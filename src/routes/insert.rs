// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Insert form: record an activity and report its calories.

use crate::error::Result;
use crate::models::{ActivityDocument, ActivityRecord};
use crate::services::calories;
use crate::services::form::{self, FormFields};
use crate::services::render::render_insert_page;
use crate::AppState;
use axum::{body::Body, extract::State, response::Html, routing::get, Router};
use std::sync::Arc;

/// Fields the insert form must supply, all non-blank.
pub const INSERT_FIELDS: [&str; 5] = ["activity", "weight", "distance", "time", "user"];

pub const ALL_FIELDS_REQUIRED: &str = "Error! All Fields must have Data";
pub const INVALID_DATA: &str = "ERROR! Please enter appropriate data";

/// Insert routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/insert", get(insert_form).post(insert_activity))
}

/// Empty insert form (GET).
async fn insert_form() -> Html<String> {
    Html(render_insert_page(None))
}

/// Handle a submitted insert form (POST).
///
/// Incomplete forms and bad data both answer with the form and a generic
/// message; only body-level failures produce an error page.
async fn insert_activity(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Result<Html<String>> {
    let raw = form::read_body(body, state.body_limits()).await?;
    tracing::debug!(body = %raw, "Insert form received");

    let fields = form::decode(&raw);
    if let Some(field) = fields.first_problem(&INSERT_FIELDS) {
        tracing::info!(field, "Insert rejected: missing or blank field");
        return Ok(Html(render_insert_page(Some(ALL_FIELDS_REQUIRED))));
    }

    match store_activity(&state, &fields).await {
        Ok(burned) => {
            let figure = calories::format_calories(burned);
            Ok(Html(render_insert_page(Some(figure.as_str()))))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Insert failed");
            Ok(Html(render_insert_page(Some(INVALID_DATA))))
        }
    }
}

/// Calculate, map and insert as one unit. Nothing is stored if any step fails.
async fn store_activity(state: &AppState, fields: &FormFields) -> Result<f64> {
    let record = ActivityRecord::parse(
        fields.require("activity")?,
        fields.require("weight")?,
        fields.require("distance")?,
        fields.require("time")?,
    )?;
    let burned = calories::calories(&record);

    let doc = ActivityDocument::new(&record, fields.require("user")?);
    state.db.insert_one(&doc).await?;

    tracing::info!(
        user = %doc.user,
        kind = %record.kind,
        calories = burned,
        "Activity stored"
    );
    Ok(burned)
}
