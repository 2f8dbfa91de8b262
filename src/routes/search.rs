// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Search form: single-field equality lookups over stored activities.

use crate::db::DocumentStream;
use crate::error::Result;
use crate::services::form;
use crate::services::query::{build_filter, FindQuery};
use crate::services::render::{render_not_found, render_search_page};
use crate::AppState;
use axum::{
    body::Body,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

/// Fields the search form must supply, all non-blank.
pub const SEARCH_FIELDS: [&str; 2] = ["prop", "value"];

/// Search routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/search", get(search_form).post(search_activities))
}

/// The search form with no report.
async fn empty_search_page() -> String {
    // Without a search there are no rows, so rendering can't stop early.
    render_search_page::<DocumentStream<'static>>(None)
        .await
        .unwrap_or_else(|partial| partial.page)
}

/// Empty search form (GET).
async fn search_form() -> Html<String> {
    Html(empty_search_page().await)
}

/// Handle a submitted search form (POST).
///
/// A report that stops at a bad row is still sent as 200: the rows already
/// rendered are valid results and the page ends with the failure message.
async fn search_activities(State(state): State<Arc<AppState>>, body: Body) -> Result<Response> {
    let raw = form::read_body(body, state.body_limits()).await?;
    tracing::debug!(body = %raw, "Search form received");

    let fields = form::decode(&raw);
    let (Some(prop), Some(value), None) = (
        fields.get("prop"),
        fields.get("value"),
        fields.first_problem(&SEARCH_FIELDS),
    ) else {
        tracing::info!("Search rejected: missing or blank field");
        return Ok(Html(empty_search_page().await).into_response());
    };

    let query = FindQuery::for_search(build_filter(prop, value));
    tracing::info!(field = %query.filter.field, value = %query.filter.value, "Searching activities");

    let rows = match state.db.find(&query).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "Search failed");
            return Ok((StatusCode::NOT_FOUND, Html(render_not_found(&e.to_string()))).into_response());
        }
    };

    match render_search_page(Some((&query.filter, rows))).await {
        Ok(page) => Ok(Html(page).into_response()),
        Err(partial) => {
            // The partial report already carries the failure message.
            tracing::warn!(error = %partial.source, "Search report stopped early");
            Ok(Html(partial.page).into_response())
        }
    }
}
