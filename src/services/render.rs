// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML pages: insert and search forms, search reports, error pages.
//!
//! Search reports are built from a lazy row stream. If a row can't be
//! rendered the report stops there; the caller gets the partial page, with
//! the failure message appended, together with the error.

use crate::error::AppError;
use crate::models::{ActivityDocument, ActivityKind};
use crate::services::calories;
use crate::services::query::{QueryFilter, SEARCHABLE_PROPERTIES};
use axum::http::StatusCode;
use futures_util::{Stream, StreamExt};
use html_escape::encode_text;

const PAGE_HEAD: &str = "<html><head><title>The Activity Server</title></head><body>";
const PAGE_TAIL: &str = "</body></html>";

/// A search report that stopped early.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct PartialRender {
    /// Everything rendered before the failure, plus the failure message.
    pub page: String,
    pub source: AppError,
}

/// Landing page linking both forms.
pub fn render_index_page() -> String {
    format!(
        "{PAGE_HEAD}<br><br><a href=\"/insert\">home/insert</a>&emsp;&emsp;\
         <a href=\"/search\">search Page</a>{PAGE_TAIL}"
    )
}

/// Insert form, with an optional status block (calorie figure or message).
pub fn render_insert_page(status: Option<&str>) -> String {
    let mut page = String::from(PAGE_HEAD);
    page.push_str(
        "<form method=\"post\">\
         <h1>Fill out your Activity</h1>\
         User Name <input name=\"user\"><br>\
         Activity Name <select name=\"activity\">",
    );
    for kind in ActivityKind::ALL {
        page.push_str(&format!("<option>{}</option>", kind));
    }
    page.push_str(
        "</select><br>\
         Weight (in pounds) <input name=\"weight\"><br>\
         Distance (in miles) <input name=\"distance\"><br>\
         Time (in minutes) <input name=\"time\"><br>\
         <input type=\"submit\" value=\"Insert!\">\
         <input type=\"reset\" value=\"Clear\">\
         </form>",
    );

    if let Some(status) = status {
        page.push_str(&format!(
            "<div id=\"calories\"><h3> Calories Burned: {}</h3></div>",
            encode_text(status)
        ));
    }

    page.push_str("<br><br><a href=\"/search\">Search</a>");
    page.push_str(PAGE_TAIL);
    page
}

fn search_form() -> String {
    let mut form = String::from(
        "<form method=\"post\">\
         <h1>Search for an Activity</h1>\
         Property <select name=\"prop\">",
    );
    for property in SEARCHABLE_PROPERTIES {
        form.push_str(&format!("<option>{}</option>", property));
    }
    form.push_str(
        "</select>  <input name=\"value\">\
         <input type=\"submit\" value=\"Search!\">\
         <input type=\"reset\" value=\"Clear\">\
         </form>",
    );
    form
}

/// One numbered report line; calories are recomputed from the stored fields.
fn render_row(ordinal: usize, row: &ActivityDocument) -> Result<String, AppError> {
    let record = row.to_record()?;
    let burned = calories::calories(&record);
    Ok(format!(
        "Activity {} {}: {}, Distance: {} | {} Calories Burned <br>",
        ordinal,
        encode_text(&row.user),
        record.kind,
        row.distance,
        calories::format_calories(burned)
    ))
}

/// Search form, followed by a report of `rows` when a search was run.
///
/// Rows are consumed in the order the stream yields them.
pub async fn render_search_page<S>(
    search: Option<(&QueryFilter, S)>,
) -> Result<String, PartialRender>
where
    S: Stream<Item = Result<ActivityDocument, AppError>> + Unpin,
{
    let mut page = String::from(PAGE_HEAD);
    page.push_str(&search_form());

    if let Some((filter, mut rows)) = search {
        page.push_str(&format!(
            "<h2>Activities for {}: {}</h2>",
            encode_text(&filter.field),
            encode_text(&filter.value.to_string())
        ));

        let mut count = 0;
        while let Some(row) = rows.next().await {
            count += 1;
            match row.and_then(|row| render_row(count, &row)) {
                Ok(line) => page.push_str(&line),
                Err(source) => {
                    page.push_str(&encode_text(&source.to_string()));
                    return Err(PartialRender { page, source });
                }
            }
        }
    }

    page.push_str("<br><br><a href=\"/insert\">home/insert</a>");
    page.push_str(PAGE_TAIL);
    Ok(page)
}

/// Page for a search that could not be run.
pub fn render_not_found(detail: &str) -> String {
    format!(
        "<html><body><h1> ERROR 404. Page NOT FOUND</h1><br>{}<br></body></html>",
        encode_text(detail)
    )
}

/// Generic error page: `ERROR <code>. <detail>`.
pub fn render_error_page(status: StatusCode, detail: &str) -> String {
    format!(
        "<html><body><h1> ERROR {}. {}</h1><br><br></body></html>",
        status.as_u16(),
        encode_text(detail)
    )
}
