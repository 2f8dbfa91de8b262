// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Search form tests over the in-memory store.

use axum::http::StatusCode;
use serde_json::json;

mod common;

async fn insert(app: &axum::Router, body: &str) {
    let (status, page) = common::post_form(app, "/insert", body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Calories Burned: "), "insert failed: {page}");
    assert!(!page.contains("ERROR"), "insert failed: {page}");
}

#[tokio::test]
async fn test_get_search_form() {
    let (app, _) = common::create_test_app();

    let (status, page) = common::get(&app, "/search").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<h1>Search for an Activity</h1>"));
    assert!(!page.contains("<h2>"));
}

#[tokio::test]
async fn test_insert_then_search_by_user() {
    let (app, _) = common::create_test_app();

    insert(&app, "activity=Running&weight=150&distance=3&time=30&user=Sam").await;
    insert(&app, "activity=Walking&weight=150&distance=5&time=90&user=Sam").await;
    insert(&app, "activity=Swimming&weight=150&distance=1&time=30&user=Sam").await;
    insert(&app, "activity=Running&weight=200&distance=10&time=80&user=Alex").await;

    let (status, page) = common::post_form(&app, "/search", "prop=user&value=Sam").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<h2>Activities for user: Sam</h2>"));
    assert!(page.contains("Activity 1 Sam: Walking, Distance: 5 | 225.0 Calories Burned"));
    assert!(page.contains("Activity 2 Sam: Running, Distance: 3 | 283.5 Calories Burned"));
    assert!(page.contains("Activity 3 Sam: Swimming, Distance: 1 | 204.1 Calories Burned"));
    assert!(!page.contains("Alex"));
    assert!(!page.contains("Activity 4"));
}

#[tokio::test]
async fn test_search_by_activity_type() {
    let (app, _) = common::create_test_app();

    insert(&app, "activity=Running&weight=150&distance=3&time=30&user=Sam").await;
    insert(&app, "activity=Walking&weight=150&distance=2&time=30&user=Alex").await;

    let (_, page) =
        common::post_form(&app, "/search", "prop=activity.type&value=Walking").await;

    assert!(page.contains("Activity 1 Alex: Walking"));
    assert!(!page.contains("Activity 2"));
}

#[tokio::test]
async fn test_search_by_numeric_property() {
    let (app, _) = common::create_test_app();

    insert(&app, "activity=Running&weight=150&distance=3&time=30&user=Sam").await;
    insert(&app, "activity=Walking&weight=160&distance=3&time=50&user=Alex").await;

    let (_, page) = common::post_form(&app, "/search", "prop=weight&value=160").await;
    assert!(page.contains("<h2>Activities for weight: 160</h2>"));
    assert!(page.contains("Activity 1 Alex: Walking"));
    assert!(!page.contains("Activity 2"));

    let (_, page) = common::post_form(&app, "/search", "prop=distance&value=3").await;
    assert!(page.contains("Activity 2"));
}

#[tokio::test]
async fn test_hex_number_matches_decimal_value() {
    let (app, _) = common::create_test_app();

    insert(&app, "activity=Running&weight=150&distance=16&time=90&user=Sam").await;

    let (_, page) = common::post_form(&app, "/search", "prop=distance&value=0x10").await;

    assert!(page.contains("<h2>Activities for distance: 16</h2>"));
    assert!(page.contains("Activity 1 Sam: Running, Distance: 16"));
}

#[tokio::test]
async fn test_unparsable_number_finds_nothing() {
    let (app, _) = common::create_test_app();

    insert(&app, "activity=Running&weight=150&distance=3&time=30&user=Sam").await;

    let (status, page) = common::post_form(&app, "/search", "prop=distance&value=far").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<h2>Activities for distance: NaN</h2>"));
    assert!(!page.contains("Activity 1"));
}

#[tokio::test]
async fn test_search_with_no_matches() {
    let (app, _) = common::create_test_app();

    let (status, page) = common::post_form(&app, "/search", "prop=user&value=Nobody").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<h2>Activities for user: Nobody</h2>"));
    assert!(!page.contains("Activity 1"));
}

#[tokio::test]
async fn test_incomplete_search_shows_empty_form() {
    let (app, _) = common::create_test_app();

    for body in ["prop=user&value=", "prop=user", "value=Sam", ""] {
        let (status, page) = common::post_form(&app, "/search", body).await;
        assert_eq!(status, StatusCode::OK);
        assert!(page.contains("<h1>Search for an Activity</h1>"));
        assert!(!page.contains("<h2>"), "body {body:?} gave a report");
    }
}

#[tokio::test]
async fn test_search_stops_at_invalid_stored_row() {
    let (app, db) = common::create_test_app();

    for (kind, distance) in [("Running", 5.0), ("Walking", 4.0), ("Cycling", 3.0), ("Running", 2.0)] {
        db.insert_raw(json!({
            "activity": { "type": kind },
            "weight": 150.0,
            "distance": distance,
            "time": 30.0,
            "user": "Sam",
        }))
        .await
        .unwrap();
    }

    let (status, page) = common::post_form(&app, "/search", "prop=user&value=Sam").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page.matches("Calories Burned <br>").count(), 2);
    assert!(page.contains("Activity 1 Sam: Running, Distance: 5"));
    assert!(page.contains("Activity 2 Sam: Walking, Distance: 4"));
    assert!(page.ends_with("Unknown activity type: Cycling"));
}

#[tokio::test]
async fn test_search_stops_at_malformed_stored_row() {
    let (app, db) = common::create_test_app();

    db.insert_raw(json!({
        "activity": { "type": "Running" },
        "weight": 150.0,
        "distance": 8.0,
        "time": 30.0,
        "user": "Sam",
    }))
    .await
    .unwrap();
    db.insert_raw(json!({
        "activity": { "type": "Running" },
        "weight": "one fifty",
        "distance": 6.0,
        "time": 30.0,
        "user": "Sam",
    }))
    .await
    .unwrap();

    let (status, page) = common::post_form(&app, "/search", "prop=user&value=Sam").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Activity 1 Sam: Running, Distance: 8"));
    assert!(!page.contains("Activity 2"));
    assert!(page.contains("Malformed activity document"));
}

#[tokio::test]
async fn test_search_storage_failure_is_not_found_page() {
    let app = common::create_offline_test_app();

    let (status, page) = common::post_form(&app, "/search", "prop=user&value=Sam").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(page.contains("ERROR 404. Page NOT FOUND"));
    assert!(page.contains("Database not connected (offline mode)"));
}
