// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity Server: record exercise sessions and search them.
//!
//! This crate provides an HTML form service that estimates calories burned
//! for an activity, stores the activity in a document store, and answers
//! single-field searches over stored activities.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::ActivityStore;
use services::form::BodyLimits;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Arc<dyn ActivityStore>,
}

impl AppState {
    /// Body limits for every form post.
    pub fn body_limits(&self) -> BodyLimits {
        BodyLimits {
            max_bytes: self.config.max_body_bytes,
            idle_timeout: self.config.body_idle_timeout,
        }
    }
}
