// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - form handling, calculation, queries and rendering.

pub mod calories;
pub mod form;
pub mod query;
pub mod render;

pub use calories::calculate;
pub use form::{decode, FormFields};
pub use query::{build_filter, QueryFilter};
pub use render::PartialRender;
