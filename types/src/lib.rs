//! Core domain types for quip.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

#![allow(clippy::missing_errors_doc)]

mod route;
pub use route::{PostId, Route, RouteError, Section};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Counter
// ============================================================================

/// Click counter owned by a single page instance.
///
/// Starts at zero and only ever moves up by one. Dropping the page drops the
/// value; nothing is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    value: u64,
}

impl Counter {
    #[must_use]
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Add exactly one and return the new value.
    pub fn increment(&mut self) -> u64 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }
}

// ============================================================================
// Page metadata
// ============================================================================

/// Metadata a page declares about itself.
///
/// Pages either declare a static title or derive one from their route
/// parameters. Pages that declare nothing inherit the application title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Metadata {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    /// Title to display, falling back to `default` when the page declared none.
    #[must_use]
    pub fn resolve_title<'a>(&'a self, default: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(default)
    }
}

// ============================================================================
// UI options
// ============================================================================

/// Rendering preferences resolved from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub high_contrast: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("post id must not be empty")]
pub struct EmptyPostIdError;
