//! Route table: the paths quip knows how to render.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::EmptyPostIdError;

/// Identifier captured from `/posts/{postId}`.
///
/// Kept verbatim: no decoding, no lookup. The router only produces non-empty
/// identifiers, and construction enforces the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostId(String);

impl PostId {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyPostIdError> {
        let value = value.into();
        if value.is_empty() {
            Err(EmptyPostIdError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PostId {
    type Error = EmptyPostIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostId> for String {
    fn from(value: PostId) -> Self {
        value.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no page matches {path}")]
    NotFound { path: String },
    #[error(transparent)]
    EmptyPostId(#[from] EmptyPostIdError),
}

/// Which section of the app a route belongs to.
///
/// Sections own the layout and the innermost error boundary around their pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Root,
    Posts,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/` - the counter page.
    Home,
    /// `/jokes`
    Jokes,
    /// `/posts/{postId}`
    Post(PostId),
}

impl Route {
    /// Match a path against the route table.
    ///
    /// Query strings and fragments are ignored, empty segments are collapsed,
    /// and the leading slash is optional. Dynamic segments match exactly one
    /// path segment.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let path = raw.trim().split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["jokes"] => Ok(Route::Jokes),
            ["posts", id] => Ok(Route::Post(PostId::new(*id)?)),
            _ => Err(RouteError::NotFound {
                path: normalize_path(&segments),
            }),
        }
    }

    /// Canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Jokes => "/jokes".to_string(),
            Route::Post(id) => format!("/posts/{id}"),
        }
    }

    #[must_use]
    pub fn section(&self) -> Section {
        match self {
            Route::Home | Route::Jokes => Section::Root,
            Route::Post(_) => Section::Posts,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn normalize_path(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}
