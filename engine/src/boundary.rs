//! Error boundaries.
//!
//! A boundary sits around a subtree of views. When a page inside it fails the
//! boundary swaps the subtree for a fallback until it is reset:
//!
//! ```text
//! Normal --catch--> Failed --reset--> Normal
//! ```

use std::fmt;

use thiserror::Error;
use tokio::task::JoinError;

use quip_jokes::{ErrorCode, JokeError};
use quip_types::Section;

/// What went wrong while rendering a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The page's data fetch failed.
    Fetch(ErrorCode),
    /// The task rendering the page panicked.
    Panicked,
    /// The task rendering the page was cancelled before finishing.
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Fetch(code) => write!(f, "fetch:{}", code.as_str()),
            FailureKind::Panicked => f.write_str("panicked"),
            FailureKind::Cancelled => f.write_str("cancelled"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RenderFailure {
    pub kind: FailureKind,
    pub message: String,
    /// Whether trying again may succeed.
    pub retryable: bool,
}

impl From<JokeError> for RenderFailure {
    fn from(err: JokeError) -> Self {
        Self {
            kind: FailureKind::Fetch(err.code),
            message: err.message,
            retryable: err.retryable,
        }
    }
}

impl From<JoinError> for RenderFailure {
    fn from(err: JoinError) -> Self {
        let kind = if err.is_panic() {
            FailureKind::Panicked
        } else {
            FailureKind::Cancelled
        };
        Self {
            kind,
            message: format!("render task failed: {err}"),
            retryable: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum BoundaryState {
    #[default]
    Normal,
    Failed(RenderFailure),
}

#[derive(Debug)]
pub struct ErrorBoundary {
    section: Section,
    state: BoundaryState,
    caught: u32,
}

impl ErrorBoundary {
    #[must_use]
    pub fn new(section: Section) -> Self {
        Self {
            section,
            state: BoundaryState::Normal,
            caught: 0,
        }
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    #[must_use]
    pub fn failure(&self) -> Option<&RenderFailure> {
        match &self.state {
            BoundaryState::Normal => None,
            BoundaryState::Failed(failure) => Some(failure),
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.state, BoundaryState::Failed(_))
    }

    /// Number of failures caught over the boundary's lifetime.
    #[must_use]
    pub fn caught(&self) -> u32 {
        self.caught
    }

    /// Take over rendering for a failed descendant. The failure is logged on
    /// activation.
    pub fn catch(&mut self, failure: RenderFailure) {
        tracing::error!(
            section = ?self.section,
            kind = %failure.kind,
            retryable = failure.retryable,
            "{failure}"
        );
        self.caught = self.caught.saturating_add(1);
        self.state = BoundaryState::Failed(failure);
    }

    /// Return to normal rendering. Returns whether the boundary was failed.
    pub fn reset(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            BoundaryState::Failed(failure) => {
                tracing::info!(section = ?self.section, kind = %failure.kind, "Boundary reset");
                true
            }
            BoundaryState::Normal => false,
        }
    }
}
