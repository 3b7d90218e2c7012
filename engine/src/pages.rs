//! Pages and the views they render.
//!
//! A page is created when its route is rendered and dropped when the app
//! navigates away, taking any page-local state with it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::FutureExt;
use tokio::task::JoinHandle;

use quip_jokes::{JokeError, JokeFetcher, JokeOutput};
use quip_types::{Counter, Metadata, PostId, Route, Section};

use crate::boundary::RenderFailure;

pub const JOKES_TITLE: &str = "Best Jokes";
pub const NOT_FOUND_TITLE: &str = "404: This page could not be found.";

// ============================================================================
// Views
// ============================================================================

/// Interactive control rendered by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    IncreaseMe,
    TryAgain,
}

impl Control {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Control::IncreaseMe => "Increase Me",
            Control::TryAgain => "Try again",
        }
    }
}

/// Page content, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    Counter { count: u64 },
    Loading,
    Joke {
        text: String,
        cached: bool,
        fresh_for: Option<Duration>,
    },
    Post { id: String },
    /// Boundary fallback.
    Failed,
    NotFound { path: String },
}

impl ViewBody {
    #[must_use]
    pub fn control(&self) -> Option<Control> {
        match self {
            ViewBody::Counter { .. } => Some(Control::IncreaseMe),
            ViewBody::Failed => Some(Control::TryAgain),
            _ => None,
        }
    }
}

/// Everything the front-end needs to draw the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub path: String,
    pub title: String,
    /// Section layout heading wrapping the body.
    pub heading: Option<&'static str>,
    pub body: ViewBody,
}

// ============================================================================
// Pages
// ============================================================================

#[derive(Debug, Default)]
pub(crate) struct CounterPage {
    counter: Counter,
}

impl CounterPage {
    pub fn increment(&mut self) -> u64 {
        self.counter.increment()
    }

    pub fn count(&self) -> u64 {
        self.counter.value()
    }
}

type FetchHandle = JoinHandle<Result<JokeOutput, JokeError>>;

/// Fetcher built from `[jokes]`, or the error that configuration produced.
pub(crate) type FetcherSlot = Result<Arc<JokeFetcher>, JokeError>;

#[derive(Debug)]
enum JokesState {
    Loading(FetchHandle),
    Ready(JokeOutput),
    /// Failure already handed to a boundary.
    Failed,
}

/// Outcome of polling a page's pending work.
#[derive(Debug)]
pub(crate) enum PagePoll {
    /// Nothing in flight.
    Idle,
    Pending,
    Ready,
    Failed(RenderFailure),
}

#[derive(Debug)]
pub(crate) struct JokesPage {
    state: JokesState,
}

impl JokesPage {
    /// Start resolving a joke. Must be called inside a tokio runtime.
    pub fn load(fetcher: &FetcherSlot) -> Self {
        let handle = match fetcher {
            Ok(fetcher) => {
                let fetcher = Arc::clone(fetcher);
                tokio::spawn(async move { fetcher.fetch().await })
            }
            // A config error fails the page like any other fetch error.
            Err(err) => {
                let err = err.clone();
                tokio::spawn(async move { Err(err) })
            }
        };
        Self {
            state: JokesState::Loading(handle),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, JokesState::Loading(_))
    }

    pub fn poll(&mut self) -> PagePoll {
        let JokesState::Loading(handle) = &mut self.state else {
            return PagePoll::Idle;
        };
        if !handle.is_finished() {
            return PagePoll::Pending;
        }
        let Some(result) = handle.now_or_never() else {
            return PagePoll::Pending;
        };

        match result {
            Ok(Ok(output)) => {
                self.state = JokesState::Ready(output);
                PagePoll::Ready
            }
            Ok(Err(err)) => {
                self.state = JokesState::Failed;
                PagePoll::Failed(err.into())
            }
            Err(join_err) => {
                self.state = JokesState::Failed;
                PagePoll::Failed(join_err.into())
            }
        }
    }

    fn body(&self, now: Instant) -> ViewBody {
        match &self.state {
            JokesState::Loading(_) => ViewBody::Loading,
            JokesState::Ready(output) => ViewBody::Joke {
                text: output.joke.joke.clone(),
                cached: output.is_cache_hit(),
                fresh_for: output.fresh_for(now),
            },
            JokesState::Failed => ViewBody::Failed,
        }
    }
}

impl Drop for JokesPage {
    fn drop(&mut self) {
        if let JokesState::Loading(handle) = &self.state {
            handle.abort();
        }
    }
}

#[derive(Debug)]
pub(crate) struct PostPage {
    id: PostId,
}

impl PostPage {
    pub fn new(id: PostId) -> Self {
        // No post lookup: the identifier is the whole page.
        Self { id }
    }

    /// Title derived from the route parameter.
    pub fn generate_metadata(&self) -> Metadata {
        Metadata::titled(self.id.as_str())
    }
}

#[derive(Debug)]
pub(crate) enum Page {
    Counter(CounterPage),
    Jokes(JokesPage),
    Post(PostPage),
    NotFound { path: String },
}

impl Page {
    /// Render `route`. Fetching pages start their request here.
    pub fn render(route: &Route, fetcher: &FetcherSlot) -> Self {
        match route {
            Route::Home => Page::Counter(CounterPage::default()),
            Route::Jokes => Page::Jokes(JokesPage::load(fetcher)),
            Route::Post(id) => Page::Post(PostPage::new(id.clone())),
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Page::Post(_) => Section::Posts,
            Page::Counter(_) | Page::Jokes(_) | Page::NotFound { .. } => Section::Root,
        }
    }

    pub fn metadata(&self) -> Metadata {
        match self {
            Page::Counter(_) => Metadata::default(),
            Page::Jokes(_) => Metadata::titled(JOKES_TITLE),
            Page::Post(page) => page.generate_metadata(),
            Page::NotFound { .. } => Metadata::titled(NOT_FOUND_TITLE),
        }
    }

    pub fn poll(&mut self) -> PagePoll {
        match self {
            Page::Jokes(page) => page.poll(),
            _ => PagePoll::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Page::Jokes(page) if page.is_loading())
    }

    pub fn body(&self, now: Instant) -> ViewBody {
        match self {
            Page::Counter(page) => ViewBody::Counter {
                count: page.count(),
            },
            Page::Jokes(page) => page.body(now),
            Page::Post(page) => ViewBody::Post {
                id: page.id.to_string(),
            },
            Page::NotFound { path } => ViewBody::NotFound { path: path.clone() },
        }
    }
}
