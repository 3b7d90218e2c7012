//! Core engine for quip - routing, pages, and error boundaries.
//!
//! This crate contains the App state machine without TUI dependencies. The
//! front-end drives it once per frame (`tick`) and draws whatever `view`
//! returns.

mod boundary;
mod layout;
mod pages;

use std::sync::Arc;
use std::time::Instant;

pub use boundary::{BoundaryState, ErrorBoundary, FailureKind, RenderFailure};
pub use layout::SectionLayout;
pub use pages::{Control, JOKES_TITLE, NOT_FOUND_TITLE, PageView, ViewBody};
pub use quip_config::QuipConfig;
pub use quip_jokes::{JokeConfig, JokeError, JokeFetcher};
pub use quip_types::{Route, RouteError, Section, UiOptions};

use pages::{FetcherSlot, Page, PagePoll};

// ============================================================================
// Input mode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Editing the address prompt.
    Navigate,
}

// ============================================================================
// Location
// ============================================================================

/// Result of matching a path against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    Found(Route),
    NotFound(String),
}

impl Location {
    fn resolve(path: &str) -> Self {
        match Route::parse(path) {
            Ok(route) => Location::Found(route),
            Err(RouteError::NotFound { path }) => Location::NotFound(path),
            Err(RouteError::EmptyPostId(_)) => Location::NotFound(path.trim().to_string()),
        }
    }

    fn path(&self) -> String {
        match self {
            Location::Found(route) => route.path(),
            Location::NotFound(path) => path.clone(),
        }
    }
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    title: String,
    ui_options: UiOptions,
    /// Holds the configuration error when `[jokes]` did not resolve.
    fetcher: FetcherSlot,
    /// Visited paths; the last entry is the current page.
    history: Vec<String>,
    page: Page,
    root_boundary: ErrorBoundary,
    posts_boundary: ErrorBoundary,
    /// Address prompt contents while in `InputMode::Navigate`.
    address: Option<String>,
    status: Option<String>,
    should_quit: bool,
    tick: usize,
}

impl App {
    /// Build the app and render the initial route.
    ///
    /// `initial_path` wins over `app.start_route`; both fall back to `/`.
    /// An unusable `[jokes]` section does not stop the app: the error is
    /// raised to the root boundary whenever `/jokes` renders.
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn new(config: &QuipConfig, initial_path: Option<&str>) -> Self {
        let fetcher = JokeFetcher::new(&config.jokes()).map(Arc::new);

        let location =
            Location::resolve(initial_path.or(config.start_route()).unwrap_or("/"));
        let page = render_page(&location, &fetcher);

        match &fetcher {
            Ok(fetcher) => {
                tracing::info!(path = %location.path(), endpoint = fetcher.endpoint(), "App started");
            }
            Err(err) => {
                tracing::warn!(
                    path = %location.path(),
                    code = ?err.code,
                    "App started with invalid [jokes] configuration: {err}"
                );
            }
        }

        Self {
            title: config.title().to_string(),
            ui_options: UiOptions {
                high_contrast: config.high_contrast(),
            },
            fetcher,
            history: vec![location.path()],
            page,
            root_boundary: ErrorBoundary::new(Section::Root),
            posts_boundary: ErrorBoundary::new(Section::Posts),
            address: None,
            status: None,
            should_quit: false,
            tick: 0,
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Go to `path`. Navigating to the current path re-renders it in place.
    pub fn navigate(&mut self, path: &str) {
        let location = Location::resolve(path);
        let target = location.path();
        tracing::debug!(from = %self.path(), to = %target, "Navigate");

        if target != self.path() {
            self.history.push(target);
        }
        self.clear_status();
        self.render(&location);
    }

    /// Return to the previous page. Returns false when there is none.
    pub fn back(&mut self) -> bool {
        if self.history.len() < 2 {
            self.set_status("No previous page");
            return false;
        }
        self.history.pop();
        let location = Location::resolve(self.path());
        tracing::debug!(to = %self.path(), "Back");
        self.clear_status();
        self.render(&location);
        true
    }

    /// Re-render the current route from scratch.
    pub fn reload(&mut self) {
        let location = Location::resolve(self.path());
        self.render(&location);
    }

    /// Drop cached data, then reload.
    pub fn revalidate(&mut self) {
        if let Ok(fetcher) = &self.fetcher {
            fetcher.invalidate();
        }
        self.set_status("Cache cleared");
        self.reload();
    }

    fn render(&mut self, location: &Location) {
        self.root_boundary.reset();
        self.posts_boundary.reset();
        self.page = render_page(location, &self.fetcher);
    }

    // ------------------------------------------------------------------
    // Page actions
    // ------------------------------------------------------------------

    /// Increment the counter on the home page. `None` on other pages or while
    /// a boundary is showing its fallback.
    pub fn increment(&mut self) -> Option<u64> {
        if self.failed_boundary().is_some() {
            return None;
        }
        match &mut self.page {
            Page::Counter(page) => Some(page.increment()),
            _ => None,
        }
    }

    /// Activate the control of the current view, if it has one.
    pub fn activate(&mut self) -> Option<Control> {
        let control = self.view().body.control()?;
        match control {
            Control::IncreaseMe => {
                self.increment();
            }
            Control::TryAgain => {
                self.try_again();
            }
        }
        Some(control)
    }

    /// Reset the failed boundary and re-render the subtree it replaced.
    /// Returns false when nothing had failed.
    pub fn try_again(&mut self) -> bool {
        let Some(section) = self.failed_boundary() else {
            return false;
        };
        self.boundary_mut(section).reset();
        let location = Location::resolve(self.path());
        self.page = render_page(&location, &self.fetcher);
        true
    }

    // ------------------------------------------------------------------
    // Frame driving
    // ------------------------------------------------------------------

    /// Advance one frame: poll page work and route failures to boundaries.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        match self.page.poll() {
            PagePoll::Idle | PagePoll::Pending => {}
            PagePoll::Ready => {
                tracing::debug!(path = %self.path(), "Page ready");
            }
            PagePoll::Failed(failure) => {
                let section = self.page.section();
                self.boundary_mut(section).catch(failure);
            }
        }
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.page.is_loading()
    }

    // ------------------------------------------------------------------
    // Boundaries
    // ------------------------------------------------------------------

    /// Innermost boundary enclosing pages of `section`.
    #[must_use]
    pub fn boundary(&self, section: Section) -> &ErrorBoundary {
        match section {
            Section::Root => &self.root_boundary,
            Section::Posts => &self.posts_boundary,
        }
    }

    fn boundary_mut(&mut self, section: Section) -> &mut ErrorBoundary {
        match section {
            Section::Root => &mut self.root_boundary,
            Section::Posts => &mut self.posts_boundary,
        }
    }

    /// Outermost failed boundary, if any.
    fn failed_boundary(&self) -> Option<Section> {
        [Section::Root, Section::Posts]
            .into_iter()
            .find(|&section| self.boundary(section).is_failed())
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    #[must_use]
    pub fn view(&self) -> PageView {
        self.view_at(Instant::now())
    }

    #[must_use]
    pub fn view_at(&self, now: Instant) -> PageView {
        let section = self.page.section();
        let layout = SectionLayout::for_section(section);

        // The root boundary sits outside every layout, so its fallback
        // replaces the section chrome too.
        let (heading, body) = match self.failed_boundary() {
            Some(Section::Root) => (None, ViewBody::Failed),
            Some(Section::Posts) => (layout.map(|l| l.heading), ViewBody::Failed),
            None => (layout.map(|l| l.heading), self.page.body(now)),
        };

        PageView {
            path: self.path().to_string(),
            title: self.title(),
            heading,
            body,
        }
    }

    /// Current path as shown in the address bar.
    #[must_use]
    pub fn path(&self) -> &str {
        self.history.last().map_or("/", String::as_str)
    }

    /// Title of the current page, or the app title when it declares none.
    #[must_use]
    pub fn title(&self) -> String {
        self.page.metadata().resolve_title(&self.title).to_string()
    }

    #[must_use]
    pub fn app_title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // ------------------------------------------------------------------
    // Address prompt
    // ------------------------------------------------------------------

    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        if self.address.is_some() {
            InputMode::Navigate
        } else {
            InputMode::Normal
        }
    }

    /// Open the address prompt, prefilled with the current path.
    pub fn enter_navigate_mode(&mut self) {
        self.address = Some(self.path().to_string());
    }

    #[must_use]
    pub fn address_text(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn address_push(&mut self, c: char) {
        if let Some(address) = &mut self.address {
            address.push(c);
        }
    }

    pub fn address_backspace(&mut self) {
        if let Some(address) = &mut self.address {
            address.pop();
        }
    }

    pub fn address_clear(&mut self) {
        if let Some(address) = &mut self.address {
            address.clear();
        }
    }

    pub fn address_cancel(&mut self) {
        self.address = None;
    }

    /// Navigate to the typed path and close the prompt.
    pub fn address_submit(&mut self) {
        if let Some(address) = self.address.take() {
            self.navigate(&address);
        }
    }

    // ------------------------------------------------------------------
    // Status / lifecycle
    // ------------------------------------------------------------------

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

fn render_page(location: &Location, fetcher: &FetcherSlot) -> Page {
    match location {
        Location::Found(route) => Page::render(route, fetcher),
        Location::NotFound(path) => Page::NotFound { path: path.clone() },
    }
}
