use crate::{
    commands::Command,
    config::Config,
    countdown::Countdown,
    domain::MemeRepository,
    handlers::{self, Outcome},
    render,
    routes::Route,
    views::{LoadState, detail::DetailView, listing::ListingView},
};
use std::sync::Arc;

/// The view currently on screen. Replacing it drops the old view, which
/// stops its countdown and discards any fetch still in flight.
#[derive(Debug)]
pub enum Screen {
    Listing(ListingView),
    Detail(DetailView),
}

/// Result of feeding one command to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue { message: Option<String> },
    Quit,
}

pub struct App {
    repo: Arc<dyn MemeRepository>,
    config: Config,
    screen: Screen,
}

impl App {
    /// Opens the feed. Needs a tokio runtime.
    pub fn new(repo: Arc<dyn MemeRepository>, config: Config) -> Self {
        let screen = Self::mount(&repo, &config, Route::Listing);
        Self { repo, config, screen }
    }

    fn mount(repo: &Arc<dyn MemeRepository>, config: &Config, route: Route) -> Screen {
        tracing::debug!(path = %route.path(), "Mounting screen");
        match route {
            Route::Listing => Screen::Listing(ListingView::mount(
                Arc::clone(repo),
                Countdown::new(config.countdown_start, config.countdown_reset),
                config.countdown_tick,
            )),
            Route::Detail(id) => Screen::Detail(DetailView::mount(Arc::clone(repo), id)),
        }
    }

    pub fn go(&mut self, route: Route) {
        self.screen = Self::mount(&self.repo, &self.config, route);
    }

    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::Listing(_) => Route::Listing,
            Screen::Detail(view) => Route::Detail(view.id().clone()),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn is_loading(&self) -> bool {
        let state = match &self.screen {
            Screen::Listing(view) => view.state(),
            Screen::Detail(view) => view.state(),
        };
        state == LoadState::Loading
    }

    /// Waits for the current screen's fetch to land.
    pub async fn settle(&mut self) {
        match &mut self.screen {
            Screen::Listing(view) => view.settle().await,
            Screen::Detail(view) => view.settle().await,
        }
    }

    pub fn apply(&mut self, command: Command) -> Step {
        match handlers::handle(&mut self.screen, command) {
            Outcome::Stay => Step::Continue { message: None },
            Outcome::Message(message) => Step::Continue { message: Some(message) },
            Outcome::Navigate(route) => {
                self.go(route);
                Step::Continue { message: None }
            }
            Outcome::Reload => {
                self.go(self.route());
                Step::Continue { message: None }
            }
            Outcome::Quit => Step::Quit,
        }
    }

    pub fn render(&self) -> String {
        match &self.screen {
            Screen::Listing(view) => render::render_listing(view),
            Screen::Detail(view) => render::render_detail(view),
        }
    }
}
