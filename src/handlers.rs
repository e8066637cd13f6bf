use crate::{
    app::Screen,
    commands::{Command, HELP},
    routes::Route,
    views::{LoadState, detail::DetailView, listing::ListingView},
};

/// What the app should do after a command has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Redraw the current screen.
    Stay,
    /// Show a message; the screen is unchanged.
    Message(String),
    Navigate(Route),
    Reload,
    Quit,
}

pub fn handle(screen: &mut Screen, command: Command) -> Outcome {
    match command {
        Command::Show => Outcome::Stay,
        Command::Help => Outcome::Message(HELP.to_string()),
        Command::Quit => Outcome::Quit,
        Command::Refresh => Outcome::Reload,
        Command::Go(path) => match Route::parse(&path) {
            Some(route) => Outcome::Navigate(route),
            None => Outcome::Message(format!("Unknown path: {}", path)),
        },
        command => match screen {
            Screen::Listing(view) => handle_listing(view, command),
            Screen::Detail(view) => handle_detail(view, command),
        },
    }
}

fn handle_listing(view: &mut ListingView, command: Command) -> Outcome {
    match command {
        Command::Vote { direction, position: Some(position) } => {
            let Some(id) = view.id_at(position).cloned() else {
                return Outcome::Message(format!("No meme at position {}", position));
            };
            view.vote(&id, direction);
            Outcome::Stay
        }
        Command::Vote { position: None, .. } => {
            Outcome::Message("Pick a meme by position, e.g. 'up 2'".to_string())
        }
        Command::Open(position) => {
            match view.id_at(position).and_then(|id| view.navigate(id)) {
                Some(route) => Outcome::Navigate(route),
                None => Outcome::Message(format!("No meme at position {}", position)),
            }
        }
        Command::Create { title, image_url } => match view.state() {
            LoadState::Loading => Outcome::Message("The feed is still loading".to_string()),
            LoadState::NotFound => {
                Outcome::Message("The feed is unavailable; try 'refresh'".to_string())
            }
            LoadState::Ready => match view.create(&title, &image_url) {
                Some(_) => Outcome::Stay,
                None => Outcome::Message("A meme needs a title".to_string()),
            },
        },
        Command::Comment(_) => Outcome::Message("Open a meme to comment on it".to_string()),
        Command::Back => Outcome::Stay,
        Command::Show | Command::Help | Command::Quit | Command::Refresh | Command::Go(_) => {
            Outcome::Stay
        }
    }
}

fn handle_detail(view: &mut DetailView, command: Command) -> Outcome {
    match command {
        Command::Vote { direction, position: None } => {
            view.vote(direction);
            Outcome::Stay
        }
        Command::Vote { position: Some(_), .. } => {
            Outcome::Message("On a meme page, vote with plain 'up' or 'down'".to_string())
        }
        Command::Comment(text) => {
            // Blank text is silently ignored.
            view.add_comment(&text);
            Outcome::Stay
        }
        Command::Back => Outcome::Navigate(Route::Listing),
        Command::Open(_) | Command::Create { .. } => {
            Outcome::Message("Go back to the feed first".to_string())
        }
        Command::Show | Command::Help | Command::Quit | Command::Refresh | Command::Go(_) => {
            Outcome::Stay
        }
    }
}
