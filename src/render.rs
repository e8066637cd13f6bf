use crate::{
    models::MemeRecord,
    views::{LoadState, detail::DetailView, listing::ListingView},
    vote::UserVote,
};
use chrono::{Local, TimeZone};
use std::fmt::{self, Write};

pub const LOADING: &str = "Loading...";
pub const NOT_FOUND: &str = "Meme not found";
pub const EMPTY_FEED: &str = "No memes yet";
/// Shown next to memes created in this session.
pub const LOCAL_MARKER: &str = "(local)";

/// Local date-time for an epoch-millisecond timestamp.
pub fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "unknown time".to_string(),
    }
}

fn vote_markers(vote: UserVote) -> (&'static str, &'static str) {
    match vote {
        UserVote::Up => ("[▲]", " ▼ "),
        UserVote::Down => (" ▲ ", "[▼]"),
        UserVote::None => (" ▲ ", " ▼ "),
    }
}

fn write_card(
    out: &mut impl Write,
    position: Option<usize>,
    meme: &MemeRecord,
) -> fmt::Result {
    let (up, down) = vote_markers(meme.user_vote);
    if let Some(position) = position {
        write!(out, "{:>2}. ", position)?;
    }
    write!(out, "{}  by {}", meme.title, meme.author)?;
    if meme.id.is_local() {
        write!(out, "  {}", LOCAL_MARKER)?;
    }
    writeln!(out)?;
    writeln!(out, "    image: {}", meme.image_url)?;
    if !meme.trend.is_empty() {
        writeln!(out, "    trend: {}", meme.trend)?;
    }
    writeln!(
        out,
        "    {} {}  {} {}  comments {}  posted {}",
        up,
        meme.upvotes,
        down,
        meme.downvotes,
        meme.comment_count,
        format_timestamp(meme.timestamp)
    )
}

struct ListingScreen<'a>(&'a ListingView);

impl fmt::Display for ListingScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        write!(f, "Meme Generator")?;
        if let Some(countdown) = view.countdown() {
            write!(f, "    Next batch in: {}", countdown)?;
        }
        writeln!(f)?;

        match view.state() {
            LoadState::Loading => f.write_str(LOADING),
            LoadState::NotFound => f.write_str(NOT_FOUND),
            LoadState::Ready if view.memes().is_empty() => f.write_str(EMPTY_FEED),
            LoadState::Ready => {
                for (i, meme) in view.memes().iter().enumerate() {
                    write_card(f, Some(i + 1), meme)?;
                }
                Ok(())
            }
        }
    }
}

struct DetailScreen<'a>(&'a DetailView);

impl fmt::Display for DetailScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let meme = match (view.state(), view.meme()) {
            (LoadState::Ready, Some(meme)) => meme,
            (LoadState::Loading, _) => return f.write_str(LOADING),
            _ => return f.write_str(NOT_FOUND),
        };

        write_card(f, None, meme)?;
        writeln!(f, "\nComments ({})", view.comments().len())?;
        for comment in view.comments() {
            writeln!(f, "  {} · {}", comment.author, comment.timestamp)?;
            writeln!(f, "    {}", comment.content)?;
        }
        Ok(())
    }
}

pub fn render_listing(view: &ListingView) -> String {
    ListingScreen(view).to_string()
}

pub fn render_detail(view: &DetailView) -> String {
    DetailScreen(view).to_string()
}
