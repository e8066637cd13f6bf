use crate::vote::VoteDirection;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  show                 redraw the current screen
  up [N] / down [N]    vote on meme N in the feed, or on the open meme
  open N               open meme N from the feed
  new TITLE [| URL]    post a meme to the top of the feed
  comment TEXT         comment on the open meme
  back                 return to the feed
  go PATH              jump to / or /meme/ID
  refresh              reload the current screen
  help                 this text
  quit                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    /// `position` is 1-based in feed order; `None` targets the open meme.
    Vote { direction: VoteDirection, position: Option<usize> },
    Open(usize),
    Create { title: String, image_url: String },
    Comment(String),
    Back,
    /// Jump to a screen by path, e.g. `/meme/42`.
    Go(String),
    Refresh,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

impl Command {
    /// Parses one input line. Blank lines parse to `Show`.
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" | "show" | "list" => Ok(Command::Show),
            "up" => Ok(Command::Vote {
                direction: VoteDirection::Up,
                position: parse_optional_position(rest)?,
            }),
            "down" => Ok(Command::Vote {
                direction: VoteDirection::Down,
                position: parse_optional_position(rest)?,
            }),
            "open" => {
                let position =
                    parse_optional_position(rest)?.ok_or(ParseError::MissingArgument("open"))?;
                Ok(Command::Open(position))
            }
            "new" => {
                let (title, image_url) = match rest.split_once('|') {
                    Some((title, url)) => (title.trim(), url.trim()),
                    None => (rest, ""),
                };
                if title.is_empty() {
                    return Err(ParseError::MissingArgument("new"));
                }
                Ok(Command::Create { title: title.to_string(), image_url: image_url.to_string() })
            }
            // Blank comments are passed through; the view decides to ignore them.
            "comment" => Ok(Command::Comment(rest.to_string())),
            "back" => Ok(Command::Back),
            "go" if rest.is_empty() => Err(ParseError::MissingArgument("go")),
            "go" => Ok(Command::Go(rest.to_string())),
            "refresh" => Ok(Command::Refresh),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn parse_optional_position(arg: &str) -> Result<Option<usize>, ParseError> {
    if arg.is_empty() {
        return Ok(None);
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ParseError::InvalidPosition(arg.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_votes_with_and_without_position() {
        assert_eq!(
            Command::parse("up 3"),
            Ok(Command::Vote { direction: VoteDirection::Up, position: Some(3) })
        );
        assert_eq!(
            Command::parse("  DOWN "),
            Ok(Command::Vote { direction: VoteDirection::Down, position: None })
        );
        assert_eq!(Command::parse("up 0"), Err(ParseError::InvalidPosition("0".into())));
    }

    #[test]
    fn parses_new_with_optional_image() {
        assert_eq!(
            Command::parse("new Title A"),
            Ok(Command::Create { title: "Title A".into(), image_url: String::new() })
        );
        assert_eq!(
            Command::parse("new Cats | http://img/cat.png"),
            Ok(Command::Create { title: "Cats".into(), image_url: "http://img/cat.png".into() })
        );
        assert_eq!(Command::parse("new | x"), Err(ParseError::MissingArgument("new")));
    }

    #[test]
    fn comment_keeps_text_verbatim_after_the_keyword() {
        assert_eq!(Command::parse("comment so true"), Ok(Command::Comment("so true".into())));
        assert_eq!(Command::parse("comment"), Ok(Command::Comment(String::new())));
    }

    #[test]
    fn misc_commands() {
        assert_eq!(Command::parse(""), Ok(Command::Show));
        assert_eq!(Command::parse("open 2"), Ok(Command::Open(2)));
        assert_eq!(Command::parse("open"), Err(ParseError::MissingArgument("open")));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("go /meme/7"), Ok(Command::Go("/meme/7".into())));
        assert_eq!(Command::parse("go"), Err(ParseError::MissingArgument("go")));
        assert_eq!(Command::parse("dance"), Err(ParseError::Unknown("dance".into())));
    }
}
