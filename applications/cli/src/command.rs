//! Line commands of the interactive loop

use crate::error::{CliError, Result};

pub const HELP: &str = "\
Commands:
  search [term]        filter sounds by name (no term clears the filter)
  play <name|#n>       play a sound, or stop it if it is playing
  stop                 stop playback
  refresh              fetch profile and sounds again
  login [redirect-url] open the login page, or finish login with the redirect URL
  logout               forget the session
  theme                switch between light and dark
  status               show the current sound and progress
  list                 show the sound grid
  help                 show this help
  quit                 exit";

/// Which sound a `play` command refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Exact display name
    Key(String),
    /// 1-based position in the visible grid
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Play(Target),
    Stop,
    Refresh,
    Login(Option<String>),
    Logout,
    Theme,
    Status,
    List,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "search" | "/" => Command::Search(rest.to_string()),
            "play" | "p" => Command::Play(parse_target(rest)?),
            "stop" | "s" => Command::Stop,
            "refresh" | "r" => Command::Refresh,
            "login" => Command::Login((!rest.is_empty()).then(|| rest.to_string())),
            "logout" => Command::Logout,
            "theme" => Command::Theme,
            "status" => Command::Status,
            "list" | "ls" => Command::List,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(CliError::InvalidCommand(format!(
                    "Unknown command '{}' (type `help`)",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

fn parse_target(rest: &str) -> Result<Target> {
    if rest.is_empty() {
        return Err(CliError::InvalidCommand(
            "Usage: play <name|#n>".to_string(),
        ));
    }

    match rest.strip_prefix('#') {
        Some(number) => match number.parse::<usize>() {
            Ok(index) if index > 0 => Ok(Target::Index(index)),
            _ => Err(CliError::InvalidCommand(format!(
                "'{}' is not a grid position",
                rest
            ))),
        },
        None => Ok(Target::Key(rest.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_search_keeps_inner_spaces() {
        assert_eq!(
            Command::parse("search  air horn ").unwrap(),
            Some(Command::Search("air horn".into()))
        );
        assert_eq!(
            Command::parse("search").unwrap(),
            Some(Command::Search(String::new()))
        );
    }

    #[test]
    fn test_play_targets() {
        assert_eq!(
            Command::parse("play Air Horn").unwrap(),
            Some(Command::Play(Target::Key("Air Horn".into())))
        );
        assert_eq!(
            Command::parse("p #2").unwrap(),
            Some(Command::Play(Target::Index(2)))
        );
        assert!(Command::parse("play #0").is_err());
        assert!(Command::parse("play #x").is_err());
        assert!(Command::parse("play").is_err());
    }

    #[test]
    fn test_login_with_and_without_redirect() {
        assert_eq!(Command::parse("login").unwrap(), Some(Command::Login(None)));
        assert_eq!(
            Command::parse("login http://localhost:3000/#access_token=abc").unwrap(),
            Some(Command::Login(Some(
                "http://localhost:3000/#access_token=abc".into()
            )))
        );
    }

    #[test]
    fn test_case_insensitive_command_word() {
        assert_eq!(Command::parse("QUIT").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("Stop").unwrap(), Some(Command::Stop));
    }

    #[test]
    fn test_unknown_command() {
        let err = Command::parse("dance").unwrap_err();
        assert!(err.to_string().contains("dance"));
    }
}
