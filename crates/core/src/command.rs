use crate::error::{Error, Result};

const PROMPT: char = '$';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Up,
    Root,
    Dir(String),
}

impl Target {
    fn new(arg: &str) -> Self {
        match arg {
            ".." => Target::Up,
            "/" => Target::Root,
            name => Target::Dir(name.to_string()),
        }
    }
}

/// The only two commands a transcript may contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Cd(Target),
    Ls,
}

impl Command {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (word, arg) = match text.split_once(char::is_whitespace) {
            Some((word, arg)) => (word, arg.trim()),
            None => (text, ""),
        };
        match (word, arg) {
            ("cd", "") => None,
            ("cd", target) => Some(Command::Cd(Target::new(target))),
            ("ls", "") => Some(Command::Ls),
            _ => None,
        }
    }
}

/// One entry of `ls` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Dir(String),
    File { name: String, size: u64 },
}

impl Listing {
    fn parse(text: &str) -> Option<Self> {
        let (head, name) = text.trim().split_once(' ')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        if head == "dir" {
            return Some(Listing::Dir(name.to_string()));
        }
        let size = head.parse().ok()?;
        Some(Listing::File {
            name: name.to_string(),
            size,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Command(Command),
    Listing(Listing),
    Blank,
}

impl Line {
    /// Classifies one transcript line. `line` is only used for error reporting.
    pub fn parse(text: &str, line: usize) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Line::Blank);
        }
        if let Some(rest) = text.trim_start().strip_prefix(PROMPT) {
            return Command::parse(rest)
                .map(Line::Command)
                .ok_or_else(|| Error::MalformedCommand {
                    line,
                    text: text.to_string(),
                });
        }
        Listing::parse(text)
            .map(Line::Listing)
            .ok_or_else(|| Error::MalformedOutput {
                line,
                text: text.to_string(),
            })
    }
}
