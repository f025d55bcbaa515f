use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("no parent directory to move into")]
    NoParent,
    #[error("no subdirectory named `{0}`")]
    NotFound(String),
}

/// Everything that can stop a transcript run. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line}: malformed command `{text}`")]
    MalformedCommand { line: usize, text: String },

    #[error("line {line}: malformed listing entry `{text}`")]
    MalformedOutput { line: usize, text: String },

    #[error("line {line}: cannot change directory")]
    Navigation {
        line: usize,
        #[source]
        source: NavigationError,
    },

    #[error("line {line}: listing entry `{text}` before any directory was entered")]
    NoCurrentDirectory { line: usize, text: String },

    #[error("no directory has a total size of at least {min_space}")]
    NoCandidate { min_space: u64 },

    #[error("failed to read transcript")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
