use thiserror::Error;

/// Message shown for every failure that happens below the JSON layer.
pub const CONNECTION_FAILED_MESSAGE: &str = "An error occurred while connecting to the server.";

#[derive(Error, Debug)]
pub enum CheckError {
    /// Caught before any network call.
    #[error("{0}")]
    Validation(String),

    /// Connection failure, timeout, or a body that is not the expected JSON.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a structured `error` field.
    #[error("{0}")]
    Server(String),
}

impl CheckError {
    pub fn no_file_selected() -> Self {
        CheckError::Validation("no file selected".to_string())
    }

    /// Text placed in the error panel. Transport details stay in the logs.
    pub fn display_message(&self) -> &str {
        match self {
            CheckError::Validation(msg) | CheckError::Server(msg) => msg,
            CheckError::Transport(_) => CONNECTION_FAILED_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for CheckError {
    fn from(err: reqwest::Error) -> Self {
        CheckError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
