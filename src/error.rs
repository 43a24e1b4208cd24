use crate::format::DateError;
use nba_api::client::ApiError;
use thiserror::Error;

/// Errors that end a command early. Expected absences (unknown player, no
/// games) are answered with a text line instead and never become a `BotError`.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Date(#[from] DateError),

    // Configuration errors
    #[error("could not read {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
