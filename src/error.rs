//! Error
//!
//! This module provides the errors raised by the weather client and server
//! with [`thiserror`]
//!
use std::io;
use thiserror::Error;

/// Result use the [`WeatherError`] as error.
pub type Result<T> = std::result::Result<T, WeatherError>;

/// WeatherError covers every failure that leaves the protocol layer.
///
/// A request the server refuses is not an error: it travels back as a
/// [`crate::protocol::Status`] inside a successfully delivered response.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Malformed or missing command-line input
    #[error("invalid argument: {0}")]
    Argument(String),

    /// Resolution, socket setup, connect or accept failure
    #[error("{context}: {source}")]
    Connection {
        /// What was being attempted
        context: String,
        /// The underlying OS error
        #[source]
        source: io::Error,
    },

    /// Short transfer, peer disconnect or I/O failure mid-message
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),
}

impl WeatherError {
    /// Wrap an I/O error raised while setting up a connection.
    pub fn connection(context: impl Into<String>, source: io::Error) -> Self {
        WeatherError::Connection {
            context: context.into(),
            source,
        }
    }
}
