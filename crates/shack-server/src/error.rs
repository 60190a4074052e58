//! Error types for the static server.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors that can occur while starting or running the server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The client bundle has not been built.
    #[error("Could not find the build directory: {}, make sure to build the client first", .0.display())]
    MissingBuildDir(PathBuf),

    /// The bind address could not be used.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while serving.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
