//! Static asset server for the Pizza Shack site.
//!
//! The site is a pre-built single-page app. The server has no API: it serves
//! files out of the build directory, answers `/favicon.ico` explicitly, and
//! falls back to `index.html` for every other path so the client-side router
//! can render the page (or its not-found view).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use shack_server::ServerConfig;
//!
//! # async fn run() -> Result<(), shack_server::ServerError> {
//! let config = ServerConfig::new("dist/public").with_bind("127.0.0.1:5000");
//! shack_server::serve(config).await
//! # }
//! ```

mod config;
mod error;
mod routes;
mod server;

pub use config::*;
pub use error::*;
pub use routes::*;
pub use server::*;
