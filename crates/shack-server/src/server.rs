//! Router construction and the listen loop.

use std::path::PathBuf;

use axum::{handler::HandlerWithoutStateExt, http::Uri, response::Html, Router};
use tokio::{net::TcpListener, signal};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

use crate::{Page, ServerConfig, ServerError};

/// Build the router serving the site described by `config`.
///
/// Fails with [`ServerError::MissingBuildDir`] when the build directory does
/// not exist.
pub fn build_router(config: &ServerConfig) -> Result<Router, ServerError> {
    if !config.dist_dir.is_dir() {
        return Err(ServerError::MissingBuildDir(config.dist_dir.clone()));
    }

    let index = config.index_path();
    let spa = move |uri: Uri| {
        let index = index.clone();
        async move { index_document(index, uri).await }
    };

    let mut router = Router::new();

    let favicon = config.favicon_path();
    if favicon.is_file() {
        router = router.route_service("/favicon.ico", ServeFile::new(favicon));
    }

    let assets = ServeDir::new(&config.dist_dir).fallback(spa.into_service());

    Ok(router
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http()))
}

async fn index_document(index: PathBuf, uri: Uri) -> Result<Html<String>, ServerError> {
    let page = Page::resolve(uri.path());
    debug!(path = %uri.path(), page = %page, "serving index document");
    let body = tokio::fs::read_to_string(&index).await?;
    Ok(Html(body))
}

/// Serve the site until Ctrl+C or SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let router = build_router(&config)?;

    let listener = TcpListener::bind(&config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind.clone(),
            source,
        })?;

    let local = listener.local_addr()?;
    info!(
        addr = %local,
        dist = %config.dist_dir.display(),
        "serving Pizza Shack"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
