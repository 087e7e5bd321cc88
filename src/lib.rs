pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;

use std::sync::Arc;

use anyhow::Context;
use axum::{middleware::from_fn, routing::get, Extension, Router};
use lambda_http::{run, Error};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::dispatch::RouteTable;
use crate::error::{AppError, DispatchError};
use crate::middleware::log_request;
use crate::routes::{cats, search};

pub fn build_routes() -> Result<RouteTable, DispatchError> {
    let mut table = RouteTable::new();
    cats::register(&mut table)?;
    Ok(table)
}

pub fn create_app(config: &Config) -> anyhow::Result<Router> {
    let table = Arc::new(build_routes().context("failed to register routes")?);

    info!(
        environment = %config.environment,
        routes = table.len(),
        "Route table built"
    );

    let mut router = Router::new();
    for path in table.paths() {
        router = router.route(&format!("/{path}"), get(search::handler));
    }

    Ok(router
        .fallback(search::handler)
        .layer(from_fn(log_request))
        .layer(Extension(table)))
}

pub async fn run_app(config: Config) -> Result<(), Error> {
    logging::init_logger(config.log_level);
    let app = create_app(&config)?;

    match config.bind_address.as_deref() {
        Some(address) => {
            let listener = TcpListener::bind(address).await.map_err(AppError::from)?;
            info!(address = %listener.local_addr()?, "Listening for connections");
            axum::serve(listener, app).await.map_err(AppError::from)?;
            Ok(())
        }
        None => run(app).await,
    }
}
