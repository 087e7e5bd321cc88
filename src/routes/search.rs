use std::collections::HashMap;
use std::sync::Arc;

use axum::{extract::Query, http::Uri, Extension, Json};
use tracing::debug;

use crate::dispatch::RouteTable;
use crate::error::AppError;
use crate::models::route::Reply;

/// Serves every mounted base path as well as the fallback; unknown paths
/// come back from the table as `NoMatchingRoute`.
pub async fn handler(
    Extension(table): Extension<Arc<RouteTable>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Reply>, AppError> {
    debug!(path = %uri.path(), "Search handler is run");
    let reply = table.dispatch(uri.path(), &params)?;
    Ok(Json(reply))
}
