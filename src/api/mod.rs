/// API routes and handlers
pub mod middleware;
pub mod thumbnail;

use crate::context::AppContext;
use axum::Router;

/// Build API routes
pub fn routes(upload_limit: usize) -> Router<AppContext> {
    Router::new().merge(thumbnail::routes(upload_limit))
}
