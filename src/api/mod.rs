//! HTTP API layer

mod routes;
mod handlers;

pub use handlers::{ErrorResponse, FetchPostsRequest, HealthResponse, PostsResponse};
pub use routes::{create_router, AppState};
