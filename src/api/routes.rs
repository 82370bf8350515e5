//! API route definitions

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, ErrorResponse, FetchPostsRequest, HealthResponse, PostsResponse};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::PostStore;
use crate::types::BlogPost;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blogpost API",
        version = "0.1.0",
        description = "Submit blog posts and fetch them by username"
    ),
    tags(
        (name = "posts", description = "Blog post submission and lookup"),
        (name = "health", description = "Health checks")
    ),
    paths(
        handlers::health,
        handlers::submit_post,
        handlers::get_blog_posts,
    ),
    components(schemas(
        BlogPost,
        FetchPostsRequest,
        PostsResponse,
        HealthResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
    pub strict_writes: bool,
    pub allowed_origin: HeaderValue,
}

impl AppState {
    pub fn new(store: Arc<dyn PostStore>, config: &Config) -> Result<Self> {
        let allowed_origin = HeaderValue::from_str(&config.allowed_origin)
            .map_err(|e| Error::Config(format!("invalid allowed_origin: {}", e)))?;

        Ok(Self {
            store,
            strict_writes: config.strict_writes,
            allowed_origin,
        })
    }
}

/// Refuse browser requests from any origin other than the configured one.
/// Requests without an `Origin` header are not cross-origin and pass through.
async fn reject_foreign_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        if *origin != state.allowed_origin {
            tracing::warn!(origin = ?origin, path = %request.uri().path(), "Rejected cross-origin request");
            return (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse {
                    error: "Origin not allowed".into(),
                }),
            )
                .into_response();
        }
    }

    next.run(request).await
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.allowed_origin.clone())
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let openapi = ApiDoc::openapi();

    let posts = Router::new()
        .route("/blog_post", post(handlers::submit_post))
        .route("/get_blog_posts", post(handlers::get_blog_posts))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            reject_foreign_origin,
        ))
        .layer(cors);

    Router::new()
        .merge(posts)

        // Health
        .route("/health", get(handlers::health))

        // OpenAPI spec and Swagger UI
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", openapi))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
