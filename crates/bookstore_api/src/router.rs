use crate::handlers::{authors, books, system};
use crate::state::ApiState;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use log::{info, warn};
use std::time::Instant;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_scalar::{Scalar, Servable};

/// Path of the raw OpenAPI document.
pub const OPENAPI_PATH: &str = "/api/openapi.json";
/// Path of the interactive API reference.
pub const DOCS_PATH: &str = "/docs";

#[derive(OpenApi)]
#[openapi(
    info(title = "BookList", version = "1.0.0", description = "Bookstore catalog API"),
    tags(
        (name = "books", description = "Book catalog"),
        (name = "authors", description = "Authors and their books"),
        (name = "system", description = "Service status")
    )
)]
struct ApiDoc;

/// Builds the full application router over `state`.
pub fn init(state: ApiState) -> Router {
    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(books::list_books, books::create_book))
        .routes(routes!(
            books::get_book,
            books::update_book,
            books::delete_book
        ))
        .routes(routes!(authors::list_authors, authors::create_author))
        .routes(routes!(authors::list_author_books, authors::delete_author))
        .routes(routes!(system::health))
        .with_state(state)
        .split_for_parts();

    let document = api_doc.clone();
    Router::new()
        .merge(api_routes)
        .route(OPENAPI_PATH, get(move || async move { Json(document) }))
        .merge(Scalar::with_url(DOCS_PATH, api_doc))
        .layer(middleware::from_fn(log_requests))
}

async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let status = response.status();
    if status.is_server_error() {
        warn!(
            "event=http_request module=api status=error method={} path={} http_status={} duration_ms={}",
            method,
            path,
            status.as_u16(),
            started_at.elapsed().as_millis()
        );
    } else {
        info!(
            "event=http_request module=api status=ok method={} path={} http_status={} duration_ms={}",
            method,
            path,
            status.as_u16(),
            started_at.elapsed().as_millis()
        );
    }
    response
}
