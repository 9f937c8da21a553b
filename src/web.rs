pub mod api;
pub mod client;
pub mod except;
pub mod messages;
pub mod route;
pub mod url;

use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::erx::{ResultE, ResultEX};
use crate::listing::catalog::Catalog;
use crate::listing::source::PageSource;
use crate::web::api::Out;
use crate::web::except::Except;
use crate::web::messages::list::PagedList;

/// answer a list request with the Out envelope, listing errors become 400s
fn respond<T: Serialize>(path: &str, result: ResultE<PagedList<T>>) -> Response {
    match result {
        Ok(list) => Out::ok(list).into_response(),
        Err(e) => {
            warn!("{} rejected: {}", path, e.description());
            Except::from(e).into_response()
        },
    }
}

async fn health() -> Out<&'static str> {
    Out::ok("up")
}

async fn list_blogs(State(catalog): State<Catalog>, RawQuery(query): RawQuery) -> Response {
    respond("/api/blogs", catalog.blogs.fetch_page(&query.unwrap_or_default()).await)
}

async fn list_enquiries(State(catalog): State<Catalog>, RawQuery(query): RawQuery) -> Response {
    respond("/api/enquiries", catalog.enquiries.fetch_page(&query.unwrap_or_default()).await)
}

async fn list_faqs(State(catalog): State<Catalog>, RawQuery(query): RawQuery) -> Response {
    respond("/api/faqs", catalog.faqs.fetch_page(&query.unwrap_or_default()).await)
}

async fn fallback() -> Except {
    Except::NotFound
}

/// list api router over `catalog`
pub fn router(catalog: Catalog) -> Router {
    let listings = Router::new()
        .route("/api/blogs", get(list_blogs))
        .route("/api/enquiries", get(list_enquiries))
        .route("/api/faqs", get(list_faqs));
    let probes = Router::new().route("/health", get(health));

    route::merge_vec(vec![listings, probes]).fallback(fallback).layer(TraceLayer::new_for_http()).with_state(catalog)
}

/// bind and serve the list api until ctrl-c
pub async fn serve(bind: &str, catalog: Catalog) -> ResultEX {
    let listener = tokio::net::TcpListener::bind(bind).await.map_err(crate::erx::emp)?;
    info!("list api served on {}", bind);

    axum::serve(listener, router(catalog))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("ctrl-c handler failed: {}", e);
            }
            info!("list api shutting down");
        })
        .await
        .map_err(crate::erx::emp)
}
