use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use winenotesapp::api::WineApi;
use winenotesapp::config::WineConfig;
use winenotesapp::store::backend::StorageBackend;
use winenotesapp::store::blobs::DEFAULT_URL_PREFIX;

use super::handlers::{self, AppState};

/// Build the axum router with all winenotes endpoints.
pub fn build_router<B: StorageBackend + 'static>(
    api: Arc<WineApi<B>>,
    config: &WineConfig,
) -> Router {
    let photo_route = format!("{}/:filename", uploads_route(&config.uploads_url_prefix));

    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/api/wines",
            get(handlers::list_wines::<B>).post(handlers::create_wine::<B>),
        )
        .route(
            "/api/wines/:id",
            get(handlers::get_wine::<B>)
                .put(handlers::update_wine::<B>)
                .delete(handlers::delete_wine::<B>),
        )
        .route(
            "/api/upload",
            post(handlers::upload_photo::<B>)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .route(&photo_route, get(handlers::get_photo::<B>))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { api })
}

/// Photos are served under the URL prefix handed out on upload, when that
/// prefix is a plain local path.
fn uploads_route(prefix: &str) -> &str {
    let prefix = prefix.trim_end_matches('/');
    let routable = prefix.starts_with('/')
        && prefix.len() > 1
        && !prefix.contains([':', '*', '{', '}']);
    if routable {
        prefix
    } else {
        DEFAULT_URL_PREFIX
    }
}
