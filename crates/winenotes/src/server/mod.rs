//! HTTP front end for the wine notes API.
//!
//! Routes decode requests, call [`WineApi`] on the blocking pool and map
//! error kinds to status codes (not found → 404, validation → 422, storage →
//! 500). Error bodies are `{"detail": "..."}`.

mod error;
mod handlers;
mod router;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use winenotesapp::api::WineApi;
use winenotesapp::config::WineConfig;
use winenotesapp::init::WineContext;
use winenotesapp::store::fs_backend::FsBackend;

pub use router::build_router;

pub struct WineServer {
    api: Arc<WineApi<FsBackend>>,
    config: WineConfig,
}

impl WineServer {
    pub fn new(ctx: WineContext) -> Self {
        Self {
            api: Arc::new(ctx.api),
            config: ctx.config,
        }
    }

    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.api), &self.config)
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("binding {}", addr))?;
        tracing::info!(
            data_file = %self.config.data_file_path().display(),
            "winenotes listening on {}",
            addr
        );
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;
    use winenotesapp::store::memory::InMemoryStore;

    const BOUNDARY: &str = "winenotes-test-boundary";

    fn app() -> Router {
        let api = Arc::new(WineApi::new(InMemoryStore::new()));
        build_router(api, &WineConfig::default())
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn upload_request(filename: &str, data: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n{d}\r\n--{b}--\r\n",
            b = BOUNDARY,
            f = filename,
            d = data
        );
        Request::builder()
            .method(Method::POST)
            .uri("/api/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn barolo() -> Value {
        json!({
            "name": "Barolo",
            "type": "red",
            "region": "Piedmont",
            "vintage": 2018,
            "rating": 9
        })
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = send(&app(), get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "running");
    }

    #[tokio::test]
    async fn create_then_get() {
        let app = app();
        let response = send(&app, json_request(Method::POST, "/api/wines", &barolo())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        assert_eq!(created["created_at"], created["updated_at"]);
        assert_eq!(created["photo"], Value::Null);

        let id = created["id"].as_str().unwrap();
        let response = send(&app, get(&format!("/api/wines/{}", id))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, created);
    }

    #[tokio::test]
    async fn invalid_rating_is_422() {
        let mut body = barolo();
        body["rating"] = json!(11);
        let response = send(&app(), json_request(Method::POST, "/api/wines", &body)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let detail = body_json(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.contains("rating"));
    }

    #[tokio::test]
    async fn missing_field_is_422() {
        let body = json!({ "name": "Barolo", "type": "red", "region": "Piedmont" });
        let response = send(&app(), json_request(Method::POST, "/api/wines", &body)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unknown_and_malformed_ids_are_404() {
        let app = app();
        for uri in [
            "/api/wines/not-a-uuid",
            "/api/wines/6f1c2a4e-8d4b-4f7a-9a57-3a0c2d1e5b11",
        ] {
            let response = send(&app, get(uri)).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert!(body_json(response).await["detail"].is_string());
        }
    }

    #[tokio::test]
    async fn update_and_delete() {
        let app = app();
        let created =
            body_json(send(&app, json_request(Method::POST, "/api/wines", &barolo())).await).await;
        let uri = format!("/api/wines/{}", created["id"].as_str().unwrap());

        let mut changed = barolo();
        changed["notes"] = json!("roses and tar");
        let response = send(&app, json_request(Method::PUT, &uri, &changed)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["created_at"], created["created_at"]);
        assert_ne!(updated["updated_at"], created["updated_at"]);
        assert_eq!(updated["notes"], "roses and tar");

        let delete = Request::builder()
            .method(Method::DELETE)
            .uri(&uri)
            .body(Body::empty())
            .unwrap();
        let response = send(&app, delete).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Wine deleted successfully");

        assert_eq!(send(&app, get(&uri)).await.status(), StatusCode::NOT_FOUND);
        let list = body_json(send(&app, get("/api/wines")).await).await;
        assert_eq!(list.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn upload_serve_and_cascade() {
        let app = app();
        let response = send(&app, upload_request("label.png", "pngbytes")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let photo = body_json(response).await;
        let filename = photo["filename"].as_str().unwrap().to_string();
        let url = photo["url"].as_str().unwrap().to_string();
        assert!(filename.ends_with(".png"));
        assert_eq!(url, format!("/api/uploads/{}", filename));

        let response = send(&app, get(&url)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"pngbytes");

        let mut body = barolo();
        body["photo"] = json!(url);
        let created =
            body_json(send(&app, json_request(Method::POST, "/api/wines", &body)).await).await;
        let delete = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/wines/{}", created["id"].as_str().unwrap()))
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, delete).await.status(), StatusCode::OK);

        assert_eq!(send(&app, get(&url)).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn upload_without_file_field_is_422() {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nx\r\n--{b}--\r\n",
            b = BOUNDARY
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        let response = send(&app(), request).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn traversal_photo_names_are_404() {
        let app = app();
        for uri in [
            "/api/uploads/..%2Fwines.json",
            "/api/uploads/wines.json",
            "/api/uploads/..",
        ] {
            let response = send(&app, get(uri)).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_over_http() {
        let app = app();
        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..50 {
            let app = app.clone();
            tasks.spawn(async move {
                let mut body = barolo();
                body["name"] = json!(format!("Wine {}", i));
                let response = app
                    .oneshot(json_request(Method::POST, "/api/wines", &body))
                    .await
                    .unwrap();
                response.status()
            });
        }
        while let Some(status) = tasks.join_next().await {
            assert_eq!(status.unwrap(), StatusCode::OK);
        }

        let list = body_json(send(&app, get("/api/wines")).await).await;
        assert_eq!(list.as_array().unwrap().len(), 50);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let request = Request::builder()
            .uri("/api/wines")
            .header(header::ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = send(&app(), request).await;
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn server_builds_router_from_context() {
        let dir = tempfile::tempdir().unwrap();
        let config = WineConfig::default().with_data_dir(dir.path());
        let server = WineServer::new(winenotesapp::init::initialize(config));
        let _router = server.router();
    }
}
