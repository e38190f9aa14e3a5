//! Local HTTP server that renders pages on request.
//!
//! Every request enumerates the content tree and reads its document again, so
//! edits to the JSON files show up on the next reload.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::config::SiteConfig;
use crate::content::{Catalog, ContentStore};
use crate::publish::{PageOutcome, PublishOptions, Route, SiteRenderer};

/// Server state shared across requests.
pub struct SiteServerState {
    pub store: ContentStore,
    pub config: SiteConfig,
}

/// Handle for a running server.
pub struct SiteServer {
    /// Address the server is bound to.
    pub addr: SocketAddr,
    /// Port the server is listening on.
    pub port: u16,
    /// Shutdown signal sender.
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl SiteServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", SocketAddr::new(self.addr.ip(), self.port))
    }

    /// Stop the server gracefully.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

const NOT_FOUND_BODY: &str = "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Not Found</title></head>\n<body><h1>404</h1><p>This page could not be found.</p><p><a href=\"/\">Back to subjects</a></p></body></html>";

enum Rendered {
    Page(PageOutcome),
    Css(&'static str),
}

fn render_blocking(state: &SiteServerState, route: Option<Route>) -> Result<Rendered, String> {
    let catalog = Catalog::load(&state.store, &state.config.subject_names)
        .map_err(|e| e.to_string())?;
    let options = PublishOptions::from(state.config.clone());
    let renderer = SiteRenderer::new(&state.store, &catalog, &options);
    Ok(match route {
        Some(route) => Rendered::Page(renderer.render(&route)),
        None => Rendered::Css(renderer.css()),
    })
}

async fn render(state: Arc<SiteServerState>, route: Option<Route>) -> Response {
    let result = tokio::task::spawn_blocking(move || render_blocking(&state, route)).await;

    match result {
        Ok(Ok(Rendered::Page(PageOutcome::Rendered(html)))) => Html(html).into_response(),
        Ok(Ok(Rendered::Page(PageOutcome::NotFound))) => not_found(),
        Ok(Ok(Rendered::Css(css))) => {
            ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css).into_response()
        }
        Ok(Err(e)) => {
            log::error!("Failed to enumerate content: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to enumerate content").into_response()
        }
        Err(e) => {
            log::error!("Render task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Render failed").into_response()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_BODY)).into_response()
}

async fn serve_page(State(state): State<Arc<SiteServerState>>, uri: Uri) -> Response {
    match Route::parse(uri.path()) {
        Some(route) => render(state, Some(route)).await,
        None => not_found(),
    }
}

async fn serve_css(State(state): State<Arc<SiteServerState>>) -> Response {
    render(state, None).await
}

pub fn router(state: SiteServerState) -> Router {
    Router::new()
        .route("/style.css", get(serve_css))
        .fallback(serve_page)
        .with_state(Arc::new(state))
}

/// Start serving on `addr`. Port 0 picks a free port.
pub async fn start_server(
    state: SiteServerState,
    addr: SocketAddr,
) -> Result<SiteServer, Box<dyn std::error::Error + Send + Sync>> {
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    let port = listener.local_addr()?.port();

    log::info!("Site server started on http://{}:{}", addr.ip(), port);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                log::info!("Site server shutting down");
            })
            .await
            .ok();
    });

    Ok(SiteServer {
        addr,
        port,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn state() -> (TempDir, SiteServerState) {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "subjects/fluid-mechanics/2023.json",
            r#"{"questions":[{"id":"1","text":"Pick","type":"mcq","options":["A","B"],"answer":0,"chapter":"C","marks":1}]}"#,
        );
        write(
            dir.path(),
            "subjects/fluid-mechanics/formulas/2023.json",
            r#"[{"id":"f1","name":"Ohm","latex":"V=IR"}]"#,
        );
        let state = SiteServerState {
            store: ContentStore::new(dir.path().to_path_buf()),
            config: SiteConfig::default(),
        };
        (dir, state)
    }

    async fn get_path(app: Router, path: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_serves_pages() {
        let (_dir, state) = state();
        let app = router(state);

        let (status, body) = get_path(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Fluid Mechanics"));

        let (status, body) = get_path(app.clone(), "/fluid-mechanics/2023").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Q1:"));

        let (status, body) = get_path(app, "/fluid-mechanics/2023/formulas").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("V=IR"));
    }

    #[tokio::test]
    async fn test_missing_questions_render_empty_notice() {
        let (_dir, state) = state();
        let (status, body) = get_path(router(state), "/fluid-mechanics/1999").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No questions found"));
    }

    #[tokio::test]
    async fn test_not_found_routes() {
        let (_dir, state) = state();
        let app = router(state);
        for path in [
            "/fluid-mechanics/1999/formulas",
            "/astronomy",
            "/a/b/c/d",
        ] {
            let (status, _) = get_path(app.clone(), path).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", path);
        }
    }

    #[tokio::test]
    async fn test_serves_stylesheet() {
        let (_dir, state) = state();
        let response = router(state)
            .oneshot(Request::builder().uri("/style.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let (_dir, state) = state();
        let mut server = start_server(state, SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        assert_ne!(server.port, 0);
        assert_eq!(server.base_url(), format!("http://127.0.0.1:{}", server.port));
        server.stop();
        server.stop();
    }

    #[tokio::test]
    async fn test_missing_subjects_root_is_server_error() {
        let dir = TempDir::new().unwrap();
        let state = SiteServerState {
            store: ContentStore::new(dir.path().to_path_buf()),
            config: SiteConfig::default(),
        };
        let (status, _) = get_path(router(state), "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
