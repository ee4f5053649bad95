//! Static file server for the built app.
//!
//! Everything under the dist directory is served as-is. Unknown `/api/*`
//! paths get a JSON 404; any other unknown path falls back to `index.html`
//! so client-side scenes survive a reload.

use std::env;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::json;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DIST_DIR: &str = "dist";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub dist_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
        }
    }
}

impl ServerConfig {
    /// Reads `PORT` and `DIST_DIR`; unset or unparsable values keep the defaults.
    pub fn from_env() -> Self {
        Self::from_vars(env::var("PORT").ok(), env::var("DIST_DIR").ok())
    }

    fn from_vars(port: Option<String>, dist_dir: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = port {
            match raw.trim().parse() {
                Ok(p) => config.port = p,
                Err(_) => tracing::warn!(port = %raw, "invalid PORT, using {DEFAULT_PORT}"),
            }
        }
        if let Some(dir) = dist_dir.filter(|d| !d.trim().is_empty()) {
            config.dist_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn index_path(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }

    /// Warns about a missing build; the server still starts.
    pub fn check_dist(&self) {
        if !self.dist_dir.is_dir() {
            tracing::warn!(dist = %self.dist_dir.display(), "dist directory not found, run the web build first");
        } else if !self.index_path().is_file() {
            tracing::warn!(dist = %self.dist_dir.display(), "index.html missing from dist directory");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("could not bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn app(config: ServerConfig) -> Router {
    Router::new()
        .route("/api", any(api_not_found))
        .route("/api/*rest", any(api_not_found))
        .fallback(serve_static)
        .with_state(Arc::new(config))
}

async fn api_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

async fn serve_static(State(config): State<Arc<ServerConfig>>, uri: Uri) -> Response {
    if is_api_path(uri.path()) {
        return api_not_found().await;
    }
    if let Some(rel) = safe_relative(uri.path()) {
        let path = config.dist_dir.join(&rel);
        if path.is_file() {
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    return ([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response();
                }
                Err(err) => tracing::warn!(path = %path.display(), "read failed: {err}"),
            }
        }
    } else {
        tracing::debug!(path = uri.path(), "rejected path");
    }

    match tokio::fs::read(config.index_path()).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], bytes).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "index.html not found").into_response(),
    }
}

/// Maps a request path to a path under the dist directory. Anything that
/// could escape it (`..`, absolute or prefixed components) is refused.
fn safe_relative(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    let mut out = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use http_body_util::BodyExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

    /// A fresh dist directory under the system temp dir.
    fn temp_dist(with_index: bool) -> PathBuf {
        let n = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
        let dir = env::temp_dir().join(format!("birthday-dist-{}-{n}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("assets")).unwrap();
        if with_index {
            std::fs::write(dir.join("index.html"), "<html>app</html>").unwrap();
        }
        std::fs::write(dir.join("assets/app.js"), "console.log(1)").unwrap();
        dir
    }

    fn test_app(dist: &Path) -> Router {
        app(ServerConfig {
            port: 0,
            dist_dir: dist.to_path_buf(),
        })
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(res: Response) -> String {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn serves_files_with_content_type() {
        let dist = temp_dist(true);
        let res = get(&test_app(&dist), "/assets/app.js").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()[header::CONTENT_TYPE],
            "text/javascript; charset=utf-8"
        );
        assert_eq!(body_text(res).await, "console.log(1)");
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_index() {
        let dist = temp_dist(true);
        let app = test_app(&dist);
        for uri in ["/", "/gifts", "/room/deeper", "/missing.png"] {
            let res = get(&app, uri).await;
            assert_eq!(res.status(), StatusCode::OK, "{uri}");
            assert_eq!(res.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");
            assert_eq!(body_text(res).await, "<html>app</html>");
        }
    }

    #[tokio::test]
    async fn api_paths_get_json_not_found() {
        let dist = temp_dist(true);
        let app = test_app(&dist);
        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/progress")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
        assert_eq!(body, json!({ "error": "Not found" }));

        for uri in ["/api", "/api/", "/api/v1/things", "/api/x/"] {
            let res = get(&app, uri).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json", "{uri}");
            let body: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
            assert_eq!(body, json!({ "error": "Not found" }), "{uri}");
        }
    }

    #[test]
    fn api_prefix_needs_a_segment_boundary() {
        assert!(is_api_path("/api"));
        assert!(is_api_path("/api/"));
        assert!(is_api_path("/api/progress"));
        assert!(!is_api_path("/apiary.png"));
        assert!(!is_api_path("/"));
    }

    #[tokio::test]
    async fn missing_index_is_plain_not_found() {
        let dist = temp_dist(false);
        let res = get(&test_app(&dist), "/ladder").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(res).await, "index.html not found");
    }

    #[test]
    fn traversal_is_refused() {
        assert_eq!(safe_relative("/assets/app.js"), Some(PathBuf::from("assets/app.js")));
        assert_eq!(safe_relative("/./a"), Some(PathBuf::from("a")));
        assert_eq!(safe_relative("/../secret"), None);
        assert_eq!(safe_relative("/assets/../../etc/passwd"), None);
    }

    #[test]
    fn env_values_override_defaults() {
        let c = ServerConfig::from_vars(Some("3000".into()), Some("public".into()));
        assert_eq!(c.port, 3000);
        assert_eq!(c.dist_dir, PathBuf::from("public"));

        let c = ServerConfig::from_vars(Some("not-a-port".into()), Some("  ".into()));
        assert_eq!(c, ServerConfig::default());
    }
}
