//! Axum router configuration with middleware.
//!
//! The chat page and its forms live at the root; the JSON API is under
//! `/api/v1/`. Middleware: CORS, tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/session", get(handlers::api::get_session))
        .route("/messages", post(handlers::api::post_message))
        .route("/status", get(handlers::api::get_status));

    Router::new()
        .route("/", get(handlers::page::index))
        .route("/send", post(handlers::page::send))
        .route("/clear", post(handlers::page::clear))
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness of this front-end (not the backend).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::extract::State;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use axum::Json;
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tower::ServiceExt;

    use calbook_types::chat::ChatRole;
    use calbook_types::config::FrontendConfig;
    use calbook_types::session::SessionId;

    /// Fake booking backend: echoes the message back with some markup.
    async fn spawn_backend() -> (String, oneshot::Sender<()>) {
        async fn chat(Json(body): Json<Value>) -> Json<Value> {
            let message = body["message"].as_str().unwrap_or_default();
            Json(json!({ "response": format!("<b>Booked</b>: {message}") }))
        }

        let app = Router::new()
            .route("/chat", post(chat))
            .route("/health", get(|| async { StatusCode::OK }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await
                .unwrap();
        });
        (format!("http://{addr}"), tx)
    }

    async fn unreachable_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn app_state(backend_url: String) -> AppState {
        AppState::from_config(FrontendConfig {
            backend_url,
            chat_timeout_secs: 5,
            health_timeout_secs: 1,
            ..FrontendConfig::default()
        })
        .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn session_cookie(response: &Response) -> String {
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("new session should set a cookie")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn get_req(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn post_json(uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(app_state(unreachable_url().await));
        let response = app.oneshot(get_req("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_index_without_cookie_creates_no_session() {
        let state = app_state(unreachable_url().await);
        let app = build_router(state.clone());

        let response = app.oneshot(get_req("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(state.sessions.len(), 0);

        let html = body_text(response).await;
        assert!(html.contains("Backend Offline"));
        assert!(html.contains("Calendar Booking Agent"));
    }

    #[tokio::test]
    async fn test_index_with_unknown_cookie_creates_no_session() {
        let state = app_state(unreachable_url().await);
        let app = build_router(state.clone());

        let stale = format!("calbook_session={}", SessionId::generate());
        let response = app.oneshot(get_req("/", Some(&stale))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(state.sessions.len(), 0);
    }

    #[tokio::test]
    async fn test_first_send_creates_session_and_browser_keeps_it() {
        let (url, _shutdown) = spawn_backend().await;
        let state = app_state(url);
        let app = build_router(state.clone());

        let sent = app
            .clone()
            .oneshot(post_form("/send", None, "message=hi"))
            .await
            .unwrap();
        let cookie = session_cookie(&sent);
        assert!(cookie.starts_with("calbook_session="));
        assert_eq!(state.sessions.len(), 1);

        let page = app
            .clone()
            .oneshot(get_req("/", Some(&cookie)))
            .await
            .unwrap();
        assert!(page.headers().get(header::SET_COOKIE).is_none());

        let again = app
            .oneshot(post_form("/send", Some(&cookie), "message=again"))
            .await
            .unwrap();
        assert!(again.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_send_then_render_escaped_transcript() {
        let (url, _shutdown) = spawn_backend().await;
        let app = build_router(app_state(url));

        let sent = app
            .clone()
            .oneshot(post_form("/send", None, "message=Book+at+2+PM"))
            .await
            .unwrap();
        assert_eq!(sent.status(), StatusCode::SEE_OTHER);
        assert_eq!(sent.headers().get(header::LOCATION).unwrap(), "/");
        let cookie = session_cookie(&sent);

        let page = app.oneshot(get_req("/", Some(&cookie))).await.unwrap();
        let html = body_text(page).await;
        assert!(html.contains("Backend Connected"));
        assert!(html.contains("Book at 2 PM"));
        assert!(html.contains("&lt;b&gt;Booked&lt;/b&gt;: Book at 2 PM"));
        assert!(!html.contains("<b>Booked</b>"));

        let user_at = html.find("user-message\">").unwrap();
        let assistant_at = html.find("assistant-message\">").unwrap();
        assert!(user_at < assistant_at);
    }

    #[tokio::test]
    async fn test_send_without_backend_shows_connection_error_inline() {
        let state = app_state(unreachable_url().await);
        let app = build_router(state.clone());

        let sent = app
            .clone()
            .oneshot(post_form("/send", None, "message=hello"))
            .await
            .unwrap();
        let cookie = session_cookie(&sent);

        let html = body_text(app.oneshot(get_req("/", Some(&cookie))).await.unwrap()).await;
        assert!(html.contains("Connection error:"));
        assert!(html.contains("Please make sure the backend is running."));
    }

    #[tokio::test]
    async fn test_blank_send_leaves_transcript_untouched() {
        let state = app_state(unreachable_url().await);
        let app = build_router(state.clone());

        let sent = app
            .clone()
            .oneshot(post_form("/send", None, "message=+++"))
            .await
            .unwrap();
        assert_eq!(sent.status(), StatusCode::SEE_OTHER);
        let cookie = session_cookie(&sent);

        let html = body_text(app.oneshot(get_req("/", Some(&cookie))).await.unwrap()).await;
        assert!(!html.contains("class=\"chat-message"));
    }

    #[tokio::test]
    async fn test_clear_empties_transcript_and_keeps_session() {
        let (url, _shutdown) = spawn_backend().await;
        let state = app_state(url);
        let app = build_router(state.clone());

        let first = app
            .clone()
            .oneshot(post_form("/send", None, "message=one"))
            .await
            .unwrap();
        let cookie = session_cookie(&first);
        app.clone()
            .oneshot(post_form("/send", Some(&cookie), "message=two"))
            .await
            .unwrap();

        let cleared = app
            .clone()
            .oneshot(post_form("/clear", Some(&cookie), ""))
            .await
            .unwrap();
        assert_eq!(cleared.status(), StatusCode::SEE_OTHER);

        let response = app.oneshot(get_req("/api/v1/session", Some(&cookie))).await.unwrap();
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["data"]["turn_count"], 0);
        assert_eq!(state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_without_session_creates_none() {
        let state = app_state(unreachable_url().await);
        let app = build_router(state.clone());

        let cleared = app.oneshot(post_form("/clear", None, "")).await.unwrap();
        assert_eq!(cleared.status(), StatusCode::SEE_OTHER);
        assert!(cleared.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(state.sessions.len(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sends_on_one_session_keep_turns_paired() {
        #[derive(Clone, Default)]
        struct InFlight {
            now: Arc<AtomicUsize>,
            peak: Arc<AtomicUsize>,
        }

        async fn slow_echo(State(in_flight): State<InFlight>, Json(body): Json<Value>) -> Json<Value> {
            let now = in_flight.now.fetch_add(1, Ordering::SeqCst) + 1;
            in_flight.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(40)).await;
            in_flight.now.fetch_sub(1, Ordering::SeqCst);

            let message = body["message"].as_str().unwrap_or_default();
            Json(json!({ "response": format!("<b>Booked</b>: {message}") }))
        }

        let in_flight = InFlight::default();
        let backend = Router::new()
            .route("/chat", post(slow_echo))
            .route("/health", get(|| async { StatusCode::OK }))
            .with_state(in_flight.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, backend).await;
        });

        let state = app_state(format!("http://{addr}"));
        let app = build_router(state.clone());
        let (id, session) = state.sessions.create();
        let cookie = format!("calbook_session={id}");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let app = app.clone();
                let cookie = cookie.clone();
                tokio::spawn(async move {
                    let body = format!("message=msg+{i}");
                    app.oneshot(post_form("/send", Some(&cookie), &body))
                        .await
                        .unwrap()
                        .status()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::SEE_OTHER);
        }

        assert_eq!(in_flight.peak.load(Ordering::SeqCst), 1);

        let session = session.lock().await;
        let turns = session.list();
        assert_eq!(turns.len(), 16);

        let mut prompts = Vec::new();
        for pair in turns.chunks(2) {
            assert_eq!(pair[0].role(), ChatRole::User);
            assert_eq!(pair[1].role(), ChatRole::Assistant);
            assert_eq!(
                pair[1].content(),
                format!("<b>Booked</b>: {}", pair[0].content())
            );
            prompts.push(pair[0].content().to_string());
        }
        prompts.sort();
        let expected: Vec<String> = (0..8).map(|i| format!("msg {i}")).collect();
        assert_eq!(prompts, expected);
    }

    #[tokio::test]
    async fn test_api_session_without_cookie_is_not_found() {
        let app = build_router(app_state(unreachable_url().await));
        let response = app.oneshot(get_req("/api/v1/session", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["errors"][0]["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_api_message_round_trip_alternates_turns() {
        let (url, _shutdown) = spawn_backend().await;
        let app = build_router(app_state(url));

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/messages", None, json!({"message": "Tomorrow?"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["data"]["reply"], "<b>Booked</b>: Tomorrow?");
        assert_eq!(body["data"]["success"], true);

        app.clone()
            .oneshot(post_json(
                "/api/v1/messages",
                Some(&cookie),
                json!({"message": "And Friday?"}),
            ))
            .await
            .unwrap();

        let response = app.oneshot(get_req("/api/v1/session", Some(&cookie))).await.unwrap();
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        let roles: Vec<&str> = body["data"]["turns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, ["user", "assistant", "user", "assistant"]);
    }

    #[tokio::test]
    async fn test_api_message_rejects_blank() {
        let app = build_router(app_state(unreachable_url().await));
        let response = app
            .oneshot(post_json("/api/v1/messages", None, json!({"message": "  "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_api_status_reports_backend() {
        let (url, _shutdown) = spawn_backend().await;
        let app = build_router(app_state(url.clone()));

        let response = app.oneshot(get_req("/api/v1/status", None)).await.unwrap();
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["data"]["connected"], true);
        assert_eq!(body["data"]["status"]["state"], "connected");
        assert_eq!(body["data"]["backend_url"], url.as_str());
    }

    #[tokio::test]
    async fn test_slow_backend_times_out_inline() {
        async fn slow_chat() -> Json<Value> {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "response": "too late" }))
        }
        let app_backend = Router::new().route("/chat", post(slow_chat));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app_backend).await;
        });

        let app = build_router(
            AppState::from_config(FrontendConfig {
                backend_url: format!("http://{addr}"),
                chat_timeout_secs: 1,
                health_timeout_secs: 1,
                ..FrontendConfig::default()
            })
            .unwrap(),
        );

        let response = app
            .oneshot(post_json("/api/v1/messages", None, json!({"message": "hi"})))
            .await
            .unwrap();
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["data"]["success"], false);
        assert_eq!(body["data"]["error_kind"], "timeout");
    }
}
