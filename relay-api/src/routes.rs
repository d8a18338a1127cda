//! API route configuration.

use std::sync::Arc;

use axum::{middleware, routing::put, Router};

use relay_core::constants::REGISTRATION_PATH;

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
///
/// Only `/` is routed. Unknown paths (including `/` with a query string) and
/// unknown verbs both answer 404.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            REGISTRATION_PATH,
            put(handlers::register)
                .get(handlers::registration_status)
                .delete(handlers::deregister)
                // axum routes HEAD to the GET handler unless HEAD has its own endpoint
                .head(handlers::unsupported_method)
                .fallback(handlers::unsupported_method),
        )
        .route_layer(middleware::from_fn(handlers::reject_query))
        .fallback(handlers::unsupported_path)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    use axum::body::Body;
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::{Request, StatusCode};
    use test_case::test_case;
    use tower::ServiceExt;

    use relay_core::traits::ConsumerRegistry;
    use relay_core::types::{ConsumerIdentity, ConsumerPort};
    use relay_registry::MemoryRegistry;

    use crate::state::ApiConfig;

    const PEER: ([u8; 4], u16) = ([10, 0, 0, 7], 51_000);

    fn test_app() -> (Router, Arc<MemoryRegistry>) {
        let registry = Arc::new(MemoryRegistry::new());
        let state = Arc::new(AppState::with_registry(
            ApiConfig::default(),
            registry.clone(),
        ));
        let app = create_router(state).layer(MockConnectInfo(SocketAddr::from(PEER)));
        (app, registry)
    }

    fn consumer(port: u64) -> ConsumerIdentity {
        ConsumerIdentity::new(SocketAddr::from(PEER).ip(), ConsumerPort::new(port))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: &str) -> StatusCode {
        app.clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-length", body.len())
                    .body(Body::from(body.to_owned()))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_get_unregistered() {
        let (app, _) = test_app();

        assert_eq!(send(&app, "GET", "/", "6714").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (app, registry) = test_app();

        assert_eq!(send(&app, "PUT", "/", "6714").await, StatusCode::OK);
        assert_eq!(send(&app, "GET", "/", "6714").await, StatusCode::OK);
        assert_eq!(send(&app, "GET", "/", "8128").await, StatusCode::NOT_FOUND);

        assert!(registry.exists(&consumer(6714)));
    }

    #[tokio::test]
    async fn test_put_twice() {
        let (app, registry) = test_app();

        assert_eq!(send(&app, "PUT", "/", "6714").await, StatusCode::OK);
        assert_eq!(send(&app, "PUT", "/", "6714").await, StatusCode::BAD_REQUEST);

        assert_eq!(registry.consumers(), vec![consumer(6714)]);
    }

    #[tokio::test]
    async fn test_put_delete_get() {
        let (app, registry) = test_app();

        assert_eq!(send(&app, "PUT", "/", "6714").await, StatusCode::OK);
        assert_eq!(send(&app, "DELETE", "/", "6714").await, StatusCode::OK);
        assert_eq!(send(&app, "GET", "/", "6714").await, StatusCode::NOT_FOUND);

        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_delete_never_registered() {
        let (app, registry) = test_app();
        registry.exists_and_add(consumer(8128));

        assert_eq!(send(&app, "DELETE", "/", "6714").await, StatusCode::OK);

        assert_eq!(registry.consumers(), vec![consumer(8128)]);
    }

    #[tokio::test]
    async fn test_reset_forgets_registrations() {
        let (app, registry) = test_app();

        assert_eq!(send(&app, "PUT", "/", "6714").await, StatusCode::OK);
        assert_eq!(send(&app, "PUT", "/", "8128").await, StatusCode::OK);

        registry.reset();

        assert_eq!(send(&app, "GET", "/", "6714").await, StatusCode::NOT_FOUND);
        assert_eq!(send(&app, "GET", "/", "8128").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_out_of_range_port_accepted() {
        let (app, registry) = test_app();

        assert_eq!(send(&app, "PUT", "/", "99999999").await, StatusCode::OK);
        assert!(registry.exists(&consumer(99_999_999)));
    }

    #[test_case("PUT", "/foo" ; "put")]
    #[test_case("GET", "/foo/bar" ; "get nested")]
    #[test_case("DELETE", "/index.html" ; "delete")]
    #[test_case("POST", "/x" ; "post")]
    #[test_case("GET", "/?x=1" ; "get query string")]
    #[test_case("PUT", "/?" ; "put empty query string")]
    #[tokio::test]
    async fn test_unknown_path_is_404(method: &str, path: &str) {
        let (app, registry) = test_app();

        // Body is valid but never consulted
        assert_eq!(send(&app, method, path, "6714").await, StatusCode::NOT_FOUND);
        assert_eq!(send(&app, method, path, "abc").await, StatusCode::NOT_FOUND);

        assert!(registry.is_empty());
    }

    #[test_case("POST" ; "post")]
    #[test_case("PATCH" ; "patch")]
    #[test_case("OPTIONS" ; "options")]
    #[test_case("HEAD" ; "head")]
    #[tokio::test]
    async fn test_unknown_method_is_404(method: &str) {
        let (app, registry) = test_app();

        assert_eq!(send(&app, method, "/", "6714").await, StatusCode::NOT_FOUND);
        assert!(registry.is_empty());
    }

    #[test_case("PUT" ; "put")]
    #[test_case("GET" ; "get")]
    #[test_case("DELETE" ; "delete")]
    #[tokio::test]
    async fn test_malformed_port_is_400(method: &str) {
        let (app, registry) = test_app();

        for body in ["abc", "", "-1", "67 14", "6714\n"] {
            assert_eq!(send(&app, method, "/", body).await, StatusCode::BAD_REQUEST);
        }
        assert!(registry.is_empty());
    }

    async fn send_for_error(
        app: &Router,
        method: &str,
        uri: &str,
        body: &str,
    ) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::from(body.to_owned()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_error_body() {
        let (app, _) = test_app();

        let (status, body) = send_for_error(&app, "PUT", "/nope", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_PATH");
        assert_eq!(body["error"]["message"], "Path /nope not supported");
        assert!(body["error"].get("consumer").is_none());

        let (_, body) = send_for_error(&app, "GET", "/?x=1", "6714").await;
        assert_eq!(body["error"]["message"], "Path /?x=1 not supported");
    }

    #[tokio::test]
    async fn test_duplicate_put_names_consumer() {
        let (app, _) = test_app();
        assert_eq!(send(&app, "PUT", "/", "6714").await, StatusCode::OK);

        let (status, body) = send_for_error(&app, "PUT", "/", "6714").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "ALREADY_REGISTERED");

        let named: ConsumerIdentity =
            serde_json::from_value(body["error"]["consumer"].clone()).unwrap();
        assert_eq!(named, consumer(6714));
    }

    #[tokio::test]
    async fn test_concurrent_puts_same_consumer() {
        let (app, registry) = test_app();

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..16 {
            let app = app.clone();
            tasks.spawn(async move { send(&app, "PUT", "/", "6714").await });
        }

        let mut ok = 0;
        let mut conflict = 0;
        while let Some(status) = tasks.join_next().await {
            match status.unwrap() {
                StatusCode::OK => ok += 1,
                StatusCode::BAD_REQUEST => conflict += 1,
                other => panic!("unexpected status {}", other),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(conflict, 15);
        assert_eq!(registry.len(), 1);
    }
}
