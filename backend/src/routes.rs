use std::any::Any;

use axum::{
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::handlers;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    with_layers(routes(), state)
}

fn routes() -> Router<AppState> {
    let api_routes = Router::new()
        // Users
        .route("/api/users", post(handlers::users::register_user))
        .route("/api/settings", put(handlers::users::update_settings))
        // Logs
        .route("/api/sleep", post(handlers::logs::upsert_sleep))
        .route(
            "/api/sleep/:telegram_id/:date",
            delete(handlers::logs::delete_sleep),
        )
        .route("/api/weight", post(handlers::logs::upsert_weight))
        .route(
            "/api/weight/:telegram_id/:date",
            delete(handlers::logs::delete_weight),
        )
        // Read side
        .route(
            "/api/dashboard/:telegram_id",
            get(handlers::dashboard::get_dashboard),
        )
        .route(
            "/api/streak/:telegram_id",
            get(handlers::dashboard::get_streak),
        )
        // Chat bot
        .route("/api/telegram/webhook", post(handlers::telegram::webhook));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .fallback(handlers::not_found)
}

fn with_layers(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A panicking handler becomes a 500 `internal_error` instead of a dropped connection.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    AppError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Local};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::db::memory::MemoryStore;

    const OWNER: i64 = 900;

    fn state(store: &MemoryStore) -> AppState {
        AppState {
            store: Arc::new(store.clone()),
            config: Arc::new(Config::for_tests()),
            telegram: None,
        }
    }

    fn app(store: &MemoryStore) -> Router {
        router(state(store))
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn registered() -> MemoryStore {
        let store = MemoryStore::new();
        let (status, _) = call(
            app(&store),
            "POST",
            "/api/users",
            Some(json!({ "telegram_id": OWNER, "username": "owl" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        store
    }

    #[tokio::test]
    async fn test_health() {
        let store = MemoryStore::new();
        let (status, body) = call(app(&store), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_internal_error() {
        let store = MemoryStore::new();
        let routes = routes().route("/api/explode", get(|| async { panic!("exploded") as () }));
        let app = with_layers(routes, state(&store));

        let (status, body) = call(app, "GET", "/api/explode", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "internal_error" }));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let store = MemoryStore::new();
        let (status, body) = call(app(&store), "GET", "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "not_found" }));
    }

    #[tokio::test]
    async fn test_readyz_reports_store_outage() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let (status, body) = call(app(&store), "GET", "/readyz", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["checks"]["database"], "failed");
    }

    #[tokio::test]
    async fn test_post_sleep_returns_derived_fields() {
        let store = registered().await;
        let (status, body) = call(
            app(&store),
            "POST",
            "/api/sleep",
            Some(json!({
                "telegram_id": OWNER,
                "date": "2026-03-01",
                "sleep_start": "23:30",
                "sleep_end": "07:15",
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["hours"], 7.8);
        assert_eq!(body["quality"], 8);
        assert_eq!(body["sleep"]["sleep_start"], "23:30");
        assert_eq!(body["sleep"]["log_date"], "2026-03-01");
    }

    #[tokio::test]
    async fn test_post_sleep_missing_fields() {
        let store = registered().await;
        let (status, body) = call(
            app(&store),
            "POST",
            "/api/sleep",
            Some(json!({ "telegram_id": OWNER, "date": "2026-03-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "missing_fields" }));
    }

    #[tokio::test]
    async fn test_post_sleep_malformed_json() {
        let store = registered().await;
        let (status, body) = call(
            app(&store),
            "POST",
            "/api/sleep",
            Some(json!({ "telegram_id": "not-a-number" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_format");
    }

    #[tokio::test]
    async fn test_post_weight_unknown_user() {
        let store = MemoryStore::new();
        let (status, body) = call(
            app(&store),
            "POST",
            "/api/weight",
            Some(json!({ "telegram_id": OWNER, "date": "2026-03-01", "weight": 70 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "user_not_found");
    }

    #[tokio::test]
    async fn test_storage_outage_is_server_error() {
        let store = registered().await;
        store.set_offline(true);
        let (status, body) = call(
            app(&store),
            "GET",
            &format!("/api/dashboard/{OWNER}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "storage_unavailable" }));
    }

    #[tokio::test]
    async fn test_delete_absent_is_ok() {
        let store = registered().await;
        let (status, body) = call(
            app(&store),
            "DELETE",
            &format!("/api/weight/{OWNER}/2026-03-01"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_settings_partial_update() {
        let store = registered().await;
        call(
            app(&store),
            "PUT",
            "/api/settings",
            Some(json!({ "telegram_id": OWNER, "target_sleep_hours": 8 })),
        )
        .await;
        let (status, body) = call(
            app(&store),
            "PUT",
            "/api/settings",
            Some(json!({ "telegram_id": OWNER, "target_weight_kg": 72.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["target_weight_kg"], 72.0);
        assert_eq!(body["data"]["target_sleep_hours"], 8.0);
    }

    #[tokio::test]
    async fn test_dashboard_and_streak() {
        let store = registered().await;
        let today = Local::now().date_naive();
        for n in 0..9 {
            let date = today - Duration::days(n);
            let (status, _) = call(
                app(&store),
                "POST",
                "/api/sleep",
                Some(json!({
                    "telegram_id": OWNER,
                    "date": date.to_string(),
                    "sleep_start": "22:30",
                    "sleep_end": "06:30",
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = call(
            app(&store),
            "GET",
            &format!("/api/dashboard/{OWNER}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let sleep = body["data"]["sleep"].as_array().unwrap();
        assert_eq!(sleep.len(), 7);
        assert_eq!(sleep[0]["log_date"], today.to_string());
        assert!(body["data"]["weight"].as_array().unwrap().is_empty());

        let (status, body) = call(
            app(&store),
            "GET",
            &format!("/api/streak/{OWNER}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true, "streak": 9, "longest_streak": 9 }));
    }

    #[tokio::test]
    async fn test_webhook_runs_command_without_token() {
        let store = MemoryStore::new();
        let update = json!({
            "update_id": 1,
            "message": {
                "message_id": 1,
                "chat": { "id": OWNER },
                "from": { "id": OWNER, "username": "owl" },
                "text": "/start",
            }
        });
        let (status, body) = call(app(&store), "POST", "/api/telegram/webhook", Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        let (status, _) = call(app(&store), "GET", &format!("/api/dashboard/{OWNER}"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_webhook_acknowledges_garbage() {
        let store = MemoryStore::new();
        let (status, _) = call(
            app(&store),
            "POST",
            "/api/telegram/webhook",
            Some(json!({ "nonsense": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}
