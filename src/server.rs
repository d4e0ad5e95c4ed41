//! Placeholder REST server.
//!
//! Every endpoint answers with a static payload; nothing here touches the
//! dashboard's store. Unknown routes get a JSON 404 and a panicking handler
//! is turned into a JSON 500.

use std::any::Any;
use std::net::{IpAddr, SocketAddr};

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::{CatchPanicLayer, ResponseForPanic},
    cors::CorsLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::config::Environment;
use crate::error::{Error, Result};

/// Where and how to run the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
}

/// Turns a handler panic into the generic JSON 500 response.
#[derive(Debug, Clone, Copy)]
pub struct PanicResponder {
    environment: Environment,
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let detail = if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = err.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "unknown panic".to_string()
        };
        error!("Request handler panicked: {detail}");
        internal_error(&detail, self.environment).into_response()
    }
}

pub fn catch_panic_layer(environment: Environment) -> CatchPanicLayer<PanicResponder> {
    CatchPanicLayer::custom(PanicResponder { environment })
}

/// The JSON 500 body. Production builds leave the error detail out.
pub fn internal_error(detail: &str, environment: Environment) -> (StatusCode, Json<Value>) {
    let error = match environment {
        Environment::Production => json!({}),
        Environment::Development => json!({ "detail": detail }),
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Something went wrong!", "error": error })),
    )
}

/// Build the router with all stub endpoints.
pub fn router(environment: Environment) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/projects", get(list_projects))
        .route("/api/tasks", get(list_tasks))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(catch_panic_layer(environment)),
        )
}

/// Bind and serve until Ctrl+C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let host: IpAddr = config
        .host
        .parse()
        .map_err(|_| Error::InvalidAddress(config.host.clone()))?;
    let addr = SocketAddr::from((host, config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    println!("ProHUB Server running on port {}", config.port);
    println!("Environment: {}", config.environment.as_str());
    println!("Server URL: http://{}", addr);
    info!(%addr, environment = config.environment.as_str(), "Server listening");

    axum::serve(listener, router(config.environment))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {e}");
    }
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "ProHUB Server is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "active",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn list_projects() -> Json<Value> {
    Json(json!({ "projects": [], "message": "Projects endpoint ready" }))
}

async fn list_tasks() -> Json<Value> {
    Json(json!({ "tasks": [], "message": "Tasks endpoint ready" }))
}

async fn login() -> Json<Value> {
    Json(json!({ "message": "Login endpoint ready", "token": null }))
}

async fn register() -> Json<Value> {
    Json(json!({ "message": "Register endpoint ready", "user": null }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Route not found" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root_reports_running() {
        let (status, body) = call(router(Environment::Development), Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "active");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_has_timestamp() {
        let (status, body) = call(router(Environment::Development), Method::GET, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].as_str().unwrap().parse::<chrono::DateTime<Utc>>().is_ok());
    }

    #[tokio::test]
    async fn test_collections_are_empty() {
        let (_, projects) = call(router(Environment::Development), Method::GET, "/api/projects").await;
        assert_eq!(projects["projects"], json!([]));
        let (_, tasks) = call(router(Environment::Development), Method::GET, "/api/tasks").await;
        assert_eq!(tasks["tasks"], json!([]));
    }

    #[tokio::test]
    async fn test_auth_stubs() {
        let (status, login) = call(router(Environment::Development), Method::POST, "/api/auth/login").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(login["token"], Value::Null);
        let (_, register) = call(router(Environment::Development), Method::POST, "/api/auth/register").await;
        assert_eq!(register["user"], Value::Null);
        assert_eq!(register["message"], "Register endpoint ready");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = call(router(Environment::Development), Method::GET, "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Route not found" }));
    }

    async fn boom() -> &'static str {
        panic!("kaboom")
    }

    #[tokio::test]
    async fn test_panic_becomes_json_500() {
        let app = Router::new()
            .route("/boom", get(boom))
            .layer(catch_panic_layer(Environment::Development));
        let (status, body) = call(app, Method::GET, "/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Something went wrong!");
        assert_eq!(body["error"]["detail"], "kaboom");

        let app = Router::new()
            .route("/boom", get(boom))
            .layer(catch_panic_layer(Environment::Production));
        let (_, body) = call(app, Method::GET, "/boom").await;
        assert_eq!(body["error"], json!({}));
    }
}
