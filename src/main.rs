use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{Request, Response, StatusCode};
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{MakeSpan, OnResponse, TraceLayer},
};
use tracing::Span;
use tracing_subscriber::EnvFilter;

mod catalog;
mod config;
mod error;
mod llm;
mod routes;
mod tools;

use config::Config;
use error::ApiError;
use llm::{LlmClient, ProviderAdapter, anthropic::AnthropicAdapter, openai::OpenAiCompatAdapter};

#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<HashMap<String, Arc<LlmClient>>>,
}

#[derive(Clone)]
struct HttpMakeSpan;

impl<B> MakeSpan<B> for HttpMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let method = request.method().as_str();
        let path = request.uri().path();

        tracing::info_span!(
            "HTTP request",
            otel.name = %format!("{} {}", method, path),
            http.method = %method,
            http.route = %path,
            http.target = %request.uri(),
            http.user_agent = request.headers()
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or(""),
            http.response.status_code = tracing::field::Empty,
        )
    }
}

#[derive(Clone)]
struct HttpOnResponse;

impl<B> OnResponse<B> for HttpOnResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        let status = response.status().as_u16();
        span.record("http.response.status_code", status as i64);

        tracing::info!(
            http.response.status_code = status,
            latency_ms = latency.as_secs_f64() * 1000.0,
            "finished processing request"
        );
    }
}

fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let registry = Arc::new(tools::builtin_registry());

    let anthropic: Arc<dyn ProviderAdapter> = Arc::new(AnthropicAdapter::new(
        config.anthropic_api_key.as_deref().unwrap_or(""),
        catalog::anthropic::catalog()?,
    ));
    let openai: Arc<dyn ProviderAdapter> = Arc::new(OpenAiCompatAdapter::openai(
        config.openai_api_key.as_deref().unwrap_or(""),
        catalog::openai::catalog()?,
    ));
    let xai: Arc<dyn ProviderAdapter> = Arc::new(OpenAiCompatAdapter::xai(
        config.xai_api_key.as_deref().unwrap_or(""),
        &config.xai_base_url,
        catalog::xai::catalog()?,
    ));

    let mut providers = HashMap::new();
    for adapter in [anthropic, openai, xai] {
        providers.insert(
            adapter.name().to_string(),
            Arc::new(LlmClient::new(adapter, registry.clone())),
        );
    }

    Ok(AppState {
        providers: Arc::new(providers),
    })
}

fn build_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/healthz", get(routes::health::health))
        .route("/{provider}/email", post(routes::tasks::email))
        .route("/{provider}/rewrite", post(routes::tasks::rewrite))
        .route(
            "/{provider}/prompt_response",
            post(routes::tasks::prompt_response),
        )
        .route("/{provider}/summarize", post(routes::tasks::summarize))
        .route("/{provider}/models", get(routes::models::list_models))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(HttpMakeSpan)
                .on_response(HttpOnResponse),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        port = config.port,
        environment = %config.environment,
        "Starting llm-gateway"
    );

    let state = build_state(&config)?;

    tracing::info!(
        providers = ?state.providers.keys().collect::<Vec<_>>(),
        "provider adapters initialized"
    );

    let app = build_router(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            port: 8080,
            environment: "test".to_string(),
            anthropic_api_key: None,
            openai_api_key: None,
            xai_api_key: None,
            xai_base_url: llm::openai::XAI_BASE_URL.to_string(),
            request_timeout_secs: 300,
        }
    }

    #[test]
    fn test_state_has_all_three_providers() {
        let state = build_state(&test_config()).unwrap();
        for provider in ["anthropic", "openai", "xai"] {
            let client = state.providers.get(provider).unwrap();
            assert_eq!(client.provider(), provider);
            assert!(!client.model_ids().is_empty());
        }
        assert_eq!(state.providers.len(), 3);
    }

    #[test]
    fn test_unknown_provider_lookup_is_not_found() {
        let state = build_state(&test_config()).unwrap();
        let err = routes::provider_client(&state, "google")
            .err()
            .expect("unknown provider should miss");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_router_builds() {
        let state = build_state(&test_config()).unwrap();
        let _app = build_router(state, &test_config());
    }
}
