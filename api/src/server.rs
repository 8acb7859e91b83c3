//! Axum HTTP server configuration with GraphQL support

use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    response::{Html, IntoResponse},
    routing::get,
};
use marketplace_db::db::MarketDb;
use serde::Serialize;
use tower_http::{
    CompressionLevel,
    compression::{CompressionLayer, predicate::SizeAbove},
    cors::CorsLayer,
    trace::TraceLayer,
};

use crate::{
    config::ApiConfig,
    readiness::{CheckStatus, ReadinessChecker},
    schema::{MarketplaceSchema, build_schema},
};

/// Health check response for liveness probe
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    version: &'static str,
    checks: ReadinessChecks,
}

#[derive(Serialize)]
struct ReadinessChecks {
    database: CheckStatus,
}

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub schema: MarketplaceSchema,
    pub playground_enabled: bool,
    pub readiness: ReadinessChecker,
}

fn cors_layer(allowed: &[String]) -> CorsLayer {
    if allowed.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Build the Axum application router
pub fn build_app(db: MarketDb, config: &ApiConfig) -> Router {
    let state = AppState {
        schema: build_schema(db.clone(), config.pagination),
        playground_enabled: config.playground_enabled,
        readiness: ReadinessChecker::new(db),
    };

    Router::new()
        .route("/graphql", get(graphql_playground).post(graphql_handler))
        .route("/healthz", get(healthz_handler))
        .route("/readyz", get(readyz_handler))
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(
            CompressionLayer::new()
                .zstd(true)
                .quality(CompressionLevel::Default)
                .compress_when(SizeAbove::new(1024)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GraphQL query and mutation handler
async fn graphql_handler(State(state): State<AppState>, request: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(request.into_inner()).await.into()
}

/// GraphQL Playground UI, only served when enabled in the configuration
async fn graphql_playground(State(state): State<AppState>) -> impl IntoResponse {
    if state.playground_enabled {
        Html(playground_source(GraphQLPlaygroundConfig::new("/graphql"))).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            "GraphQL Playground is disabled. Use POST /graphql for queries.",
        )
            .into_response()
    }
}

/// Liveness probe endpoint
async fn healthz_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe endpoint, 503 while the database is unreachable
async fn readyz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let database = state.readiness.check_database().await;
    let ready = database.is_healthy();

    let response = ReadinessResponse {
        status: if ready { "ready" } else { "not_ready" },
        version: env!("CARGO_PKG_VERSION"),
        checks: ReadinessChecks { database },
    };

    let code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(response))
}
