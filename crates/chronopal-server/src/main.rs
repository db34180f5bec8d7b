use std::sync::Arc;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;
mod services;

use adapters::{InMemoryPetRepository, OpenAiChatProvider, PgPetRepository, SystemClock};
use application::PetService;
use chronopal::{LlmProvider, PetLifecycle, PetRepository};
use config::{AppConfig, StorageBackend};
use services::personality::PersonalityResponder;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub pet_service: Arc<PetService>,
    /// Bearer key for protected routes; `None` disables auth
    pub api_key: Option<Arc<String>>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "ChronoPal API is running - your pet is waiting".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full router: protected pet routes, health check and API docs
pub fn app(state: AppState) -> Router {
    let protected_routes = Router::new()
        .merge(routes::pet::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("ChronoPal API initializing...");

    let config = AppConfig::from_secrets(&secrets)?;

    if config.api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!("No CHRONOPAL_API_KEY set - authentication disabled");
    }

    let repo: Arc<dyn PetRepository> = match config.storage {
        StorageBackend::Postgres => {
            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations completed");
            Arc::new(PgPetRepository::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("STORAGE_BACKEND=memory - pets are lost on restart");
            Arc::new(InMemoryPetRepository::new())
        }
    };

    let llm: Option<Arc<dyn LlmProvider>> = match &config.openai_api_key {
        Some(key) => {
            let provider = OpenAiChatProvider::new(key.clone()).with_model(&config.openai_model);
            tracing::info!("LLM personality enabled ({})", provider.model_id());
            Some(Arc::new(provider) as Arc<dyn LlmProvider>)
        }
        None => {
            tracing::warn!("No OPENAI_API_KEY set - using rule-based replies");
            None
        }
    };

    let pet_service = PetService::new(
        repo,
        Arc::new(PersonalityResponder::new(llm)),
        Arc::new(SystemClock),
        PetLifecycle::new(Some(config.lifecycle.clone())),
    );

    let state = AppState {
        pet_service: Arc::new(pet_service),
        api_key: config.api_key.map(Arc::new),
    };

    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("ChronoPal API ready");

    Ok(app(state).into())
}
