use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use blocklingo::{Vocabularies, load_all_vocabularies_from_dir};
use blocklingo_translate::{Direction, DropdownTranslator, MappingTable, Pipeline, TranslateError};

mod config;

use config::ServerConfig;

const MISSING_FIELDS: &str = "Missing \"code\" or \"direction\" in request body.";

/// Characters of submitted code echoed into request logs
const LOGGED_CODE_CHARS: usize = 50;

#[derive(Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_code: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_code: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Vocabularies, mapping and strategy, loaded once at start-up
pub struct AppState {
    pub vocabularies: Vocabularies,
    pub mappings: MappingTable,
    pub translator: Box<dyn DropdownTranslator>,
}

impl AppState {
    pub fn load(config: &ServerConfig) -> Result<Self, TranslateError> {
        let vocabularies = load_all_vocabularies_from_dir(&config.locales_dir)?;
        let mappings = MappingTable::from_file(&config.dropdown_map, &config.mapping)?;
        info!(
            locales = ?vocabularies.locales(),
            mapping = %config.mapping,
            strategy = %config.strategy,
            "Loaded translation data"
        );
        Ok(AppState {
            vocabularies,
            mappings,
            translator: config.strategy.translator(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::load(&config)
        .map_err(|e| format!("Failed to initialize translator: {}", e))?;

    info!("Starting blocklingo translation server");

    let listener = tokio::net::TcpListener::bind(config.address()).await?;
    info!("Server running at http://{}", config.address());

    axum::serve(listener, app(Arc::new(state))).await?;

    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/translate", post(translate_code))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "blocklingo translation API is running!"
}

async fn translate_code(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;

    let code = request.code.filter(|code| !code.is_empty());
    let direction = request.direction.filter(|direction| !direction.is_empty());
    let (Some(code), Some(direction)) = (code, direction) else {
        return Err(bad_request(MISSING_FIELDS.to_string()));
    };

    let direction: Direction = direction
        .parse()
        .map_err(|e: TranslateError| bad_request(e.to_string()))?;

    info!(
        "Translating {} code '{}'",
        direction,
        code.chars().take(LOGGED_CODE_CHARS).collect::<String>()
    );

    let pipeline = Pipeline::new(
        &state.vocabularies,
        &state.mappings,
        state.translator.as_ref(),
    );
    match pipeline.translate(&code, &direction) {
        Ok(translated_code) => Ok(Json(TranslateResponse { translated_code })),
        Err(failure) => {
            warn!(direction = %direction, stage = %failure.stage, "Translation failed: {}", failure.error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: failure.error.to_string(),
                    translated_code: Some(failure.fallback),
                }),
            ))
        }
    }
}

fn bad_request(error: String) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error,
            translated_code: None,
        }),
    )
}
