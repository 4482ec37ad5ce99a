//! HTTP server wiring.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use cards::{AIProvider, AnthropicProvider, CardGenerator, DeepSearch};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use voice::VoiceService;

use crate::config::Config;
use crate::handlers::{agents, health, vapi};

/// Long-lived services shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<CardGenerator>,
    /// Absent when no model credentials were configured
    pub search: Option<Arc<DeepSearch>>,
    /// Absent when no Vapi credentials were configured
    pub voice: Option<Arc<VoiceService>>,
    pub demo_mode: bool,
}

impl AppState {
    /// Build every service from configuration.
    ///
    /// Missing credentials disable deep search or voice calls with a
    /// warning rather than failing startup.
    pub fn from_config(config: &Config) -> Self {
        let provider = config
            .anthropic_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .map_or_else(AnthropicProvider::from_env, AnthropicProvider::new);

        if !config.demo_mode && !provider.is_configured() {
            warn!("ANTHROPIC_API_KEY is not set; card generation will fail until it is");
        }

        let provider: Arc<dyn AIProvider> = Arc::new(provider);
        let generator = CardGenerator::new(provider.clone(), config.generator_config());

        info!(agent_id = generator.agent_id(), "Card generator ready");

        let search = match DeepSearch::new(provider, config.search_config()) {
            Ok(search) => {
                info!(agent_id = search.agent_id(), "Deep search ready");
                Some(Arc::new(search))
            }
            Err(e) => {
                warn!(error = %e, "Deep search disabled");
                None
            }
        };

        let voice = match VoiceService::new(config.voice_config()) {
            Ok(voice) => Some(Arc::new(voice)),
            Err(e) => {
                warn!(error = %e, "Voice calls disabled");
                None
            }
        };

        Self {
            generator: Arc::new(generator),
            search,
            voice,
            demo_mode: config.demo_mode,
        }
    }
}

/// Build the HTTP router.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/agents/new-card", post(agents::new_card))
        .route("/agents/deep-search", post(agents::deep_search))
        .route("/vapi/outbound-call", post(vapi::outbound_call))
        .route("/vapi/simple-call", post(vapi::simple_call))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // Wildcards are not allowed together with credentials
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Start the HTTP server.
pub async fn run_server(config: &Config) -> Result<()> {
    let state = AppState::from_config(config);
    let app = build_router(state, &config.cors_origins);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!(addr = %addr, demo_mode = config.demo_mode, "Gateway listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
