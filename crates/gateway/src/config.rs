//! Gateway configuration, read from flags or the environment.

use cards::ai::anthropic::default_model;
use cards::{DeepSearchConfig, GeneratorConfig};
use std::convert::Infallible;

use clap::{ArgAction, Parser};
use voice::VoiceConfig;

/// Gateway settings. Every flag can also be set through its env var.
#[derive(Debug, Clone, Parser)]
#[command(name = "gateway")]
#[command(about = "HTTP gateway for task-card generation, deep search and voice calls")]
#[command(version)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Allowed CORS origins, comma-separated
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub cors_origins: Vec<String>,

    /// Serve canned responses instead of calling upstream services
    #[arg(
        long,
        env = "DEMO_MODE",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_demo_mode
    )]
    pub demo_mode: bool,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    /// Model used for card generation and deep search
    #[arg(long, env = "CARDS_MODEL", default_value_t = default_model().to_string())]
    pub cards_model: String,

    /// Vapi private API key
    #[arg(long, env = "VAPI_API_KEY", hide_env_values = true)]
    pub vapi_api_key: Option<String>,

    /// Vapi phone number calls are placed from
    #[arg(long, env = "VAPI_PHONE_NUMBER_ID", default_value = "")]
    pub vapi_phone_number_id: String,

    /// Vapi assistant that runs the calls
    #[arg(long, env = "VAPI_ASSISTANT_ID", default_value = "")]
    pub vapi_assistant_id: String,
}

/// Only a case-insensitive `true` turns demo mode on; any other value is off.
fn parse_demo_mode(value: &str) -> Result<bool, Infallible> {
    Ok(value.trim().eq_ignore_ascii_case("true"))
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            model: self.cards_model.clone(),
            demo_mode: self.demo_mode,
            ..GeneratorConfig::default()
        }
    }

    pub fn search_config(&self) -> DeepSearchConfig {
        DeepSearchConfig {
            model: self.cards_model.clone(),
            demo_mode: self.demo_mode,
            ..DeepSearchConfig::default()
        }
    }

    pub fn voice_config(&self) -> VoiceConfig {
        VoiceConfig {
            api_key: self.vapi_api_key.clone(),
            phone_number_id: self.vapi_phone_number_id.clone(),
            assistant_id: self.vapi_assistant_id.clone(),
            demo_mode: self.demo_mode,
            demo_delay: voice::service::DEFAULT_DEMO_DELAY,
        }
    }
}
