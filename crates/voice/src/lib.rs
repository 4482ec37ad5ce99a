//! Outbound voice calls for generated phone tasks.
//!
//! This crate triggers calls through the Vapi API. An assistant configured
//! in Vapi runs the conversation; this side only supplies the number and,
//! for overview calls, the variables the assistant reads out.
//!
//! # Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), voice::VoiceError> {
//! use voice::{VoiceConfig, VoiceService};
//!
//! let service = VoiceService::new(VoiceConfig {
//!     api_key: std::env::var("VAPI_API_KEY").ok(),
//!     phone_number_id: "phone-number-id".to_string(),
//!     assistant_id: "assistant-id".to_string(),
//!     demo_mode: false,
//!     demo_delay: voice::service::DEFAULT_DEMO_DELAY,
//! })?;
//!
//! let response = service.make_simple_call("+15551234567").await;
//! println!("{}", response.message);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`CallClient`] trait defines how a call is placed
//! - [`VapiClient`] implements it over the Vapi REST API
//! - [`VoiceService`] adds demo mode, timing and failure reporting

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod error;
pub mod service;
pub mod types;

pub use client::{CallClient, VapiClient};
pub use error::VoiceError;
pub use service::{VoiceConfig, VoiceService};
pub use types::{OutboundCallRequest, OutboundCallResponse, SimpleCallRequest};
