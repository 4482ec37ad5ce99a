//! HTTP gateway for the card, deep-search and voice services.
//!
//! Routes:
//! - `POST /agents/new-card` generates a validated task-card batch
//! - `POST /agents/deep-search` answers a research prompt
//! - `POST /vapi/outbound-call` and `POST /vapi/simple-call` trigger calls
//! - `GET /health`

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use error::ApiError;
pub use server::{build_router, run_server, AppState};
