//! Route handlers.

pub mod agents;
pub mod health;
pub mod vapi;

pub use agents::NewCardRequest;
pub use health::HealthResponse;
