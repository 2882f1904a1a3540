//! FinChain Intelligence Network
//!
//! A multi-agent network for financial intelligence that:
//! - Routes each query to the specialized agents relevant to it
//! - Consults the selected agents concurrently
//! - Synthesizes their insights and recommendations with source attribution
//! - Caches synthesized responses and reports per-agent health
//!
//! QUERY PIPELINE:
//! QUERY → CACHE? → ROUTE → CONSULT (concurrent) → SYNTHESIZE → CACHE

pub mod agents;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod registry;
pub mod router;

pub use error::{FinError, Result};

// Re-export common types
pub use config::OrchestratorConfig;
pub use models::*;
pub use orchestrator::{default_network, Orchestrator};
