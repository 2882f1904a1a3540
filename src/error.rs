//! Error types for the FinChain Intelligence Network

use thiserror::Error;

/// Result type alias for network operations
pub type Result<T> = std::result::Result<T, FinError>;

#[derive(Error, Debug)]
pub enum FinError {

    // =============================
    // Agent & Orchestration Errors
    // =============================

    #[error("Agent error: {0}")]
    AgentError(String),

    #[error("Agent timed out: {0}")]
    AgentTimeout(String),

    #[error("No agents produced a response: {0}")]
    NoAgentsResponded(String),

    // =============================
    // Domain Lookup Errors
    // =============================

    #[error("Unsupported network: {0}")]
    UnsupportedNetwork(String),

    #[error("Unknown protocol: {0}")]
    UnknownProtocol(String),

    #[error("Unknown trend: {0}")]
    UnknownTrend(String),

    #[error("Unknown jurisdiction: {0}")]
    UnknownJurisdiction(String),

    #[error("No regulatory data for region: {0}")]
    UnknownRegion(String),
}
