//! Agent trait and the specialized agents of the network
//!
//! Agents are deterministic knowledge engines: each owns a slice of the
//! financial domain, declares the query terms it should be routed, and
//! answers with insights, recommendations and a confidence score.

use crate::models::{AgentHealth, AgentResponse};
use crate::Result;
use async_trait::async_trait;

pub mod blockchain;
pub mod compliance;
pub mod economics;
pub mod fintech;
pub mod strategist;

pub use blockchain::BlockchainAnalyst;
pub use compliance::ComplianceSentinel;
pub use economics::CryptoEconomics;
pub use fintech::FintechNavigator;
pub use strategist::InvestmentStrategist;

/// Trait for a single specialized agent
#[async_trait]
pub trait Agent: Send + Sync {
    /// Stable identifier used for registration, routing and attribution
    fn name(&self) -> &'static str;

    /// One-line description of what the agent covers
    fn description(&self) -> &'static str;

    /// Human-readable capability list. Must be non-empty.
    fn capabilities(&self) -> Vec<&'static str>;

    /// Query terms that make this agent relevant. Matched case-insensitively
    /// as substrings by the router.
    fn routing_keywords(&self) -> &'static [&'static str];

    /// Answer a query within the agent's domain
    async fn process_query(&self, query: &str) -> Result<AgentResponse>;

    /// Verify the agent is functioning and its data is loaded
    async fn health_check(&self) -> AgentHealth {
        AgentHealth::healthy(self.name())
    }
}

/// True when any keyword appears in the lowercased query
pub(crate) fn mentions_any(query_lower: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| query_lower.contains(t))
}
