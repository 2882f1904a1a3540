//! Query routing
//!
//! Selects the agents relevant to a query by matching each agent's
//! declared routing keywords against the lowercased query text. When no
//! agent matches, every registered agent is consulted.

use crate::agents::Agent;
use std::sync::Arc;
use tracing::debug;

/// Agents whose routing keywords appear in the query, or all agents when
/// none match. Preserves the input order.
pub fn select_agents(query: &str, agents: &[Arc<dyn Agent>]) -> Vec<Arc<dyn Agent>> {
    let q = query.to_lowercase();

    let matched: Vec<Arc<dyn Agent>> = agents
        .iter()
        .filter(|agent| agent.routing_keywords().iter().any(|kw| q.contains(kw)))
        .cloned()
        .collect();

    if matched.is_empty() {
        debug!(query = %query, "No routing keywords matched; consulting all agents");
        agents.to_vec()
    } else {
        debug!(
            query = %query,
            selected = ?matched.iter().map(|a| a.name()).collect::<Vec<_>>(),
            "Routed query"
        );
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{
        BlockchainAnalyst, ComplianceSentinel, CryptoEconomics, FintechNavigator,
        InvestmentStrategist,
    };

    fn all_agents() -> Vec<Arc<dyn Agent>> {
        vec![
            Arc::new(BlockchainAnalyst::new()),
            Arc::new(ComplianceSentinel::new()),
            Arc::new(CryptoEconomics::new()),
            Arc::new(FintechNavigator::new()),
            Arc::new(InvestmentStrategist::new()),
        ]
    }

    fn selected_names(query: &str) -> Vec<&'static str> {
        select_agents(query, &all_agents())
            .iter()
            .map(|a| a.name())
            .collect()
    }

    #[test]
    fn contract_queries_go_to_the_blockchain_analyst() {
        let names = selected_names("Analyze smart contract security");
        assert!(names.contains(&"blockchain_analyst"));
        assert!(!names.contains(&"fintech_navigator"));
    }

    #[test]
    fn portfolio_queries_go_to_the_strategist() {
        let names = selected_names("Optimize my investment portfolio");
        assert!(names.contains(&"investment_strategist"));
    }

    #[test]
    fn queries_can_span_multiple_agents() {
        let names = selected_names("Is this defi token compliant with regulation?");
        assert!(names.contains(&"crypto_economics"));
        assert!(names.contains(&"regulatory_compliance"));
    }

    #[test]
    fn unmatched_queries_fall_back_to_all_agents() {
        let names = selected_names("hello there");
        assert_eq!(names.len(), 5);
    }
}
