//! Orchestrator for the FinChain Intelligence Network
//!
//! Routes each query to the relevant agents, consults them concurrently,
//! and synthesizes their findings into one attributed response.

use crate::agents::{
    Agent, BlockchainAnalyst, ComplianceSentinel, CryptoEconomics, FintechNavigator,
    InvestmentStrategist,
};
use crate::cache::ResponseCache;
use crate::config::OrchestratorConfig;
use crate::error::FinError;
use crate::models::{
    AgentFailure, AgentResponse, HealthState, NetworkHealth, SourcedFinding, SynthesizedResponse,
};
use crate::registry::AgentRegistry;
use crate::router;
use crate::Result;
use chrono::Utc;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

type AgentOutcome = (String, std::result::Result<AgentResponse, String>);

pub struct Orchestrator {
    registry: AgentRegistry,
    cache: ResponseCache,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(config: OrchestratorConfig) -> Self {
        info!("Initializing orchestrator");
        Self {
            registry: AgentRegistry::new(),
            cache: ResponseCache::new(config.cache_ttl),
            config,
        }
    }

    /// Register an agent with the network. Clears the response cache,
    /// since routing depends on the registered set.
    pub async fn register_agent(&self, agent: Arc<dyn Agent>) {
        self.registry.register(agent).await;
        self.cache.clear().await;
    }

    pub async fn registered_agents(&self) -> Vec<String> {
        self.registry.names().await
    }

    /// Capability lists of all registered agents, keyed by agent name
    pub async fn agent_capabilities(&self) -> HashMap<String, Vec<String>> {
        let mut capabilities = HashMap::new();
        for agent in self.registry.snapshot().await {
            capabilities.insert(
                agent.name().to_string(),
                agent.capabilities().iter().map(|c| c.to_string()).collect(),
            );
        }
        capabilities
    }

    pub async fn cached_responses(&self) -> usize {
        self.cache.len().await
    }

    /// Route a query to the relevant agents and synthesize their answers
    pub async fn process_query(&self, query: &str) -> Result<SynthesizedResponse> {
        info!(query = %query, "Processing query");

        if let Some(cached) = self.cache.get(query).await {
            return Ok(cached);
        }

        let agents = self.registry.snapshot().await;
        if agents.is_empty() {
            return Err(FinError::NoAgentsResponded(
                "no agents registered".to_string(),
            ));
        }

        let selected = router::select_agents(query, &agents);
        let outcomes = self.dispatch(query, &selected).await;
        let response = synthesize(query, outcomes)?;

        self.cache.put(query, response.clone()).await;
        Ok(response)
    }

    /// Consult the selected agents concurrently, bounding each by the
    /// configured timeout. Outcomes keep the selection order.
    async fn dispatch(&self, query: &str, selected: &[Arc<dyn Agent>]) -> Vec<AgentOutcome> {
        let limit = self.config.agent_timeout;

        let calls = selected.iter().map(|agent| {
            let agent = agent.clone();
            let query = query.to_string();
            async move {
                let name = agent.name().to_string();
                let outcome = match timeout(limit, agent.process_query(&query)).await {
                    Ok(Ok(response)) => Ok(response),
                    Ok(Err(e)) => {
                        warn!(agent = %name, error = %e, "Agent failed");
                        Err(e.to_string())
                    }
                    Err(_) => {
                        warn!(agent = %name, timeout = ?limit, "Agent timed out");
                        Err(FinError::AgentTimeout(name.clone()).to_string())
                    }
                };
                (name, outcome)
            }
        });

        join_all(calls).await
    }

    /// Health of the orchestrator and every registered agent. The network
    /// is degraded as soon as any agent is not healthy.
    pub async fn health_check(&self) -> NetworkHealth {
        let agents = self.registry.snapshot().await;
        let mut results = HashMap::with_capacity(agents.len());
        let mut status = HealthState::Healthy;

        for agent in agents {
            let health = agent.health_check().await;
            if health.status != HealthState::Healthy {
                status = HealthState::Degraded;
            }
            results.insert(agent.name().to_string(), health);
        }

        NetworkHealth {
            status,
            agent_count: results.len(),
            agents: results,
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(OrchestratorConfig::default())
    }
}

/// Merge per-agent responses into one attributed response. Fails only
/// when every consulted agent failed.
fn synthesize(query: &str, outcomes: Vec<AgentOutcome>) -> Result<SynthesizedResponse> {
    let mut agents_consulted = Vec::new();
    let mut insights = Vec::new();
    let mut recommendations = Vec::new();
    let mut failures = Vec::new();
    let mut confidence_sum = 0.0;

    for (agent, outcome) in outcomes {
        match outcome {
            Ok(response) => {
                for content in response.insights {
                    insights.push(SourcedFinding {
                        content,
                        source: agent.clone(),
                    });
                }
                for content in response.recommendations {
                    recommendations.push(SourcedFinding {
                        content,
                        source: agent.clone(),
                    });
                }
                confidence_sum += response.confidence;
                agents_consulted.push(agent);
            }
            Err(error) => failures.push(AgentFailure { agent, error }),
        }
    }

    if agents_consulted.is_empty() {
        return Err(FinError::NoAgentsResponded(format!(
            "all {} consulted agents failed",
            failures.len()
        )));
    }

    let confidence = confidence_sum / agents_consulted.len() as f64;

    debug!(
        agents = agents_consulted.len(),
        failed = failures.len(),
        confidence,
        "Synthesized response"
    );

    Ok(SynthesizedResponse {
        query_id: Uuid::new_v4(),
        query: query.to_string(),
        agents_consulted,
        insights,
        recommendations,
        failures,
        confidence,
        generated_at: Utc::now(),
    })
}

/// Orchestrator pre-loaded with all five specialized agents
pub async fn default_network(config: OrchestratorConfig) -> Orchestrator {
    let orchestrator = Orchestrator::new(config);

    orchestrator
        .register_agent(Arc::new(BlockchainAnalyst::new()))
        .await;
    orchestrator
        .register_agent(Arc::new(FintechNavigator::new()))
        .await;
    orchestrator
        .register_agent(Arc::new(InvestmentStrategist::new()))
        .await;
    orchestrator
        .register_agent(Arc::new(CryptoEconomics::new()))
        .await;
    orchestrator
        .register_agent(Arc::new(ComplianceSentinel::new()))
        .await;

    orchestrator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AgentHealth;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FailingAgent;

    #[async_trait]
    impl Agent for FailingAgent {
        fn name(&self) -> &'static str {
            "failing_agent"
        }

        fn description(&self) -> &'static str {
            "always fails"
        }

        fn capabilities(&self) -> Vec<&'static str> {
            vec!["fail"]
        }

        fn routing_keywords(&self) -> &'static [&'static str] {
            &["blockchain"]
        }

        async fn process_query(&self, _query: &str) -> Result<AgentResponse> {
            Err(FinError::AgentError("backing store offline".to_string()))
        }

        async fn health_check(&self) -> AgentHealth {
            AgentHealth::degraded(self.name(), "backing store offline")
        }
    }

    struct SlowAgent;

    #[async_trait]
    impl Agent for SlowAgent {
        fn name(&self) -> &'static str {
            "slow_agent"
        }

        fn description(&self) -> &'static str {
            "never answers in time"
        }

        fn capabilities(&self) -> Vec<&'static str> {
            vec!["stall"]
        }

        fn routing_keywords(&self) -> &'static [&'static str] {
            &["blockchain"]
        }

        async fn process_query(&self, _query: &str) -> Result<AgentResponse> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(AgentResponse::new().scored())
        }
    }

    #[tokio::test]
    async fn routed_query_is_synthesized_with_attribution() {
        let orchestrator = default_network(OrchestratorConfig::default()).await;

        let response = orchestrator
            .process_query("Analyze smart contract security")
            .await
            .unwrap();

        assert!(response
            .agents_consulted
            .contains(&"blockchain_analyst".to_string()));
        assert!(response
            .insights
            .iter()
            .all(|finding| !finding.source.is_empty()));
        assert!(!response.insights.is_empty());
        assert!(response.failures.is_empty());
    }

    #[tokio::test]
    async fn unmatched_query_consults_every_agent() {
        let orchestrator = default_network(OrchestratorConfig::default()).await;

        let response = orchestrator.process_query("hello").await.unwrap();
        assert_eq!(response.agents_consulted.len(), 5);
    }

    #[tokio::test]
    async fn confidence_is_the_mean_over_responders() {
        let orchestrator = default_network(OrchestratorConfig::default()).await;

        let response = orchestrator
            .process_query("Optimize my investment portfolio")
            .await
            .unwrap();

        assert!(response.confidence > 0.0 && response.confidence <= 0.9);
    }

    #[tokio::test]
    async fn failed_agents_are_reported_not_fatal() {
        let orchestrator = Orchestrator::default();
        orchestrator
            .register_agent(Arc::new(BlockchainAnalyst::new()))
            .await;
        orchestrator.register_agent(Arc::new(FailingAgent)).await;

        let response = orchestrator
            .process_query("Monitor blockchain transactions")
            .await
            .unwrap();

        assert_eq!(response.agents_consulted, vec!["blockchain_analyst"]);
        assert_eq!(response.failures.len(), 1);
        assert_eq!(response.failures[0].agent, "failing_agent");
    }

    #[tokio::test]
    async fn all_agents_failing_is_an_error() {
        let orchestrator = Orchestrator::default();
        orchestrator.register_agent(Arc::new(FailingAgent)).await;

        let err = orchestrator
            .process_query("blockchain status")
            .await
            .unwrap_err();
        assert!(matches!(err, FinError::NoAgentsResponded(_)));
    }

    #[tokio::test]
    async fn no_registered_agents_is_an_error() {
        let orchestrator = Orchestrator::default();
        let err = orchestrator.process_query("anything").await.unwrap_err();
        assert!(matches!(err, FinError::NoAgentsResponded(_)));
    }

    #[tokio::test]
    async fn slow_agents_time_out_and_are_reported() {
        let config = OrchestratorConfig {
            agent_timeout: Duration::from_millis(50),
            ..OrchestratorConfig::default()
        };
        let orchestrator = Orchestrator::new(config);
        orchestrator
            .register_agent(Arc::new(BlockchainAnalyst::new()))
            .await;
        orchestrator.register_agent(Arc::new(SlowAgent)).await;

        let response = orchestrator
            .process_query("blockchain gas prices")
            .await
            .unwrap();

        assert_eq!(response.failures.len(), 1);
        assert!(response.failures[0].error.contains("timed out"));
    }

    #[tokio::test]
    async fn repeated_queries_hit_the_cache() {
        let orchestrator = default_network(OrchestratorConfig::default()).await;

        let first = orchestrator
            .process_query("Analyze smart contract security")
            .await
            .unwrap();
        let second = orchestrator
            .process_query("Analyze smart contract security")
            .await
            .unwrap();

        // Same stored response, not a recomputation
        assert_eq!(first.query_id, second.query_id);
        assert_eq!(orchestrator.cached_responses().await, 1);
    }

    #[tokio::test]
    async fn registration_invalidates_the_cache() {
        let orchestrator = default_network(OrchestratorConfig::default()).await;
        orchestrator.process_query("blockchain").await.unwrap();
        assert_eq!(orchestrator.cached_responses().await, 1);

        orchestrator.register_agent(Arc::new(FailingAgent)).await;
        assert_eq!(orchestrator.cached_responses().await, 0);
    }

    #[tokio::test]
    async fn health_check_degrades_with_unhealthy_agents() {
        let orchestrator = default_network(OrchestratorConfig::default()).await;
        let health = orchestrator.health_check().await;
        assert_eq!(health.status, HealthState::Healthy);
        assert_eq!(health.agent_count, 5);

        orchestrator.register_agent(Arc::new(FailingAgent)).await;
        let health = orchestrator.health_check().await;
        assert_eq!(health.status, HealthState::Degraded);
        assert_eq!(health.agent_count, 6);
    }
}
