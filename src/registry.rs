//! Agent registry
//!
//! Holds the registered agents behind a read-write lock so registration
//! works after the orchestrator has been shared across tasks.

use crate::agents::Agent;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub struct AgentRegistry {
    agents: RwLock<HashMap<String, Arc<dyn Agent>>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: RwLock::new(HashMap::new()),
        }
    }

    /// Register an agent under its own name. Re-registering a name
    /// replaces the previous agent.
    pub async fn register(&self, agent: Arc<dyn Agent>) {
        let name = agent.name().to_string();
        let mut agents = self.agents.write().await;

        if agents.insert(name.clone(), agent).is_some() {
            warn!(agent = %name, "Replacing previously registered agent");
        } else {
            info!(agent = %name, "Registered agent");
        }
    }

    pub async fn get(&self, name: &str) -> Option<Arc<dyn Agent>> {
        let agents = self.agents.read().await;
        agents.get(name).cloned()
    }

    /// Registered agent names, sorted for deterministic iteration
    pub async fn names(&self) -> Vec<String> {
        let agents = self.agents.read().await;
        let mut names: Vec<String> = agents.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn len(&self) -> usize {
        let agents = self.agents.read().await;
        agents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// All registered agents, ordered by name
    pub async fn snapshot(&self) -> Vec<Arc<dyn Agent>> {
        let agents = self.agents.read().await;
        let mut entries: Vec<(&String, &Arc<dyn Agent>)> = agents.iter().collect();
        entries.sort_by_key(|(name, _)| name.clone());
        entries.into_iter().map(|(_, agent)| agent.clone()).collect()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{BlockchainAnalyst, CryptoEconomics};

    #[tokio::test]
    async fn register_and_lookup() {
        let registry = AgentRegistry::new();
        registry.register(Arc::new(BlockchainAnalyst::new())).await;
        registry.register(Arc::new(CryptoEconomics::new())).await;

        assert_eq!(registry.len().await, 2);
        assert!(registry.get("blockchain_analyst").await.is_some());
        assert!(registry.get("unknown").await.is_none());
        assert_eq!(
            registry.names().await,
            vec!["blockchain_analyst", "crypto_economics"]
        );
    }

    #[tokio::test]
    async fn duplicate_registration_replaces() {
        let registry = AgentRegistry::new();
        registry.register(Arc::new(BlockchainAnalyst::new())).await;
        registry.register(Arc::new(BlockchainAnalyst::new())).await;

        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn snapshot_is_name_ordered() {
        let registry = AgentRegistry::new();
        registry.register(Arc::new(CryptoEconomics::new())).await;
        registry.register(Arc::new(BlockchainAnalyst::new())).await;

        let snapshot = registry.snapshot().await;
        let names: Vec<&str> = snapshot.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["blockchain_analyst", "crypto_economics"]);
    }
}
