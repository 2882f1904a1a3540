//! Runtime configuration
//!
//! Defaults are tuned for the demo network; both knobs can be overridden
//! through environment variables (`FIN_CACHE_TTL_SECS`, `FIN_AGENT_TIMEOUT_SECS`).

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// How long a synthesized response stays servable from cache
    pub cache_ttl: Duration,
    /// Upper bound on a single agent answering one query
    pub agent_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(300),
            agent_timeout: Duration::from_secs(10),
        }
    }
}

impl OrchestratorConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_ttl: env_secs("FIN_CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl),
            agent_timeout: env_secs("FIN_AGENT_TIMEOUT_SECS").unwrap_or(defaults.agent_timeout),
        }
    }
}

fn env_secs(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.agent_timeout, Duration::from_secs(10));
    }

    // Both env vars are set in one test so parallel test runs never see
    // each other's process-wide state.
    #[test]
    fn env_overrides_apply_and_bad_values_fall_back() {
        env::set_var("FIN_CACHE_TTL_SECS", "60");
        env::set_var("FIN_AGENT_TIMEOUT_SECS", "not-a-number");
        let config = OrchestratorConfig::from_env();
        env::remove_var("FIN_CACHE_TTL_SECS");
        env::remove_var("FIN_AGENT_TIMEOUT_SECS");

        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.agent_timeout, Duration::from_secs(10));
    }
}
