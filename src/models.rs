//! Core data models shared across the network

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    /// Infer a risk profile from free-form query text. Defaults to moderate.
    pub fn from_query(query: &str) -> Self {
        let q = query.to_lowercase();
        if ["conservative", "safe", "low risk", "cautious"]
            .iter()
            .any(|t| q.contains(t))
        {
            RiskProfile::Conservative
        } else if ["aggressive", "high risk", "growth", "risky"]
            .iter()
            .any(|t| q.contains(t))
        {
            RiskProfile::Aggressive
        } else {
            RiskProfile::Moderate
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskProfile::Conservative => "conservative",
            RiskProfile::Moderate => "moderate",
            RiskProfile::Aggressive => "aggressive",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeHorizon {
    Short,
    Medium,
    Long,
}

impl TimeHorizon {
    /// Human-readable range for the horizon
    pub fn label(&self) -> &'static str {
        match self {
            TimeHorizon::Short => "1-3 months",
            TimeHorizon::Medium => "6-12 months",
            TimeHorizon::Long => "2-5 years",
        }
    }
}

impl fmt::Display for TimeHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

//
// ================= Agent Response =================
//

/// Response produced by a single agent for one query.
///
/// `confidence` reflects how much of the query the agent could cover:
/// 0.3 base plus 0.2 per insight and 0.1 per recommendation, capped at 0.9.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentResponse {
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<String>,
    pub confidence: f64,
}

impl AgentResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insight(&mut self, content: impl Into<String>) {
        self.insights.push(content.into());
    }

    pub fn recommend(&mut self, content: impl Into<String>) {
        self.recommendations.push(content.into());
    }

    pub fn alert(&mut self, content: impl Into<String>) {
        self.alerts.push(content.into());
    }

    /// Set `confidence` from the number of findings and return the response.
    pub fn scored(mut self) -> Self {
        let raw = 0.3
            + 0.2 * self.insights.len() as f64
            + 0.1 * self.recommendations.len() as f64;
        self.confidence = raw.min(0.9);
        self
    }
}

//
// ================= Synthesized Response =================
//

/// An insight or recommendation attributed to the agent that produced it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourcedFinding {
    pub content: String,
    pub source: String,
}

/// An agent that was routed the query but did not answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentFailure {
    pub agent: String,
    pub error: String,
}

/// Unified response assembled by the orchestrator from all consulted agents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizedResponse {
    pub query_id: Uuid,
    pub query: String,
    pub agents_consulted: Vec<String>,
    pub insights: Vec<SourcedFinding>,
    pub recommendations: Vec<SourcedFinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<AgentFailure>,
    pub confidence: f64,
    pub generated_at: DateTime<Utc>,
}

impl fmt::Display for SynthesizedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Query: {}", self.query)?;
        writeln!(f, "Agents consulted: {}", self.agents_consulted.join(", "))?;
        writeln!(f, "Confidence: {:.2}", self.confidence)?;

        writeln!(f, "\nInsights:")?;
        for (idx, finding) in self.insights.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} (Source: {})",
                idx + 1,
                finding.content,
                finding.source
            )?;
        }

        writeln!(f, "\nRecommendations:")?;
        for (idx, finding) in self.recommendations.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} (Source: {})",
                idx + 1,
                finding.content,
                finding.source
            )?;
        }

        for failure in &self.failures {
            writeln!(f, "\n[!] {} did not answer: {}", failure.agent, failure.error)?;
        }

        Ok(())
    }
}

//
// ================= Health =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unavailable,
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthState::Healthy => "healthy",
            HealthState::Degraded => "degraded",
            HealthState::Unavailable => "unavailable",
        };
        write!(f, "{}", s)
    }
}

/// Health-check result for one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentHealth {
    pub name: String,
    pub status: HealthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AgentHealth {
    pub fn healthy(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: HealthState::Healthy,
            detail: None,
        }
    }

    pub fn degraded(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: HealthState::Degraded,
            detail: Some(detail.into()),
        }
    }
}

/// Health-check result for the whole network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkHealth {
    pub status: HealthState,
    pub agent_count: usize,
    pub agents: HashMap<String, AgentHealth>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_capped_at_point_nine() {
        let mut response = AgentResponse::new();
        for i in 0..10 {
            response.insight(format!("insight {}", i));
        }
        let response = response.scored();
        assert!((response.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn confidence_reflects_finding_counts() {
        let mut response = AgentResponse::new();
        response.insight("one");
        response.recommend("two");
        let response = response.scored();
        assert!((response.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn empty_response_scores_base_confidence() {
        let response = AgentResponse::new().scored();
        assert!((response.confidence - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn risk_profile_inference() {
        assert_eq!(
            RiskProfile::from_query("I want a safe, low risk plan"),
            RiskProfile::Conservative
        );
        assert_eq!(
            RiskProfile::from_query("aggressive growth please"),
            RiskProfile::Aggressive
        );
        assert_eq!(
            RiskProfile::from_query("what should I buy?"),
            RiskProfile::Moderate
        );
    }

    #[test]
    fn synthesized_response_renders_sources() {
        let response = SynthesizedResponse {
            query_id: Uuid::new_v4(),
            query: "test".to_string(),
            agents_consulted: vec!["blockchain_analyst".to_string()],
            insights: vec![SourcedFinding {
                content: "gas is cheap".to_string(),
                source: "blockchain_analyst".to_string(),
            }],
            recommendations: vec![],
            failures: vec![],
            confidence: 0.5,
            generated_at: Utc::now(),
        };

        let rendered = response.to_string();
        assert!(rendered.contains("gas is cheap (Source: blockchain_analyst)"));
        assert!(rendered.contains("Confidence: 0.50"));
    }
}
