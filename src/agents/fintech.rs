//! Fintech navigator agent
//!
//! Tracks fintech trends, regulatory updates, payment systems and
//! financial API standards from built-in reference tables.

use super::{mentions_any, Agent};
use crate::error::FinError;
use crate::models::AgentResponse;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

const TREND_TERMS: &[&str] = &["trend", "market", "growth", "emerging", "technology", "innovation"];
const REGULATION_TERMS: &[&str] = &["regulation", "compliance", "legal", "law", "framework", "policy"];
const PAYMENT_TERMS: &[&str] = &["payment", "transaction", "transfer", "wallet", "banking"];
const API_TERMS: &[&str] = &["api", "integration", "data", "connect", "platform", "open banking"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    Emerging,
    Growing,
    Maturing,
}

impl fmt::Display for Maturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Maturity::Emerging => "emerging",
            Maturity::Growing => "growing",
            Maturity::Maturing => "maturing",
        };
        write!(f, "{}", s)
    }
}

struct TrendRecord {
    key: &'static str,
    growth_rate: f64,
    market_size_usd: u64,
    key_players: &'static [&'static str],
    maturity: Maturity,
}

const FINTECH_TRENDS: &[TrendRecord] = &[
    TrendRecord {
        key: "embedded_finance",
        growth_rate: 0.26,
        market_size_usd: 43_000_000_000,
        key_players: &["Stripe", "Plaid", "Marqeta"],
        maturity: Maturity::Growing,
    },
    TrendRecord {
        key: "decentralized_finance",
        growth_rate: 0.18,
        market_size_usd: 11_000_000_000,
        key_players: &["MakerDAO", "Compound", "Aave"],
        maturity: Maturity::Emerging,
    },
    TrendRecord {
        key: "buy_now_pay_later",
        growth_rate: 0.22,
        market_size_usd: 125_000_000_000,
        key_players: &["Klarna", "Afterpay", "Affirm"],
        maturity: Maturity::Maturing,
    },
];

struct RegulatoryUpdate {
    key: &'static str,
    region: &'static str,
    status: &'static str,
    impact: &'static str,
    summary: &'static str,
}

const REGULATORY_UPDATES: &[RegulatoryUpdate] = &[
    RegulatoryUpdate {
        key: "eu_digital_finance_package",
        region: "europe",
        status: "implemented",
        impact: "high",
        summary: "Comprehensive framework for crypto-assets (MiCA) and digital operational resilience (DORA)",
    },
    RegulatoryUpdate {
        key: "us_stablecoin_regulation",
        region: "united states",
        status: "proposed",
        impact: "medium",
        summary: "Proposed framework for regulating stablecoin issuers as banks",
    },
    RegulatoryUpdate {
        key: "uk_open_banking",
        region: "united kingdom",
        status: "implemented",
        impact: "high",
        summary: "Mandatory API access to banking data for authorized third parties",
    },
];

struct PaymentSystem {
    key: &'static str,
    adoption_rate: f64,
    key_technologies: &'static [&'static str],
    integration_complexity: &'static str,
}

const PAYMENT_SYSTEMS: &[PaymentSystem] = &[
    PaymentSystem {
        key: "real_time_payments",
        adoption_rate: 0.65,
        key_technologies: &["ISO 20022", "API connectivity"],
        integration_complexity: "medium",
    },
    PaymentSystem {
        key: "crypto_payments",
        adoption_rate: 0.12,
        key_technologies: &["Lightning Network", "Stablecoins"],
        integration_complexity: "high",
    },
    PaymentSystem {
        key: "mobile_wallets",
        adoption_rate: 0.78,
        key_technologies: &["NFC", "QR codes"],
        integration_complexity: "low",
    },
];

struct ApiStandard {
    key: &'static str,
    standards: &'static [&'static str],
    security: &'static str,
    market_penetration: &'static str,
}

const FINANCIAL_APIS: &[ApiStandard] = &[
    ApiStandard {
        key: "open_banking",
        standards: &["UK Open Banking", "Berlin Group", "FDX"],
        security: "OAuth 2.0 + MTLS",
        market_penetration: "high",
    },
    ApiStandard {
        key: "payment_processing",
        standards: &["ISO 8583", "ISO 20022"],
        security: "TLS + API keys",
        market_penetration: "high",
    },
    ApiStandard {
        key: "financial_data",
        standards: &["FIX Protocol", "REST APIs"],
        security: "API keys + IP whitelisting",
        market_penetration: "medium",
    },
];

/// Detailed analysis of one tracked trend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub trend: String,
    pub growth_rate: f64,
    pub market_size_usd: u64,
    pub maturity: Maturity,
    pub key_players: Vec<String>,
    pub analysis: String,
    pub recommendations: Vec<String>,
}

/// Regulatory posture summary for one region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegulatoryImpact {
    pub region: String,
    pub total_regulations: usize,
    pub high_impact_count: usize,
    pub implemented_count: usize,
    pub proposed_count: usize,
    pub key_regulations: Vec<String>,
    pub recommendations: Vec<String>,
}

pub struct FintechNavigator;

impl FintechNavigator {
    pub fn new() -> Self {
        info!("Initializing fintech navigator reference data");
        Self
    }

    /// Analyze a tracked market trend by name
    pub fn analyze_market_trend(&self, trend_name: &str) -> Result<TrendAnalysis> {
        let key = trend_name.trim().to_lowercase().replace(' ', "_");

        let record = FINTECH_TRENDS
            .iter()
            .find(|t| t.key == key)
            .ok_or_else(|| FinError::UnknownTrend(trend_name.to_string()))?;

        let positioning = match record.maturity {
            Maturity::Emerging => "Consider early investment for long-term positioning",
            Maturity::Growing => "Build strategic partnerships with established players",
            Maturity::Maturing => "Focus on differentiation in this maturing market",
        };

        Ok(TrendAnalysis {
            trend: display_key(record.key),
            growth_rate: record.growth_rate,
            market_size_usd: record.market_size_usd,
            maturity: record.maturity,
            key_players: record.key_players.iter().map(|p| p.to_string()).collect(),
            analysis: format!(
                "The {} market is {} with a {:.0}% annual growth rate",
                display_key(record.key),
                record.maturity,
                record.growth_rate * 100.0
            ),
            recommendations: vec![
                positioning.to_string(),
                format!(
                    "Identify specific niches within {} that align with your core competencies",
                    display_key(record.key)
                ),
                "Monitor regulatory developments as they may impact growth trajectory".to_string(),
            ],
        })
    }

    /// Summarize tracked regulations affecting a region
    pub fn regulatory_impact(&self, region: &str) -> Result<RegulatoryImpact> {
        let region_lower = region.trim().to_lowercase();

        let matched: Vec<&RegulatoryUpdate> = REGULATORY_UPDATES
            .iter()
            .filter(|r| r.region == region_lower)
            .collect();

        if matched.is_empty() {
            return Err(FinError::UnknownRegion(region.to_string()));
        }

        Ok(RegulatoryImpact {
            region: region.to_string(),
            total_regulations: matched.len(),
            high_impact_count: matched.iter().filter(|r| r.impact == "high").count(),
            implemented_count: matched.iter().filter(|r| r.status == "implemented").count(),
            proposed_count: matched.iter().filter(|r| r.status == "proposed").count(),
            key_regulations: matched.iter().map(|r| display_key(r.key)).collect(),
            recommendations: vec![
                "Ensure compliance with implemented regulations immediately".to_string(),
                "Monitor proposed regulations and prepare contingency plans".to_string(),
                format!("Consider specialized legal counsel for {} operations", region),
            ],
        })
    }

    fn analyze_trends(&self, response: &mut AgentResponse) {
        for trend in FINTECH_TRENDS {
            response.insight(format!(
                "{} is {} with a {:.0}% annual growth rate and a ${}B market",
                display_key(trend.key),
                trend.maturity,
                trend.growth_rate * 100.0,
                trend.market_size_usd / 1_000_000_000
            ));
        }
        response.recommend(
            "Prioritize trends whose maturity matches your investment horizon and risk appetite",
        );
    }

    fn analyze_regulations(&self, response: &mut AgentResponse) {
        for update in REGULATORY_UPDATES {
            response.insight(format!(
                "{}: {} ({}, {} impact)",
                display_key(update.key),
                update.summary,
                update.status,
                update.impact
            ));
        }
        response.recommend("Track proposed regulations early; implementation windows are short");
    }

    fn analyze_payment_systems(&self, response: &mut AgentResponse) {
        for system in PAYMENT_SYSTEMS {
            response.insight(format!(
                "{} adoption is at {:.0}% with {} integration complexity (key tech: {})",
                display_key(system.key),
                system.adoption_rate * 100.0,
                system.integration_complexity,
                system.key_technologies.join(", ")
            ));
        }
        response.recommend(
            "Start with low-complexity rails and layer higher-complexity options behind a common interface",
        );
    }

    fn analyze_financial_apis(&self, response: &mut AgentResponse) {
        for api in FINANCIAL_APIS {
            response.insight(format!(
                "{} APIs ({}) secured via {} have {} market penetration",
                display_key(api.key),
                api.standards.join(", "),
                api.security,
                api.market_penetration
            ));
        }
        response.recommend("Adopt widely-penetrated standards first to minimize integration rework");
    }
}

impl Default for FintechNavigator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for FintechNavigator {
    fn name(&self) -> &'static str {
        "fintech_navigator"
    }

    fn description(&self) -> &'static str {
        "Tracks fintech trends, regulations, and market movements"
    }

    fn capabilities(&self) -> Vec<&'static str> {
        vec![
            "Track fintech trends, regulations, and market movements",
            "Monitor financial news and interpret impact on investments",
            "Assist with payment systems integration and selection",
            "Guide financial API orchestration and implementation",
            "Analyze regulatory implications of financial products",
        ]
    }

    fn routing_keywords(&self) -> &'static [&'static str] {
        &["fintech", "payment", "banking", "financial news", "open banking"]
    }

    async fn process_query(&self, query: &str) -> Result<AgentResponse> {
        debug!(query = %query, "Processing fintech query");

        let q = query.to_lowercase();
        let mut response = AgentResponse::new();

        if mentions_any(&q, TREND_TERMS) {
            self.analyze_trends(&mut response);
        }
        if mentions_any(&q, REGULATION_TERMS) {
            self.analyze_regulations(&mut response);
        }
        if mentions_any(&q, PAYMENT_TERMS) {
            self.analyze_payment_systems(&mut response);
        }
        if mentions_any(&q, API_TERMS) {
            self.analyze_financial_apis(&mut response);
        }

        Ok(response.scored())
    }
}

fn display_key(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_trend_is_analyzed() {
        let agent = FintechNavigator::new();
        let analysis = agent.analyze_market_trend("embedded finance").unwrap();
        assert_eq!(analysis.trend, "Embedded Finance");
        assert_eq!(analysis.maturity, Maturity::Growing);
        assert_eq!(analysis.recommendations.len(), 3);
    }

    #[test]
    fn unknown_trend_is_an_error() {
        let agent = FintechNavigator::new();
        let err = agent.analyze_market_trend("quantum ledgers").unwrap_err();
        assert!(matches!(err, FinError::UnknownTrend(_)));
    }

    #[test]
    fn regulatory_impact_counts_by_status() {
        let agent = FintechNavigator::new();
        let impact = agent.regulatory_impact("Europe").unwrap();
        assert_eq!(impact.total_regulations, 1);
        assert_eq!(impact.implemented_count, 1);
        assert_eq!(impact.high_impact_count, 1);

        let err = agent.regulatory_impact("Atlantis").unwrap_err();
        assert!(matches!(err, FinError::UnknownRegion(_)));
    }

    #[tokio::test]
    async fn payment_query_reports_adoption() {
        let agent = FintechNavigator::new();
        let response = agent
            .process_query("Which payment systems should we integrate?")
            .await
            .unwrap();

        assert!(response.insights.iter().any(|i| i.contains("adoption")));
        assert!(response.confidence > 0.3);
    }

    #[test]
    fn display_key_title_cases() {
        assert_eq!(display_key("buy_now_pay_later"), "Buy Now Pay Later");
    }
}
