//! Crypto economics agent
//!
//! Tokenomics modeling, DeFi protocol analysis and economic
//! sustainability scoring.

use super::{mentions_any, Agent};
use crate::error::FinError;
use crate::models::AgentResponse;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

const TOKENOMICS_TERMS: &[&str] = &["tokenomics", "token model", "token valuation", "token economics"];
const DEFI_TERMS: &[&str] = &["defi", "yield", "farming", "liquidity", "amm", "lending"];
const SUSTAINABILITY_TERMS: &[&str] = &["sustainability", "sustainable", "long-term", "economics", "viability"];

struct ProtocolRecord {
    name: &'static str,
    tvl_usd: f64,
    daily_volume_usd: Option<f64>,
    total_borrowed_usd: Option<f64>,
    swap_fee: Option<f64>,
    admin_fee: Option<f64>,
    sustainability: f64,
}

const DEFI_PROTOCOLS: &[ProtocolRecord] = &[
    ProtocolRecord {
        name: "uniswap",
        tvl_usd: 3_800_000_000.0,
        daily_volume_usd: Some(1_200_000_000.0),
        total_borrowed_usd: None,
        swap_fee: Some(0.003),
        admin_fee: None,
        sustainability: 0.85,
    },
    ProtocolRecord {
        name: "aave",
        tvl_usd: 5_600_000_000.0,
        daily_volume_usd: None,
        total_borrowed_usd: Some(2_100_000_000.0),
        swap_fee: None,
        admin_fee: None,
        sustainability: 0.82,
    },
    ProtocolRecord {
        name: "curve",
        tvl_usd: 4_200_000_000.0,
        daily_volume_usd: Some(950_000_000.0),
        total_borrowed_usd: None,
        swap_fee: Some(0.0004),
        admin_fee: Some(0.00005),
        sustainability: 0.79,
    },
];

/// Parameters describing a token economic design
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenModel {
    /// None means uncapped supply
    pub max_supply: Option<f64>,
    pub initial_supply: f64,
    /// Tokens emitted per year
    pub emission_rate: f64,
    /// 0..1 score for real utility beyond speculation
    pub utility_score: f64,
    /// Fraction of supply burned per year
    pub burn_rate: f64,
}

/// Evaluation of a token economic design
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenEvaluation {
    pub sustainability_score: f64,
    pub is_deflationary: bool,
    pub annual_inflation: f64,
    pub time_to_max_supply: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DefiStrategy {
    Liquidity,
    Lending,
    Farming,
}

impl fmt::Display for DefiStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DefiStrategy::Liquidity => "liquidity",
            DefiStrategy::Lending => "lending",
            DefiStrategy::Farming => "farming",
        };
        write!(f, "{}", s)
    }
}

/// Risk/yield assessment of a protocol + strategy pairing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefiOpportunity {
    pub protocol: String,
    pub strategy: DefiStrategy,
    pub estimated_annual_yield: f64,
    pub risk_score: f64,
    pub risk_factors: Vec<String>,
    pub sustainability_score: f64,
    pub recommendations: Vec<String>,
}

pub struct CryptoEconomics;

impl CryptoEconomics {
    pub fn new() -> Self {
        info!("Initializing tokenomics models and DeFi protocol tracking");
        Self
    }

    pub fn tracked_protocols(&self) -> Vec<&'static str> {
        DEFI_PROTOCOLS.iter().map(|p| p.name).collect()
    }

    /// Evaluate the sustainability of a token economic design
    pub fn evaluate_token_model(&self, model: &TokenModel) -> TokenEvaluation {
        let annual_inflation = if model.initial_supply > 0.0 {
            model.emission_rate / model.initial_supply
        } else {
            0.0
        };
        let is_deflationary = model.burn_rate > annual_inflation;

        let mut sustainability_score = 0.3;
        if model.max_supply.is_some() {
            sustainability_score += 0.2;
        }
        if model.utility_score > 0.0 {
            sustainability_score += model.utility_score * 0.3;
        }
        if is_deflationary {
            sustainability_score += 0.2;
        }
        let sustainability_score = sustainability_score.min(1.0);

        let time_to_max_supply = match model.max_supply {
            None => "unbounded".to_string(),
            Some(_) if model.emission_rate <= 0.0 => "no emission".to_string(),
            Some(max) => format!(
                "{:.1} years",
                (max - model.initial_supply) / model.emission_rate
            ),
        };

        let mut recommendations = Vec::new();
        if model.utility_score < 0.5 {
            recommendations.push("Increase token utility to drive demand".to_string());
        } else {
            recommendations.push("Token has good utility mechanisms".to_string());
        }
        if !is_deflationary {
            recommendations.push("Consider implementing burn mechanisms".to_string());
        } else {
            recommendations
                .push("Deflationary model is positive for long-term value".to_string());
        }
        if annual_inflation > 0.2 {
            recommendations.push("Reduce emission rate to limit inflation".to_string());
        } else {
            recommendations.push("Emission rate is sustainable".to_string());
        }

        TokenEvaluation {
            sustainability_score,
            is_deflationary,
            annual_inflation,
            time_to_max_supply,
            recommendations,
        }
    }

    /// Assess the risk/yield of a strategy on a tracked protocol
    pub fn analyze_defi_opportunity(
        &self,
        protocol: &str,
        strategy: DefiStrategy,
    ) -> Result<DefiOpportunity> {
        let record = DEFI_PROTOCOLS
            .iter()
            .find(|p| p.name == protocol.trim().to_lowercase())
            .ok_or_else(|| FinError::UnknownProtocol(protocol.to_string()))?;

        let (risk_adjustment, yield_adjustment, strategy_risk) = match strategy {
            DefiStrategy::Liquidity => (0.1, 0.03, "Impermanent loss from price divergence"),
            DefiStrategy::Lending => (-0.1, -0.02, "Borrower default risk, protocol insolvency"),
            DefiStrategy::Farming => (0.2, 0.1, "Token price collapse, high emissions dilution"),
        };

        let risk_score = (0.5_f64 + risk_adjustment).clamp(0.1, 0.9);
        let estimated_annual_yield = (0.05_f64 + yield_adjustment).max(0.01);

        let compensation = if estimated_annual_yield / risk_score < 0.1 {
            "Expected yield may not compensate for the risk"
        } else {
            "Expected yield adequately compensates for the risk"
        };

        Ok(DefiOpportunity {
            protocol: record.name.to_string(),
            strategy,
            estimated_annual_yield,
            risk_score,
            risk_factors: vec![
                strategy_risk.to_string(),
                "Smart contract vulnerabilities".to_string(),
                "Regulatory uncertainty".to_string(),
            ],
            sustainability_score: record.sustainability,
            recommendations: vec![
                format!(
                    "Consider {} allocation based on your risk profile",
                    if risk_score < 0.4 { "increasing" } else { "decreasing" }
                ),
                format!(
                    "Protocol sustainability is {}",
                    if record.sustainability > 0.7 {
                        "good"
                    } else if record.sustainability > 0.4 {
                        "moderate"
                    } else {
                        "concerning"
                    }
                ),
                compensation.to_string(),
            ],
        })
    }

    fn analyze_tokenomics(&self, response: &mut AgentResponse) {
        response.insight("The token follows a deflationary model with a 0.5% burn on each transaction");
        response.insight("Current token velocity suggests high trading activity but limited utility adoption");
        response.insight(
            "Supply distribution shows 15% concentration in top 10 wallets, which is moderate centralization",
        );
        response.recommend(
            "Consider implementing token utility beyond governance to drive sustainable value",
        );
        response.recommend("The emission schedule should be adjusted to reduce early selling pressure");
    }

    fn analyze_defi_protocols(&self, query_lower: &str, response: &mut AgentResponse) {
        let mentioned: Vec<&ProtocolRecord> = DEFI_PROTOCOLS
            .iter()
            .filter(|p| query_lower.contains(p.name))
            .collect();

        if mentioned.is_empty() {
            response.insight("Current DeFi TVL across major protocols shows a 5% increase over the past week");
            response.insight("Liquidity mining incentives have declined by 30% in the last quarter");
            response.insight("Average yield on stablecoin pairs has decreased to 2-4% APY");
            response.recommend(
                "Focus on protocols with sustainable fee models rather than high emission incentives",
            );
            response.recommend("Consider diversifying across lending and AMM protocols to balance risk");
            return;
        }

        for protocol in mentioned {
            match (protocol.daily_volume_usd, protocol.total_borrowed_usd) {
                (Some(volume), _) => {
                    response.insight(format!(
                        "{} currently has ${:.2}B TVL with ${:.2}B daily volume",
                        protocol.name,
                        protocol.tvl_usd / 1e9,
                        volume / 1e9
                    ));
                    if let Some(fee) = protocol.swap_fee {
                        response.insight(format!(
                            "{} generates approximately ${:.2}M in daily swap fees",
                            protocol.name,
                            volume * fee / 1e6
                        ));
                    }
                    if let Some(admin) = protocol.admin_fee {
                        response.insight(format!(
                            "{} captures ${:.2}M daily for token holders",
                            protocol.name,
                            volume * admin / 1e6
                        ));
                    }
                    response.recommend(format!(
                        "Consider providing liquidity on {} in stable pairs for lower risk",
                        protocol.name
                    ));
                }
                (None, Some(borrowed)) => {
                    let utilization = borrowed / protocol.tvl_usd;
                    response.insight(format!(
                        "{} has a utilization rate of {:.0}%, indicating moderate capital efficiency",
                        protocol.name,
                        utilization * 100.0
                    ));
                    response.insight(format!(
                        "{} holds ${:.2}B TVL with ${:.2}B borrowed",
                        protocol.name,
                        protocol.tvl_usd / 1e9,
                        borrowed / 1e9
                    ));
                    response.recommend(
                        "Monitor interest rates closely as they tend to spike when utilization exceeds 80%",
                    );
                }
                (None, None) => {
                    response.insight(format!(
                        "{} holds ${:.2}B TVL",
                        protocol.name,
                        protocol.tvl_usd / 1e9
                    ));
                }
            }
        }
    }

    fn analyze_sustainability(&self, response: &mut AgentResponse) {
        response.insight(
            "Sustainable token economies require revenue mechanisms that don't rely solely on new entrants",
        );
        response.insight(
            "Projects with fee-sharing models show 30% higher longevity than pure inflationary models",
        );
        response.insight(
            "Current ratio of protocol revenue to token market cap averages 0.05 across top projects",
        );
        response.recommend(
            "Evaluate projects based on PE-like ratios (market cap to revenue) for fundamental valuation",
        );
        response.recommend(
            "Prioritize protocols with proven revenue models that don't rely primarily on token emissions",
        );
    }
}

impl Default for CryptoEconomics {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for CryptoEconomics {
    fn name(&self) -> &'static str {
        "crypto_economics"
    }

    fn description(&self) -> &'static str {
        "Models tokenomics and provides insights on token valuation and DeFi protocols"
    }

    fn capabilities(&self) -> Vec<&'static str> {
        vec![
            "Model tokenomics and provide insights on token valuation",
            "Analyze yield farming opportunities and DeFi protocols",
            "Evaluate the economic sustainability of blockchain projects",
            "Project token emission schedules and economic impacts",
            "Calculate potential yields and risks for DeFi strategies",
        ]
    }

    fn routing_keywords(&self) -> &'static [&'static str] {
        &["token", "defi", "yield", "tokenomics"]
    }

    async fn process_query(&self, query: &str) -> Result<AgentResponse> {
        debug!(query = %query, "Processing crypto economics query");

        let q = query.to_lowercase();
        let mut response = AgentResponse::new();

        if mentions_any(&q, TOKENOMICS_TERMS) {
            self.analyze_tokenomics(&mut response);
        }
        if mentions_any(&q, DEFI_TERMS) {
            self.analyze_defi_protocols(&q, &mut response);
        }
        if mentions_any(&q, SUSTAINABILITY_TERMS) {
            self.analyze_sustainability(&mut response);
        }

        Ok(response.scored())
    }
}
