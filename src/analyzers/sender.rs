//! Sender reputation analysis.
//!
//! Three static tables drive the score: known spam-associated domains,
//! lookalike strings that impersonate well-known brands, and generic regex
//! heuristics for addresses that merely look machine-generated or alarming.
//! Matching weights accumulate and the sum is capped at 1.0.

use crate::analyzers::SenderAnalysis;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderConfig {
    /// Domains (or domain fragments) seen almost exclusively in spam.
    pub spam_domains: Vec<String>,
    /// Substrings crafted to resemble a trusted brand's domain.
    pub lookalike_fragments: Vec<String>,
    /// Domains whose presence is noted for explainability but never scored.
    pub trusted_domains: Vec<String>,
    pub weights: SenderWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderWeights {
    pub spam_domain: f64,
    pub lookalike_domain: f64,
    pub numeric_local_part: f64,
    pub risky_tld: f64,
    pub money_keyword: f64,
    pub hyphen_heavy_domain: f64,
    pub noreply_alarm: f64,
    pub malformed_address: f64,
}

impl Default for SenderWeights {
    fn default() -> Self {
        Self {
            spam_domain: 0.4,
            lookalike_domain: 0.5,
            numeric_local_part: 0.2,
            risky_tld: 0.25,
            money_keyword: 0.2,
            hyphen_heavy_domain: 0.15,
            noreply_alarm: 0.25,
            malformed_address: 0.3,
        }
    }
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            spam_domains: [
                "tempmail.org",
                "10minutemail.com",
                "guerrillamail.com",
                "securepaypal-verification.com",
                "amazon-security.net",
                "microsoft-security.org",
                "apple-id-verification.com",
                "paypal-security.com",
                "account-verification.net",
                "security-alert.com",
                "lottery-prize.net",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            lookalike_fragments: [
                "netflx", "amazn", "paypa1", "micros0ft", "microsft", "app1e", "g00gle",
                "faceb00k", "linkedln",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            trusted_domains: [
                "gmail.com",
                "outlook.com",
                "yahoo.com",
                "icloud.com",
                "microsoft.com",
                "google.com",
                "apple.com",
                "amazon.com",
                "paypal.com",
                "github.com",
                "linkedin.com",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            weights: SenderWeights::default(),
        }
    }
}

lazy_static! {
    static ref NUMERIC_LOCAL: Regex = Regex::new(r"^[^@]*\d{3,}[^@]*@").unwrap();
    static ref RISKY_TLD: Regex = Regex::new(r"\.(?:tk|ml|ga|cf|gq|top|biz|info)$").unwrap();
    static ref MONEY_KEYWORD: Regex =
        Regex::new(r"(?:cash|money|prize|reward|loan|refund|billing)").unwrap();
    static ref NOREPLY: Regex = Regex::new(r"no-?reply").unwrap();
    static ref ALARM_WORD: Regex =
        Regex::new(r"(?:security|alert|warning|verify|verification|suspend|account)").unwrap();
}

pub struct SenderAnalyzer {
    config: SenderConfig,
}

impl SenderAnalyzer {
    pub fn new(config: SenderConfig) -> Self {
        Self { config }
    }

    /// Score a sender address. An empty sender is a zero score with no
    /// matched patterns, never an error.
    pub fn analyze(&self, sender: &str) -> SenderAnalysis {
        let sender = sender.trim().to_lowercase();
        if sender.is_empty() {
            return SenderAnalysis::default();
        }

        let mut score = 0.0;
        let mut patterns = Vec::new();
        let weights = &self.config.weights;

        let domain = match sender.split('@').nth(1) {
            Some(domain) if !domain.is_empty() => domain.to_string(),
            _ => {
                score += weights.malformed_address;
                patterns.push("malformed address".to_string());
                sender.clone()
            }
        };

        // Forward match only: the sender's domain must contain the table
        // entry. Matching the other way would flag any domain that happens
        // to be a substring of an entry.
        for known in &self.config.spam_domains {
            if domain.contains(known.as_str()) {
                score += weights.spam_domain;
                patterns.push(format!("known spam-associated domain: {known}"));
            }
        }

        for fragment in &self.config.lookalike_fragments {
            if sender.contains(fragment.as_str()) {
                score += weights.lookalike_domain;
                patterns.push(format!("brand lookalike: {fragment}"));
            }
        }

        if NUMERIC_LOCAL.is_match(&sender) {
            score += weights.numeric_local_part;
            patterns.push("numeric-heavy local part".to_string());
        }
        if RISKY_TLD.is_match(&domain) {
            score += weights.risky_tld;
            patterns.push("high-risk top-level domain".to_string());
        }
        if MONEY_KEYWORD.is_match(&sender) {
            score += weights.money_keyword;
            patterns.push("money-related keyword in address".to_string());
        }
        if domain.matches('-').count() >= 2 {
            score += weights.hyphen_heavy_domain;
            patterns.push("hyphen-heavy domain".to_string());
        }
        if NOREPLY.is_match(&sender) && ALARM_WORD.is_match(&sender) {
            score += weights.noreply_alarm;
            patterns.push("noreply sender with alarm wording".to_string());
        }

        // Noted for explainability only; trust never subtracts from the score
        // and never overrides content evidence.
        if self.is_trusted(&domain) {
            patterns.push(format!("trusted sender domain: {domain}"));
        }

        SenderAnalysis {
            suspicious_score: score.min(1.0),
            detected_patterns: patterns,
        }
    }

    fn is_trusted(&self, domain: &str) -> bool {
        self.config
            .trusted_domains
            .iter()
            .any(|trusted| domain == trusted || domain.ends_with(&format!(".{trusted}")))
    }
}
