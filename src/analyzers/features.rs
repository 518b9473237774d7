//! Weighted keyword/pattern feature scoring.
//!
//! The table is ordered; each feature that matches at least once contributes
//! its weight exactly once, and a `name(count)` string records how often it
//! actually appeared for explainability.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRule {
    pub name: String,
    pub pattern: String,
    pub weight: f64,
}

impl FeatureRule {
    fn new(name: &str, pattern: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            weight,
        }
    }
}

/// Default table: single spam keywords plus the multi-word scam phrases that
/// single keywords miss.
pub fn default_feature_rules() -> Vec<FeatureRule> {
    vec![
        FeatureRule::new("click here", r"(?i)click here", 0.15),
        FeatureRule::new("act now", r"(?i)act now", 0.12),
        FeatureRule::new("limited time", r"(?i)limited time", 0.12),
        FeatureRule::new("urgent", r"(?i)\burgent", 0.10),
        FeatureRule::new("winner", r"(?i)\bwinner\b", 0.10),
        FeatureRule::new("suspend", r"(?i)suspend", 0.10),
        FeatureRule::new("congratulations", r"(?i)congratulations", 0.09),
        FeatureRule::new("free", r"(?i)\bfree\b", 0.08),
        FeatureRule::new("claim", r"(?i)\bclaim", 0.08),
        FeatureRule::new("verify", r"(?i)\bverif(?:y|ication)", 0.07),
        FeatureRule::new(
            "account verification urgency",
            r"(?i)urgent.*verif(?:y|ication).*account|verif(?:y|ication).*account.*(?:immediately|now)",
            0.20,
        ),
        FeatureRule::new(
            "account suspension threat",
            r"(?i)(?:suspended|suspension).*account|account.*(?:suspended|suspension)",
            0.20,
        ),
        FeatureRule::new("lottery scam", r"(?i)won.*(?:lottery|prize)|lottery.*claim", 0.25),
        FeatureRule::new("inheritance fraud", r"(?i)inheritance.*(?:million|transfer)", 0.22),
        FeatureRule::new(
            "fake security alert",
            r"(?i)security.*alert.*(?:verify|confirm|identity)",
            0.20,
        ),
        FeatureRule::new(
            "payment method scam",
            r"(?i)update.*payment.*(?:method|information|now)",
            0.18,
        ),
        FeatureRule::new(
            "crypto investment scam",
            r"(?i)(?:crypto|bitcoin).*(?:investment|guaranteed|profit)",
            0.20,
        ),
        FeatureRule::new("tax refund scam", r"(?i)tax.*refund.*(?:claim|now)", 0.20),
    ]
}

pub struct FeatureScorer {
    rules: Vec<(FeatureRule, Regex)>,
}

impl FeatureScorer {
    pub fn new(rules: Vec<FeatureRule>) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let regex = Regex::new(&rule.pattern)
                .with_context(|| format!("invalid feature pattern for '{}'", rule.name))?;
            compiled.push((rule, regex));
        }
        Ok(Self { rules: compiled })
    }

    /// Sum the weight of every rule that matches subject+content at least
    /// once. The weight is not multiplied by the match count; the count only
    /// shows up in the explanation string.
    pub fn score(&self, subject: &str, content: &str) -> (f64, Vec<String>) {
        let text = format!("{subject} {content}");
        let mut total = 0.0;
        let mut detected = Vec::new();

        for (rule, regex) in &self.rules {
            let count = regex.find_iter(&text).count();
            if count > 0 {
                total += rule.weight;
                detected.push(format!("{}({count})", rule.name));
            }
        }

        (total, detected)
    }
}
