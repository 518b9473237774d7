//! Independent signal analyzers.
//!
//! Each analyzer is a pure function of the request and its own static
//! configuration. None of them can fail: a sender that matches nothing is a
//! zero contribution, never an aborted classification.

pub mod features;
pub mod sender;
pub mod structure;

use serde::Serialize;

/// Output of the sender reputation analyzer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SenderAnalysis {
    pub suspicious_score: f64,
    pub detected_patterns: Vec<String>,
}

/// Output of the structural signal analyzer.
#[derive(Debug, Clone, Serialize)]
pub struct StructuralAnalysis {
    pub has_excessive_caps: bool,
    pub has_excessive_punctuation: bool,
    pub has_suspicious_domain: bool,
    pub has_phishing_lookalike_domain: bool,
    pub length_category: LengthCategory,
    pub url_count: usize,
    pub email_address_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthCategory {
    Short,
    Normal,
    Long,
}
