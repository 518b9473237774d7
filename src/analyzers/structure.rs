//! Structural signal analysis: formatting anomalies and coarse
//! brand-impersonation hints, independent of word-frequency statistics.

use crate::analyzers::{LengthCategory, StructuralAnalysis};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureConfig {
    /// Uppercase ratio over subject+content above which caps are excessive.
    pub caps_ratio_threshold: f64,
    /// Number of `!!`/`??` bursts at which punctuation is excessive.
    pub punctuation_burst_threshold: usize,
    /// Character counts bounding the short/normal/long buckets.
    pub short_length: usize,
    pub long_length: usize,
    /// Brand names whose mere mention is a coarse impersonation proxy.
    pub brand_mentions: Vec<String>,
    /// URL-shortener domains routinely abused to hide destinations.
    pub url_shorteners: Vec<String>,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            caps_ratio_threshold: 0.30,
            punctuation_burst_threshold: 3,
            short_length: 50,
            long_length: 1500,
            brand_mentions: [
                "paypal", "amazon", "microsoft", "apple", "google", "netflix", "facebook",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            url_shorteners: ["bit.ly", "tinyurl", "t.co", "goo.gl", "ow.ly", "is.gd"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

lazy_static! {
    static ref URL_PATTERN: Regex = Regex::new(r"(?i)https?://\S+|www\.\S+").unwrap();
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();
    static ref PUNCTUATION_BURST: Regex = Regex::new(r"[!?]{2,}").unwrap();
}

pub struct StructureAnalyzer {
    config: StructureConfig,
}

impl StructureAnalyzer {
    pub fn new(config: StructureConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, subject: &str, sender: &str, content: &str) -> StructuralAnalysis {
        let full_text = format!("{subject} {content}");
        let text_lower = full_text.to_lowercase();
        let sender_lower = sender.to_lowercase();

        StructuralAnalysis {
            has_excessive_caps: self.caps_ratio(&full_text) > self.config.caps_ratio_threshold,
            has_excessive_punctuation: PUNCTUATION_BURST.find_iter(&full_text).count()
                >= self.config.punctuation_burst_threshold,
            has_suspicious_domain: self
                .config
                .url_shorteners
                .iter()
                .any(|s| text_lower.contains(s.as_str()) || sender_lower.contains(s.as_str())),
            has_phishing_lookalike_domain: self
                .config
                .brand_mentions
                .iter()
                .any(|brand| text_lower.contains(brand.as_str())),
            length_category: self.length_category(full_text.trim().chars().count()),
            url_count: URL_PATTERN.find_iter(&full_text).count(),
            email_address_count: EMAIL_PATTERN.find_iter(&full_text).count(),
        }
    }

    fn caps_ratio(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let total = text.chars().count() as f64;
        let uppercase = text.chars().filter(|c| c.is_ascii_uppercase()).count() as f64;
        uppercase / total
    }

    fn length_category(&self, chars: usize) -> LengthCategory {
        if chars < self.config.short_length {
            LengthCategory::Short
        } else if chars > self.config.long_length {
            LengthCategory::Long
        } else {
            LengthCategory::Normal
        }
    }
}
