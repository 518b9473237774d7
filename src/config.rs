//! Engine configuration: thresholds, analyzer weights, and pattern tables,
//! loaded from YAML. Every field has a built-in default so the engine runs
//! with no configuration file at all.

use crate::analyzers::features::{default_feature_rules, FeatureRule};
use crate::analyzers::sender::SenderConfig;
use crate::analyzers::structure::StructureConfig;
use crate::enrichment::EnrichmentConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub thresholds: Thresholds,
    pub penalties: StructuralPenalties,
    pub sender: SenderConfig,
    pub structure: StructureConfig,
    pub features: Vec<FeatureRule>,
    /// Optional JSON file with additional training samples.
    pub corpus_path: Option<String>,
    pub enrichment: EnrichmentConfig,
}

/// Final-score cut points, evaluated top-down; each bound is closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub spam: f64,
    pub suspicious: f64,
    pub questionable: f64,
    pub elevated: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            spam: 0.70,
            suspicious: 0.50,
            questionable: 0.30,
            elevated: 0.15,
        }
    }
}

/// Score added per structural flag on top of the sender score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralPenalties {
    pub excessive_caps: f64,
    pub excessive_punctuation: f64,
    pub suspicious_domain: f64,
    pub lookalike_domain: f64,
}

impl Default for StructuralPenalties {
    fn default() -> Self {
        Self {
            excessive_caps: 0.1,
            excessive_punctuation: 0.1,
            suspicious_domain: 0.15,
            lookalike_domain: 0.3,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            penalties: StructuralPenalties::default(),
            sender: SenderConfig::default(),
            structure: StructureConfig::default(),
            features: default_feature_rules(),
            corpus_path: None,
            enrichment: EnrichmentConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: EngineConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize configuration")
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_yaml()?)
            .with_context(|| format!("failed to write config file {}", path.display()))
    }
}
