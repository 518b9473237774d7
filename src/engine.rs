//! Threat decision engine.
//!
//! Combines the trained content model, the sender and structural analyzers,
//! the feature scorer, and the optional remote enrichment signal into a single
//! deterministic classification. The same input always produces the same
//! result for a given model and configuration.

use crate::analyzers::features::FeatureScorer;
use crate::analyzers::sender::SenderAnalyzer;
use crate::analyzers::structure::StructureAnalyzer;
use crate::analyzers::SenderAnalysis;
use crate::config::EngineConfig;
use crate::enrichment::{Enrichment, RemoteEnrichment};
use crate::model::{ContentModel, TrainedModel};
use crate::{corpus, recommend, tokenizer};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Legitimate,
    Questionable,
    Suspicious,
    Spam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Safe,
    Low,
    Medium,
    High,
}

/// A single email to classify. Empty strings are valid values for every
/// field; absence is an API-layer concern.
#[derive(Debug, Clone)]
pub struct EmailInput {
    pub subject: String,
    pub sender: String,
    pub content: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailedAnalysis {
    pub spam_probability: f64,
    pub feature_score: f64,
    pub structural_penalty: f64,
    pub sender_analysis: SenderAnalysis,
    pub detected_features: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    pub classification: Classification,
    pub confidence: f64,
    pub threat_level: ThreatLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threat_type: Option<String>,
    pub processing_time_ms: f64,
    pub detailed_analysis: DetailedAnalysis,
    pub recommendations: Vec<String>,
}

pub struct ThreatClassifier {
    config: EngineConfig,
    model: Arc<dyn ContentModel>,
    sender_analyzer: SenderAnalyzer,
    structure_analyzer: StructureAnalyzer,
    feature_scorer: FeatureScorer,
    enrichment: Option<Box<dyn Enrichment>>,
}

impl ThreatClassifier {
    /// Build a classifier from configuration. The content model is the
    /// process-wide shared one unless a corpus path is configured, in which
    /// case a dedicated model is trained from the built-in corpus plus the
    /// configured file.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let model: Arc<dyn ContentModel> = match config.corpus_path.as_deref() {
            Some(path) => {
                let samples = corpus::load_with_builtin(Some(Path::new(path)));
                Arc::new(TrainedModel::build(&samples))
            }
            None => TrainedModel::shared(),
        };
        Self::with_model(config, model)
    }

    /// Build a classifier around an explicit content model.
    pub fn with_model(config: EngineConfig, model: Arc<dyn ContentModel>) -> Result<Self> {
        let enrichment: Option<Box<dyn Enrichment>> = if config.enrichment.enabled {
            Some(Box::new(RemoteEnrichment::new(&config.enrichment)?))
        } else {
            None
        };
        Ok(Self {
            sender_analyzer: SenderAnalyzer::new(config.sender.clone()),
            structure_analyzer: StructureAnalyzer::new(config.structure.clone()),
            feature_scorer: FeatureScorer::new(config.features.clone())?,
            model,
            enrichment,
            config,
        })
    }

    /// Replace the enrichment collaborator. Used by tests and by embedders
    /// with their own inference backends.
    pub fn set_enrichment(&mut self, enrichment: Box<dyn Enrichment>) {
        self.enrichment = Some(enrichment);
    }

    pub async fn classify(&self, input: &EmailInput) -> ClassificationResult {
        let start = Instant::now();

        let combined = format!("{} {}", input.subject, input.content);
        let tokens = tokenizer::tokenize(&combined);
        let mut spam_probability = self.model.spam_probability(&tokens);

        let (sender_analysis, structural_analysis, (feature_score, detected_features)) = tokio::join!(
            async { self.sender_analyzer.analyze(&input.sender) },
            async {
                self.structure_analyzer
                    .analyze(&input.subject, &input.sender, &input.content)
            },
            async { self.feature_scorer.score(&input.subject, &input.content) },
        );

        if let Some(enrichment) = &self.enrichment {
            match enrichment.spam_probability(input).await {
                Ok(remote) => {
                    log::debug!(
                        "enrichment probability {remote:.3} (local {spam_probability:.3})"
                    );
                    // A remote opinion can only raise the score, never veto a
                    // local detection.
                    spam_probability = spam_probability.max(remote);
                }
                Err(e) => {
                    log::warn!("enrichment unavailable, using local score only: {e:#}");
                }
            }
        }

        let penalties = &self.config.penalties;
        let mut structural_penalty = sender_analysis.suspicious_score;
        if structural_analysis.has_excessive_caps {
            structural_penalty += penalties.excessive_caps;
        }
        if structural_analysis.has_excessive_punctuation {
            structural_penalty += penalties.excessive_punctuation;
        }
        if structural_analysis.has_suspicious_domain {
            structural_penalty += penalties.suspicious_domain;
        }
        if structural_analysis.has_phishing_lookalike_domain {
            structural_penalty += penalties.lookalike_domain;
        }

        let final_score = (spam_probability + feature_score + structural_penalty).min(1.0);

        let thresholds = &self.config.thresholds;
        let domain_flagged = structural_analysis.has_suspicious_domain
            || structural_analysis.has_phishing_lookalike_domain;

        let (classification, threat_level, threat_type) = if final_score >= thresholds.spam {
            (Classification::Spam, ThreatLevel::High, Some("spam"))
        } else if final_score >= thresholds.suspicious {
            (
                Classification::Suspicious,
                ThreatLevel::High,
                Some("suspicious"),
            )
        } else if final_score >= thresholds.questionable || domain_flagged {
            (
                Classification::Questionable,
                ThreatLevel::Medium,
                Some("questionable"),
            )
        } else if final_score >= thresholds.elevated || !detected_features.is_empty() {
            (Classification::Legitimate, ThreatLevel::Low, None)
        } else {
            (Classification::Legitimate, ThreatLevel::Safe, None)
        };

        let confidence = (1.0 - final_score).clamp(0.0, 1.0);
        let recommendations = recommend::recommendations(classification, &structural_analysis);

        log::debug!(
            "classified sender={} score={final_score:.3} (bayes={spam_probability:.3} features={feature_score:.3} penalty={structural_penalty:.3}) as {classification:?}/{threat_level:?}",
            input.sender
        );

        ClassificationResult {
            classification,
            confidence,
            threat_level,
            threat_type: threat_type.map(String::from),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            detailed_analysis: DetailedAnalysis {
                spam_probability,
                feature_score,
                structural_penalty,
                sender_analysis,
                detected_features,
            },
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Content model with a constant output, for exercising the decision
    /// ladder in isolation.
    struct FixedModel(f64);

    impl ContentModel for FixedModel {
        fn spam_probability(&self, _tokens: &[String]) -> f64 {
            self.0
        }
    }

    struct FixedEnrichment(Result<f64, String>);

    #[async_trait]
    impl Enrichment for FixedEnrichment {
        async fn spam_probability(&self, _input: &EmailInput) -> Result<f64> {
            match &self.0 {
                Ok(p) => Ok(*p),
                Err(msg) => Err(anyhow::anyhow!(msg.clone())),
            }
        }
    }

    fn classifier_with(probability: f64) -> ThreatClassifier {
        ThreatClassifier::with_model(EngineConfig::default(), Arc::new(FixedModel(probability)))
            .unwrap()
    }

    fn plain_email() -> EmailInput {
        EmailInput {
            subject: "Quarterly report".to_string(),
            sender: "jane.doe@company.com".to_string(),
            content: "The quarterly numbers are attached. Let me know if anything looks off."
                .to_string(),
            user_id: None,
        }
    }

    #[tokio::test]
    async fn test_ladder_spam_band() {
        let result = classifier_with(0.75).classify(&plain_email()).await;
        assert_eq!(result.classification, Classification::Spam);
        assert_eq!(result.threat_level, ThreatLevel::High);
        assert_eq!(result.threat_type.as_deref(), Some("spam"));
    }

    #[tokio::test]
    async fn test_ladder_suspicious_band() {
        let result = classifier_with(0.55).classify(&plain_email()).await;
        assert_eq!(result.classification, Classification::Suspicious);
        assert_eq!(result.threat_level, ThreatLevel::High);
        assert_eq!(result.threat_type.as_deref(), Some("suspicious"));
    }

    #[tokio::test]
    async fn test_ladder_questionable_band() {
        let result = classifier_with(0.35).classify(&plain_email()).await;
        assert_eq!(result.classification, Classification::Questionable);
        assert_eq!(result.threat_level, ThreatLevel::Medium);
    }

    #[tokio::test]
    async fn test_ladder_bounds_are_closed() {
        let result = classifier_with(0.70).classify(&plain_email()).await;
        assert_eq!(result.classification, Classification::Spam);
        assert_eq!(result.threat_level, ThreatLevel::High);

        let result = classifier_with(0.50).classify(&plain_email()).await;
        assert_eq!(result.classification, Classification::Suspicious);

        let result = classifier_with(0.30).classify(&plain_email()).await;
        assert_eq!(result.classification, Classification::Questionable);

        let result = classifier_with(0.15).classify(&plain_email()).await;
        assert_eq!(result.classification, Classification::Legitimate);
        assert_eq!(result.threat_level, ThreatLevel::Low);
    }

    #[tokio::test]
    async fn test_ladder_elevated_band_is_still_legitimate() {
        let result = classifier_with(0.20).classify(&plain_email()).await;
        assert_eq!(result.classification, Classification::Legitimate);
        assert_eq!(result.threat_level, ThreatLevel::Low);
        assert!(result.threat_type.is_none());
    }

    #[tokio::test]
    async fn test_clean_email_is_safe() {
        let result = classifier_with(0.0).classify(&plain_email()).await;
        assert_eq!(result.classification, Classification::Legitimate);
        assert_eq!(result.threat_level, ThreatLevel::Safe);
        assert_eq!(result.confidence, 1.0);
        assert!(result.detailed_analysis.detected_features.is_empty());
        // Sub-millisecond runs still report a nonzero elapsed time.
        assert!(result.processing_time_ms > 0.0);
    }

    #[tokio::test]
    async fn test_detected_features_lift_safe_to_low() {
        let mut input = plain_email();
        input.content = "We have a free gift for loyal customers this month.".to_string();
        let result = classifier_with(0.0).classify(&input).await;
        assert_eq!(result.classification, Classification::Legitimate);
        assert_eq!(result.threat_level, ThreatLevel::Low);
        assert!(!result.detailed_analysis.detected_features.is_empty());
    }

    #[tokio::test]
    async fn test_brand_mention_forces_at_least_questionable() {
        let mut input = plain_email();
        input.content = "Your Netflix subscription renews next week.".to_string();
        let result = classifier_with(0.0).classify(&input).await;
        assert_ne!(result.classification, Classification::Legitimate);
        assert_ne!(result.threat_level, ThreatLevel::Safe);
    }

    #[tokio::test]
    async fn test_score_is_clamped_and_confidence_floors_at_zero() {
        let mut input = plain_email();
        input.subject = "WINNER!!! CLICK HERE NOW!!!".to_string();
        input.content = "ACT NOW!!! Claim your FREE prize, urgent, limited time!!!".to_string();
        let result = classifier_with(0.95).classify(&input).await;
        assert_eq!(result.classification, Classification::Spam);
        assert_eq!(result.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_enrichment_can_raise_but_not_lower() {
        let mut classifier = classifier_with(0.1);
        classifier.set_enrichment(Box::new(FixedEnrichment(Ok(0.9))));
        let result = classifier.classify(&plain_email()).await;
        assert_eq!(result.classification, Classification::Spam);

        let mut classifier = classifier_with(0.75);
        classifier.set_enrichment(Box::new(FixedEnrichment(Ok(0.0))));
        let result = classifier.classify(&plain_email()).await;
        assert_eq!(result.classification, Classification::Spam);
    }

    #[tokio::test]
    async fn test_enrichment_failure_falls_back_to_local_score() {
        let mut classifier = classifier_with(0.75);
        classifier.set_enrichment(Box::new(FixedEnrichment(Err("connection refused".into()))));
        let result = classifier.classify(&plain_email()).await;
        assert_eq!(result.classification, Classification::Spam);
    }

    #[tokio::test]
    async fn test_blatant_spam_with_trained_model() {
        let classifier = ThreatClassifier::new(EngineConfig::default()).unwrap();
        let input = EmailInput {
            subject: "WINNER!! Claim your FREE prize NOW!!!".to_string(),
            sender: "promo@winner-lottery.tk".to_string(),
            content: "URGENT!!! You have won $1,000,000!!! Click here and act now to claim your free money!!!".to_string(),
            user_id: None,
        };
        let result = classifier.classify(&input).await;
        assert_eq!(result.classification, Classification::Spam);
        assert_eq!(result.threat_level, ThreatLevel::High);
        assert!(result.detailed_analysis.structural_penalty > 0.0);
        assert!(!result.detailed_analysis.detected_features.is_empty());
    }

    #[tokio::test]
    async fn test_lookalike_sender_with_trained_model() {
        let classifier = ThreatClassifier::new(EngineConfig::default()).unwrap();
        let input = EmailInput {
            subject: "Your account has been suspended".to_string(),
            sender: "account@netflx-billing.com".to_string(),
            content: "Update your payment method now to continue watching your shows."
                .to_string(),
            user_id: None,
        };
        let result = classifier.classify(&input).await;
        assert!(!result
            .detailed_analysis
            .sender_analysis
            .detected_patterns
            .is_empty());
        assert!(result.detailed_analysis.sender_analysis.suspicious_score >= 0.5);
        assert!(matches!(
            result.classification,
            Classification::Suspicious | Classification::Spam
        ));
    }

    #[tokio::test]
    async fn test_routine_email_with_trained_model() {
        let classifier = ThreatClassifier::new(EngineConfig::default()).unwrap();
        let input = EmailInput {
            subject: "Team meeting moved to 3pm".to_string(),
            sender: "alice@company.com".to_string(),
            content: "Hi all, the weekly sync is moved to 3pm today, same room. Agenda unchanged."
                .to_string(),
            user_id: None,
        };
        let result = classifier.classify(&input).await;
        assert_eq!(result.classification, Classification::Legitimate);
        assert!(result.confidence > 0.5);
    }

    #[tokio::test]
    async fn test_classification_is_deterministic() {
        let classifier = ThreatClassifier::new(EngineConfig::default()).unwrap();
        let input = plain_email();
        let first = classifier.classify(&input).await;
        let second = classifier.classify(&input).await;
        assert_eq!(first.confidence, second.confidence);
        assert_eq!(first.classification, second.classification);
        assert_eq!(
            first.detailed_analysis.spam_probability,
            second.detailed_analysis.spam_probability
        );
    }

    #[tokio::test]
    async fn test_empty_email_is_handled() {
        let classifier = classifier_with(0.5);
        let input = EmailInput {
            subject: String::new(),
            sender: String::new(),
            content: String::new(),
            user_id: None,
        };
        let result = classifier.classify(&input).await;
        assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
        assert!(result.detailed_analysis.sender_analysis.detected_patterns.is_empty());
    }
}
