//! Naive Bayes content model.
//!
//! A `TrainedModel` is built once from a labeled corpus and is read-only from
//! then on; every concurrent classification call shares the same immutable
//! snapshot. Retraining means building a new snapshot, never editing one in
//! place.

use crate::corpus::{self, Label, TrainingSample};
use crate::tokenizer;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

/// Strategy seam for the content-scoring step so alternative models can be
/// swapped in without touching the decision engine.
pub trait ContentModel: Send + Sync {
    /// Spam probability in [0, 1] for a token multiset.
    fn spam_probability(&self, tokens: &[String]) -> f64;
}

#[derive(Debug, Default)]
pub struct TrainedModel {
    spam_word_counts: HashMap<String, u32>,
    ham_word_counts: HashMap<String, u32>,
    total_spam_words: u64,
    total_ham_words: u64,
    spam_samples: u32,
    ham_samples: u32,
    vocabulary: HashSet<String>,
}

/// Summary of a trained model for diagnostics and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub spam_samples: u32,
    pub ham_samples: u32,
    pub vocabulary_size: usize,
    pub total_spam_words: u64,
    pub total_ham_words: u64,
}

static SHARED_MODEL: OnceLock<Arc<TrainedModel>> = OnceLock::new();

impl TrainedModel {
    /// Train on a labeled corpus. Duplicate tokens within a sample are kept,
    /// so the counts are frequency-weighted rather than set-based.
    pub fn build(samples: &[TrainingSample]) -> Self {
        let mut model = TrainedModel::default();

        for sample in samples {
            match sample.label {
                Label::Spam => model.spam_samples += 1,
                Label::Ham => model.ham_samples += 1,
            }

            for token in tokenizer::tokenize(&sample.text) {
                match sample.label {
                    Label::Spam => {
                        *model.spam_word_counts.entry(token.clone()).or_insert(0) += 1;
                        model.total_spam_words += 1;
                    }
                    Label::Ham => {
                        *model.ham_word_counts.entry(token.clone()).or_insert(0) += 1;
                        model.total_ham_words += 1;
                    }
                }
                model.vocabulary.insert(token);
            }
        }

        log::debug!(
            "trained model: {} spam / {} ham samples, vocabulary {}",
            model.spam_samples,
            model.ham_samples,
            model.vocabulary.len()
        );
        model
    }

    /// The process-wide default model, trained exactly once from the built-in
    /// corpus. Concurrent first callers share a single build.
    pub fn shared() -> Arc<TrainedModel> {
        SHARED_MODEL
            .get_or_init(|| Arc::new(TrainedModel::build(&corpus::builtin_corpus())))
            .clone()
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            spam_samples: self.spam_samples,
            ham_samples: self.ham_samples,
            vocabulary_size: self.vocabulary.len(),
            total_spam_words: self.total_spam_words,
            total_ham_words: self.total_ham_words,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spam_samples == 0 && self.ham_samples == 0
    }

    /// Per-class log prior plus Laplace-smoothed log likelihood for each
    /// token. Everything stays in log space until the final normalization so
    /// long inputs cannot underflow to zero.
    fn class_log_score(&self, tokens: &[String], label: Label) -> f64 {
        let total_samples = (self.spam_samples + self.ham_samples) as f64;
        let (class_samples, class_counts, class_total) = match label {
            Label::Spam => (
                self.spam_samples as f64,
                &self.spam_word_counts,
                self.total_spam_words as f64,
            ),
            Label::Ham => (
                self.ham_samples as f64,
                &self.ham_word_counts,
                self.total_ham_words as f64,
            ),
        };

        let mut score = (class_samples / total_samples).ln();
        let denominator = class_total + self.vocabulary.len() as f64;
        for token in tokens {
            let count = class_counts.get(token).copied().unwrap_or(0) as f64;
            score += ((count + 1.0) / denominator).ln();
        }
        score
    }
}

impl ContentModel for TrainedModel {
    fn spam_probability(&self, tokens: &[String]) -> f64 {
        if self.is_empty() {
            // No training data at all: stay neutral instead of dividing by zero.
            return 0.5;
        }

        let spam_score = self.class_log_score(tokens, Label::Spam);
        let ham_score = self.class_log_score(tokens, Label::Ham);

        // Normalize the two log scores without exponentiating either one
        // directly; exp(ham - spam) is stable even when both are very small.
        let probability = 1.0 / (1.0 + (ham_score - spam_score).exp());
        probability.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::builtin_corpus;

    fn spam_probability_of(model: &TrainedModel, text: &str) -> f64 {
        model.spam_probability(&tokenizer::tokenize(text))
    }

    #[test]
    fn test_empty_corpus_scores_neutral() {
        let model = TrainedModel::build(&[]);
        let p = spam_probability_of(&model, "free money winner");
        assert_eq!(p, 0.5);
    }

    #[test]
    fn test_spam_text_scores_higher_than_ham_text() {
        let model = TrainedModel::build(&builtin_corpus());
        let spam = spam_probability_of(
            &model,
            "URGENT winner! Claim your free lottery prize now, click here immediately",
        );
        let ham = spam_probability_of(
            &model,
            "Please review the attached quarterly report before our meeting tomorrow",
        );
        assert!(spam > ham, "spam {spam} should exceed ham {ham}");
        assert!(spam > 0.5);
        assert!(ham < 0.5);
    }

    #[test]
    fn test_probability_stays_in_range_for_long_input() {
        let model = TrainedModel::build(&builtin_corpus());
        // Hundreds of tokens would underflow a non-log-space implementation.
        let long_text = "verify account suspended click ".repeat(300);
        let p = spam_probability_of(&model, &long_text);
        assert!((0.0..=1.0).contains(&p));
        assert!(p > 0.9);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let model = TrainedModel::build(&builtin_corpus());
        let text = "Netflix account suspended, update payment now";
        assert_eq!(
            spam_probability_of(&model, text),
            spam_probability_of(&model, text)
        );
    }

    #[test]
    fn test_shared_model_is_a_single_snapshot() {
        let a = TrainedModel::shared();
        let b = TrainedModel::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_unseen_tokens_get_nonzero_likelihood() {
        let model = TrainedModel::build(&builtin_corpus());
        let p = spam_probability_of(&model, "zyxwvut qponmlk completely novel words");
        assert!(p > 0.0 && p < 1.0);
    }
}
