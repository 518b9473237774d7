pub mod analyzers;
pub mod api;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod enrichment;
pub mod model;
pub mod recommend;
pub mod stats;
pub mod tokenizer;

pub use config::EngineConfig;
pub use engine::{
    Classification, ClassificationResult, EmailInput, ThreatClassifier, ThreatLevel,
};
pub use stats::{StatEvent, StatisticsCollector};
