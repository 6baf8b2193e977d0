//! Threat detection core
//!
//! Everything that turns one raw access-log event into a verdict:
//! feature extraction, rule-based classification, heuristic scoring and
//! the decision pipeline that drives the persistence layer.

pub mod classifier;
pub mod event;
pub mod features;
pub mod pipeline;
pub mod scorer;

pub use classifier::ThreatLabel;
pub use event::LogEvent;
pub use features::FeatureVector;
pub use pipeline::Verdict;
pub use scorer::ScoringConfig;
