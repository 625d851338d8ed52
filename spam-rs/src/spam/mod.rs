//! Spam classification module
//!
//! Provides the token store, Naive Bayes training and scoring, and a
//! shared manager for using one model from several tasks.

pub mod manager;
pub mod samples;
pub mod scorer;
pub mod tokenizer;
pub mod types;
pub mod vocabulary;

pub use manager::SpamManager;
pub use scorer::{classify, train, SpamScorer, NEUTRAL_PROBABILITY};
pub use tokenizer::{normalize, tokenize};
pub use types::*;
pub use vocabulary::Vocabulary;
