//! spam-rs: Naive Bayes email spam classifier
//!
//! Estimates the probability that an email body is spam from word
//! frequencies learned incrementally from labeled examples.
//!
//! # Features
//!
//! - **Tokenizer**: whitespace split, ASCII alphanumeric normalization,
//!   short-word filtering
//! - **Vocabulary**: per-token spam/ham counts with running totals
//! - **Scoring**: Naive Bayes with Laplace smoothing in log space
//! - **Persistence**: plain-text model files with atomic saves
//! - **Shared access**: [`spam::SpamManager`] serializes writers and lets
//!   readers classify concurrently
//!
//! # Example
//!
//! ```
//! use spam_rs::spam::{classify, train, Label, Vocabulary};
//!
//! let mut vocab = Vocabulary::new();
//! train(&mut vocab, "win free money now click here urgent", Label::Spam);
//! train(&mut vocab, "meeting scheduled for tomorrow please attend", Label::Ham);
//!
//! assert!(classify(&vocab, "win free money") > 0.5);
//! assert!(classify(&vocab, "meeting tomorrow") < 0.5);
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`spam`]: Tokenizer, vocabulary, training and scoring
//! - [`import_export`]: Training files and model persistence

pub mod config;
pub mod error;
pub mod import_export;
pub mod spam;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SpamError};
pub use spam::{SpamManager, Vocabulary};
