//! Spam types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Training label for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Spam,
    Ham,
}

impl Label {
    /// Class indicator used by training files ('1' spam, anything else ham)
    pub fn from_indicator(c: char) -> Self {
        if c == '1' {
            Label::Spam
        } else {
            Label::Ham
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Spam => write!(f, "spam"),
            Label::Ham => write!(f, "ham"),
        }
    }
}

/// Per-token occurrence counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStat {
    /// Occurrences in spam-labeled training text
    pub spam_count: u64,
    /// Occurrences in ham-labeled training text
    pub ham_count: u64,
}

impl WordStat {
    /// Increment the counter for `label`
    pub fn record(&mut self, label: Label) {
        match label {
            Label::Spam => self.spam_count = self.spam_count.saturating_add(1),
            Label::Ham => self.ham_count = self.ham_count.saturating_add(1),
        }
    }
}

/// Caller-side reading of a spam probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Spam,
    Ham,
    Uncertain,
}

impl Verdict {
    /// Map a probability onto a verdict using the configured thresholds
    pub fn from_probability(probability: f64, config: &ClassifierConfig) -> Self {
        if probability > config.spam_threshold {
            Verdict::Spam
        } else if probability < config.ham_threshold {
            Verdict::Ham
        } else {
            Verdict::Uncertain
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Spam => write!(f, "SPAM"),
            Verdict::Ham => write!(f, "HAM"),
            Verdict::Uncertain => write!(f, "UNCERTAIN"),
        }
    }
}

/// Classification result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Posterior spam probability in [0, 1]
    pub probability: f64,
    /// Verdict under the configured thresholds
    pub verdict: Verdict,
}

/// Classifier thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Probability above which a message is reported as spam
    #[serde(default = "default_spam_threshold")]
    pub spam_threshold: f64,
    /// Probability below which a message is reported as ham
    #[serde(default = "default_ham_threshold")]
    pub ham_threshold: f64,
}

fn default_spam_threshold() -> f64 {
    0.7
}

fn default_ham_threshold() -> f64 {
    0.3
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            spam_threshold: default_spam_threshold(),
            ham_threshold: default_ham_threshold(),
        }
    }
}

/// Snapshot of vocabulary totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyStats {
    pub total_spam_emails: u64,
    pub total_ham_emails: u64,
    pub total_spam_words: u64,
    pub total_ham_words: u64,
    /// Distinct tokens stored
    pub vocabulary_size: usize,
}

impl VocabularyStats {
    /// True when both labels have at least one training document
    pub fn is_trained(&self) -> bool {
        self.total_spam_emails > 0 && self.total_ham_emails > 0
    }
}
