//! Spam manager for shared access and persistence
//!
//! Wraps a [`SpamScorer`] in a read/write lock so one model can serve
//! several tasks: training and restore take the write lock, classification
//! and statistics only read.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::samples::{self, AccuracyReport};
use super::scorer::SpamScorer;
use super::types::*;
use crate::config::{Config, LimitsConfig};
use crate::error::{Result, SpamError};
use crate::import_export::{self, LoadReport, TrainingSet};

/// Spam manager
#[derive(Clone)]
pub struct SpamManager {
    scorer: Arc<RwLock<SpamScorer>>,
    limits: LimitsConfig,
}

impl SpamManager {
    /// Create a manager with an empty model
    pub fn new(config: &Config) -> Self {
        Self {
            scorer: Arc::new(RwLock::new(SpamScorer::new(config.classifier.clone()))),
            limits: config.limits.clone(),
        }
    }

    fn check_length(&self, text: &str) -> Result<()> {
        let max = self.limits.max_document_length;
        if text.len() > max {
            return Err(SpamError::InputTooLong {
                len: text.len(),
                max,
            });
        }
        Ok(())
    }

    /// Learn from a labeled message
    pub async fn train(&self, text: &str, label: Label) -> Result<usize> {
        self.check_length(text)?;
        let mut scorer = self.scorer.write().await;
        let counted = scorer.learn(text, label);
        debug!("Learned {} message with {} tokens", label, counted);
        Ok(counted)
    }

    /// Learn from spam message
    pub async fn learn_spam(&self, text: &str) -> Result<usize> {
        self.train(text, Label::Spam).await
    }

    /// Learn from ham message
    pub async fn learn_ham(&self, text: &str) -> Result<usize> {
        self.train(text, Label::Ham).await
    }

    /// Train with the built-in corpus
    pub async fn train_defaults(&self) -> VocabularyStats {
        let mut scorer = self.scorer.write().await;
        samples::train_defaults(scorer.vocabulary_mut());
        let stats = scorer.vocabulary().stats();
        info!(
            "Default training completed: {} spam, {} ham, {} tokens",
            stats.total_spam_emails, stats.total_ham_emails, stats.vocabulary_size
        );
        stats
    }

    /// Train from a labeled training file.
    ///
    /// The file is read completely before the model is touched, so a read
    /// failure leaves the model unchanged.
    pub async fn load_training_file(&self, path: &Path) -> Result<LoadReport> {
        let owned: PathBuf = path.to_path_buf();
        let max = self.limits.max_document_length;
        let set = tokio::task::spawn_blocking(move || TrainingSet::from_path(&owned, max))
            .await
            .map_err(|e| SpamError::Io(std::io::Error::other(e)))??;

        let mut scorer = self.scorer.write().await;
        let report = set.train_into(scorer.vocabulary_mut());
        let stats = scorer.vocabulary().stats();
        info!(
            "Loaded {} training emails from {} ({} skipped)",
            report.loaded,
            path.display(),
            report.skipped
        );
        info!(
            "Spam emails: {}, Ham emails: {}, Vocabulary size: {} words",
            stats.total_spam_emails, stats.total_ham_emails, stats.vocabulary_size
        );
        Ok(report)
    }

    /// Score a message
    pub async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        self.check_length(text)?;
        let scorer = self.scorer.read().await;
        Ok(scorer.score(text))
    }

    /// Fail with [`SpamError::NoTrainingData`] unless both labels are trained
    pub async fn ensure_trained(&self) -> Result<()> {
        if self.stats().await.is_trained() {
            Ok(())
        } else {
            Err(SpamError::NoTrainingData)
        }
    }

    /// Run the built-in accuracy suite
    pub async fn evaluate(&self) -> AccuracyReport {
        let scorer = self.scorer.read().await;
        samples::evaluate(scorer.vocabulary(), samples::ACCURACY_SUITE)
    }

    /// Save the model to `path`
    pub async fn save(&self, path: &Path) -> Result<VocabularyStats> {
        let vocab = {
            let scorer = self.scorer.read().await;
            scorer.vocabulary().clone()
        };
        let stats = vocab.stats();

        let owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || import_export::save_to_disk(&vocab, &owned))
            .await
            .map_err(|e| SpamError::Io(std::io::Error::other(e)))??;

        info!("Model saved to {} ({} tokens)", path.display(), stats.vocabulary_size);
        Ok(stats)
    }

    /// Replace the model with the one stored at `path`.
    ///
    /// On any error the current model is kept.
    pub async fn restore(&self, path: &Path) -> Result<VocabularyStats> {
        let owned = path.to_path_buf();
        let vocab = tokio::task::spawn_blocking(move || import_export::load_from_disk(&owned))
            .await
            .map_err(|e| SpamError::Io(std::io::Error::other(e)))??;
        let stats = vocab.stats();

        {
            let mut scorer = self.scorer.write().await;
            scorer.replace_vocabulary(vocab);
        }

        info!("Model loaded from {} ({} tokens)", path.display(), stats.vocabulary_size);
        Ok(stats)
    }

    /// Get vocabulary statistics
    pub async fn stats(&self) -> VocabularyStats {
        let scorer = self.scorer.read().await;
        scorer.vocabulary().stats()
    }

    /// Discard all training
    pub async fn reset(&self) {
        let mut scorer = self.scorer.write().await;
        scorer.vocabulary_mut().reset();
        info!("Model reset");
    }
}
