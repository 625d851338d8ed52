//! Vocabulary store
//!
//! Maps normalized tokens to their per-label counts and keeps the running
//! totals the scorer normalizes against.

use std::collections::HashMap;

use super::types::{Label, VocabularyStats, WordStat};

/// Word-frequency store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    words: HashMap<String, WordStat>,
    total_spam_emails: u64,
    total_ham_emails: u64,
    total_spam_words: u64,
    total_ham_words: u64,
}

impl Vocabulary {
    /// Create an empty vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a token
    pub fn lookup(&self, token: &str) -> Option<&WordStat> {
        self.words.get(token)
    }

    /// Get the entry for `token`, creating it with zero counts if absent
    pub fn upsert(&mut self, token: &str) -> &mut WordStat {
        self.words.entry(token.to_string()).or_default()
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Clear all entries and totals
    pub fn reset(&mut self) {
        self.words.clear();
        self.total_spam_emails = 0;
        self.total_ham_emails = 0;
        self.total_spam_words = 0;
        self.total_ham_words = 0;
    }

    /// Iterate over all entries, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WordStat)> {
        self.words.iter().map(|(token, stat)| (token.as_str(), stat))
    }

    /// Count one occurrence of `token` under `label`
    pub fn record_word(&mut self, token: &str, label: Label) {
        self.upsert(token).record(label);
        match label {
            Label::Spam => self.total_spam_words = self.total_spam_words.saturating_add(1),
            Label::Ham => self.total_ham_words = self.total_ham_words.saturating_add(1),
        }
    }

    /// Count one training document under `label`
    pub fn record_email(&mut self, label: Label) {
        match label {
            Label::Spam => self.total_spam_emails = self.total_spam_emails.saturating_add(1),
            Label::Ham => self.total_ham_emails = self.total_ham_emails.saturating_add(1),
        }
    }

    /// Build a vocabulary from stored entries.
    ///
    /// Word totals are recomputed from the entries; only the email totals
    /// are taken as given. Returns `None` if a word total would overflow.
    pub fn from_parts<I>(
        total_spam_emails: u64,
        total_ham_emails: u64,
        entries: I,
    ) -> Option<Self>
    where
        I: IntoIterator<Item = (String, WordStat)>,
    {
        let mut vocab = Self {
            total_spam_emails,
            total_ham_emails,
            ..Self::default()
        };

        for (token, stat) in entries {
            // Duplicate tokens: the last line wins, totals follow it
            let previous = vocab.words.insert(token, stat).unwrap_or_default();
            vocab.total_spam_words = (vocab.total_spam_words - previous.spam_count)
                .checked_add(stat.spam_count)?;
            vocab.total_ham_words = (vocab.total_ham_words - previous.ham_count)
                .checked_add(stat.ham_count)?;
        }

        Some(vocab)
    }

    pub fn total_emails(&self, label: Label) -> u64 {
        match label {
            Label::Spam => self.total_spam_emails,
            Label::Ham => self.total_ham_emails,
        }
    }

    pub fn total_words(&self, label: Label) -> u64 {
        match label {
            Label::Spam => self.total_spam_words,
            Label::Ham => self.total_ham_words,
        }
    }

    /// True when both labels have at least one training document
    pub fn is_trained(&self) -> bool {
        self.total_spam_emails > 0 && self.total_ham_emails > 0
    }

    /// Snapshot of the totals
    pub fn stats(&self) -> VocabularyStats {
        VocabularyStats {
            total_spam_emails: self.total_spam_emails,
            total_ham_emails: self.total_ham_emails,
            total_spam_words: self.total_spam_words,
            total_ham_words: self.total_ham_words,
            vocabulary_size: self.words.len(),
        }
    }

    /// Check that the word totals equal the sums of the per-token counts
    pub fn check_consistency(&self) -> bool {
        let (spam, ham) = self
            .words
            .values()
            .fold((0u64, 0u64), |(s, h), stat| {
                (s.saturating_add(stat.spam_count), h.saturating_add(stat.ham_count))
            });
        spam == self.total_spam_words && ham == self.total_ham_words
    }
}
