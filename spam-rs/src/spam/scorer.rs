//! Spam scoring engine
//!
//! Naive Bayes training and classification over a [`Vocabulary`], with
//! additive-one smoothing and log-space accumulation.

use super::tokenizer::tokenize;
use super::types::*;
use super::vocabulary::Vocabulary;

/// Probability returned when the model or the document carries no signal
pub const NEUTRAL_PROBABILITY: f64 = 0.5;

/// Train `vocab` with one labeled document.
///
/// Returns the number of tokens counted. The document is counted even when
/// it contains no qualifying tokens.
pub fn train(vocab: &mut Vocabulary, text: &str, label: Label) -> usize {
    let mut counted = 0;
    for token in tokenize(text) {
        vocab.record_word(&token, label);
        counted += 1;
    }
    vocab.record_email(label);
    counted
}

/// Posterior probability that `text` is spam
pub fn classify(vocab: &Vocabulary, text: &str) -> f64 {
    if !vocab.is_trained() {
        return NEUTRAL_PROBABILITY;
    }

    let spam_emails = vocab.total_emails(Label::Spam) as f64;
    let ham_emails = vocab.total_emails(Label::Ham) as f64;
    let prior_spam = spam_emails / (spam_emails + ham_emails);
    let prior_ham = 1.0 - prior_spam;

    let mut log_spam = prior_spam.ln();
    let mut log_ham = prior_ham.ln();

    let vocab_size = vocab.len() as f64;
    let spam_denominator = vocab.total_words(Label::Spam) as f64 + vocab_size;
    let ham_denominator = vocab.total_words(Label::Ham) as f64 + vocab_size;

    let mut processed = 0usize;
    for token in tokenize(text) {
        let (spam_count, ham_count) = vocab
            .lookup(&token)
            .map(|stat| (stat.spam_count as f64, stat.ham_count as f64))
            .unwrap_or((0.0, 0.0));

        log_spam += ((spam_count + 1.0) / spam_denominator).ln();
        log_ham += ((ham_count + 1.0) / ham_denominator).ln();
        processed += 1;
    }

    if processed == 0 {
        return NEUTRAL_PROBABILITY;
    }

    // Shift both by the max so the larger term exponentiates to 1
    let max = log_spam.max(log_ham);
    let spam = (log_spam - max).exp();
    let ham = (log_ham - max).exp();
    spam / (spam + ham)
}

/// Spam scorer: a vocabulary plus the thresholds used to read its output
#[derive(Debug, Clone, Default)]
pub struct SpamScorer {
    config: ClassifierConfig,
    vocabulary: Vocabulary,
}

impl SpamScorer {
    /// Create a scorer with an empty vocabulary
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            vocabulary: Vocabulary::new(),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vocabulary_mut(&mut self) -> &mut Vocabulary {
        &mut self.vocabulary
    }

    /// Replace the vocabulary wholesale, returning the old one
    pub fn replace_vocabulary(&mut self, vocabulary: Vocabulary) -> Vocabulary {
        std::mem::replace(&mut self.vocabulary, vocabulary)
    }

    /// Learn from a labeled message
    pub fn learn(&mut self, text: &str, label: Label) -> usize {
        train(&mut self.vocabulary, text, label)
    }

    /// Learn from a spam message
    pub fn learn_spam(&mut self, text: &str) -> usize {
        self.learn(text, Label::Spam)
    }

    /// Learn from a ham (non-spam) message
    pub fn learn_ham(&mut self, text: &str) -> usize {
        self.learn(text, Label::Ham)
    }

    /// Spam probability of a message
    pub fn probability(&self, text: &str) -> f64 {
        classify(&self.vocabulary, text)
    }

    /// Score a message and apply the verdict thresholds
    pub fn score(&self, text: &str) -> ClassificationResult {
        let probability = self.probability(text);
        ClassificationResult {
            probability,
            verdict: Verdict::from_probability(probability, &self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_document_vocab() -> Vocabulary {
        let mut vocab = Vocabulary::new();
        train(&mut vocab, "win free money now click here urgent", Label::Spam);
        train(&mut vocab, "meeting scheduled for tomorrow please attend", Label::Ham);
        vocab
    }

    #[test]
    fn test_untrained_is_neutral() {
        let vocab = Vocabulary::new();
        assert_eq!(classify(&vocab, "win free money"), 0.5);

        let mut spam_only = Vocabulary::new();
        train(&mut spam_only, "win free money", Label::Spam);
        assert_eq!(classify(&spam_only, "win free money"), 0.5);
    }

    #[test]
    fn test_no_tokens_is_neutral() {
        let vocab = two_document_vocab();
        assert_eq!(classify(&vocab, ""), 0.5);
        assert_eq!(classify(&vocab, "to be or no"), 0.5);
        assert_eq!(classify(&vocab, "!!! ?? ..."), 0.5);
    }

    #[test]
    fn test_two_document_scenario() {
        let vocab = two_document_vocab();
        assert!(classify(&vocab, "win free money") > 0.5);
        assert!(classify(&vocab, "meeting tomorrow") < 0.5);
    }

    #[test]
    fn test_train_counts_tokens_and_emails() {
        let mut vocab = Vocabulary::new();
        let counted = train(&mut vocab, "Free money, FREE gift!", Label::Spam);
        assert_eq!(counted, 4);
        assert_eq!(vocab.lookup("free").unwrap().spam_count, 2);
        assert_eq!(vocab.total_words(Label::Spam), 4);
        assert_eq!(vocab.total_emails(Label::Spam), 1);
        assert!(vocab.check_consistency());
    }

    #[test]
    fn test_train_empty_document_still_counted() {
        let mut vocab = Vocabulary::new();
        assert_eq!(train(&mut vocab, "", Label::Ham), 0);
        assert_eq!(train(&mut vocab, "ok hi", Label::Ham), 0);
        assert_eq!(vocab.total_emails(Label::Ham), 2);
        assert_eq!(vocab.total_words(Label::Ham), 0);
        assert!(vocab.is_empty());
    }

    #[test]
    fn test_training_twice_doubles_counts() {
        let text = "claim your free gift now limited";
        let mut once = Vocabulary::new();
        train(&mut once, text, Label::Spam);

        let mut twice = Vocabulary::new();
        train(&mut twice, text, Label::Spam);
        train(&mut twice, text, Label::Spam);

        assert_eq!(twice.total_emails(Label::Spam), 2);
        assert_eq!(twice.total_words(Label::Spam), 2 * once.total_words(Label::Spam));
        for (token, stat) in once.iter() {
            let doubled = twice.lookup(token).unwrap();
            assert_eq!(doubled.spam_count, 2 * stat.spam_count);
            assert_eq!(doubled.ham_count, 0);
        }
    }

    #[test]
    fn test_unseen_tokens_follow_prior() {
        let mut vocab = Vocabulary::new();
        train(&mut vocab, "cheap pills online", Label::Spam);
        train(&mut vocab, "team meeting notes", Label::Ham);
        train(&mut vocab, "ok", Label::Ham);
        train(&mut vocab, "", Label::Ham);

        // Both classes have 3 words, so unseen-token likelihoods cancel
        let p = classify(&vocab, "zebra xylophone");
        assert!(p > 0.0 && p < 1.0);
        assert!(p < 0.5);
        assert!((p - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_matches_closed_form() {
        let vocab = two_document_vocab();
        // 7 spam words, 6 ham words ("for" is kept), 13 distinct tokens
        let v = vocab.len() as f64;
        assert_eq!(vocab.len(), 13);
        let ps = 0.5 * (2.0 / (7.0 + v)) * (2.0 / (7.0 + v));
        let ph = 0.5 * (1.0 / (6.0 + v)) * (1.0 / (6.0 + v));
        let expected = ps / (ps + ph);
        assert!((classify(&vocab, "free money") - expected).abs() < 1e-12);
    }

    #[test]
    fn test_long_input_does_not_underflow() {
        let vocab = two_document_vocab();
        let text = "win free money ".repeat(2000);
        let p = classify(&vocab, &text);
        assert!(p.is_finite());
        assert!(p > 0.99);

        let text = "meeting tomorrow ".repeat(2000);
        let p = classify(&vocab, &text);
        assert!(p.is_finite());
        assert!(p < 0.01);
    }

    #[test]
    fn test_scorer_verdicts() {
        let mut scorer = SpamScorer::default();
        scorer.learn_spam("win free money now click here urgent");
        scorer.learn_ham("meeting scheduled for tomorrow please attend");

        assert_eq!(scorer.score("win free money now").verdict, Verdict::Spam);
        assert_eq!(scorer.score("meeting scheduled tomorrow").verdict, Verdict::Ham);
        assert_eq!(scorer.score("").verdict, Verdict::Uncertain);
    }

    #[test]
    fn test_replace_vocabulary() {
        let mut scorer = SpamScorer::default();
        scorer.learn_spam("free money");
        let old = scorer.replace_vocabulary(Vocabulary::new());
        assert_eq!(old.len(), 2);
        assert!(scorer.vocabulary().is_empty());
    }
}
