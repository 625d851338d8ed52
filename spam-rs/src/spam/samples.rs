//! Built-in training corpus and accuracy suite

use serde::Serialize;

use super::scorer::{classify, train};
use super::types::Label;
use super::vocabulary::Vocabulary;

/// Default spam examples
pub const DEFAULT_SPAM: &[&str] = &[
    "win free money now click here urgent",
    "congratulations you won lottery claim prize",
    "urgent your account has been compromised",
    "limited time offer buy now discount",
    "inheritance money transfer fees required",
    "you are selected for special promotion",
    "claim your free gift now limited",
];

/// Default ham examples
pub const DEFAULT_HAM: &[&str] = &[
    "meeting scheduled for tomorrow please attend",
    "project deadline next week team collaboration",
    "lunch together friday restaurant reservation",
    "family dinner this weekend bring dessert",
    "software update available security patch install",
    "weekly report attached please review",
    "birthday party next month save the date",
];

/// One case of the accuracy suite
#[derive(Debug, Clone, Copy)]
pub struct AccuracyCase {
    pub text: &'static str,
    pub expected: Label,
    pub description: &'static str,
}

/// Fixed accuracy suite
pub const ACCURACY_SUITE: &[AccuracyCase] = &[
    AccuracyCase {
        text: "win free money now click here",
        expected: Label::Spam,
        description: "Obvious spam",
    },
    AccuracyCase {
        text: "meeting tomorrow at conference room",
        expected: Label::Ham,
        description: "Clear ham",
    },
    AccuracyCase {
        text: "congratulations you won prize",
        expected: Label::Spam,
        description: "Spam with winning",
    },
    AccuracyCase {
        text: "lunch meeting with team today",
        expected: Label::Ham,
        description: "Work email",
    },
    AccuracyCase {
        text: "urgent account verification required",
        expected: Label::Spam,
        description: "Phishing attempt",
    },
    AccuracyCase {
        text: "project deadline extended to friday",
        expected: Label::Ham,
        description: "Project update",
    },
    AccuracyCase {
        text: "claim your free gift now",
        expected: Label::Spam,
        description: "Spam with free",
    },
    AccuracyCase {
        text: "family dinner this weekend",
        expected: Label::Ham,
        description: "Personal email",
    },
];

/// Train `vocab` with the built-in corpus
pub fn train_defaults(vocab: &mut Vocabulary) {
    for text in DEFAULT_SPAM {
        train(vocab, text, Label::Spam);
    }
    for text in DEFAULT_HAM {
        train(vocab, text, Label::Ham);
    }
}

/// Outcome of one accuracy case
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub description: &'static str,
    pub text: &'static str,
    pub expected: Label,
    pub predicted: Label,
    pub probability: f64,
}

impl CaseOutcome {
    pub fn is_correct(&self) -> bool {
        self.expected == self.predicted
    }
}

/// Accuracy suite report
#[derive(Debug, Clone, Serialize)]
pub struct AccuracyReport {
    pub outcomes: Vec<CaseOutcome>,
    pub correct: usize,
    pub total: usize,
}

impl AccuracyReport {
    /// Fraction of correct predictions, 0.0 for an empty suite
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Run `cases` against `vocab`, predicting spam above 0.5
pub fn evaluate(vocab: &Vocabulary, cases: &[AccuracyCase]) -> AccuracyReport {
    let outcomes: Vec<CaseOutcome> = cases
        .iter()
        .map(|case| {
            let probability = classify(vocab, case.text);
            let predicted = if probability > 0.5 { Label::Spam } else { Label::Ham };
            CaseOutcome {
                description: case.description,
                text: case.text,
                expected: case.expected,
                predicted,
                probability,
            }
        })
        .collect();

    let correct = outcomes.iter().filter(|o| o.is_correct()).count();
    AccuracyReport {
        total: outcomes.len(),
        correct,
        outcomes,
    }
}
