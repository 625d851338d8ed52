//! Labeled training data files
//!
//! One document per line: a class indicator (`1` spam, `0` ham), one
//! separator character, then the document text.

use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SpamError};
use crate::spam::{train, Label, Vocabulary};

/// Lines shorter than this are skipped
const MIN_LINE_LENGTH: usize = 3;

/// A labeled document read from a training file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample {
    pub label: Label,
    pub text: String,
}

/// Why a training line was not used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Shorter than the indicator, separator and one character of text
    TooShort,
    /// Text exceeds the configured document length
    TooLong,
}

/// Parse one training line
pub fn parse_line(
    line: &str,
    max_document_length: usize,
) -> std::result::Result<TrainingExample, SkipReason> {
    if line.len() < MIN_LINE_LENGTH {
        return Err(SkipReason::TooShort);
    }

    let mut chars = line.chars();
    let label = chars.next().map(Label::from_indicator).ok_or(SkipReason::TooShort)?;
    chars.next();
    let text = chars.as_str();

    if text.is_empty() {
        return Err(SkipReason::TooShort);
    }
    if text.len() > max_document_length {
        return Err(SkipReason::TooLong);
    }

    Ok(TrainingExample {
        label,
        text: text.to_string(),
    })
}

/// Summary of a bulk training load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Documents trained
    pub loaded: usize,
    /// Lines that were skipped
    pub skipped: usize,
    /// Of the loaded documents, how many were spam
    pub spam: usize,
    /// Of the loaded documents, how many were ham
    pub ham: usize,
}

/// Parsed contents of a training file
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    pub examples: Vec<TrainingExample>,
    pub skipped: usize,
}

impl TrainingSet {
    /// Parse every line of `reader`.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than failing the
    /// load; the tokenizer drops them anyway.
    pub fn from_reader<R: Read>(reader: R, max_document_length: usize) -> Result<Self> {
        let mut reader = BufReader::new(reader);
        let mut set = TrainingSet::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            let bytes = buf.strip_suffix(b"\n").unwrap_or(&buf);
            let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
            let line = String::from_utf8_lossy(bytes);

            match parse_line(&line, max_document_length) {
                Ok(example) => set.examples.push(example),
                Err(SkipReason::TooShort) => set.skipped += 1,
                Err(SkipReason::TooLong) => {
                    debug!(
                        "Skipping training line {}: longer than {} bytes",
                        line_no, max_document_length
                    );
                    set.skipped += 1;
                }
            }
        }

        Ok(set)
    }

    /// Read and parse a training file
    pub fn from_path(path: &Path, max_document_length: usize) -> Result<Self> {
        let file = File::open(path).map_err(|e| SpamError::file_unavailable(path, e))?;
        Self::from_reader(file, max_document_length).map_err(|e| e.at_path(path))
    }

    /// Train `vocab` with every parsed example
    pub fn train_into(&self, vocab: &mut Vocabulary) -> LoadReport {
        let mut report = LoadReport {
            skipped: self.skipped,
            ..LoadReport::default()
        };

        for example in &self.examples {
            train(vocab, &example.text, example.label);
            report.loaded += 1;
            match example.label {
                Label::Spam => report.spam += 1,
                Label::Ham => report.ham += 1,
            }
        }

        report
    }
}
