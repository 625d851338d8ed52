//! Model file format
//!
//! A header line `spam_emails ham_emails spam_words ham_words` followed by
//! one `token spam_count ham_count` line per vocabulary entry.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{Result, SpamError};
use crate::spam::tokenizer::is_valid_token;
use crate::spam::{Vocabulary, WordStat};

/// Totals stored on the first line of a model file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelHeader {
    pub total_spam_emails: u64,
    pub total_ham_emails: u64,
    pub total_spam_words: u64,
    pub total_ham_words: u64,
}

/// Model writer
pub struct ModelWriter<W: Write> {
    writer: W,
}

impl<W: Write> ModelWriter<W> {
    /// Create a new model writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the header line
    pub fn write_header(&mut self, header: &ModelHeader) -> Result<()> {
        writeln!(
            self.writer,
            "{} {} {} {}",
            header.total_spam_emails,
            header.total_ham_emails,
            header.total_spam_words,
            header.total_ham_words
        )?;
        Ok(())
    }

    /// Write one vocabulary entry
    pub fn write_entry(&mut self, token: &str, stat: &WordStat) -> Result<()> {
        writeln!(self.writer, "{} {} {}", token, stat.spam_count, stat.ham_count)?;
        Ok(())
    }

    /// Write a whole vocabulary
    pub fn write_vocabulary(&mut self, vocab: &Vocabulary) -> Result<()> {
        let stats = vocab.stats();
        self.write_header(&ModelHeader {
            total_spam_emails: stats.total_spam_emails,
            total_ham_emails: stats.total_ham_emails,
            total_spam_words: stats.total_spam_words,
            total_ham_words: stats.total_ham_words,
        })?;

        for (token, stat) in vocab.iter() {
            self.write_entry(token, stat)?;
        }
        Ok(())
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Model reader
pub struct ModelReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> ModelReader<R> {
    /// Create a new model reader
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Parse the whole model.
    ///
    /// Any malformed line fails the read; nothing partial is returned.
    /// Word totals are recomputed from the entries.
    pub fn read_vocabulary(mut self) -> Result<Vocabulary> {
        let mut header = None;
        let mut entries = Vec::new();
        let mut spam_words = 0u64;
        let mut ham_words = 0u64;
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let line = std::str::from_utf8(&buf)
                .map_err(|_| SpamError::malformed(line_no, "invalid UTF-8"))?;
            if line.trim().is_empty() {
                continue;
            }

            match header {
                None => header = Some(parse_header(line, line_no)?),
                Some(_) => {
                    let (token, stat) = parse_entry(line, line_no)?;
                    // Running sums bound every word total the entries can produce
                    spam_words = spam_words
                        .checked_add(stat.spam_count)
                        .ok_or_else(|| SpamError::malformed(line_no, "count overflow"))?;
                    ham_words = ham_words
                        .checked_add(stat.ham_count)
                        .ok_or_else(|| SpamError::malformed(line_no, "count overflow"))?;
                    entries.push((token, stat));
                }
            }
        }

        let header = header.ok_or_else(|| SpamError::malformed(1, "missing header"))?;
        let vocab = Vocabulary::from_parts(
            header.total_spam_emails,
            header.total_ham_emails,
            entries,
        )
        .ok_or_else(|| SpamError::malformed(line_no, "count overflow"))?;

        let stats = vocab.stats();
        if stats.total_spam_words != header.total_spam_words
            || stats.total_ham_words != header.total_ham_words
        {
            warn!(
                "Model header word totals ({} spam, {} ham) disagree with entries \
                 ({} spam, {} ham); using entries",
                header.total_spam_words,
                header.total_ham_words,
                stats.total_spam_words,
                stats.total_ham_words
            );
        }

        debug!("Parsed model with {} tokens", stats.vocabulary_size);
        Ok(vocab)
    }
}

fn parse_field<T: FromStr>(field: Option<&str>, line_no: usize, name: &str) -> Result<T> {
    let field = field.ok_or_else(|| SpamError::malformed(line_no, format!("missing {}", name)))?;
    field
        .parse()
        .map_err(|_| SpamError::malformed(line_no, format!("invalid {} '{}'", name, field)))
}

fn parse_header(line: &str, line_no: usize) -> Result<ModelHeader> {
    let mut fields = line.split_whitespace();
    let header = ModelHeader {
        total_spam_emails: parse_field(fields.next(), line_no, "spam email total")?,
        total_ham_emails: parse_field(fields.next(), line_no, "ham email total")?,
        total_spam_words: parse_field(fields.next(), line_no, "spam word total")?,
        total_ham_words: parse_field(fields.next(), line_no, "ham word total")?,
    };
    if fields.next().is_some() {
        return Err(SpamError::malformed(line_no, "trailing fields in header"));
    }
    Ok(header)
}

fn parse_entry(line: &str, line_no: usize) -> Result<(String, WordStat)> {
    let mut fields = line.split_whitespace();
    let token = fields
        .next()
        .ok_or_else(|| SpamError::malformed(line_no, "missing token"))?;
    if !is_valid_token(token) {
        return Err(SpamError::malformed(line_no, format!("invalid token '{}'", token)));
    }

    let stat = WordStat {
        spam_count: parse_field(fields.next(), line_no, "spam count")?,
        ham_count: parse_field(fields.next(), line_no, "ham count")?,
    };
    if fields.next().is_some() {
        return Err(SpamError::malformed(line_no, "trailing fields in entry"));
    }
    Ok((token.to_string(), stat))
}

/// Save `vocab` to `path`.
///
/// The model is written to a temporary file next to `path` and renamed
/// into place, so an existing model is never left half-written.
pub fn save_to_disk(vocab: &Vocabulary, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| SpamError::file_unavailable(path, e))?;

    let temp_file =
        NamedTempFile::new_in(parent_dir).map_err(|e| SpamError::file_unavailable(path, e))?;

    let mut writer = ModelWriter::new(BufWriter::new(temp_file.as_file()));
    writer
        .write_vocabulary(vocab)
        .map_err(|e| e.at_path(path))?;
    writer.finish().map_err(|e| e.at_path(path))?;

    temp_file
        .persist(path)
        .map_err(|e| SpamError::file_unavailable(path, e.error))?;
    Ok(())
}

/// Load a vocabulary from `path`
pub fn load_from_disk(path: &Path) -> Result<Vocabulary> {
    let file = File::open(path).map_err(|e| SpamError::file_unavailable(path, e))?;
    ModelReader::new(file)
        .read_vocabulary()
        .map_err(|e| e.at_path(path))
}
