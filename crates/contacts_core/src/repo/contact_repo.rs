//! Contact repository contract and flat-file implementation.
//!
//! # Responsibility
//! - Load every persisted contact in file order.
//! - Append one contact as a single delimited line.
//!
//! # Invariants
//! - Write paths must call `Contact::validate()` before touching the file.
//! - Read paths reject malformed lines instead of masking them.
//! - The backing file is only ever appended to, never rewritten.

use crate::config::StoreConfig;
use crate::model::contact::{Contact, ContactValidationError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence.
#[derive(Debug)]
pub enum RepoError {
    Io(io::Error),
    Validation(ContactValidationError),
    /// A stored line did not split into exactly three fields.
    MalformedRecord { line_number: usize, content: String },
}

impl RepoError {
    /// Stable category for log lines; carries no record content.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Validation(_) => "validation",
            Self::MalformedRecord { .. } => "malformed_record",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::MalformedRecord {
                line_number,
                content,
            } => write!(f, "malformed record at line {line_number}: `{content}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::MalformedRecord { .. } => None,
        }
    }
}

impl From<io::Error> for RepoError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for contact storage.
pub trait ContactRepository {
    fn load_all(&self) -> RepoResult<Vec<Contact>>;
    fn append(&self, contact: &Contact) -> RepoResult<()>;
}

/// Contact repository backed by one append-only text file.
#[derive(Debug, Clone)]
pub struct FileContactRepository {
    path: PathBuf,
}

impl FileContactRepository {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            path: config.storage_path.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContactRepository for FileContactRepository {
    /// Loads all contacts in file order.
    ///
    /// A missing backing file yields an empty list.
    fn load_all(&self) -> RepoResult<Vec<Contact>> {
        let started_at = Instant::now();

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    "event=contacts_load module=repo status=ok count=0 missing_file=true duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=contacts_load module=repo status=error error_code=open_failed error={}",
                    err
                );
                return Err(err.into());
            }
        };

        match parse_records(BufReader::new(file)) {
            Ok(contacts) => {
                info!(
                    "event=contacts_load module=repo status=ok count={} duration_ms={}",
                    contacts.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(contacts)
            }
            Err(err) => {
                error!(
                    "event=contacts_load module=repo status=error error_code={} duration_ms={}",
                    err.code(),
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    /// Appends one validated contact line, creating the file when absent.
    fn append(&self, contact: &Contact) -> RepoResult<()> {
        if let Err(err) = contact.validate() {
            warn!(
                "event=contact_append module=repo status=rejected error_code=validation field_error={}",
                err
            );
            return Err(err.into());
        }

        let started_at = Instant::now();
        let line = contact.to_record_line();

        // Single write per record; the handle is dropped on every path.
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        match result {
            Ok(()) => {
                info!(
                    "event=contact_append module=repo status=ok bytes={} duration_ms={}",
                    line.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=contact_append module=repo status=error error_code=write_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }
}

/// Parses delimited contact lines from `reader`.
///
/// Blank lines are skipped; a trailing `\r` is stripped from each line.
/// Line numbers in `MalformedRecord` are 1-based.
pub fn parse_records(reader: impl BufRead) -> RepoResult<Vec<Contact>> {
    let mut contacts = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.is_empty() {
            continue;
        }
        match Contact::from_record_line(line) {
            Some(contact) => contacts.push(contact),
            None => {
                return Err(RepoError::MalformedRecord {
                    line_number: index + 1,
                    content: line.to_string(),
                })
            }
        }
    }
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::{parse_records, RepoError};
    use crate::model::contact::Contact;

    #[test]
    fn parse_records_skips_blank_lines_and_strips_carriage_returns() {
        let input = "Ana|email|ana@x.com\r\n\nLeo|phone|555-1111\n";
        let contacts = parse_records(input.as_bytes()).unwrap();
        assert_eq!(
            contacts,
            vec![
                Contact::new("Ana", "email", "ana@x.com"),
                Contact::new("Leo", "phone", "555-1111"),
            ]
        );
    }

    #[test]
    fn error_code_omits_record_content() {
        let err = RepoError::MalformedRecord {
            line_number: 4,
            content: "Ana|ana@x.com".to_string(),
        };
        assert_eq!(err.code(), "malformed_record");
        assert!(err.to_string().contains("Ana|ana@x.com"));
    }

    #[test]
    fn parse_records_reports_one_based_line_number() {
        let input = "Ana|email|ana@x.com\nbroken line\n";
        let err = parse_records(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            RepoError::MalformedRecord { line_number: 2, ref content } if content == "broken line"
        ));
    }
}
