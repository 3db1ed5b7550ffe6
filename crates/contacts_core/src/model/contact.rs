//! Contact domain model.
//!
//! # Responsibility
//! - Define the single record persisted by the contact store.
//! - Own the line encoding used by the backing file.
//!
//! # Invariants
//! - No field is empty.
//! - No field contains `|`, `\r` or `\n`; the line format has no escaping.
//! - `Contact::from_record_line(c.to_record_line())` yields `c` for any valid `c`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Separator between fields of one persisted record.
pub const FIELD_DELIMITER: char = '|';

const FORBIDDEN_CHARACTERS: [char; 3] = [FIELD_DELIMITER, '\r', '\n'];

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Names the contact field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    ContactForm,
    ContactValue,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ContactForm => "contact_form",
            Self::ContactValue => "contact_value",
        }
    }
}

impl Display for ContactField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for contact field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyField(ContactField),
    ForbiddenCharacter { field: ContactField, character: char },
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} cannot be empty"),
            Self::ForbiddenCharacter { field, character } => {
                write!(f, "{field} contains forbidden character {character:?}")
            }
        }
    }
}

impl Error for ContactValidationError {}

/// One persisted contact entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name of the person.
    pub name: String,
    /// Kind of contact channel, e.g. `email` or `phone`.
    pub contact_form: String,
    /// Address or number for `contact_form`.
    pub contact_value: String,
}

impl Contact {
    /// Creates a contact without validating it.
    ///
    /// Write paths call [`Contact::validate`] before persisting.
    pub fn new(
        name: impl Into<String>,
        contact_form: impl Into<String>,
        contact_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contact_form: contact_form.into(),
            contact_value: contact_value.into(),
        }
    }

    /// Checks every field against the record format constraints.
    ///
    /// Fields are checked in declaration order; the first failure wins.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        for (field, value) in self.fields() {
            if value.is_empty() {
                return Err(ContactValidationError::EmptyField(field));
            }
            if let Some(character) = value.chars().find(|c| FORBIDDEN_CHARACTERS.contains(c)) {
                return Err(ContactValidationError::ForbiddenCharacter { field, character });
            }
        }
        Ok(())
    }

    /// Encodes this contact as one backing-file line, including the `\n`.
    pub fn to_record_line(&self) -> String {
        format!(
            "{}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{}\n",
            self.name, self.contact_form, self.contact_value
        )
    }

    /// Decodes one backing-file line (without its line terminator).
    ///
    /// Returns `None` unless the line has exactly three fields.
    pub fn from_record_line(line: &str) -> Option<Self> {
        let mut parts = line.split(FIELD_DELIMITER);
        let name = parts.next()?;
        let contact_form = parts.next()?;
        let contact_value = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(name, contact_form, contact_value))
    }

    fn fields(&self) -> [(ContactField, &str); 3] {
        [
            (ContactField::Name, self.name.as_str()),
            (ContactField::ContactForm, self.contact_form.as_str()),
            (ContactField::ContactValue, self.contact_value.as_str()),
        ]
    }
}

/// Normalizes free-form user input into a field value.
///
/// Trims both ends and collapses whitespace runs (including line breaks) into
/// a single space.
pub fn normalize_field_input(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}
