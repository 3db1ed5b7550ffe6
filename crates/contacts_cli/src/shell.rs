//! Interactive menu loop.
//!
//! # Responsibility
//! - Render the menu and dispatch list/create/exit choices.
//! - Report store failures inline and keep the loop running.
//!
//! # Invariants
//! - Store errors are never fatal; only console I/O failures end `run` with an error.
//! - Choosing exit performs no store access.
//! - End of input behaves like the exit choice.
//! - Input bytes that are not UTF-8 are decoded lossily, never treated as a stream failure.
//! - Store failures are logged by category only; the console gets the full message.

use contacts_core::{Contact, ContactRepository, ContactService, RepoError};
use log::{debug, info, warn};
use std::io::{self, BufRead, Write};

const MENU: &str = "\nHello! What do you want to do?\n\n\
1 - List contacts\n\
2 - Create new contact\n\
3 - Exit\n\n\
Choose your option and press Enter: ";
const SEPARATOR: &str = "---------";
const FAREWELL: &str = "Thanks for using :)";

/// Parsed menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    List,
    Create,
    Exit,
    /// Anything else, including non-numeric input.
    Unrecognized,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(1) => Self::List,
            Ok(2) => Self::Create,
            Ok(3) => Self::Exit,
            _ => Self::Unrecognized,
        }
    }
}

/// Menu-driven console front end over a contact service.
pub struct Shell<R: ContactRepository> {
    service: ContactService<R>,
}

impl<R: ContactRepository> Shell<R> {
    pub fn new(service: ContactService<R>) -> Self {
        Self { service }
    }

    /// Runs the menu loop until the exit choice or end of input.
    pub fn run(&self, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<()> {
        loop {
            output.write_all(MENU.as_bytes())?;
            output.flush()?;

            let Some(raw_choice) = read_line(input)? else {
                info!("event=shell_exit module=shell reason=eof");
                break;
            };
            output.write_all(b"\n\n")?;

            let choice = MenuChoice::parse(&raw_choice);
            debug!("event=menu_choice module=shell choice={:?}", choice);
            match choice {
                MenuChoice::List => self.list_contacts(output)?,
                MenuChoice::Create => {
                    if !self.create_contact(input, output)? {
                        info!("event=shell_exit module=shell reason=eof");
                        break;
                    }
                }
                MenuChoice::Exit => {
                    info!("event=shell_exit module=shell reason=user_choice");
                    break;
                }
                MenuChoice::Unrecognized => {}
            }
        }

        writeln!(output, "{FAREWELL}")?;
        output.flush()
    }

    fn list_contacts(&self, output: &mut impl Write) -> io::Result<()> {
        match self.service.list_contacts() {
            Ok(contacts) => render_contacts(&contacts, output),
            Err(err) => {
                log_store_failure("shell_list", &err);
                writeln!(output, "Failed to load contacts: {err}")
            }
        }
    }

    /// Returns `Ok(false)` when input ended before all fields were read.
    fn create_contact(
        &self,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> io::Result<bool> {
        let Some(name) = prompt(input, output, "Contact name: ")? else {
            return Ok(false);
        };
        let Some(contact_form) = prompt(input, output, "Contact form: ")? else {
            return Ok(false);
        };
        let Some(contact_value) = prompt(input, output, "Contact: ")? else {
            return Ok(false);
        };

        match self
            .service
            .create_contact(&name, &contact_form, &contact_value)
        {
            Ok(_) => writeln!(output, "Contact saved.")?,
            Err(err) => {
                log_store_failure("shell_create", &err);
                writeln!(output, "Failed to save contact: {err}")?;
            }
        }
        Ok(true)
    }
}

fn log_store_failure(event: &str, err: &RepoError) {
    match err {
        RepoError::MalformedRecord { line_number, .. } => warn!(
            "event={} module=shell status=error error_code={} line={}",
            event,
            err.code(),
            line_number
        ),
        _ => warn!(
            "event={} module=shell status=error error_code={}",
            event,
            err.code()
        ),
    }
}

/// Writes the listing block for `contacts`.
pub fn render_contacts(contacts: &[Contact], output: &mut impl Write) -> io::Result<()> {
    write!(output, "{SEPARATOR}\n\nContacts list:\n")?;
    for contact in contacts {
        write!(
            output,
            "\n - {}, {}: {}\n",
            contact.name, contact.contact_form, contact.contact_value
        )?;
    }
    writeln!(output, "\n{SEPARATOR}")
}

fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> io::Result<Option<String>> {
    output.write_all(label.as_bytes())?;
    output.flush()?;
    read_line(input)
}

/// Reads one full line; `None` at end of input.
///
/// Invalid UTF-8 becomes U+FFFD instead of an error.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut bytes = Vec::new();
    if input.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
