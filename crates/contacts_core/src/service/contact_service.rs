//! Contact use-case service.
//!
//! # Responsibility
//! - Provide list/create entry points for the interactive shell.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Service layer remains storage-agnostic.

use crate::model::contact::{normalize_field_input, Contact};
use crate::repo::contact_repo::{ContactRepository, RepoResult};

/// Use-case service wrapper for contact operations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every stored contact in insertion order.
    pub fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        self.repo.load_all()
    }

    /// Creates a contact from raw user input and persists it.
    ///
    /// # Contract
    /// - Each field is trimmed and has inner whitespace runs collapsed.
    /// - Returns the stored contact on success.
    /// - Returns repository validation errors unchanged.
    pub fn create_contact(
        &self,
        name: &str,
        contact_form: &str,
        contact_value: &str,
    ) -> RepoResult<Contact> {
        let contact = Contact::new(
            normalize_field_input(name),
            normalize_field_input(contact_form),
            normalize_field_input(contact_value),
        );
        self.repo.append(&contact)?;
        Ok(contact)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}
