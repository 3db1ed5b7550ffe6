//! Core storage and domain logic for the contacts manager.
//! This crate owns the contact record format and the backing file.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{StoreConfig, DEFAULT_STORAGE_FILE};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{
    normalize_field_input, Contact, ContactField, ContactValidationError, FIELD_DELIMITER,
};
pub use repo::contact_repo::{
    parse_records, ContactRepository, FileContactRepository, RepoError, RepoResult,
};
pub use service::contact_service::ContactService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
