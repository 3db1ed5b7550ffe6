//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract used by the service layer.
//! - Isolate file format and file handle details from callers.
//!
//! # Invariants
//! - Repository writes enforce `Contact::validate()` before persistence.
//! - Repository APIs return semantic errors (`MalformedRecord`) in addition
//!   to I/O transport errors.

pub mod contact_repo;
