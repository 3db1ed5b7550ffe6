//! Domain model for persisted contacts.
//!
//! # Responsibility
//! - Define the contact record and its field constraints.
//! - Keep the on-disk line encoding next to the type it encodes.

pub mod contact;
