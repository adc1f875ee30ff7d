//! Domain rules for the Emporium marketplace.
//!
//! This crate has no I/O: it holds identifiers, the shared error type, and
//! the validation and derivation rules used by the database and API layers.

pub mod blog;
pub mod catalog;
pub mod error;
pub mod orders;
pub mod pagination;
pub mod roles;
pub mod sellers;
pub mod slug;
pub mod types;
pub mod wishlist;
