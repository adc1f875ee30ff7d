//! Request handlers grouped by resource.
//!
//! Handlers delegate persistence to the repositories in `emporium_db`, apply
//! the domain rules from `emporium_core`, and map failures via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod antiques;
pub mod auth;
pub mod blog;
pub mod payments;
pub mod sellers;
pub mod users;
pub mod webhook;
pub mod wishlists;
