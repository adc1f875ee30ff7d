//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod antique;
pub mod blog_post;
pub mod order;
pub mod profile;
pub mod seller;
pub mod user;
pub mod wishlist;
