//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod antique_image_repo;
pub mod antique_repo;
pub mod blog_post_repo;
pub mod order_repo;
pub mod profile_repo;
pub mod seller_repo;
pub mod user_repo;
pub mod wishlist_repo;

mod slugs;

pub use antique_image_repo::AntiqueImageRepo;
pub use antique_repo::AntiqueRepo;
pub use blog_post_repo::BlogPostRepo;
pub use order_repo::OrderRepo;
pub use profile_repo::ProfileRepo;
pub use seller_repo::SellerRepo;
pub use user_repo::UserRepo;
pub use wishlist_repo::WishlistRepo;
