//! Well-known role name constants embedded in access tokens.

pub const ROLE_SUPERUSER: &str = "superuser";
pub const ROLE_CUSTOMER: &str = "customer";

/// Map the `users.is_superuser` flag to the role name carried in tokens.
pub fn role_for(is_superuser: bool) -> &'static str {
    if is_superuser {
        ROLE_SUPERUSER
    } else {
        ROLE_CUSTOMER
    }
}
