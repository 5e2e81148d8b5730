pub mod access_tokens;
pub mod classifications;
pub mod feedback;
pub mod password_reset_tokens;
pub mod roles;
pub mod users;
