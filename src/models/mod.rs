mod access_token;
mod classification;
mod feedback;
mod password_reset_token;
mod role;
mod user;

pub use access_token::AccessToken;
pub use classification::{Classification, STATUSES as CLASSIFICATION_STATUSES};
pub use feedback::{Feedback, FeedbackEntry};
pub use password_reset_token::PasswordResetToken;
pub use role::{Permission, Role, RoleWithPermissions};
pub use user::{User, UserResource};
