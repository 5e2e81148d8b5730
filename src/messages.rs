//! Message keys returned to clients and their English text.
//!
//! Handlers refer to messages by key so that every response for the same
//! condition carries the same wording.

pub fn t(key: &str) -> String {
    text(key).to_string()
}

fn text(key: &str) -> &str {
    match key {
        "auth.registered" => "Registration successful. Please check your email to verify your account.",
        "auth.login_success" => "Login successful.",
        "auth.failed" => "These credentials do not match our records.",
        "auth.inactive" => "Your account has been deactivated.",
        "auth.no_permission" => "You do not have permission to sign in.",
        "auth.refreshed" => "Token refreshed successfully.",
        "auth.logged_out" => "Logged out successfully.",
        "auth.me" => "Current user.",
        "auth.unauthenticated" => "Unauthenticated.",
        "auth.profile_updated" => "Profile updated successfully.",
        "auth.current_password_incorrect" => "The current password is incorrect.",

        "verify.verified" => "Email verified successfully.",
        "verify.invalid_signature" => "Invalid or expired verification link.",
        "verify.invalid_hash" => "Invalid verification link.",
        "verify.already_verified" => "Email has already been verified.",
        "verify.sent" => "A new verification link has been sent to your email address.",
        "verify.user_not_found" => "We can't find a user with that email address.",

        "passwords.sent" => "We have emailed your password reset link.",
        "passwords.reset" => "Your password has been reset.",
        "passwords.token_valid" => "The password reset token is valid.",
        "passwords.token_invalid" => "This password reset token is invalid.",
        "passwords.same_as_old" => "The new password must be different from the current password.",
        "passwords.too_many_attempts" => "Too many attempts. Please try again later.",

        "throttle" => "Too many requests. Please slow down.",
        "validation.failed" => "The given data was invalid.",
        "forbidden" => "This action is unauthorized.",
        "not_found" => "Resource not found.",
        "ok" => "OK.",
        "created" => "Created successfully.",
        "updated" => "Updated successfully.",
        "deleted" => "Deleted successfully.",

        "users.not_found" => "User not found.",
        "roles.not_found" => "Role not found.",
        "roles.exists" => "A role with that name already exists.",
        "roles.protected" => "This role cannot be deleted.",
        "feedback.not_found" => "Feedback not found.",
        "classifications.not_found" => "Classification not found.",

        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_key_is_translated() {
        assert_eq!(t("auth.logged_out"), "Logged out successfully.");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(t("nope.missing"), "nope.missing");
    }
}
