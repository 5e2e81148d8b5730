const BUTTON_STYLE: &str = "display: inline-block; padding: 10px 20px; background: #0070f3; color: white; text-decoration: none; border-radius: 4px;";

pub fn render_verify_email(verify_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Verify Email Address</h2>
    <p>Please click the button below to verify your email address.</p>
    <p><a href="{verify_url}" style="{BUTTON_STYLE}">Verify Email Address</a></p>
    <p style="color: #666; font-size: 14px;">If you did not create an account, no further action is required.</p>
</body>
</html>"#
    )
}

pub fn render_welcome(email: &str, base_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Welcome</h2>
    <p>Hi {email},</p>
    <p>Your email address has been verified. You can sign in at:</p>
    <p><a href="{base_url}" style="{BUTTON_STYLE}">Sign In</a></p>
</body>
</html>"#
    )
}

pub fn render_password_reset(reset_url: &str, expires_minutes: i64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>Reset Password</h2>
    <p>You are receiving this email because we received a password reset request for your account.</p>
    <p><a href="{reset_url}" style="{BUTTON_STYLE}">Reset Password</a></p>
    <p style="color: #666; font-size: 14px;">This link expires in {expires_minutes} minutes. If you did not request a password reset, no further action is required.</p>
</body>
</html>"#
    )
}
