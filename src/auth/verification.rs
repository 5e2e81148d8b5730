//! Signed email-verification links.
//!
//! A link is `{base_url}/auth/email/verify-email/{id}/{sha1(email)}?expires={ts}&signature={sig}`
//! where `sig` is the HMAC-SHA256 of the relative URL up to and including
//! `expires`, keyed with the application key.

use chrono::{Duration, Utc};

use crate::config::Config;
use crate::crypto;
use crate::models::User;

pub const VERIFY_PATH: &str = "/auth/email/verify-email";

fn signed_payload(id: &str, hash: &str, expires: i64) -> String {
    format!("{VERIFY_PATH}/{id}/{hash}?expires={expires}")
}

pub fn email_hash(user: &User) -> String {
    crypto::sha1_hex(&user.email)
}

pub fn signed_url(config: &Config, user: &User) -> Result<String, String> {
    let expires = (Utc::now() + Duration::seconds(config.tokens.verify_link_ttl)).timestamp();
    let payload = signed_payload(&user.id.to_string(), &email_hash(user), expires);
    let signature = crypto::sign(&payload, &config.app_key)?;
    Ok(format!("{}{payload}&signature={signature}", config.base_url))
}

/// True when the signature covers exactly these parameters and has not expired.
pub fn has_valid_signature(
    key: &str,
    id: &str,
    hash: &str,
    expires: Option<i64>,
    signature: Option<&str>,
    now: i64,
) -> bool {
    let (Some(expires), Some(signature)) = (expires, signature) else {
        return false;
    };
    if expires < now {
        return false;
    }
    crypto::verify_signature(&signed_payload(id, hash, expires), signature, key)
}

pub fn hash_matches(user: &User, hash: &str) -> bool {
    crypto::constant_time_eq(&email_hash(user), hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "unit-test-key-unit-test-key-1234";

    fn sign(id: &str, hash: &str, expires: i64) -> String {
        crypto::sign(&signed_payload(id, hash, expires), KEY).unwrap()
    }

    #[test]
    fn accepts_untampered_link() {
        let sig = sign("42", "abc", 2_000);
        assert!(has_valid_signature(KEY, "42", "abc", Some(2_000), Some(&sig), 1_000));
    }

    #[test]
    fn rejects_expired_link() {
        let sig = sign("42", "abc", 2_000);
        assert!(!has_valid_signature(KEY, "42", "abc", Some(2_000), Some(&sig), 2_001));
    }

    #[test]
    fn rejects_changed_parameters() {
        let sig = sign("42", "abc", 2_000);
        assert!(!has_valid_signature(KEY, "43", "abc", Some(2_000), Some(&sig), 1_000));
        assert!(!has_valid_signature(KEY, "42", "abd", Some(2_000), Some(&sig), 1_000));
        assert!(!has_valid_signature(KEY, "42", "abc", Some(9_000), Some(&sig), 1_000));
    }

    #[test]
    fn rejects_missing_query() {
        assert!(!has_valid_signature(KEY, "42", "abc", None, Some("00"), 1_000));
        assert!(!has_valid_signature(KEY, "42", "abc", Some(2_000), None, 1_000));
    }
}
