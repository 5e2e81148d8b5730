pub mod templates;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

/// Outgoing mail transport.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("SMTP error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("Invalid from address: {e}"))?,
            )
            .to(to.parse().map_err(|e| format!("Invalid to address: {e}"))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| format!("Failed to build email: {e}"))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        Ok(())
    }
}

/// Used when SMTP is not configured: the mail is written to the log.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        tracing::warn!(%to, %subject, "SMTP not configured, mail not delivered:\n{html_body}");
        Ok(())
    }
}

pub async fn send_verification(mailer: &dyn Mailer, to: &str, verify_url: &str) {
    let html = templates::render_verify_email(verify_url);
    if let Err(e) = mailer.send(to, "Verify Email Address", &html).await {
        tracing::error!("Failed to send verification email: {e}");
    }
}

pub async fn send_welcome(mailer: &dyn Mailer, to: &str, base_url: &str) {
    let html = templates::render_welcome(to, base_url);
    if let Err(e) = mailer.send(to, "Welcome", &html).await {
        tracing::error!("Failed to send welcome email: {e}");
    }
}

pub async fn send_password_reset(
    mailer: &dyn Mailer,
    to: &str,
    reset_url: &str,
    expires_minutes: i64,
) -> Result<(), String> {
    let html = templates::render_password_reset(reset_url, expires_minutes);
    mailer.send(to, "Reset Password Notification", &html).await
}
