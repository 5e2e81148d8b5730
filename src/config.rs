use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub app_key: String,
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub max_body_size: usize,
    pub log_level: String,
    pub tokens: TokenConfig,
    pub default_role: String,
    pub smtp: Option<SmtpConfig>,
    pub admin: Option<AdminSeed>,
}

/// Lifetimes, in seconds, of everything that expires.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access_ttl: i64,
    pub refresh_ttl: i64,
    pub verify_link_ttl: i64,
    pub reset_ttl: i64,
    pub reset_throttle: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_ttl: 3600,
            refresh_ttl: 604_800,
            verify_link_ttl: 3600,
            reset_ttl: 3600,
            reset_throttle: 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let app_key = env_required("PANEL_APP_KEY")?;

        if app_key.len() < 32 {
            return Err("PANEL_APP_KEY must be at least 32 characters".to_string());
        }

        let host: IpAddr = env_or("PANEL_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid PANEL_HOST: {e}"))?;

        let port: u16 = env_or("PANEL_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid PANEL_PORT: {e}"))?;

        let base_url = env_or("PANEL_BASE_URL", &format!("http://{host}:{port}"))
            .trim_end_matches('/')
            .to_string();

        let max_body_size: usize = env_or("PANEL_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid PANEL_MAX_BODY_SIZE: {e}"))?;

        let defaults = TokenConfig::default();
        let tokens = TokenConfig {
            access_ttl: env_seconds("PANEL_ACCESS_TOKEN_TTL", defaults.access_ttl)?,
            refresh_ttl: env_seconds("PANEL_REFRESH_TOKEN_TTL", defaults.refresh_ttl)?,
            verify_link_ttl: env_seconds("PANEL_VERIFY_LINK_TTL", defaults.verify_link_ttl)?,
            reset_ttl: env_seconds("PANEL_RESET_TOKEN_TTL", defaults.reset_ttl)?,
            reset_throttle: env_seconds("PANEL_RESET_THROTTLE", defaults.reset_throttle)?,
        };

        let log_level = env_or("PANEL_LOG_LEVEL", "info");
        let default_role = env_or("PANEL_DEFAULT_ROLE", "user");

        let smtp = match (
            std::env::var("PANEL_SMTP_HOST").ok(),
            std::env::var("PANEL_SMTP_PORT").ok(),
            std::env::var("PANEL_SMTP_USER").ok(),
            std::env::var("PANEL_SMTP_PASS").ok(),
            std::env::var("PANEL_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid PANEL_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        let admin = match (
            std::env::var("PANEL_ADMIN_EMAIL").ok(),
            std::env::var("PANEL_ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            _ => None,
        };

        Ok(Config {
            database_url,
            app_key,
            host,
            port,
            base_url,
            max_body_size,
            log_level,
            tokens,
            default_role,
            smtp,
            admin,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_seconds(key: &str, default: i64) -> Result<i64, String> {
    match std::env::var(key) {
        Ok(raw) => {
            let secs: i64 = raw.parse().map_err(|e| format!("Invalid {key}: {e}"))?;
            if secs <= 0 {
                return Err(format!("Invalid {key}: must be positive"));
            }
            Ok(secs)
        }
        Err(_) => Ok(default),
    }
}
