#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use adminpanel::config::{Config, TokenConfig};
use adminpanel::email::Mailer;

pub const BASE_URL: &str = "http://panel.test";
pub const PASSWORD: &str = "password123";

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Captures mail instead of delivering it.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<SentMail>>,
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: html_body.to_string(),
        });
        Ok(())
    }
}

impl MemoryMailer {
    pub fn sent_to(&self, to: &str) -> Vec<SentMail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.to == to)
            .cloned()
            .collect()
    }

    /// The `href` of the first link in the most recent mail to `to` with `subject`.
    pub fn last_link(&self, to: &str, subject: &str) -> Option<String> {
        let mail = self
            .sent_to(to)
            .into_iter()
            .rev()
            .find(|m| m.subject == subject)?;
        let start = mail.body.find("href=\"")? + "href=\"".len();
        let end = mail.body[start..].find('"')? + start;
        Some(mail.body[start..end].to_string())
    }
}

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
    pub mailer: Arc<MemoryMailer>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn register(&self, email: &str, password: &str) -> (Value, StatusCode) {
        self.post_json(
            "/auth/register",
            &json!({
                "email": email,
                "password": password,
                "password_confirmation": password,
            }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        self.post_json("/auth/login", &json!({ "email": email, "password": password }))
            .await
    }

    /// Register and log in, returning `(access_token, refresh_token)`.
    pub async fn signup(&self, email: &str) -> (String, String) {
        let (body, status) = self.register(email, PASSWORD).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        let (body, status) = self.login(email, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        (
            body["data"]["access_token"].as_str().unwrap().to_string(),
            body["data"]["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Sign up, grant the admin role, return an access token.
    pub async fn signup_admin(&self, email: &str) -> String {
        let (token, _) = self.signup(email).await;
        self.grant_role(email, "admin").await;
        token
    }

    pub async fn grant_role(&self, email: &str, role: &str) {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id)
             SELECT u.id, r.id FROM users u, roles r WHERE u.email = $1 AND r.name = $2
             ON CONFLICT DO NOTHING",
        )
        .bind(email)
        .bind(role)
        .execute(&self.pool)
        .await
        .expect("grant role failed");
    }

    pub async fn user_id(&self, email: &str) -> Uuid {
        sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .expect("user lookup failed")
    }

    pub async fn token_count(&self, email: &str, name: &str) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM personal_access_tokens t JOIN users u ON u.id = t.user_id
             WHERE u.email = $1 AND t.name = $2",
        )
        .bind(email)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .expect("token count failed")
    }

    /// Path and query of a link mailed by the app, ready for `url()`.
    pub fn local_path(link: &str) -> String {
        link.strip_prefix(BASE_URL).unwrap_or(link).to_string()
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let db_name = format!("adminpanel_test_{}", Uuid::now_v7().simple());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: test_url,
        app_key: "test-app-key-that-is-long-enough-1234".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: BASE_URL.to_string(),
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
        tokens: TokenConfig::default(),
        default_role: "user".to_string(),
        smtp: None,
        admin: None,
    };

    let mailer = Arc::new(MemoryMailer::default());
    let (app, _state) = adminpanel::build_app_with_mailer(pool.clone(), config, mailer.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
        mailer,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
