use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub ticketing: TicketingConfig,
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Authentication configuration for the webhook endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    /// Username for basic auth (required when method = "basic")
    #[serde(default)]
    pub username: Option<String>,
    /// Password for basic auth (required when method = "basic")
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    None,
    Basic,
}

/// Ticket system REST API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TicketingConfig {
    /// Base API URL (e.g., "https://helpdesk.example.org/api/v1")
    pub base_url: String,
    /// API token used as `Authorization: Token token=<...>`
    pub api_token: String,
    /// Per-call request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Outbound mail configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender address for generated mail
    pub from: String,
    /// Fixed recipient list for every notification
    pub recipients: Vec<String>,
    #[serde(default)]
    pub tls: SmtpTls,
}

fn default_smtp_port() -> u16 {
    587
}

/// Transport security mode for the SMTP connection
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SmtpTls {
    /// Connect in plaintext, then upgrade via STARTTLS
    #[default]
    Starttls,
    /// Connect over an already-encrypted channel (implicit TLS)
    Implicit,
}

/// Dispatch worker pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatcherConfig {
    /// Number of worker tasks draining the dispatch queue (default: 4)
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Bounded queue capacity; submissions beyond this are rejected (default: 64)
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_workers() -> usize {
    4
}

fn default_queue_capacity() -> usize {
    64
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub server: ServerConfig,
    pub ticketing: SanitizedTicketingConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp: Option<SanitizedSmtpConfig>,
    pub dispatcher: DispatcherConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub method: String,
}

/// Sanitized ticketing config (API token redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTicketingConfig {
    pub base_url: String,
    pub api_token_configured: bool,
    pub timeout_secs: u32,
}

/// Sanitized SMTP config (password hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSmtpConfig {
    pub host: String,
    pub port: u16,
    pub from: String,
    pub recipients: Vec<String>,
    pub tls: String,
    pub password_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                method: match config.auth.method {
                    AuthMethod::None => "none".to_string(),
                    AuthMethod::Basic => "basic".to_string(),
                },
            },
            server: config.server.clone(),
            ticketing: SanitizedTicketingConfig {
                base_url: config.ticketing.base_url.clone(),
                api_token_configured: !config.ticketing.api_token.is_empty(),
                timeout_secs: config.ticketing.timeout_secs,
            },
            smtp: config.smtp.as_ref().map(|s| SanitizedSmtpConfig {
                host: s.host.clone(),
                port: s.port,
                from: s.from.clone(),
                recipients: s.recipients.clone(),
                tls: match s.tls {
                    SmtpTls::Starttls => "starttls".to_string(),
                    SmtpTls::Implicit => "implicit".to_string(),
                },
                password_configured: !s.password.is_empty(),
            }),
            dispatcher: config.dispatcher.clone(),
        }
    }
}
