pub mod auth;
pub mod config;
pub mod dispatcher;
pub mod metrics;
pub mod notifier;
pub mod renderer;
pub mod testing;
pub mod ticket;
pub mod ticketing;

pub use auth::{
    create_authenticator, AuthError, AuthRequest, Authenticator, BasicAuthenticator, Identity,
    NoneAuthenticator,
};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthMethod, Config, ConfigError,
    SanitizedConfig,
};
pub use dispatcher::{JobDispatcher, SubmitError};
pub use notifier::{Notifier, SmtpNotifier};
pub use ticket::{GenerationMode, TicketEvent, ValidationError, WebhookPayload};
pub use ticketing::{RestTicketing, TicketingApi};
