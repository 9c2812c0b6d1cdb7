//! SMTP notifier implementation.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use crate::config::{SmtpConfig, SmtpTls};

use super::{MailError, Notifier};

const SUBJECT: &str = "Automated ticket document";
const BODY: &str = "Please find the automatically generated ticket document attached.";

/// Notifier that delivers documents over SMTP with credential auth.
///
/// Transport security follows configuration: STARTTLS upgrade after a plain
/// connect, or an implicit-TLS connection.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipients: Vec<Mailbox>,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| MailError::Config(format!("invalid from address: {}", e)))?;

        let recipients = config
            .recipients
            .iter()
            .map(|r| {
                r.parse::<Mailbox>()
                    .map_err(|e| MailError::Config(format!("invalid recipient {:?}: {}", r, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let builder = match config.tls {
            SmtpTls::Starttls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host),
            SmtpTls::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host),
        }
        .map_err(|e| MailError::Config(e.to_string()))?;

        let transport = builder
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from,
            recipients,
        })
    }
}

/// Build the fixed multipart message with the document attached.
fn build_message(
    from: &Mailbox,
    recipients: &[Mailbox],
    document: &[u8],
    filename: &str,
) -> Result<Message, MailError> {
    let mut builder = Message::builder().from(from.clone()).subject(SUBJECT);
    for recipient in recipients {
        builder = builder.to(recipient.clone());
    }

    let content_type = ContentType::parse("application/pdf")
        .map_err(|e| MailError::Build(e.to_string()))?;
    let attachment =
        Attachment::new(filename.to_string()).body(document.to_vec(), content_type);

    builder
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(BODY.to_string()))
                .singlepart(attachment),
        )
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_with_attachment(
        &self,
        document: &[u8],
        filename: &str,
    ) -> Result<(), MailError> {
        let message = build_message(&self.from, &self.recipients, document, filename)?;

        debug!(
            filename = filename,
            recipients = self.recipients.len(),
            "Sending notification mail"
        );

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(())
    }
}
