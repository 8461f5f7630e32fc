//! SMTP delivery.
//!
//! One async transport per process over implicit TLS (SMTPS, port 465 by
//! default — the QQ-mail endpoint the queue producers were written
//! against). The engine talks to this through the `Mailer` trait so tests
//! can substitute an in-memory fake.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use common::config::SmtpConfig;
use common::{Error, Mailer, Result};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a transport for the configured relay. The account username is
    /// also the envelope sender address.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| Error::Smtp(format!("failed to build SMTP transport: {e}")))?
            .port(config.port)
            .credentials(creds)
            .build();

        let from: Mailbox = format!("{} <{}>", config.from_name, config.username)
            .parse()
            .map_err(|e| Error::Smtp(format!("invalid sender address: {e}")))?;

        Ok(Self { transport, from })
    }

    /// Open and close a connection to verify host and credentials.
    pub async fn check_connection(&self) -> Result<bool> {
        self.transport
            .test_connection()
            .await
            .map_err(|e| Error::Smtp(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|e| Error::Smtp(format!("invalid recipient {to}: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| Error::Smtp(format!("failed to build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| Error::Smtp(e.to_string()))?;

        info!("Mail sent to {}", to);
        Ok(())
    }
}
