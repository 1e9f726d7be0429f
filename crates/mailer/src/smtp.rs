//! SMTP transport over implicit TLS (Gmail-style submission).

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::{MailError, MailTransport};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay host, e.g. `smtp.gmail.com`.
    pub host: String,
    /// Account address; also used as the sender.
    pub username: String,
    /// Account password (app password for Gmail with 2FA).
    pub password: String,
    /// Destination post-by-email address.
    pub receiver: String,
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(cfg: SmtpConfig) -> Result<Self, MailError> {
        if cfg.username.is_empty() || cfg.password.is_empty() {
            return Err(MailError::Configuration(
                "SMTP credentials are not set".into(),
            ));
        }
        if cfg.receiver.is_empty() {
            return Err(MailError::Configuration(
                "receiver address is not set".into(),
            ));
        }

        let from: Mailbox = cfg
            .username
            .parse()
            .map_err(|e| MailError::Configuration(format!("invalid sender address: {e}")))?;
        let to: Mailbox = cfg
            .receiver
            .parse()
            .map_err(|e| MailError::Configuration(format!("invalid receiver address: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.host)
            .map_err(|e| MailError::Configuration(format!("SMTP relay setup: {e}")))?
            .credentials(Credentials::new(cfg.username, cfg.password))
            .build();

        Ok(Self {
            transport,
            from,
            to,
        })
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send(&self, subject: &str, html_body: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| MailError::Transport(format!("build message: {e}")))?;

        debug!(subject = %subject, "submitting mail");
        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.gmail.com".into(),
            username: "poster@gmail.com".into(),
            password: "app-password".into(),
            receiver: "blog.secret@blogger.com".into(),
        }
    }

    #[test]
    fn missing_credentials_fail_fast() {
        let cfg = SmtpConfig {
            password: "".into(),
            ..config()
        };
        match SmtpMailer::new(cfg) {
            Err(MailError::Configuration(_)) => {}
            other => panic!("expected configuration error, got {:?}", other.err()),
        }
    }

    #[test]
    fn missing_receiver_fails_fast() {
        let cfg = SmtpConfig {
            receiver: "".into(),
            ..config()
        };
        assert!(matches!(
            SmtpMailer::new(cfg),
            Err(MailError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn well_formed_config_builds_a_mailer() {
        assert!(SmtpMailer::new(config()).is_ok());
    }
}
