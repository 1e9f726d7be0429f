pub mod dispatch;
pub mod smtp;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("missing configuration: {0}")]
    Configuration(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Outbound mail capability: one email per call, subject plus HTML body.
///
/// The blog gateway turns the subject into the post title and the body into
/// the post content, so this is the whole publishing interface.
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, subject: &str, html_body: &str) -> Result<(), MailError>;
}
