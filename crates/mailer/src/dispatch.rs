//! Post dispatch: forwards a generated post to the mail transport.

use std::sync::Arc;

use tracing::info;

use blogforge_composer::GeneratedPost;
use blogforge_composer::escape::escape_text;

use crate::{MailError, MailTransport};

pub struct Dispatcher {
    transport: Arc<dyn MailTransport>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Submit one post. Subject is the post title; the body is the post HTML
    /// prefixed with a hidden comment and a visible line carrying the labels,
    /// which some blog gateways parse out of the email body.
    pub async fn dispatch(
        &self,
        post: &GeneratedPost,
        labels: &[String],
    ) -> Result<(), MailError> {
        if post.title.trim().is_empty() {
            return Err(MailError::InvalidRequest("missing title".into()));
        }
        if post.html.trim().is_empty() {
            return Err(MailError::InvalidRequest("missing html".into()));
        }

        let body = prefix_labels(&post.html, labels);
        self.transport.send(&post.title, &body).await?;
        info!(title = %post.title, labels = labels.len(), transport = self.transport.name(), "post dispatched");
        Ok(())
    }
}

fn prefix_labels(html: &str, labels: &[String]) -> String {
    if labels.is_empty() {
        return html.to_string();
    }
    // Labels come from user-edited genre text; escaped so they cannot close
    // the comment or inject markup into the visible line.
    let joined = escape_text(&labels.join(", "));
    format!("<!-- Labels: {joined} --><p><b>Post Labels:</b> {joined}</p>{html}")
}
