use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blogforge_mailer::MailTransport;
use blogforge_mailer::smtp::{SmtpConfig, SmtpMailer};
use blogforge_metadata::provider::MediaProvider;
use blogforge_metadata::tmdb::TmdbClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Metadata provider: lookups fail per-request when the key is absent.
    let provider: Option<Arc<dyn MediaProvider>> = match std::env::var("BLOGFORGE_TMDB_KEY") {
        Ok(key) => {
            let client = TmdbClient::new(key).context("TMDB client setup failed")?;
            Some(Arc::new(client))
        }
        Err(_) => {
            warn!("BLOGFORGE_TMDB_KEY not set; media lookups will report a configuration error");
            None
        }
    };

    // Mail transport: same per-request degradation when credentials are absent.
    let smtp_host =
        std::env::var("BLOGFORGE_SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
    let transport: Option<Arc<dyn MailTransport>> = match (
        std::env::var("BLOGFORGE_SMTP_USER"),
        std::env::var("BLOGFORGE_SMTP_PASS"),
        std::env::var("BLOGFORGE_RECEIVER"),
    ) {
        (Ok(username), Ok(password), Ok(receiver)) => {
            let mailer = SmtpMailer::new(SmtpConfig {
                host: smtp_host,
                username,
                password,
                receiver,
            })
            .context("SMTP mailer setup failed")?;
            Some(Arc::new(mailer))
        }
        _ => {
            warn!(
                "BLOGFORGE_SMTP_USER / BLOGFORGE_SMTP_PASS / BLOGFORGE_RECEIVER not fully set; \
                 dispatch will report a configuration error"
            );
            None
        }
    };

    let admin_token = std::env::var("BLOGFORGE_ADMIN_TOKEN").ok();
    if admin_token.is_none() {
        warn!("BLOGFORGE_ADMIN_TOKEN not set; dispatch endpoint is unauthenticated");
    }

    let state = blogforge_server::state::AppState {
        provider,
        transport,
        admin_token,
    };

    let app = blogforge_server::routes::build_router(state);

    let bind_addr = std::env::var("BLOGFORGE_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
