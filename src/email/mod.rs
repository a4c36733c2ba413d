use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};

use crate::config::SmtpConfig;

mod templates;
pub use templates::EmailTemplates;

/// Transactional email over SMTP. Without SMTP configuration the mailer is a
/// no-op that logs what it would have sent; delivery failures are logged and
/// never fail the triggering request.
pub struct Mailer {
    transport: Option<SmtpTransport>,
    from: Option<Mailbox>,
    templates: EmailTemplates,
    public_base_url: String,
}

impl Mailer {
    pub fn new(smtp: Option<&SmtpConfig>, public_base_url: String) -> anyhow::Result<Self> {
        let templates = EmailTemplates::new()?;

        let (transport, from) = match smtp {
            Some(cfg) => {
                tracing::info!("initializing SMTP transport for {}:{}", cfg.host, cfg.port);
                let transport = SmtpTransport::relay(&cfg.host)?
                    .port(cfg.port)
                    .credentials(Credentials::new(cfg.username.clone(), cfg.password.clone()))
                    .build();
                let from = cfg.from.parse::<Mailbox>()?;
                (Some(transport), Some(from))
            }
            None => {
                tracing::warn!("SMTP not configured, emails will be logged and dropped");
                (None, None)
            }
        };

        Ok(Self {
            transport,
            from,
            templates,
            public_base_url,
        })
    }

    pub async fn send_welcome(&self, to: &str, name: &str) {
        let login_link = format!("{}/login", self.public_base_url);
        match self.templates.welcome(name, &login_link) {
            Ok(html) => self.send(to, "Your shelter account", html).await,
            Err(e) => tracing::error!("failed to render welcome email: {}", e),
        }
    }

    pub async fn send_password_reset(&self, to: &str, name: &str, token: &str) {
        let reset_link = format!("{}/reset-password?token={}", self.public_base_url, token);
        match self.templates.password_reset(name, &reset_link) {
            Ok(html) => self.send(to, "Password reset", html).await,
            Err(e) => tracing::error!("failed to render password reset email: {}", e),
        }
    }

    async fn send(&self, to: &str, subject: &str, html: String) {
        let (Some(transport), Some(from)) = (self.transport.clone(), self.from.clone()) else {
            tracing::info!(to = to, subject = subject, "email skipped, SMTP not configured");
            return;
        };

        let to_mailbox: Mailbox = match to.parse() {
            Ok(m) => m,
            Err(e) => {
                tracing::error!("invalid recipient address {}: {}", to, e);
                return;
            }
        };

        let message = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html);

        let message = match message {
            Ok(m) => m,
            Err(e) => {
                tracing::error!("failed to build email: {}", e);
                return;
            }
        };

        // SmtpTransport is blocking; keep it off the request executor.
        let subject = subject.to_string();
        let result = tokio::task::spawn_blocking(move || transport.send(&message)).await;
        match result {
            Ok(Ok(_)) => {
                metrics::counter!("shelterd_emails_sent_total").increment(1);
                tracing::info!(subject = subject, "email sent");
            }
            Ok(Err(e)) => {
                metrics::counter!("shelterd_emails_failed_total").increment(1);
                tracing::error!("failed to send email: {}", e);
            }
            Err(e) => tracing::error!("email send task panicked: {}", e),
        }
    }
}
