//! Status notification delivery via SMTP.
//!
//! [`StatusNotifier`] wraps the `lettre` async SMTP transport to tell an
//! employee their week was approved or returned for correction.
//! Configuration is loaded from environment variables; if `SMTP_HOST` is not
//! set the notifier runs in developer mode and only logs what it would have
//! sent. Delivery is fire-and-forget: the workflow transition that triggered
//! the notification never waits on it and never fails because of it.

use std::sync::Arc;

use chrono::NaiveDate;
use punchcard_core::status::AdminAction;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@punchcard.local";

/// Configuration for the SMTP delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and the notifier should run in developer
    /// mode.
    ///
    /// | Variable        | Required | Default                    |
    /// |-----------------|----------|----------------------------|
    /// | `SMTP_HOST`     | yes      | —                          |
    /// | `SMTP_PORT`     | no       | `587`                      |
    /// | `SMTP_FROM`     | no       | `noreply@punchcard.local`  |
    /// | `SMTP_USER`     | no       | —                          |
    /// | `SMTP_PASSWORD` | no       | —                          |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// StatusNotifier
// ---------------------------------------------------------------------------

/// Sends week-decision notifications to employees via SMTP.
pub struct StatusNotifier {
    config: Option<EmailConfig>,
}

impl StatusNotifier {
    /// Build a notifier from the environment. Without `SMTP_HOST` the
    /// notifier runs in developer mode and logs instead of sending.
    pub fn from_env() -> Self {
        let config = EmailConfig::from_env();
        if config.is_none() {
            tracing::warn!("SMTP_HOST not set; status notifications run in developer mode");
        }
        Self { config }
    }

    /// Build a notifier with explicit configuration (`None` = developer mode).
    pub fn new(config: Option<EmailConfig>) -> Self {
        Self { config }
    }

    /// Notify an owner of a week decision without blocking the caller.
    ///
    /// Spawns the delivery as a detached task; failures are logged there and
    /// never reach the workflow transition that triggered them.
    pub fn notify_status(
        self: &Arc<Self>,
        email: &str,
        week_start: NaiveDate,
        action: AdminAction,
        reason: &str,
    ) {
        let notifier = Arc::clone(self);
        let email = email.to_string();
        let reason = reason.to_string();
        tokio::spawn(async move {
            if let Err(e) = notifier
                .send_status(&email, week_start, action, &reason)
                .await
            {
                tracing::error!(
                    error = %e,
                    to = %email,
                    week_start = %week_start,
                    "Failed to send status notification"
                );
            }
        });
    }

    /// Deliver one status notification, or log it in developer mode.
    async fn send_status(
        &self,
        to_email: &str,
        week_start: NaiveDate,
        action: AdminAction,
        reason: &str,
    ) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let Some(config) = &self.config else {
            tracing::info!(
                to = %to_email,
                week_start = %week_start,
                action = %action,
                "Developer mode: status notification not sent"
            );
            return Ok(());
        };

        let subject = status_subject(action, week_start);
        let body = status_body(action, week_start, reason);

        let email = Message::builder()
            .from(config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = %to_email, week_start = %week_start, action = %action, "Status notification sent");
        Ok(())
    }
}

/// Subject line for a week decision notification.
fn status_subject(action: AdminAction, week_start: NaiveDate) -> String {
    match action {
        AdminAction::Approve => format!("Timesheet Approved - Week of {week_start}"),
        AdminAction::Deny => {
            format!("Timesheet Status Update: Action Required - Week of {week_start}")
        }
    }
}

/// Plain-text body for a week decision notification.
fn status_body(action: AdminAction, week_start: NaiveDate, reason: &str) -> String {
    match action {
        AdminAction::Approve => format!(
            "Hello,\n\n\
             Your timesheet submission for the week of {week_start} has been approved. \
             No further action is required.\n\n\
             Thank you for your timely submission."
        ),
        AdminAction::Deny => format!(
            "Hello,\n\n\
             Your timesheet submission for the week of {week_start} has been returned \
             for correction.\n\n\
             Admin feedback: {reason}\n\n\
             Your timesheet has been unlocked. Please review the feedback, make the \
             necessary adjustments, and resubmit your hours for approval."
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
