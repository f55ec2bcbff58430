use chrono::Utc;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::{debug, error, info};
use thiserror::Error;

use krxtrack_market_data::Symbol;

use crate::alerts::PriceAlert;
use crate::constants::DISPLAY_TZ;

/// Errors from assembling or sending a notification email.
///
/// Internal to the notifier: the public [`EmailNotifier::send`] catches
/// them and reports `false` instead, so a mail failure never takes the
/// session down.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP failure: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// SMTP notifier for triggered alerts.
pub struct EmailNotifier {
    settings: super::EmailSettings,
}

impl EmailNotifier {
    /// Create a notifier over the given settings.
    pub fn new(settings: super::EmailSettings) -> Self {
        Self { settings }
    }

    /// Send one HTML email.
    ///
    /// Returns `false` when notifications are disabled or anything in the
    /// SMTP exchange fails; `true` only after the message was accepted.
    pub fn send(&self, subject: &str, html_body: &str, to: &str) -> bool {
        if !self.settings.enabled {
            debug!("Email notifications disabled, not sending '{}'", subject);
            return false;
        }

        match self.try_send(subject, html_body, to) {
            Ok(()) => {
                info!("Sent notification email '{}' to {}", subject, to);
                true
            }
            Err(e) => {
                error!("Failed to send notification email: {}", e);
                false
            }
        }
    }

    fn try_send(&self, subject: &str, html_body: &str, to: &str) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(self.settings.email.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())?;

        let credentials = Credentials::new(
            self.settings.email.clone(),
            self.settings.password.clone(),
        );

        let mailer = SmtpTransport::starttls_relay(&self.settings.smtp_server)?
            .port(self.settings.smtp_port)
            .credentials(credentials)
            .build();

        mailer.send(&message)?;
        Ok(())
    }

    /// Build the subject and HTML body for a triggered alert.
    pub fn alert_notification(
        symbol: &Symbol,
        formatted_price: &str,
        alert: &PriceAlert,
    ) -> (String, String) {
        let subject = format!("Price alert - {}", symbol);
        let body = format!(
            "<h2>Price alert triggered</h2>\
             <p><b>Symbol:</b> {}</p>\
             <p><b>Current price:</b> {}</p>\
             <p><b>Condition:</b> {} {}</p>\
             <p><b>Date:</b> {}</p>",
            symbol,
            formatted_price,
            alert.condition.as_str(),
            alert.target,
            Utc::now()
                .with_timezone(&DISPLAY_TZ)
                .format("%Y-%m-%d %H:%M:%S")
        );
        (subject, body)
    }
}
