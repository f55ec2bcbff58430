use serde::{Deserialize, Serialize};

/// User-entered SMTP configuration.
///
/// Notifications are off until the user enables them and supplies
/// credentials; a disabled notifier is a no-op.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmailSettings {
    /// Master switch for email notifications
    pub enabled: bool,
    /// SMTP server hostname
    pub smtp_server: String,
    /// SMTP port (submission port with STARTTLS)
    pub smtp_port: u16,
    /// Account/login email address; also the From address
    pub email: String,
    /// Account password or app password
    #[serde(skip_serializing)]
    pub password: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            email: String::new(),
            password: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_disabled_gmail() {
        let settings = EmailSettings::default();
        assert!(!settings.enabled);
        assert_eq!(settings.smtp_server, "smtp.gmail.com");
        assert_eq!(settings.smtp_port, 587);
    }

    #[test]
    fn test_password_not_serialized() {
        let settings = EmailSettings {
            password: "secret".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("secret"));
    }
}
