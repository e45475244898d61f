//! User Settings Model

use serde::{Deserialize, Serialize};

/// Notification channel preferences
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationPrefs {
    pub email: bool,
    pub sms: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
        }
    }
}

/// Process-wide user settings, persisted on every change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSettings {
    /// Preferred language code (one of the 11 official languages)
    pub language: String,
    /// Submit reports anonymously by default
    pub default_anonymous: bool,
    /// Reduce photo quality / payload size on metered connections
    pub data_saver: bool,
    pub notifications: NotificationPrefs,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            default_anonymous: false,
            data_saver: false,
            notifications: NotificationPrefs::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let settings = UserSettings::default();
        assert_eq!(settings.language, "en");
        assert!(!settings.default_anonymous);
        assert!(!settings.data_saver);
        assert!(settings.notifications.email);
        assert!(!settings.notifications.sms);
    }
}
