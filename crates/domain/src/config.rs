//! Configuration records persisted through the store's settings keys

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-account daily spending caps. The transfer limit covers transfers
/// and bill payments together; the ATM limit is tracked for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLimits {
    pub atm: Decimal,
    pub transfer: Decimal,
}

impl Default for DailyLimits {
    fn default() -> Self {
        Self {
            atm: Decimal::new(500, 0),
            transfer: Decimal::new(2500, 0),
        }
    }
}

/// Per-account alert thresholds, consulted at approval time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// A warning fires when the post-approval balance is at or below this
    pub low_balance_threshold: Decimal,
    /// An info notice fires when an approved amount is at or above this
    pub large_transaction_threshold: Decimal,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            low_balance_threshold: Decimal::new(100, 0),
            large_transaction_threshold: Decimal::new(1000, 0),
        }
    }
}

/// Login lockout and session policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityPolicy {
    /// Consecutive failures per email before the lock engages
    pub lockout_threshold: u32,
    pub lockout_minutes: i64,
    pub session_timeout_minutes: i64,
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            lockout_threshold: 5,
            lockout_minutes: 30,
            session_timeout_minutes: 60,
        }
    }
}

/// The built-in admin login, checked before any account lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            email: "admin@minibank.local".to_string(),
            password: "admin010".to_string(),
            name: "Administrator".to_string(),
        }
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// When set, non-admin logins are refused with `maintenance_message`
    pub maintenance_mode: bool,
    #[serde(default = "default_maintenance_message")]
    pub maintenance_message: String,
    pub admin: AdminCredentials,
}

fn default_maintenance_message() -> String {
    "The bank is temporarily unavailable for scheduled maintenance.".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            maintenance_mode: false,
            maintenance_message: default_maintenance_message(),
            admin: AdminCredentials::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_limit_defaults() {
        let limits = DailyLimits::default();
        assert_eq!(limits.atm, dec!(500));
        assert_eq!(limits.transfer, dec!(2500));
    }

    #[test]
    fn test_alert_defaults() {
        let alerts = AlertConfig::default();
        assert_eq!(alerts.low_balance_threshold, dec!(100));
        assert_eq!(alerts.large_transaction_threshold, dec!(1000));
    }

    #[test]
    fn test_security_defaults() {
        let policy = SecurityPolicy::default();
        assert_eq!(policy.lockout_threshold, 5);
        assert_eq!(policy.lockout_minutes, 30);
    }

    #[test]
    fn test_settings_serde_roundtrip() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, parsed);
        assert!(!parsed.maintenance_mode);
    }
}
