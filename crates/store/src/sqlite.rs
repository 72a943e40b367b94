//! SQLite backend
//!
//! Records are stored as JSON blobs next to the key columns the queries
//! filter on. The connection sits behind a mutex so a single store can be
//! shared across the registry, workflow engine and console.

use crate::error::StoreError;
use crate::traits::{
    AccountRepository, AuditRepository, NotificationRepository, RegistrationOutcome,
    TransactionRepository,
};
use chrono::NaiveDate;
use minibank_core::AccountNumber;
use minibank_domain::{
    Account, AlertConfig, AppSettings, AuditEvent, DailyLimits, Notification,
    PendingRegistration, SecurityPolicy, Transaction,
};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const SETTINGS_KEY_APP: &str = "app";
const SETTINGS_KEY_SECURITY: &str = "security";

/// Durable store backed by a single SQLite database file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory database, for tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS accounts (
                account_number TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                joined_at TEXT NOT NULL,
                record TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_accounts_email ON accounts(email);

            CREATE TABLE IF NOT EXISTS registrations (
                account_number TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                requested_at TEXT NOT NULL,
                record TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS balances (
                account_number TEXT PRIMARY KEY,
                balance TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS daily_limits (
                account_number TEXT PRIMARY KEY,
                record TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS daily_usage (
                account_number TEXT NOT NULL,
                day TEXT NOT NULL,
                used TEXT NOT NULL,
                PRIMARY KEY (account_number, day)
            );

            CREATE TABLE IF NOT EXISTS alert_configs (
                account_number TEXT PRIMARY KEY,
                record TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                record TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS pending_transactions (
                id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                record TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS approved_transactions (
                id TEXT PRIMARY KEY,
                decided_at TEXT NOT NULL,
                record TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS history (
                id TEXT PRIMARY KEY,
                account_number TEXT NOT NULL,
                created_at TEXT NOT NULL,
                record TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_history_account ON history(account_number);

            CREATE TABLE IF NOT EXISTS audit_log (
                id TEXT PRIMARY KEY,
                at TEXT NOT NULL,
                record TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS notifications (
                id TEXT PRIMARY KEY,
                account_number TEXT NOT NULL,
                created_at TEXT NOT NULL,
                record TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_notifications_account
                ON notifications(account_number);",
        )?;
        Ok(())
    }

    fn load_rows<T: serde::de::DeserializeOwned>(
        conn: &Connection,
        sql: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<T>, StoreError> {
        let mut stmt = conn.prepare(sql)?;
        let records: Vec<String> = stmt
            .query_map(args, |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        let mut out = Vec::with_capacity(records.len());
        for record in records {
            out.push(serde_json::from_str(&record)?);
        }
        Ok(out)
    }

    fn load_row<T: serde::de::DeserializeOwned>(
        conn: &Connection,
        sql: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> Result<Option<T>, StoreError> {
        let mut stmt = conn.prepare(sql)?;
        let record: Option<String> = match stmt.query_row(args, |row| row.get(0)) {
            Ok(record) => Some(record),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(other) => return Err(StoreError::Database(other)),
        };
        match record {
            Some(record) => Ok(Some(serde_json::from_str(&record)?)),
            None => Ok(None),
        }
    }

    fn parse_decimal(raw: &str) -> Result<Decimal, StoreError> {
        Decimal::from_str(raw).map_err(|_| StoreError::Corrupt(format!("bad decimal: {raw}")))
    }
}

impl AccountRepository for SqliteStore {
    fn save_account(&self, account: &Account) -> Result<(), StoreError> {
        let record = serde_json::to_string(account)?;
        self.lock()?.execute(
            "INSERT OR REPLACE INTO accounts (account_number, email, joined_at, record)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                account.account_number.as_str(),
                account.email.to_lowercase(),
                account.joined_at.to_rfc3339(),
                record,
            ],
        )?;
        Ok(())
    }

    fn find_account(&self, number: &AccountNumber) -> Result<Option<Account>, StoreError> {
        let conn = self.lock()?;
        Self::load_row(
            &conn,
            "SELECT record FROM accounts WHERE account_number = ?1",
            &[&number.as_str()],
        )
    }

    fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let conn = self.lock()?;
        Self::load_row(
            &conn,
            "SELECT record FROM accounts WHERE email = ?1",
            &[&email.to_lowercase()],
        )
    }

    fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let conn = self.lock()?;
        Self::load_rows(&conn, "SELECT record FROM accounts ORDER BY joined_at", &[])
    }

    fn delete_account(&self, number: &AccountNumber) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let rows = conn.execute(
            "DELETE FROM accounts WHERE account_number = ?1",
            params![number.as_str()],
        )?;
        if rows == 0 {
            return Err(StoreError::NotFound(number.to_string()));
        }
        conn.execute(
            "DELETE FROM balances WHERE account_number = ?1",
            params![number.as_str()],
        )?;
        Ok(())
    }

    fn save_registration(&self, registration: &PendingRegistration) -> Result<(), StoreError> {
        let record = serde_json::to_string(registration)?;
        self.lock()?.execute(
            "INSERT OR REPLACE INTO registrations (account_number, email, requested_at, record)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                registration.account_number.as_str(),
                registration.email.to_lowercase(),
                registration.requested_at.to_rfc3339(),
                record,
            ],
        )?;
        Ok(())
    }

    fn list_registrations(&self) -> Result<Vec<PendingRegistration>, StoreError> {
        let conn = self.lock()?;
        Self::load_rows(
            &conn,
            "SELECT record FROM registrations ORDER BY requested_at",
            &[],
        )
    }

    fn find_registration_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PendingRegistration>, StoreError> {
        let conn = self.lock()?;
        Self::load_row(
            &conn,
            "SELECT record FROM registrations WHERE email = ?1",
            &[&email.to_lowercase()],
        )
    }

    fn remove_registration(
        &self,
        number: &AccountNumber,
        _outcome: RegistrationOutcome,
    ) -> Result<PendingRegistration, StoreError> {
        let conn = self.lock()?;
        let registration: PendingRegistration = Self::load_row(
            &conn,
            "SELECT record FROM registrations WHERE account_number = ?1",
            &[&number.as_str()],
        )?
        .ok_or_else(|| StoreError::NotFound(number.to_string()))?;
        conn.execute(
            "DELETE FROM registrations WHERE account_number = ?1",
            params![number.as_str()],
        )?;
        Ok(registration)
    }

    fn balance(&self, number: &AccountNumber) -> Result<Decimal, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT balance FROM balances WHERE account_number = ?1")?;
        match stmt.query_row(params![number.as_str()], |row| row.get::<_, String>(0)) {
            Ok(raw) => Self::parse_decimal(&raw),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Decimal::ZERO),
            Err(other) => Err(StoreError::Database(other)),
        }
    }

    fn set_balance(&self, number: &AccountNumber, balance: Decimal) -> Result<(), StoreError> {
        self.lock()?.execute(
            "INSERT OR REPLACE INTO balances (account_number, balance) VALUES (?1, ?2)",
            params![number.as_str(), balance.to_string()],
        )?;
        Ok(())
    }

    fn limits(&self, number: &AccountNumber) -> Result<DailyLimits, StoreError> {
        let conn = self.lock()?;
        let limits: Option<DailyLimits> = Self::load_row(
            &conn,
            "SELECT record FROM daily_limits WHERE account_number = ?1",
            &[&number.as_str()],
        )?;
        Ok(limits.unwrap_or_default())
    }

    fn set_limits(&self, number: &AccountNumber, limits: &DailyLimits) -> Result<(), StoreError> {
        let record = serde_json::to_string(limits)?;
        self.lock()?.execute(
            "INSERT OR REPLACE INTO daily_limits (account_number, record) VALUES (?1, ?2)",
            params![number.as_str(), record],
        )?;
        Ok(())
    }

    fn usage_on(&self, number: &AccountNumber, day: NaiveDate) -> Result<Decimal, StoreError> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT used FROM daily_usage WHERE account_number = ?1 AND day = ?2")?;
        match stmt.query_row(params![number.as_str(), day.to_string()], |row| {
            row.get::<_, String>(0)
        }) {
            Ok(raw) => Self::parse_decimal(&raw),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Decimal::ZERO),
            Err(other) => Err(StoreError::Database(other)),
        }
    }

    fn add_usage(
        &self,
        number: &AccountNumber,
        day: NaiveDate,
        amount: Decimal,
    ) -> Result<(), StoreError> {
        let current = self.usage_on(number, day)?;
        self.lock()?.execute(
            "INSERT OR REPLACE INTO daily_usage (account_number, day, used) VALUES (?1, ?2, ?3)",
            params![number.as_str(), day.to_string(), (current + amount).to_string()],
        )?;
        Ok(())
    }

    fn alert_config(&self, number: &AccountNumber) -> Result<AlertConfig, StoreError> {
        let conn = self.lock()?;
        let config: Option<AlertConfig> = Self::load_row(
            &conn,
            "SELECT record FROM alert_configs WHERE account_number = ?1",
            &[&number.as_str()],
        )?;
        Ok(config.unwrap_or_default())
    }

    fn set_alert_config(
        &self,
        number: &AccountNumber,
        config: &AlertConfig,
    ) -> Result<(), StoreError> {
        let record = serde_json::to_string(config)?;
        self.lock()?.execute(
            "INSERT OR REPLACE INTO alert_configs (account_number, record) VALUES (?1, ?2)",
            params![number.as_str(), record],
        )?;
        Ok(())
    }

    fn settings(&self) -> Result<AppSettings, StoreError> {
        let conn = self.lock()?;
        let settings: Option<AppSettings> = Self::load_row(
            &conn,
            "SELECT record FROM settings WHERE key = ?1",
            &[&SETTINGS_KEY_APP],
        )?;
        Ok(settings.unwrap_or_default())
    }

    fn save_settings(&self, settings: &AppSettings) -> Result<(), StoreError> {
        let record = serde_json::to_string(settings)?;
        self.lock()?.execute(
            "INSERT OR REPLACE INTO settings (key, record) VALUES (?1, ?2)",
            params![SETTINGS_KEY_APP, record],
        )?;
        Ok(())
    }

    fn security_policy(&self) -> Result<SecurityPolicy, StoreError> {
        let conn = self.lock()?;
        let policy: Option<SecurityPolicy> = Self::load_row(
            &conn,
            "SELECT record FROM settings WHERE key = ?1",
            &[&SETTINGS_KEY_SECURITY],
        )?;
        Ok(policy.unwrap_or_default())
    }

    fn save_security_policy(&self, policy: &SecurityPolicy) -> Result<(), StoreError> {
        let record = serde_json::to_string(policy)?;
        self.lock()?.execute(
            "INSERT OR REPLACE INTO settings (key, record) VALUES (?1, ?2)",
            params![SETTINGS_KEY_SECURITY, record],
        )?;
        Ok(())
    }
}

impl TransactionRepository for SqliteStore {
    fn push_pending(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let record = serde_json::to_string(transaction)?;
        self.lock()?.execute(
            "INSERT OR REPLACE INTO pending_transactions (id, created_at, record)
             VALUES (?1, ?2, ?3)",
            params![
                transaction.id.to_string(),
                transaction.created_at.to_rfc3339(),
                record,
            ],
        )?;
        Ok(())
    }

    fn pending(&self) -> Result<Vec<Transaction>, StoreError> {
        let conn = self.lock()?;
        Self::load_rows(
            &conn,
            "SELECT record FROM pending_transactions ORDER BY created_at",
            &[],
        )
    }

    fn find_pending(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
        let conn = self.lock()?;
        Self::load_row(
            &conn,
            "SELECT record FROM pending_transactions WHERE id = ?1",
            &[&id.to_string()],
        )
    }

    fn remove_pending(&self, id: Uuid) -> Result<Transaction, StoreError> {
        let conn = self.lock()?;
        let transaction: Transaction = Self::load_row(
            &conn,
            "SELECT record FROM pending_transactions WHERE id = ?1",
            &[&id.to_string()],
        )?
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        conn.execute(
            "DELETE FROM pending_transactions WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(transaction)
    }

    fn push_approved(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let record = serde_json::to_string(transaction)?;
        let decided_at = transaction
            .decided_at
            .unwrap_or(transaction.created_at)
            .to_rfc3339();
        self.lock()?.execute(
            "INSERT OR REPLACE INTO approved_transactions (id, decided_at, record)
             VALUES (?1, ?2, ?3)",
            params![transaction.id.to_string(), decided_at, record],
        )?;
        Ok(())
    }

    fn approved(&self) -> Result<Vec<Transaction>, StoreError> {
        let conn = self.lock()?;
        Self::load_rows(
            &conn,
            "SELECT record FROM approved_transactions ORDER BY decided_at",
            &[],
        )
    }

    fn append_history(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let record = serde_json::to_string(transaction)?;
        self.lock()?.execute(
            "INSERT OR REPLACE INTO history (id, account_number, created_at, record)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                transaction.id.to_string(),
                transaction.account_number.as_str(),
                transaction.created_at.to_rfc3339(),
                record,
            ],
        )?;
        Ok(())
    }

    fn history(&self, number: &AccountNumber) -> Result<Vec<Transaction>, StoreError> {
        let conn = self.lock()?;
        Self::load_rows(
            &conn,
            "SELECT record FROM history WHERE account_number = ?1 ORDER BY created_at",
            &[&number.as_str()],
        )
    }

    fn update_history(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let record = serde_json::to_string(transaction)?;
        let rows = self.lock()?.execute(
            "UPDATE history SET record = ?1 WHERE id = ?2",
            params![record, transaction.id.to_string()],
        )?;
        if rows == 0 {
            return Err(StoreError::NotFound(transaction.id.to_string()));
        }
        Ok(())
    }

    fn clear_history(&self, number: &AccountNumber) -> Result<(), StoreError> {
        self.lock()?.execute(
            "DELETE FROM history WHERE account_number = ?1",
            params![number.as_str()],
        )?;
        Ok(())
    }
}

impl AuditRepository for SqliteStore {
    fn append_audit(&self, event: &AuditEvent) -> Result<(), StoreError> {
        let record = serde_json::to_string(event)?;
        self.lock()?.execute(
            "INSERT INTO audit_log (id, at, record) VALUES (?1, ?2, ?3)",
            params![event.id.to_string(), event.at.to_rfc3339(), record],
        )?;
        Ok(())
    }

    fn recent_audit(&self, limit: usize) -> Result<Vec<AuditEvent>, StoreError> {
        let conn = self.lock()?;
        Self::load_rows(
            &conn,
            "SELECT record FROM audit_log ORDER BY at DESC LIMIT ?1",
            &[&(limit as i64)],
        )
    }

    fn purge_audit(&self) -> Result<usize, StoreError> {
        let rows = self.lock()?.execute("DELETE FROM audit_log", [])?;
        Ok(rows)
    }
}

impl NotificationRepository for SqliteStore {
    fn append_notification(
        &self,
        number: &AccountNumber,
        notification: &Notification,
    ) -> Result<(), StoreError> {
        let record = serde_json::to_string(notification)?;
        self.lock()?.execute(
            "INSERT OR REPLACE INTO notifications (id, account_number, created_at, record)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                notification.id.to_string(),
                number.as_str(),
                notification.created_at.to_rfc3339(),
                record,
            ],
        )?;
        Ok(())
    }

    fn notifications(&self, number: &AccountNumber) -> Result<Vec<Notification>, StoreError> {
        let conn = self.lock()?;
        Self::load_rows(
            &conn,
            "SELECT record FROM notifications WHERE account_number = ?1 ORDER BY created_at",
            &[&number.as_str()],
        )
    }

    fn mark_notification_read(&self, number: &AccountNumber, id: Uuid) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let mut notification: Notification = Self::load_row(
            &conn,
            "SELECT record FROM notifications WHERE id = ?1 AND account_number = ?2",
            &[&id.to_string(), &number.as_str()],
        )?
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        notification.read = true;
        let record = serde_json::to_string(&notification)?;
        conn.execute(
            "UPDATE notifications SET record = ?1 WHERE id = ?2",
            params![record, id.to_string()],
        )?;
        Ok(())
    }

    fn clear_notifications(&self, number: &AccountNumber) -> Result<(), StoreError> {
        self.lock()?.execute(
            "DELETE FROM notifications WHERE account_number = ?1",
            params![number.as_str()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use minibank_core::{Amount, TransactionPin};
    use minibank_domain::{AccountStatus, Role, Severity, TransactionType};
    use rust_decimal_macros::dec;

    fn account(number: &str, email: &str) -> Account {
        Account {
            account_number: AccountNumber::new(number).unwrap(),
            routing_number: None,
            email: email.to_string(),
            name: "Test User".to_string(),
            password: "hunter22".to_string(),
            phone: "5551234567".to_string(),
            pin: TransactionPin::system_assigned(),
            status: AccountStatus::Active,
            role: Role::User,
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn test_account_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();
        let a = account("123456789012", "Jane@Example.com");
        store.save_account(&a).unwrap();

        let loaded = store.find_account(&a.account_number).unwrap().unwrap();
        assert_eq!(loaded, a);
        // Email lookups are case-insensitive
        assert!(store.find_account_by_email("jane@EXAMPLE.com").unwrap().is_some());
    }

    #[test]
    fn test_delete_account_removes_balance() {
        let store = SqliteStore::in_memory().unwrap();
        let a = account("123456789012", "jane@example.com");
        store.save_account(&a).unwrap();
        store.set_balance(&a.account_number, dec!(250)).unwrap();

        store.delete_account(&a.account_number).unwrap();
        assert_eq!(store.balance(&a.account_number).unwrap(), Decimal::ZERO);
        assert!(matches!(
            store.delete_account(&a.account_number),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_balance_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.db");
        let number = AccountNumber::new("123456789012").unwrap();

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set_balance(&number, dec!(1234.56)).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.balance(&number).unwrap(), dec!(1234.56));
    }

    #[test]
    fn test_pending_queue_lifecycle() {
        let store = SqliteStore::in_memory().unwrap();
        let t = Transaction::new(
            AccountNumber::new("123456789012").unwrap(),
            TransactionType::Transfer,
            Amount::new(dec!(75)).unwrap(),
            "rent",
            Some("wire".to_string()),
            None,
        );
        store.push_pending(&t).unwrap();
        store.append_history(&t).unwrap();

        assert_eq!(store.find_pending(t.id).unwrap().unwrap().id, t.id);
        let removed = store.remove_pending(t.id).unwrap();
        assert_eq!(removed, t);
        assert!(matches!(store.remove_pending(t.id), Err(StoreError::NotFound(_))));

        let mut decided = t.clone();
        decided.mark_declined("nope", Utc::now());
        store.update_history(&decided).unwrap();
        let history = store.history(&t.account_number).unwrap();
        assert_eq!(history[0].decline_reason.as_deref(), Some("nope"));
    }

    #[test]
    fn test_usage_accumulates() {
        let store = SqliteStore::in_memory().unwrap();
        let number = AccountNumber::new("123456789012").unwrap();
        let today = Utc::now().date_naive();
        store.add_usage(&number, today, dec!(400)).unwrap();
        store.add_usage(&number, today, dec!(100.50)).unwrap();
        assert_eq!(store.usage_on(&number, today).unwrap(), dec!(500.50));
    }

    #[test]
    fn test_settings_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();
        let mut settings = AppSettings::default();
        settings.maintenance_mode = true;
        store.save_settings(&settings).unwrap();
        assert!(store.settings().unwrap().maintenance_mode);

        let policy = store.security_policy().unwrap();
        assert_eq!(policy.lockout_threshold, 5);
    }

    #[test]
    fn test_audit_limit_and_purge() {
        let store = SqliteStore::in_memory().unwrap();
        for _ in 0..4 {
            let event = AuditEvent::new(
                minibank_domain::AuditKind::UsersPurged,
                None,
                minibank_domain::AuditTarget::default(),
                serde_json::json!({ "count": 0 }),
            );
            store.append_audit(&event).unwrap();
        }
        assert_eq!(store.recent_audit(2).unwrap().len(), 2);
        assert_eq!(store.purge_audit().unwrap(), 4);
    }

    #[test]
    fn test_notifications_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();
        let number = AccountNumber::new("123456789012").unwrap();
        let n = Notification::new("Transfer declined", "see details", Severity::Error);
        store.append_notification(&number, &n).unwrap();
        store.mark_notification_read(&number, n.id).unwrap();
        assert!(store.notifications(&number).unwrap()[0].read);
    }
}
