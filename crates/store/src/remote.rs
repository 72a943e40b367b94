//! Remote collection service client
//!
//! Blocking HTTP client for the optional document-collection backend. Every
//! call is attempted exactly once; the mirror decides what a failure means.

use crate::error::StoreError;
use minibank_domain::{Account, AdminCredentials, AuditEvent, PendingRegistration, Transaction};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

#[derive(Serialize)]
struct ReasonBody<'a> {
    reason: &'a str,
}

/// Client for the remote collection service.
pub struct RemoteStore {
    client: Client,
    base_url: String,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/users`. The credential field is omitted by the service;
    /// returned accounts carry an empty password the caller must not persist
    /// over a local copy.
    pub fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let values: Vec<serde_json::Value> = self
            .client
            .get(self.url("/api/users"))
            .send()?
            .error_for_status()?
            .json()?;
        let mut accounts = Vec::with_capacity(values.len());
        for mut value in values {
            if let Some(map) = value.as_object_mut() {
                map.entry("password")
                    .or_insert_with(|| serde_json::Value::String(String::new()));
            }
            accounts.push(serde_json::from_value(value)?);
        }
        Ok(accounts)
    }

    /// `POST /api/users`
    pub fn create_account(&self, account: &Account) -> Result<(), StoreError> {
        self.client
            .post(self.url("/api/users"))
            .json(account)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// `DELETE /api/users/{id}` (the service refuses admin-role accounts)
    pub fn delete_account(&self, account_number: &str) -> Result<(), StoreError> {
        self.client
            .delete(self.url(&format!("/api/users/{account_number}")))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// `POST /api/users/{id}/freeze`
    pub fn freeze_account(&self, account_number: &str) -> Result<(), StoreError> {
        self.client
            .post(self.url(&format!("/api/users/{account_number}/freeze")))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// `POST /api/users/{id}/unfreeze`
    pub fn unfreeze_account(&self, account_number: &str) -> Result<(), StoreError> {
        self.client
            .post(self.url(&format!("/api/users/{account_number}/unfreeze")))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// `GET /api/pending-users`
    pub fn list_registrations(&self) -> Result<Vec<PendingRegistration>, StoreError> {
        Ok(self
            .client
            .get(self.url("/api/pending-users"))
            .send()?
            .error_for_status()?
            .json()?)
    }

    /// `POST /api/pending-users`
    pub fn create_registration(
        &self,
        registration: &PendingRegistration,
    ) -> Result<(), StoreError> {
        self.client
            .post(self.url("/api/pending-users"))
            .json(registration)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// `POST /api/pending-users/approve/{id}`
    pub fn approve_registration(&self, account_number: &str) -> Result<(), StoreError> {
        self.client
            .post(self.url(&format!("/api/pending-users/approve/{account_number}")))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// `POST /api/pending-users/reject/{id}`
    pub fn reject_registration(
        &self,
        account_number: &str,
        reason: &str,
    ) -> Result<(), StoreError> {
        self.client
            .post(self.url(&format!("/api/pending-users/reject/{account_number}")))
            .json(&ReasonBody { reason })
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// `GET /api/transactions/pending`
    pub fn pending_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .client
            .get(self.url("/api/transactions/pending"))
            .send()?
            .error_for_status()?
            .json()?)
    }

    /// `POST /api/transactions`. Returns the id the service assigned.
    pub fn create_transaction(&self, transaction: &Transaction) -> Result<String, StoreError> {
        let created: CreatedResponse = self
            .client
            .post(self.url("/api/transactions"))
            .json(transaction)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(created.id)
    }

    /// `POST /api/transactions/{id}/approve`
    pub fn approve_transaction(&self, remote_id: &str) -> Result<(), StoreError> {
        self.client
            .post(self.url(&format!("/api/transactions/{remote_id}/approve")))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// `POST /api/transactions/{id}/reject`
    pub fn reject_transaction(&self, remote_id: &str, reason: &str) -> Result<(), StoreError> {
        self.client
            .post(self.url(&format!("/api/transactions/{remote_id}/reject")))
            .json(&ReasonBody { reason })
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// `GET /api/audit` — most recent 500 events.
    pub fn recent_audit(&self) -> Result<Vec<AuditEvent>, StoreError> {
        Ok(self
            .client
            .get(self.url("/api/audit"))
            .send()?
            .error_for_status()?
            .json()?)
    }

    /// `POST /api/users/login`
    pub fn login(&self, email: &str, password: &str) -> Result<Account, StoreError> {
        let mut value: serde_json::Value = self
            .client
            .post(self.url("/api/users/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()?
            .error_for_status()?
            .json()?;
        if let Some(map) = value.as_object_mut() {
            map.entry("password")
                .or_insert_with(|| serde_json::Value::String(password.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// `POST /api/admin/login`. The service omits the credential like the
    /// user endpoint does.
    pub fn admin_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AdminCredentials, StoreError> {
        let mut value: serde_json::Value = self
            .client
            .post(self.url("/api/admin/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()?
            .error_for_status()?
            .json()?;
        if let Some(map) = value.as_object_mut() {
            map.entry("password")
                .or_insert_with(|| serde_json::Value::String(password.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = RemoteStore::new("http://bank.example/").unwrap();
        assert_eq!(store.url("/api/users"), "http://bank.example/api/users");
    }

    /// Serve one canned response on a local socket.
    fn one_shot_server(body: &'static str) -> std::net::SocketAddr {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = std::io::Read::read(&mut stream, &mut buf);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            std::io::Write::write_all(&mut stream, response.as_bytes()).unwrap();
        });
        addr
    }

    #[test]
    fn test_admin_login_restores_omitted_credential() {
        let addr = one_shot_server(r#"{"name":"Administrator","email":"admin@minibank.local"}"#);
        let store = RemoteStore::new(format!("http://{addr}")).unwrap();

        let admin = store.admin_login("admin@minibank.local", "admin010").unwrap();
        assert_eq!(admin.name, "Administrator");
        assert_eq!(admin.email, "admin@minibank.local");
        assert_eq!(admin.password, "admin010");
    }
}
