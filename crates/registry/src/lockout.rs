//! Per-email login failure tracking
//!
//! Failures are counted in memory per lowercased email. Reaching the policy
//! threshold locks the email for the configured duration; a successful
//! login clears the slate.

use chrono::{DateTime, Duration, Utc};
use minibank_domain::SecurityPolicy;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default, Clone)]
struct FailureState {
    failures: u32,
    locked_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct LockoutTracker {
    states: Mutex<HashMap<String, FailureState>>,
}

impl LockoutTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, FailureState>> {
        match self.states.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// When the email is currently locked, returns the unlock time.
    pub fn locked_until(&self, email: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let mut states = self.lock();
        let state = states.get_mut(&email.to_lowercase())?;
        match state.locked_until {
            Some(until) if until > now => Some(until),
            Some(_) => {
                // Lock elapsed; the counter starts fresh.
                *state = FailureState::default();
                None
            }
            None => None,
        }
    }

    /// Record a failure. Returns the unlock time if this one tripped the lock.
    pub fn record_failure(
        &self,
        email: &str,
        policy: &SecurityPolicy,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        let mut states = self.lock();
        let state = states.entry(email.to_lowercase()).or_default();
        state.failures += 1;
        if state.failures >= policy.lockout_threshold {
            let until = now + Duration::minutes(policy.lockout_minutes);
            state.locked_until = Some(until);
            Some(until)
        } else {
            None
        }
    }

    /// Successful login clears failures and any lock.
    pub fn clear(&self, email: &str) {
        self.lock().remove(&email.to_lowercase());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locks_at_threshold() {
        let tracker = LockoutTracker::new();
        let policy = SecurityPolicy::default();
        let now = Utc::now();

        for _ in 0..4 {
            assert!(tracker.record_failure("a@b.co", &policy, now).is_none());
        }
        let until = tracker.record_failure("a@b.co", &policy, now).unwrap();
        assert_eq!(until, now + Duration::minutes(30));
        assert_eq!(tracker.locked_until("a@b.co", now), Some(until));
    }

    #[test]
    fn test_lock_expires_and_counter_resets() {
        let tracker = LockoutTracker::new();
        let policy = SecurityPolicy::default();
        let now = Utc::now();

        for _ in 0..5 {
            tracker.record_failure("a@b.co", &policy, now);
        }
        let later = now + Duration::minutes(31);
        assert!(tracker.locked_until("a@b.co", later).is_none());
        // One more failure does not immediately re-lock.
        assert!(tracker.record_failure("a@b.co", &policy, later).is_none());
    }

    #[test]
    fn test_success_clears_failures() {
        let tracker = LockoutTracker::new();
        let policy = SecurityPolicy::default();
        let now = Utc::now();

        for _ in 0..4 {
            tracker.record_failure("a@b.co", &policy, now);
        }
        tracker.clear("A@B.CO");
        assert!(tracker.record_failure("a@b.co", &policy, now).is_none());
    }

    #[test]
    fn test_emails_tracked_independently() {
        let tracker = LockoutTracker::new();
        let policy = SecurityPolicy::default();
        let now = Utc::now();

        for _ in 0..5 {
            tracker.record_failure("a@b.co", &policy, now);
        }
        assert!(tracker.locked_until("c@d.co", now).is_none());
    }
}
