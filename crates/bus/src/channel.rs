//! Broadcast channel wrapper

use crate::event::BankEvent;
use tokio::sync::broadcast;
use tracing::debug;

const DEFAULT_CAPACITY: usize = 256;

/// In-process event bus backed by a tokio broadcast channel.
///
/// Cloning is cheap; all clones publish into the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BankEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event. A bus with no subscribers drops the event;
    /// this never fails the operation that produced it.
    pub fn publish(&self, event: BankEvent) {
        debug!(kind = event.kind(), "publishing event");
        let _ = self.sender.send(event);
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<BankEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minibank_core::AccountNumber;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_publish_and_receive() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        let id = Uuid::new_v4();
        bus.publish(BankEvent::transaction_submitted(
            id,
            AccountNumber::new("123456789012").unwrap(),
            dec!(50),
        ));

        let event = rx.recv().await.unwrap();
        match event {
            BankEvent::TransactionSubmitted { transaction_id, amount, .. } => {
                assert_eq!(transaction_id, id);
                assert_eq!(amount, dec!(50));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(BankEvent::AccountFrozen {
            account_number: AccountNumber::new("123456789012").unwrap(),
            timestamp: chrono::Utc::now(),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_all_subscribers_see_events() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(BankEvent::transaction_rejected(
            Uuid::new_v4(),
            AccountNumber::new("123456789012").unwrap(),
            "declined by admin",
        ));

        assert!(matches!(rx1.recv().await.unwrap(), BankEvent::TransactionRejected { .. }));
        assert!(matches!(rx2.recv().await.unwrap(), BankEvent::TransactionRejected { .. }));
    }
}
