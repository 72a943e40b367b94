//! Minibank Event Bus - In-process pub/sub of state transitions
//!
//! Interested parties subscribe to a broadcast channel instead of polling
//! the store. Publishing is fire-and-forget: an event with no subscribers
//! is dropped, and the operation that produced it is never failed.

pub mod channel;
pub mod event;

pub use channel::EventBus;
pub use event::BankEvent;
