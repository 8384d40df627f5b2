//! # Adapters
//!
//! In-process implementations of the outbound ports, used by tests and by
//! hosts that embed the ledger directly.

pub mod event_log;
pub mod memory_store;
pub mod scheduler;

pub use event_log::RecordingEventSink;
pub use memory_store::InMemoryStore;
pub use scheduler::{InMemoryScheduler, PendingCall};
