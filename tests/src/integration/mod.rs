//! Cross-component integration flows.

pub mod atomicity;
pub mod purchase_flow;
pub mod renewal_flow;
