//! # Ports
//!
//! Hexagonal seams: [`inbound`] is the API the host drives, [`outbound`]
//! is what the ledger requires from the host.

pub mod inbound;
pub mod outbound;
