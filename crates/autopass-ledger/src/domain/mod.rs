//! # Ledger Domain
//!
//! Pure domain logic: entities, value objects, the wire codec, storage
//! keys, fee arithmetic and invariants. Nothing here touches a port.

pub mod codec;
pub mod entities;
pub mod fees;
pub mod invariants;
pub mod keys;
pub mod value_objects;
