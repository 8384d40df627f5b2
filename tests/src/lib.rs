//! # Autopass Test Suite
//!
//! Unified test crate for cross-component flows.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── purchase_flow.rs   # listing, buying, earnings, certificates
//!     └── renewal_flow.rs    # scheduling, cadence, idempotence, cancellation
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p autopass-tests
//!
//! # By category
//! cargo test -p autopass-tests integration::purchase_flow
//! cargo test -p autopass-tests integration::renewal_flow
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
