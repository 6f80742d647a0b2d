//! Uplink SIR Fuzz Harness
//!
//! Property-based testing infrastructure for the uplink SIR engine.
//! Provides domain strategies for radio parameters and network indices.
//!
//! # Usage
//!
//! ```rust
//! use fuzz_harness::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_fuzz_test(nu in path_loss_exponent()) {
//!         prop_assert!(nu >= 2.0);
//!     }
//! }
//! ```

pub mod generators;
pub mod runner;

pub mod prelude {
    pub use crate::generators::*;
    pub use crate::runner::FuzzConfig;
    pub use proptest::prelude::*;
    pub use uplink_sir::{EngineConfig, ReuseFactor};
}

// Re-export proptest for convenience
pub use proptest;
