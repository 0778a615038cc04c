//! Engine modules: the pricing rules.
//!
//! The engine sits between the caller's configuration and the displayed
//! quote. It holds no state and can be re-run on every input change.

pub mod valuation;
