//! Logic modules: constraints on which configurations are legal.
//!
//! # Modules
//!
//! - `resolver`: Storage tier availability per model, and the
//!   reconciliation step callers run after a model change

pub mod resolver;
