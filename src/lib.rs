//! phonequote library
//!
//! Cash purchase quotes for used iPhones. The valuation engine and the
//! storage availability resolver are pure functions over an immutable
//! `Catalog`; `QuoteSession` is the caller-side state that keeps a
//! configuration legal between edits.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod input;
pub mod logic;
pub mod policy;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use catalog::{Catalog, ConditionCheck, DeviceModel, StorageOption};
pub use error::QuoteError;
pub use input::{ConditionReport, EvaluationInput};
pub use session::QuoteSession;
pub use types::{
    CheckCategory, CheckKind, CosmeticCheck, CosmeticStatus, FunctionalCheck, FunctionalStatus,
    Generation,
};

// Valuation engine
pub use engine::valuation::{
    Adjustment, AppliedAdjustment, BatteryBand, Valuation, ValuationPath, evaluate,
    evaluate_detailed,
};

// Storage availability resolver
pub use logic::resolver::{
    Reconciliation, StorageRestriction, allowed_storage_options, is_storage_allowed,
    reconcile_storage, storage_restriction,
};
