//! Pricing policy constants.
//!
//! Every flat price, factor and membership list used by the resolver and
//! the valuation engine lives here, so a model rename is a single edit with
//! a failing test next to it.
//!
//! # Membership Lists
//!
//! | List                               | Used by   | Matches on |
//! |------------------------------------|-----------|------------|
//! | `LEGACY_FLAT_PRICE_MODELS`         | engine    | exact model name |
//! | `BIOMETRIC_BONUS_GENERATIONS`      | engine    | `Generation` |
//! | `REAR_SHELL_FLAT_GENERATIONS`      | engine    | `Generation` |
//! | `NO_64_NO_128_MODELS` (tier A)     | resolver  | exact model name |
//! | `NO_64_MODELS` (tier B)            | resolver  | exact model name |

use crate::types::Generation;

// ============================================================================
// Flat prices
// ============================================================================

/// Quote for every model in `LEGACY_FLAT_PRICE_MODELS`.
pub const LEGACY_FLAT_PRICE: u32 = 50;

/// Quote for a broken Face ID on a model in `BIOMETRIC_BONUS_GENERATIONS`.
pub const BIOMETRIC_FAILURE_RECENT_PRICE: u32 = 100;

/// Quote for a broken Face ID on any other model.
pub const BIOMETRIC_FAILURE_PRICE: u32 = 50;

// ============================================================================
// Standard path factors
// ============================================================================

/// As-is trade-in share of the estimated market value.
pub const TRADE_IN_FACTOR: f64 = 0.45;

/// Battery health strictly below this falls in the worn band.
pub const BATTERY_WORN_BELOW: u8 = 80;
pub const BATTERY_WORN_FACTOR: f64 = 0.70;

/// Battery health strictly below this (and not worn) falls in the aged band.
pub const BATTERY_AGED_BELOW: u8 = 85;
pub const BATTERY_AGED_FACTOR: f64 = 0.90;

/// Absolute deduction for a cracked rear shell on `REAR_SHELL_FLAT_GENERATIONS`.
pub const REAR_SHELL_FLAT_DEDUCTION: f64 = 180.0;

// ============================================================================
// Caller-side battery range
// ============================================================================

pub const MIN_BATTERY_HEALTH: u8 = 50;
pub const MAX_BATTERY_HEALTH: u8 = 100;

// ============================================================================
// Membership lists
// ============================================================================

/// Oldest supported models, priced flat regardless of condition.
pub const LEGACY_FLAT_PRICE_MODELS: &[&str] =
    &["iPhone X", "iPhone XS", "iPhone XR", "iPhone XS Max"];

/// Generations that keep the higher flat price on a Face ID failure.
pub const BIOMETRIC_BONUS_GENERATIONS: &[Generation] =
    &[Generation::Fifteen, Generation::Sixteen, Generation::Seventeen];

/// Generations where a cracked rear shell is a flat repair bill.
///
/// Intentionally one generation wider than `BIOMETRIC_BONUS_GENERATIONS`.
pub const REAR_SHELL_FLAT_GENERATIONS: &[Generation] = &[
    Generation::Fourteen,
    Generation::Fifteen,
    Generation::Sixteen,
    Generation::Seventeen,
];

pub const STORAGE_64GB: &str = "64 GB";
pub const STORAGE_128GB: &str = "128 GB";

/// Tier A: never sold in 64 GB or 128 GB.
pub const NO_64_NO_128_MODELS: &[&str] = &[
    "iPhone 15 Pro Max",
    "iPhone 16 Pro Max",
    "iPhone 17 Pro Max",
    "iPhone 17 Pro",
];

/// Tier B: never sold in 64 GB.
pub const NO_64_MODELS: &[&str] = &[
    "iPhone 16 Pro",
    "iPhone 16 Plus",
    "iPhone 15 Plus",
    "iPhone 15 Pro",
    "iPhone 15",
    "iPhone 14 Pro Max",
    "iPhone 14 Pro",
    "iPhone 14",
    "iPhone 13 Pro Max",
    "iPhone 13 Pro",
    "iPhone 13",
    "iPhone 12 Pro Max",
    "iPhone 17 Air",
    "iPhone 17 Plus",
    "iPhone 17",
];

pub fn is_legacy_flat_price(model_name: &str) -> bool {
    LEGACY_FLAT_PRICE_MODELS.contains(&model_name)
}

pub fn has_biometric_bonus(generation: Generation) -> bool {
    BIOMETRIC_BONUS_GENERATIONS.contains(&generation)
}

pub fn has_flat_rear_shell_deduction(generation: Generation) -> bool {
    REAR_SHELL_FLAT_GENERATIONS.contains(&generation)
}
