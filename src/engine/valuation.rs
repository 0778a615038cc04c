//! Valuation Engine
//!
//! Turns an `EvaluationInput` into a cash quote. The cascade below is
//! evaluated in order; the first three branches return a flat price, only
//! the last does arithmetic.
//!
//! | Step | Condition                          | Result |
//! |------|------------------------------------|--------|
//! | 1    | unknown model or storage           | 0 |
//! | 2    | model in the legacy list           | `LEGACY_FLAT_PRICE` |
//! | 3    | Face ID broken                     | `BIOMETRIC_FAILURE_RECENT_PRICE` or `BIOMETRIC_FAILURE_PRICE` |
//! | 4    | otherwise                          | market value → trade-in → battery → penalties → round |
//!
//! # Design
//!
//! - **Total**: every input yields a non-negative price, nothing panics or errors
//! - **Pure**: reads the catalog and the input, nothing else
//! - **Explainable**: `evaluate_detailed` records every adjustment applied

use serde::Serialize;
use std::fmt;
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::input::EvaluationInput;
use crate::policy::{
    self, BATTERY_AGED_BELOW, BATTERY_AGED_FACTOR, BATTERY_WORN_BELOW, BATTERY_WORN_FACTOR,
    BIOMETRIC_FAILURE_PRICE, BIOMETRIC_FAILURE_RECENT_PRICE, LEGACY_FLAT_PRICE,
    REAR_SHELL_FLAT_DEDUCTION, TRADE_IN_FACTOR,
};
use crate::types::{CosmeticCheck, FunctionalCheck};

// ============================================================================
// Valuation Types
// ============================================================================

/// Which branch of the cascade produced the price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationPath {
    /// Model or storage label not in the catalog
    UnknownConfiguration,
    LegacyFlatPrice,
    BiometricFailure { recent_generation: bool },
    Standard,
}

impl fmt::Display for ValuationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownConfiguration => write!(f, "unknown model or storage"),
            Self::LegacyFlatPrice => write!(f, "legacy model, flat price"),
            Self::BiometricFailure { recent_generation: true } => {
                write!(f, "Face ID failure, recent generation")
            }
            Self::BiometricFailure { recent_generation: false } => write!(f, "Face ID failure"),
            Self::Standard => write!(f, "standard valuation"),
        }
    }
}

/// Battery depreciation band. Bands do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryBand {
    /// `>= BATTERY_AGED_BELOW`, no adjustment
    Healthy,
    /// `[BATTERY_WORN_BELOW, BATTERY_AGED_BELOW)`
    Aged,
    /// `< BATTERY_WORN_BELOW`
    Worn,
}

impl BatteryBand {
    pub fn classify(battery_health: u8) -> Self {
        if battery_health < BATTERY_WORN_BELOW {
            Self::Worn
        } else if battery_health < BATTERY_AGED_BELOW {
            Self::Aged
        } else {
            Self::Healthy
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            Self::Healthy => 1.0,
            Self::Aged => BATTERY_AGED_FACTOR,
            Self::Worn => BATTERY_WORN_FACTOR,
        }
    }
}

/// One step of the standard path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adjustment {
    /// base × storage multiplier
    MarketValue { base: f64, multiplier: f64 },
    TradeIn { factor: f64 },
    Battery { band: BatteryBand, factor: f64 },
    FunctionalPenalty { check: FunctionalCheck, penalty_percent: f64 },
    CosmeticPenalty { check: CosmeticCheck, penalty_percent: f64 },
    FlatDeduction { check: CosmeticCheck, amount: f64 },
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarketValue { base, multiplier } => {
                write!(f, "MarketValue({} x {})", base, multiplier)
            }
            Self::TradeIn { factor } => write!(f, "TradeIn(x {})", factor),
            Self::Battery { band, factor } => write!(f, "Battery({:?}, x {})", band, factor),
            Self::FunctionalPenalty { check, penalty_percent } => {
                write!(f, "Broken({}, -{}%)", check, penalty_percent)
            }
            Self::CosmeticPenalty { check, penalty_percent } => {
                write!(f, "Defect({}, -{}%)", check, penalty_percent)
            }
            Self::FlatDeduction { check, amount } => write!(f, "Defect({}, -{})", check, amount),
        }
    }
}

/// An adjustment and the running value right after it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedAdjustment {
    pub adjustment: Adjustment,
    pub value_after: f64,
}

/// A quote together with how it was reached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    pub price: u32,
    pub path: ValuationPath,
    /// Empty unless `path` is `Standard`
    pub adjustments: Vec<AppliedAdjustment>,
}

impl Valuation {
    fn flat(price: u32, path: ValuationPath) -> Self {
        Self {
            price,
            path,
            adjustments: Vec::new(),
        }
    }

    /// base × multiplier, when the standard path ran
    pub fn estimated_market_value(&self) -> Option<f64> {
        self.adjustments
            .iter()
            .find(|a| matches!(a.adjustment, Adjustment::MarketValue { .. }))
            .map(|a| a.value_after)
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Quote for `input`, in whole currency units.
pub fn evaluate(catalog: &Catalog, input: &EvaluationInput) -> u32 {
    evaluate_detailed(catalog, input).price
}

/// Quote for `input` with the branch taken and every adjustment applied.
pub fn evaluate_detailed(catalog: &Catalog, input: &EvaluationInput) -> Valuation {
    let (Some(model), Some(storage)) = (
        catalog.find_model(&input.model),
        catalog.find_storage(&input.storage),
    ) else {
        debug!("No quote for {} / {}: not in catalog", input.model, input.storage);
        return Valuation::flat(0, ValuationPath::UnknownConfiguration);
    };

    if policy::is_legacy_flat_price(&model.name) {
        debug!("{} is a legacy model, flat price", model.name);
        return Valuation::flat(LEGACY_FLAT_PRICE, ValuationPath::LegacyFlatPrice);
    }

    if input.condition.functional(FunctionalCheck::FaceId).is_broken() {
        let recent_generation = policy::has_biometric_bonus(model.generation);
        let price = if recent_generation {
            BIOMETRIC_FAILURE_RECENT_PRICE
        } else {
            BIOMETRIC_FAILURE_PRICE
        };
        debug!("{} has a Face ID failure, flat price {}", model.name, price);
        return Valuation::flat(price, ValuationPath::BiometricFailure { recent_generation });
    }

    let mut steps = Steps::default();

    let mut value = model.base_market_value * storage.multiplier;
    steps.push(
        Adjustment::MarketValue {
            base: model.base_market_value,
            multiplier: storage.multiplier,
        },
        value,
    );

    value *= TRADE_IN_FACTOR;
    steps.push(Adjustment::TradeIn { factor: TRADE_IN_FACTOR }, value);

    let band = BatteryBand::classify(input.battery_health);
    if band != BatteryBand::Healthy {
        value *= band.factor();
        steps.push(Adjustment::Battery { band, factor: band.factor() }, value);
    }

    // Canonical check order, whatever order the catalog file lists them in
    for id in FunctionalCheck::iter() {
        if id == FunctionalCheck::FaceId || !input.condition.functional(id).is_broken() {
            continue;
        }
        let Some(check) = catalog.functional_check(id) else {
            continue;
        };
        value *= check.retained_fraction();
        steps.push(
            Adjustment::FunctionalPenalty {
                check: check.id,
                penalty_percent: check.penalty_percent,
            },
            value,
        );
    }

    // Canonical order puts `BackCracked` last
    for id in CosmeticCheck::iter() {
        if !input.condition.cosmetic(id).is_defective() {
            continue;
        }
        let Some(check) = catalog.cosmetic_check(id) else {
            continue;
        };
        if check.id == CosmeticCheck::BackCracked
            && policy::has_flat_rear_shell_deduction(model.generation)
        {
            value -= REAR_SHELL_FLAT_DEDUCTION;
            steps.push(
                Adjustment::FlatDeduction {
                    check: check.id,
                    amount: REAR_SHELL_FLAT_DEDUCTION,
                },
                value,
            );
        } else {
            value *= check.retained_fraction();
            steps.push(
                Adjustment::CosmeticPenalty {
                    check: check.id,
                    penalty_percent: check.penalty_percent,
                },
                value,
            );
        }
    }

    let price = to_price(value);
    debug!("{} / {} quoted at {}", model.name, storage.label, price);

    Valuation {
        price,
        path: ValuationPath::Standard,
        adjustments: steps.0,
    }
}

#[derive(Default)]
struct Steps(Vec<AppliedAdjustment>);

impl Steps {
    fn push(&mut self, adjustment: Adjustment, value_after: f64) {
        trace!("{} -> {:.2}", adjustment, value_after);
        self.0.push(AppliedAdjustment {
            adjustment,
            value_after,
        });
    }
}

/// `max(0, round_half_up(value))`
fn to_price(value: f64) -> u32 {
    let rounded = (value + 0.5).floor();
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else {
        rounded as u32
    }
}
