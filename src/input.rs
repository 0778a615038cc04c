//! Evaluation input: the caller-owned configuration fed to the engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

use crate::types::{CosmeticCheck, CosmeticStatus, FunctionalCheck, FunctionalStatus};

/// Status of every functional and cosmetic check.
///
/// Always complete: constructors fill every check id, and setters only
/// overwrite existing entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionReport {
    functional: BTreeMap<FunctionalCheck, FunctionalStatus>,
    cosmetic: BTreeMap<CosmeticCheck, CosmeticStatus>,
}

impl Default for ConditionReport {
    fn default() -> Self {
        Self::pristine()
    }
}

impl ConditionReport {
    /// Everything working, no cosmetic defect
    pub fn pristine() -> Self {
        Self {
            functional: FunctionalCheck::iter()
                .map(|c| (c, FunctionalStatus::Working))
                .collect(),
            cosmetic: CosmeticCheck::iter()
                .map(|c| (c, CosmeticStatus::Clean))
                .collect(),
        }
    }

    /// Build from boolean flags keyed by check id, with the checklist's
    /// polarity: `true` = working for functional, `true` = defect present
    /// for cosmetic. Ids absent from a map keep their pristine status.
    pub fn from_flags(
        functional: &BTreeMap<FunctionalCheck, bool>,
        cosmetic: &BTreeMap<CosmeticCheck, bool>,
    ) -> Self {
        let mut report = Self::pristine();
        for (&check, &working) in functional {
            report.set_functional(check, working.into());
        }
        for (&check, &defect) in cosmetic {
            report.set_cosmetic(check, defect.into());
        }
        report
    }

    pub fn functional(&self, check: FunctionalCheck) -> FunctionalStatus {
        self.functional.get(&check).copied().unwrap_or_default()
    }

    pub fn cosmetic(&self, check: CosmeticCheck) -> CosmeticStatus {
        self.cosmetic.get(&check).copied().unwrap_or_default()
    }

    pub fn set_functional(&mut self, check: FunctionalCheck, status: FunctionalStatus) {
        self.functional.insert(check, status);
    }

    pub fn set_cosmetic(&mut self, check: CosmeticCheck, status: CosmeticStatus) {
        self.cosmetic.insert(check, status);
    }

    /// Builder form of `set_functional(check, Broken)`
    pub fn with_broken(mut self, check: FunctionalCheck) -> Self {
        self.set_functional(check, FunctionalStatus::Broken);
        self
    }

    /// Builder form of `set_cosmetic(check, Defective)`
    pub fn with_defect(mut self, check: CosmeticCheck) -> Self {
        self.set_cosmetic(check, CosmeticStatus::Defective);
        self
    }

    pub fn broken_checks(&self) -> impl Iterator<Item = FunctionalCheck> + '_ {
        self.functional
            .iter()
            .filter(|(_, status)| status.is_broken())
            .map(|(&check, _)| check)
    }

    pub fn defects(&self) -> impl Iterator<Item = CosmeticCheck> + '_ {
        self.cosmetic
            .iter()
            .filter(|(_, status)| status.is_defective())
            .map(|(&check, _)| check)
    }

    pub fn is_pristine(&self) -> bool {
        self.broken_checks().next().is_none() && self.defects().next().is_none()
    }
}

/// Full device configuration for one quote
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// `DeviceModel::name`
    pub model: String,
    /// `StorageOption::label`
    pub storage: String,
    /// Percent. Not range-checked by the engine.
    pub battery_health: u8,
    pub condition: ConditionReport,
}

impl EvaluationInput {
    /// Full battery, pristine condition
    pub fn new(model: impl Into<String>, storage: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            storage: storage.into(),
            battery_health: 100,
            condition: ConditionReport::pristine(),
        }
    }

    pub fn with_battery_health(mut self, battery_health: u8) -> Self {
        self.battery_health = battery_health;
        self
    }

    pub fn with_condition(mut self, condition: ConditionReport) -> Self {
        self.condition = condition;
        self
    }
}
