//! Reference data: device models, storage tiers and condition checks.
//!
//! The built-in catalog carries the shop's current price list. A JSON file
//! with the same shape can replace it at startup (`--catalog`), which is how
//! prices are updated without a rebuild.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::QuoteError;
use crate::logic::resolver::allowed_storage_options;
use crate::types::{CheckCategory, CheckKind, CosmeticCheck, FunctionalCheck, Generation};

/// Reference market price of a model at its base storage tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceModel {
    pub name: String,
    pub base_market_value: f64,
    pub generation: Generation,
}

/// A storage tier and the factor it applies to the base market value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageOption {
    pub label: String,
    pub multiplier: f64,
}

/// One inspectable defect or feature. `K` is the check-id enum and fixes
/// the category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionCheck<K> {
    pub id: K,
    pub label: String,
    pub penalty_percent: f64,
}

impl<K: CheckKind> ConditionCheck<K> {
    pub fn category(&self) -> CheckCategory {
        K::CATEGORY
    }

    /// Multiplier applied when the check is failed: `1 - penalty/100`.
    pub fn retained_fraction(&self) -> f64 {
        1.0 - self.penalty_percent / 100.0
    }
}

/// The complete immutable reference data set.
///
/// `storage_options` is in canonical display order; the resolver keeps that
/// order when filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub models: Vec<DeviceModel>,
    pub storage_options: Vec<StorageOption>,
    pub functional_checks: Vec<ConditionCheck<FunctionalCheck>>,
    pub cosmetic_checks: Vec<ConditionCheck<CosmeticCheck>>,
}

const BUILTIN_MODELS: &[(&str, f64, Generation)] = &[
    ("iPhone 17 Pro Max", 1600.0, Generation::Seventeen),
    ("iPhone 17 Pro", 1450.0, Generation::Seventeen),
    ("iPhone 17 Air", 1300.0, Generation::Seventeen),
    ("iPhone 17 Plus", 1200.0, Generation::Seventeen),
    ("iPhone 17", 1100.0, Generation::Seventeen),
    ("iPhone 16 Pro Max", 1400.0, Generation::Sixteen),
    ("iPhone 16 Pro", 1250.0, Generation::Sixteen),
    ("iPhone 16 Plus", 1050.0, Generation::Sixteen),
    ("iPhone 16", 950.0, Generation::Sixteen),
    ("iPhone 16e", 800.0, Generation::Sixteen),
    ("iPhone 15 Pro Max", 1200.0, Generation::Fifteen),
    ("iPhone 15 Pro", 1050.0, Generation::Fifteen),
    ("iPhone 15 Plus", 900.0, Generation::Fifteen),
    ("iPhone 15", 800.0, Generation::Fifteen),
    ("iPhone 14 Pro Max", 950.0, Generation::Fourteen),
    ("iPhone 14 Pro", 850.0, Generation::Fourteen),
    ("iPhone 14", 650.0, Generation::Fourteen),
    ("iPhone 13 Pro Max", 750.0, Generation::Thirteen),
    ("iPhone 13 Pro", 650.0, Generation::Thirteen),
    ("iPhone 13", 500.0, Generation::Thirteen),
    ("iPhone 12 Pro Max", 600.0, Generation::Twelve),
    ("iPhone 12 Pro", 550.0, Generation::Twelve),
    ("iPhone 12", 400.0, Generation::Twelve),
    ("iPhone 11 Pro Max", 500.0, Generation::Eleven),
    ("iPhone 11 Pro", 450.0, Generation::Eleven),
    ("iPhone 11", 300.0, Generation::Eleven),
    ("iPhone XS Max", 250.0, Generation::X),
    ("iPhone XS", 220.0, Generation::X),
    ("iPhone XR", 200.0, Generation::X),
    ("iPhone X", 180.0, Generation::X),
];

const BUILTIN_STORAGE: &[(&str, f64)] = &[
    ("64 GB", 0.9),
    ("128 GB", 1.0),
    ("256 GB", 1.15),
    ("512 GB", 1.3),
    ("1 TB", 1.5),
];

const BUILTIN_FUNCTIONAL: &[(FunctionalCheck, &str, f64)] = &[
    (FunctionalCheck::FaceId, "Face ID / Touch ID working", 15.0),
    (FunctionalCheck::Speaker, "Speaker working", 5.0),
    (FunctionalCheck::FrontCamera, "Front camera working", 8.0),
    (FunctionalCheck::BackCamera, "Rear camera working", 12.0),
    (FunctionalCheck::Cellular, "Cellular network working", 20.0),
    (FunctionalCheck::DisplayFunctional, "Display working (no lines or spots)", 30.0),
    (FunctionalCheck::SimReader, "SIM reader working", 10.0),
    (FunctionalCheck::ChargingPort, "Charging port working", 8.0),
    (FunctionalCheck::Wifi, "Wi-Fi working", 10.0),
    (FunctionalCheck::Bluetooth, "Bluetooth working", 5.0),
];

const BUILTIN_COSMETIC: &[(CosmeticCheck, &str, f64)] = &[
    (CosmeticCheck::ScreenCracked, "Cracked screen", 25.0),
    (CosmeticCheck::FrontWear, "Minor wear on the front", 5.0),
    (CosmeticCheck::BackWear, "Minor wear on the back", 5.0),
    (CosmeticCheck::BackCracked, "Cracked back cover", 15.0),
];

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The catalog compiled into the binary
    pub fn builtin() -> Self {
        Self {
            models: BUILTIN_MODELS
                .iter()
                .map(|&(name, base_market_value, generation)| DeviceModel {
                    name: name.to_string(),
                    base_market_value,
                    generation,
                })
                .collect(),
            storage_options: BUILTIN_STORAGE
                .iter()
                .map(|&(label, multiplier)| StorageOption {
                    label: label.to_string(),
                    multiplier,
                })
                .collect(),
            functional_checks: BUILTIN_FUNCTIONAL
                .iter()
                .map(|&(id, label, penalty_percent)| ConditionCheck {
                    id,
                    label: label.to_string(),
                    penalty_percent,
                })
                .collect(),
            cosmetic_checks: BUILTIN_COSMETIC
                .iter()
                .map(|&(id, label, penalty_percent)| ConditionCheck {
                    id,
                    label: label.to_string(),
                    penalty_percent,
                })
                .collect(),
        }
    }

    pub fn find_model(&self, name: &str) -> Option<&DeviceModel> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn find_storage(&self, label: &str) -> Option<&StorageOption> {
        self.storage_options.iter().find(|s| s.label == label)
    }

    pub fn functional_check(&self, id: FunctionalCheck) -> Option<&ConditionCheck<FunctionalCheck>> {
        self.functional_checks.iter().find(|c| c.id == id)
    }

    pub fn cosmetic_check(&self, id: CosmeticCheck) -> Option<&ConditionCheck<CosmeticCheck>> {
        self.cosmetic_checks.iter().find(|c| c.id == id)
    }

    /// Save the catalog to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize catalog to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write catalog to {:?}", path.as_ref()))?;

        info!("Catalog saved to {:?}", path.as_ref());
        Ok(())
    }

    /// Load a catalog from a JSON file. The result is not validated.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog from {:?}", path.as_ref()))?;

        let catalog: Self =
            serde_json::from_str(&content).context("Failed to parse catalog JSON")?;

        info!(
            "Catalog loaded from {:?}: {} models, {} storage tiers",
            path.as_ref(),
            catalog.models.len(),
            catalog.storage_options.len()
        );
        Ok(catalog)
    }

    /// Validate the catalog
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.models.is_empty() {
            return Err(QuoteError::catalog("catalog has no models"));
        }
        if self.storage_options.is_empty() {
            return Err(QuoteError::catalog("catalog has no storage options"));
        }

        let mut names = BTreeSet::new();
        for model in &self.models {
            if model.name.trim().is_empty() {
                return Err(QuoteError::catalog("model name must not be empty"));
            }
            if !names.insert(model.name.as_str()) {
                return Err(QuoteError::catalog(format!("duplicate model '{}'", model.name)));
            }
            if !(model.base_market_value.is_finite() && model.base_market_value > 0.0) {
                return Err(QuoteError::catalog(format!(
                    "model '{}' must have a positive base market value",
                    model.name
                )));
            }
        }

        let mut labels = BTreeSet::new();
        for option in &self.storage_options {
            if option.label.trim().is_empty() {
                return Err(QuoteError::catalog("storage label must not be empty"));
            }
            if !labels.insert(option.label.as_str()) {
                return Err(QuoteError::catalog(format!(
                    "duplicate storage option '{}'",
                    option.label
                )));
            }
            if !(option.multiplier.is_finite() && option.multiplier > 0.0) {
                return Err(QuoteError::catalog(format!(
                    "storage option '{}' must have a positive multiplier",
                    option.label
                )));
            }
        }

        validate_checks(&self.functional_checks)?;
        validate_checks(&self.cosmetic_checks)?;

        for model in &self.models {
            if allowed_storage_options(self, &model.name).is_empty() {
                return Err(QuoteError::catalog(format!(
                    "model '{}' has no sellable storage option",
                    model.name
                )));
            }
        }

        Ok(())
    }
}

/// Every id of `K` must appear exactly once with a penalty in [0, 100].
fn validate_checks<K: CheckKind>(checks: &[ConditionCheck<K>]) -> crate::error::Result<()> {
    let mut seen = BTreeSet::new();
    for check in checks {
        if !seen.insert(check.id) {
            return Err(QuoteError::catalog(format!(
                "duplicate {} check '{}'",
                K::CATEGORY,
                check.id
            )));
        }
        if !(0.0..=100.0).contains(&check.penalty_percent) {
            return Err(QuoteError::catalog(format!(
                "{} check '{}' penalty {} is outside 0-100",
                K::CATEGORY,
                check.id,
                check.penalty_percent
            )));
        }
    }

    if let Some(missing) = K::iter().find(|id| !seen.contains(id)) {
        return Err(QuoteError::catalog(format!(
            "missing {} check '{}'",
            K::CATEGORY,
            missing
        )));
    }

    Ok(())
}
