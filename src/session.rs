//! Quote session
//!
//! Caller-side owner of the mutable `EvaluationInput`. The engine and the
//! resolver are stateless; the session is where their cross-component
//! invariant is kept.
//!
//! # Invariants
//!
//! - `input.model` names a catalog model
//! - `input.storage` is in `allowed_storage_options(catalog, input.model)`
//! - `input.battery_health` is within `MIN_BATTERY_HEALTH..=MAX_BATTERY_HEALTH`
//!
//! Every setter either keeps all three or returns an error and leaves the
//! input unchanged. `set_model` runs the storage reconciliation before it
//! returns, so the next `quote` always sees a legal configuration.

use tracing::debug;

use crate::catalog::{Catalog, StorageOption};
use crate::engine::valuation::{Valuation, evaluate_detailed};
use crate::error::{QuoteError, Result};
use crate::input::{ConditionReport, EvaluationInput};
use crate::logic::resolver::{
    Reconciliation, allowed_storage_options, is_storage_allowed, reconcile_storage,
};
use crate::policy::{self, MAX_BATTERY_HEALTH, MIN_BATTERY_HEALTH};
use crate::types::{CosmeticCheck, CosmeticStatus, FunctionalCheck, FunctionalStatus};

/// Storage tier preselected for a fresh session, before reconciliation
pub const DEFAULT_STORAGE: &str = "256 GB";

/// A configuration being edited against one catalog, with its last quote
#[derive(Debug, Clone)]
pub struct QuoteSession<'a> {
    catalog: &'a Catalog,
    input: EvaluationInput,
    /// Last quote, keyed by the full input it was computed from
    cache: Option<(EvaluationInput, Valuation)>,
}

impl<'a> QuoteSession<'a> {
    /// Start on the first catalog model with `DEFAULT_STORAGE`, full battery
    /// and a pristine condition report.
    pub fn new(catalog: &'a Catalog) -> Result<Self> {
        let model = catalog
            .models
            .first()
            .ok_or_else(|| QuoteError::catalog("catalog has no models"))?;

        let mut input = EvaluationInput::new(model.name.clone(), DEFAULT_STORAGE);
        if reconcile_storage(catalog, &mut input) == Reconciliation::NoneAvailable {
            return Err(QuoteError::catalog(format!(
                "model '{}' has no sellable storage option",
                model.name
            )));
        }

        Ok(Self {
            catalog,
            input,
            cache: None,
        })
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn input(&self) -> &EvaluationInput {
        &self.input
    }

    /// Storage tiers the current model can be quoted with
    pub fn allowed_storage(&self) -> Vec<&'a StorageOption> {
        allowed_storage_options(self.catalog, &self.input.model)
    }

    /// False for legacy flat-price models, where battery and checklist have
    /// no effect on the quote.
    pub fn condition_applies(&self) -> bool {
        !policy::is_legacy_flat_price(&self.input.model)
    }

    /// Switch model and reconcile the storage selection.
    pub fn set_model(&mut self, name: &str) -> Result<Reconciliation> {
        if self.catalog.find_model(name).is_none() {
            return Err(QuoteError::UnknownModel(name.to_string()));
        }

        let mut next = self.input.clone();
        next.model = name.to_string();
        let outcome = reconcile_storage(self.catalog, &mut next);
        if outcome == Reconciliation::NoneAvailable {
            return Err(QuoteError::catalog(format!(
                "model '{}' has no sellable storage option",
                name
            )));
        }

        debug!("Model set to {} ({:?})", name, outcome);
        self.input = next;
        Ok(outcome)
    }

    /// Switch model and storage together. No reconciliation runs, so the
    /// pair must already be sellable.
    pub fn select(&mut self, model: &str, storage: &str) -> Result<()> {
        if self.catalog.find_model(model).is_none() {
            return Err(QuoteError::UnknownModel(model.to_string()));
        }
        if self.catalog.find_storage(storage).is_none() {
            return Err(QuoteError::UnknownStorage(storage.to_string()));
        }
        if !is_storage_allowed(self.catalog, model, storage) {
            return Err(QuoteError::storage_not_allowed(model, storage));
        }

        debug!("Selected {} / {}", model, storage);
        self.input.model = model.to_string();
        self.input.storage = storage.to_string();
        Ok(())
    }

    pub fn set_storage(&mut self, label: &str) -> Result<()> {
        if self.catalog.find_storage(label).is_none() {
            return Err(QuoteError::UnknownStorage(label.to_string()));
        }
        if !is_storage_allowed(self.catalog, &self.input.model, label) {
            return Err(QuoteError::storage_not_allowed(&self.input.model, label));
        }
        self.input.storage = label.to_string();
        Ok(())
    }

    pub fn set_battery_health(&mut self, battery_health: u8) -> Result<()> {
        if !(MIN_BATTERY_HEALTH..=MAX_BATTERY_HEALTH).contains(&battery_health) {
            return Err(QuoteError::validation(format!(
                "battery health {} is outside {}-{}",
                battery_health, MIN_BATTERY_HEALTH, MAX_BATTERY_HEALTH
            )));
        }
        self.input.battery_health = battery_health;
        Ok(())
    }

    pub fn set_functional(&mut self, check: FunctionalCheck, status: FunctionalStatus) {
        self.input.condition.set_functional(check, status);
    }

    pub fn set_cosmetic(&mut self, check: CosmeticCheck, status: CosmeticStatus) {
        self.input.condition.set_cosmetic(check, status);
    }

    /// Flip a functional check, returning the new status
    pub fn toggle_functional(&mut self, check: FunctionalCheck) -> FunctionalStatus {
        let next = match self.input.condition.functional(check) {
            FunctionalStatus::Working => FunctionalStatus::Broken,
            FunctionalStatus::Broken => FunctionalStatus::Working,
        };
        self.set_functional(check, next);
        next
    }

    /// Flip a cosmetic check, returning the new status
    pub fn toggle_cosmetic(&mut self, check: CosmeticCheck) -> CosmeticStatus {
        let next = match self.input.condition.cosmetic(check) {
            CosmeticStatus::Clean => CosmeticStatus::Defective,
            CosmeticStatus::Defective => CosmeticStatus::Clean,
        };
        self.set_cosmetic(check, next);
        next
    }

    pub fn reset_condition(&mut self) {
        self.input.condition = ConditionReport::pristine();
    }

    /// Quote for the current input. Recomputed only when the input changed
    /// since the last call.
    pub fn valuation(&mut self) -> &Valuation {
        let fresh = matches!(&self.cache, Some((key, _)) if *key == self.input);
        if !fresh {
            self.cache = None;
        }

        let (_, valuation) = self
            .cache
            .get_or_insert_with(|| (self.input.clone(), evaluate_detailed(self.catalog, &self.input)));
        valuation
    }

    pub fn quote(&mut self) -> u32 {
        self.valuation().price
    }
}
