//! Storage Availability Resolver
//!
//! Decides which storage tiers are sellable for a model. Some high-end
//! models never shipped in 64 GB or 128 GB.
//!
//! # Restriction Tiers
//!
//! | Tier         | Excludes        | Members |
//! |--------------|-----------------|---------|
//! | `No64No128`  | 64 GB, 128 GB   | `policy::NO_64_NO_128_MODELS` |
//! | `No64`       | 64 GB           | `policy::NO_64_MODELS` |
//! | `Unrestricted` | nothing       | every other name, unknown names included |
//!
//! # Design
//!
//! - **Exact membership**: model names are matched as whole strings
//! - **Order preserving**: output follows the catalog's canonical tier order
//! - **Stateless**: `reconcile_storage` is the only function that writes,
//!   and it writes to the caller's input

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, StorageOption};
use crate::input::EvaluationInput;
use crate::policy::{NO_64_MODELS, NO_64_NO_128_MODELS, STORAGE_128GB, STORAGE_64GB};

/// Which storage tiers a model never shipped with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageRestriction {
    Unrestricted,
    No64,
    No64No128,
}

impl StorageRestriction {
    /// Whether a tier label survives this restriction
    pub fn allows(self, label: &str) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::No64 => label != STORAGE_64GB,
            Self::No64No128 => label != STORAGE_64GB && label != STORAGE_128GB,
        }
    }
}

/// Classify a model name into its restriction tier.
pub fn storage_restriction(model_name: &str) -> StorageRestriction {
    if NO_64_NO_128_MODELS.contains(&model_name) {
        StorageRestriction::No64No128
    } else if NO_64_MODELS.contains(&model_name) {
        StorageRestriction::No64
    } else {
        StorageRestriction::Unrestricted
    }
}

/// Storage tiers sellable for `model_name`, in catalog order.
///
/// An unknown model gets the unrestricted list rather than an error.
pub fn allowed_storage_options<'a>(catalog: &'a Catalog, model_name: &str) -> Vec<&'a StorageOption> {
    let restriction = storage_restriction(model_name);
    catalog
        .storage_options
        .iter()
        .filter(|option| restriction.allows(&option.label))
        .collect()
}

pub fn is_storage_allowed(catalog: &Catalog, model_name: &str, storage_label: &str) -> bool {
    catalog.find_storage(storage_label).is_some()
        && storage_restriction(model_name).allows(storage_label)
}

/// Outcome of `reconcile_storage`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reconciliation {
    /// The current selection is still sellable
    Unchanged,
    /// The selection was moved to the first sellable tier
    Reassigned { from: String, to: String },
    /// Nothing is sellable for this model; the input was left as is
    NoneAvailable,
}

/// Re-establish the storage invariant after a model change.
///
/// If the selected tier is not in the resolved list, the selection moves to
/// the first entry of that list. Must run before the next valuation call
/// whenever `input.model` changes.
pub fn reconcile_storage(catalog: &Catalog, input: &mut EvaluationInput) -> Reconciliation {
    let allowed = allowed_storage_options(catalog, &input.model);

    if allowed.iter().any(|option| option.label == input.storage) {
        return Reconciliation::Unchanged;
    }

    let Some(first) = allowed.first() else {
        debug!("No storage option is sellable for {}", input.model);
        return Reconciliation::NoneAvailable;
    };

    let from = std::mem::replace(&mut input.storage, first.label.clone());
    debug!(
        "Storage {} is not sold for {}, reassigned to {}",
        from, input.model, input.storage
    );
    Reconciliation::Reassigned {
        from,
        to: input.storage.clone(),
    }
}
