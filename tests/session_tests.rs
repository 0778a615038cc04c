//! Tests for Quote Session state management
//!
//! These tests verify:
//! - Default session configuration
//! - Storage reconciliation on model changes
//! - Caller-side validation
//! - Quotes following edits, and catalog files feeding a session

use phonequote::{
    Catalog, CosmeticCheck, CosmeticStatus, FunctionalCheck, FunctionalStatus, QuoteError,
    QuoteSession, Reconciliation, ValuationPath,
};
use tempfile::TempDir;

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_default_session_quotes_top_model() {
    let catalog = Catalog::builtin();
    let mut session = QuoteSession::new(&catalog).unwrap();
    // 1600 × 1.15 × 0.45
    assert_eq!(session.quote(), 828);
    assert_eq!(session.valuation().path, ValuationPath::Standard);
}

#[test]
fn test_default_storage_falls_back_when_catalog_lacks_it() {
    let mut catalog = Catalog::builtin();
    catalog.storage_options.retain(|s| s.label != "256 GB");
    let session = QuoteSession::new(&catalog).unwrap();
    assert_eq!(session.input().storage, "512 GB");
}

// =============================================================================
// Reconciliation
// =============================================================================

#[test]
fn test_walk_down_and_up_the_range() {
    let catalog = Catalog::builtin();
    let mut session = QuoteSession::new(&catalog).unwrap();

    session.set_model("iPhone 11").unwrap();
    session.set_storage("64 GB").unwrap();

    // 64 GB is gone on a tier B model
    let outcome = session.set_model("iPhone 13").unwrap();
    assert_eq!(
        outcome,
        Reconciliation::Reassigned {
            from: "64 GB".to_string(),
            to: "128 GB".to_string()
        }
    );

    // 128 GB is gone on a tier A model
    let outcome = session.set_model("iPhone 16 Pro Max").unwrap();
    assert_eq!(
        outcome,
        Reconciliation::Reassigned {
            from: "128 GB".to_string(),
            to: "256 GB".to_string()
        }
    );

    // Going back down keeps 256 GB
    assert_eq!(session.set_model("iPhone 11").unwrap(), Reconciliation::Unchanged);
    assert_eq!(session.input().storage, "256 GB");
}

#[test]
fn test_model_change_keeps_condition() {
    let catalog = Catalog::builtin();
    let mut session = QuoteSession::new(&catalog).unwrap();
    session.set_functional(FunctionalCheck::Speaker, FunctionalStatus::Broken);
    session.set_cosmetic(CosmeticCheck::BackWear, CosmeticStatus::Defective);
    session.set_battery_health(82).unwrap();

    session.set_model("iPhone 12 Pro").unwrap();

    let input = session.input();
    assert_eq!(input.battery_health, 82);
    assert_eq!(input.condition.functional(FunctionalCheck::Speaker), FunctionalStatus::Broken);
    assert_eq!(input.condition.cosmetic(CosmeticCheck::BackWear), CosmeticStatus::Defective);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_rejected_storage_keeps_previous_selection() {
    let catalog = Catalog::builtin();
    let mut session = QuoteSession::new(&catalog).unwrap();
    session.set_model("iPhone 17 Pro").unwrap();
    let err = session.set_storage("128 GB").unwrap_err();
    assert_eq!(err.to_string(), "Storage option 128 GB is not sold for iPhone 17 Pro");
    assert_eq!(session.input().storage, "256 GB");
}

#[test]
fn test_battery_outside_range_is_rejected() {
    let catalog = Catalog::builtin();
    let mut session = QuoteSession::new(&catalog).unwrap();
    let err = session.set_battery_health(30).unwrap_err();
    assert!(matches!(err, QuoteError::Validation(_)));
    assert_eq!(err.to_string(), "Validation error: battery health 30 is outside 50-100");
}

// =============================================================================
// Quotes
// =============================================================================

#[test]
fn test_quote_follows_every_edit() {
    let catalog = Catalog::builtin();
    let mut session = QuoteSession::new(&catalog).unwrap();
    session.set_model("iPhone 14").unwrap();
    session.set_storage("128 GB").unwrap();
    // 650 × 0.45
    assert_eq!(session.quote(), 293);

    session.toggle_cosmetic(CosmeticCheck::BackCracked);
    // 292.5 − 180
    assert_eq!(session.quote(), 113);

    session.toggle_cosmetic(CosmeticCheck::BackCracked);
    session.toggle_functional(FunctionalCheck::FaceId);
    assert_eq!(session.quote(), 50);

    session.set_model("iPhone 15").unwrap();
    assert_eq!(session.quote(), 100);

    session.reset_condition();
    assert_eq!(session.quote(), 360);
}

#[test]
fn test_legacy_model_through_session() {
    let catalog = Catalog::builtin();
    let mut session = QuoteSession::new(&catalog).unwrap();
    session.set_model("iPhone XS").unwrap();
    session.set_battery_health(50).unwrap();
    session.set_functional(FunctionalCheck::DisplayFunctional, FunctionalStatus::Broken);
    assert!(!session.condition_applies());
    assert_eq!(session.quote(), 50);
}

#[test]
fn test_session_over_catalog_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.json");

    let mut catalog = Catalog::builtin();
    for model in &mut catalog.models {
        if model.name == "iPhone 15" {
            model.base_market_value = 1000.0;
        }
    }
    catalog.save_to_file(&path).unwrap();

    let loaded = Catalog::load_from_file(&path).unwrap();
    loaded.validate().unwrap();

    let mut session = QuoteSession::new(&loaded).unwrap();
    session.set_model("iPhone 15").unwrap();
    session.set_storage("128 GB").unwrap();
    session.set_battery_health(90).unwrap();
    assert_eq!(session.quote(), 450);
}
