//! Tests for the Valuation Engine
//!
//! These tests verify:
//! - The decision cascade order (unknown → legacy → Face ID → standard)
//! - Reference quotes on a flagship priced at 1000
//! - Quotes on the built-in catalog

use phonequote::{
    Adjustment, Catalog, ConditionReport, CosmeticCheck, DeviceModel, EvaluationInput,
    FunctionalCheck, Generation, ValuationPath, evaluate, evaluate_detailed,
};
use tempfile::TempDir;

/// Built-in catalog plus flagships with a round base value
fn test_catalog() -> Catalog {
    let mut catalog = Catalog::builtin();
    catalog.models.push(DeviceModel {
        name: "iPhone 15 Reference".to_string(),
        base_market_value: 1000.0,
        generation: Generation::Fifteen,
    });
    catalog.models.push(DeviceModel {
        name: "iPhone 13 Reference".to_string(),
        base_market_value: 1000.0,
        generation: Generation::Thirteen,
    });
    catalog
}

fn flagship() -> EvaluationInput {
    EvaluationInput::new("iPhone 15 Reference", "128 GB").with_battery_health(90)
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn test_pristine_flagship_is_450() {
    let catalog = test_catalog();
    let valuation = evaluate_detailed(&catalog, &flagship());
    assert_eq!(valuation.estimated_market_value(), Some(1000.0));
    assert_eq!(valuation.price, 450);
}

#[test]
fn test_worn_battery_flagship_is_315() {
    let catalog = test_catalog();
    let input = flagship().with_battery_health(75);
    assert_eq!(evaluate(&catalog, &input), 315);
}

#[test]
fn test_rear_shell_cracked_recent_flagship_is_270() {
    let catalog = test_catalog();
    let condition = ConditionReport::pristine().with_defect(CosmeticCheck::BackCracked);
    let input = flagship().with_condition(condition);
    assert_eq!(evaluate(&catalog, &input), 270);
}

#[test]
fn test_rear_shell_cracked_older_flagship_is_percentage() {
    let catalog = test_catalog();
    let condition = ConditionReport::pristine().with_defect(CosmeticCheck::BackCracked);
    let input = EvaluationInput::new("iPhone 13 Reference", "128 GB").with_condition(condition);
    // 450 × 0.85
    assert_eq!(evaluate(&catalog, &input), 383);
}

#[test]
fn test_aged_battery_flagship_is_405() {
    let catalog = test_catalog();
    assert_eq!(evaluate(&catalog, &flagship().with_battery_health(80)), 405);
    assert_eq!(evaluate(&catalog, &flagship().with_battery_health(85)), 450);
}

#[test]
fn test_battery_below_range_uses_worn_band() {
    let catalog = test_catalog();
    assert_eq!(evaluate(&catalog, &flagship().with_battery_health(20)), 315);
}

#[test]
fn test_battery_above_range_is_passed_through() {
    let catalog = test_catalog();
    assert_eq!(evaluate(&catalog, &flagship().with_battery_health(140)), 450);
}

// =============================================================================
// Cascade order
// =============================================================================

#[test]
fn test_every_legacy_model_is_flat_50() {
    let catalog = test_catalog();
    for model in ["iPhone X", "iPhone XS", "iPhone XR", "iPhone XS Max"] {
        let condition = ConditionReport::pristine()
            .with_broken(FunctionalCheck::Cellular)
            .with_defect(CosmeticCheck::ScreenCracked);
        for storage in ["64 GB", "1 TB"] {
            let input = EvaluationInput::new(model, storage)
                .with_battery_health(51)
                .with_condition(condition.clone());
            assert_eq!(evaluate(&catalog, &input), 50, "{} {}", model, storage);
        }
    }
}

#[test]
fn test_unknown_storage_checked_before_legacy() {
    let catalog = test_catalog();
    // Unknown storage is checked first, even for a legacy model
    let input = EvaluationInput::new("iPhone X", "8 GB");
    let valuation = evaluate_detailed(&catalog, &input);
    assert_eq!(valuation.price, 0);
    assert_eq!(valuation.path, ValuationPath::UnknownConfiguration);
}

#[test]
fn test_face_id_failure_flat_prices() {
    let catalog = test_catalog();
    let condition = ConditionReport::pristine()
        .with_broken(FunctionalCheck::FaceId)
        .with_defect(CosmeticCheck::BackCracked);

    for (model, expected) in [
        ("iPhone 17 Pro Max", 100),
        ("iPhone 16e", 100),
        ("iPhone 15", 100),
        ("iPhone 14 Pro", 50),
        ("iPhone 12", 50),
        ("iPhone 11 Pro Max", 50),
    ] {
        let input = EvaluationInput::new(model, "256 GB").with_condition(condition.clone());
        assert_eq!(evaluate(&catalog, &input), expected, "{}", model);
    }
}

#[test]
fn test_face_id_not_used_as_percentage_penalty() {
    let catalog = test_catalog();
    let valuation = evaluate_detailed(&catalog, &flagship());
    assert!(valuation.adjustments.iter().all(|a| !matches!(
        a.adjustment,
        Adjustment::FunctionalPenalty {
            check: FunctionalCheck::FaceId,
            ..
        }
    )));
}

// =============================================================================
// Standard path on the built-in catalog
// =============================================================================

#[test]
fn test_everything_broken_on_recent_model() {
    let catalog = Catalog::builtin();
    let mut condition = ConditionReport::pristine();
    for check in [
        FunctionalCheck::Speaker,
        FunctionalCheck::FrontCamera,
        FunctionalCheck::BackCamera,
        FunctionalCheck::Cellular,
        FunctionalCheck::DisplayFunctional,
        FunctionalCheck::SimReader,
        FunctionalCheck::ChargingPort,
        FunctionalCheck::Wifi,
        FunctionalCheck::Bluetooth,
    ] {
        condition = condition.with_broken(check);
    }
    for check in [
        CosmeticCheck::ScreenCracked,
        CosmeticCheck::FrontWear,
        CosmeticCheck::BackWear,
        CosmeticCheck::BackCracked,
    ] {
        condition = condition.with_defect(check);
    }

    let input = EvaluationInput::new("iPhone 16", "128 GB")
        .with_battery_health(60)
        .with_condition(condition);
    let valuation = evaluate_detailed(&catalog, &input);

    // Value falls far below the 180 deduction, clamped at zero
    assert_eq!(valuation.price, 0);
    assert_eq!(valuation.path, ValuationPath::Standard);
    // market, trade-in, battery, 9 functional, 4 cosmetic
    assert_eq!(valuation.adjustments.len(), 16);
}

#[test]
fn test_cosmetic_wear_penalties() {
    let catalog = Catalog::builtin();
    let condition = ConditionReport::pristine()
        .with_defect(CosmeticCheck::FrontWear)
        .with_defect(CosmeticCheck::BackWear);
    // 1250 × 1.15 × 0.45 = 646.875, × 0.95 × 0.95 = 583.8047 → 584
    let input = EvaluationInput::new("iPhone 16 Pro", "256 GB").with_condition(condition);
    assert_eq!(evaluate(&catalog, &input), 584);
}

#[test]
fn test_price_list_spot_checks() {
    let catalog = Catalog::builtin();
    for (model, storage, expected) in [
        ("iPhone 17 Pro Max", "256 GB", 828),
        ("iPhone 16e", "128 GB", 360),
        ("iPhone 14 Pro Max", "512 GB", 556),
        ("iPhone 12", "64 GB", 162),
        ("iPhone 11 Pro", "256 GB", 233),
    ] {
        let input = EvaluationInput::new(model, storage);
        assert_eq!(evaluate(&catalog, &input), expected, "{} {}", model, storage);
    }
}

#[test]
fn test_evaluate_matches_detailed_price() {
    let catalog = Catalog::builtin();
    let condition = ConditionReport::pristine().with_broken(FunctionalCheck::Bluetooth);
    let input = EvaluationInput::new("iPhone 13 Pro", "1 TB")
        .with_battery_health(83)
        .with_condition(condition);
    assert_eq!(evaluate(&catalog, &input), evaluate_detailed(&catalog, &input).price);
}

#[test]
fn test_face_id_failure_lifts_a_wrecked_unit_to_the_floor() {
    let catalog = Catalog::builtin();
    let wrecked = ConditionReport::pristine()
        .with_broken(FunctionalCheck::DisplayFunctional)
        .with_broken(FunctionalCheck::Cellular)
        .with_defect(CosmeticCheck::ScreenCracked)
        .with_defect(CosmeticCheck::BackCracked);
    let input = EvaluationInput::new("iPhone 15", "128 GB")
        .with_battery_health(60)
        .with_condition(wrecked.clone());
    assert_eq!(evaluate(&catalog, &input), 0);

    let input = input.with_condition(wrecked.with_broken(FunctionalCheck::FaceId));
    assert_eq!(evaluate(&catalog, &input), 100);
}

// =============================================================================
// Catalog files
// =============================================================================

#[test]
fn test_check_order_in_catalog_file_does_not_change_quote() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reordered.json");

    let mut reordered = Catalog::builtin();
    reordered.cosmetic_checks.rotate_right(1);
    reordered.functional_checks.reverse();
    reordered.save_to_file(&path).unwrap();

    let loaded = Catalog::load_from_file(&path).unwrap();
    loaded.validate().unwrap();
    assert_eq!(loaded.cosmetic_checks[0].id, CosmeticCheck::BackCracked);

    let condition = ConditionReport::pristine()
        .with_broken(FunctionalCheck::Speaker)
        .with_defect(CosmeticCheck::ScreenCracked)
        .with_defect(CosmeticCheck::BackCracked);
    let input = EvaluationInput::new("iPhone 15", "128 GB").with_condition(condition);

    // 360 × 0.95 × 0.75 = 256.5, − 180 = 76.5
    assert_eq!(evaluate(&Catalog::builtin(), &input), 77);
    assert_eq!(evaluate(&loaded, &input), 77);
}

#[test]
fn test_rear_shell_deduction_applies_after_percentages() {
    let catalog = Catalog::builtin();
    let condition = ConditionReport::pristine()
        .with_defect(CosmeticCheck::ScreenCracked)
        .with_defect(CosmeticCheck::BackCracked);
    let input = EvaluationInput::new("iPhone 15", "128 GB").with_condition(condition);
    let valuation = evaluate_detailed(&catalog, &input);

    // 360 × 0.75 − 180
    assert_eq!(valuation.price, 90);
    assert!(matches!(
        valuation.adjustments.last().map(|a| &a.adjustment),
        Some(Adjustment::FlatDeduction {
            check: CosmeticCheck::BackCracked,
            ..
        })
    ));
}
