//! phonequote - Main entry point
//!
//! Thin caller around the library: loads the catalog, drives a
//! `QuoteSession` from command-line arguments and renders the result.

mod cli;

use anyhow::Result;
use phonequote::policy;
use phonequote::{
    Catalog, CosmeticCheck, CosmeticStatus, EvaluationInput, FunctionalCheck, FunctionalStatus,
    QuoteError, QuoteSession, Reconciliation, Valuation, allowed_storage_options,
    storage_restriction,
};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{CatalogCommands, Cli, Commands};

/// Initialize the logger with appropriate settings
fn init_logger(verbose: bool) {
    let default_filter = if verbose { "phonequote=debug" } else { "warn" };
    // RUST_LOG overrides the flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application entry point
fn main() {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    debug!("CLI arguments parsed");

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match &cli.command {
        Commands::Quote {
            model,
            storage,
            battery,
            broken,
            defect,
            explain,
        } => {
            let request = QuoteRequest {
                model,
                storage: storage.as_deref(),
                battery: *battery,
                broken,
                defect,
            };
            run_quote(&catalog, &request, *explain, cli.json)
        }
        Commands::Storage { model } => run_storage(&catalog, model, cli.json),
        Commands::Models => run_models(&catalog, cli.json),
        Commands::Checks => run_checks(&catalog, cli.json),
        Commands::Catalog { action } => match action {
            CatalogCommands::Export { path } => {
                catalog.save_to_file(path)?;
                println!("✓ Catalog written to {}", path.display());
                Ok(())
            }
            CatalogCommands::Validate { path } => {
                info!("Validating catalog file: {:?}", path);
                Catalog::load_from_file(path)?.validate()?;
                println!("✓ Catalog file is valid: {}", path.display());
                Ok(())
            }
        },
    }
}

/// Built-in catalog, or a validated file when one is given
fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };
    let catalog = Catalog::load_from_file(path)?;
    catalog.validate()?;
    Ok(catalog)
}

// ============================================================================
// quote
// ============================================================================

struct QuoteRequest<'a> {
    model: &'a str,
    storage: Option<&'a str>,
    battery: u8,
    broken: &'a [String],
    defect: &'a [String],
}

#[derive(Serialize)]
struct QuoteReport<'a> {
    input: &'a EvaluationInput,
    reconciliation: &'a Reconciliation,
    valuation: &'a Valuation,
}

fn run_quote(catalog: &Catalog, request: &QuoteRequest<'_>, explain: bool, json: bool) -> Result<()> {
    let (mut session, reconciliation) = prepare_quote(catalog, request)?;

    if !session.condition_applies() && !session.input().condition.is_pristine() {
        warn!("{} is quoted at a flat price, condition ignored", request.model);
    }

    let input = session.input().clone();
    let valuation = session.valuation();

    if json {
        let report = QuoteReport {
            input: &input,
            reconciliation: &reconciliation,
            valuation,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(note) = reconciliation_note(&reconciliation, &input.model) {
        println!("{}", note);
    }
    println!(
        "{} · {} · battery {}%",
        input.model, input.storage, input.battery_health
    );
    println!("Quote: €{}", valuation.price);

    if explain {
        println!("Path: {}", valuation.path);
        for step in &valuation.adjustments {
            println!("  {:<40} -> {:.2}", step.adjustment.to_string(), step.value_after);
        }
    }

    Ok(())
}

/// Session configured from the request.
///
/// An explicit storage tier is selected together with the model and must be
/// sold for it. Without one, the session default is reconciled against the
/// model and the outcome is returned.
fn prepare_quote<'a>(
    catalog: &'a Catalog,
    request: &QuoteRequest<'_>,
) -> phonequote::error::Result<(QuoteSession<'a>, Reconciliation)> {
    let mut session = QuoteSession::new(catalog)?;
    let reconciliation = match request.storage {
        Some(storage) => {
            session.select(request.model, storage)?;
            Reconciliation::Unchanged
        }
        None => session.set_model(request.model)?,
    };
    session.set_battery_health(request.battery)?;

    for name in request.broken {
        session.set_functional(parse_functional(name)?, FunctionalStatus::Broken);
    }
    for name in request.defect {
        session.set_cosmetic(parse_cosmetic(name)?, CosmeticStatus::Defective);
    }

    Ok((session, reconciliation))
}

fn reconciliation_note(reconciliation: &Reconciliation, model: &str) -> Option<String> {
    match reconciliation {
        Reconciliation::Reassigned { from, to } => Some(format!(
            "Note: {} is not sold for {}, quoting {}",
            from, model, to
        )),
        Reconciliation::Unchanged | Reconciliation::NoneAvailable => None,
    }
}

fn parse_functional(name: &str) -> phonequote::error::Result<FunctionalCheck> {
    name.parse::<FunctionalCheck>().map_err(|_| {
        if name.parse::<CosmeticCheck>().is_ok() {
            QuoteError::validation(format!("{} is a cosmetic check, use --defect", name))
        } else {
            QuoteError::UnknownCheck(name.to_string())
        }
    })
}

fn parse_cosmetic(name: &str) -> phonequote::error::Result<CosmeticCheck> {
    name.parse::<CosmeticCheck>().map_err(|_| {
        if name.parse::<FunctionalCheck>().is_ok() {
            QuoteError::validation(format!("{} is a functional check, use --broken", name))
        } else {
            QuoteError::UnknownCheck(name.to_string())
        }
    })
}

// ============================================================================
// listings
// ============================================================================

fn run_storage(catalog: &Catalog, model: &str, json: bool) -> Result<()> {
    if catalog.find_model(model).is_none() {
        warn!("{} is not in the catalog, listing every tier", model);
    }
    let allowed = allowed_storage_options(catalog, model);

    if json {
        println!("{}", serde_json::to_string_pretty(&allowed)?);
        return Ok(());
    }

    for option in allowed {
        println!("{:<8} x{}", option.label, option.multiplier);
    }
    Ok(())
}

fn run_models(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog.models)?);
        return Ok(());
    }

    for model in &catalog.models {
        let note = if policy::is_legacy_flat_price(&model.name) {
            format!("flat €{}", policy::LEGACY_FLAT_PRICE)
        } else {
            format!("{:?}", storage_restriction(&model.name))
        };
        println!(
            "{:<20} gen {:<3} €{:<6} {}",
            model.name,
            model.generation.to_string(),
            model.base_market_value,
            note
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct CheckListing<'a> {
    functional: &'a [phonequote::ConditionCheck<FunctionalCheck>],
    cosmetic: &'a [phonequote::ConditionCheck<CosmeticCheck>],
}

fn run_checks(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        let listing = CheckListing {
            functional: &catalog.functional_checks,
            cosmetic: &catalog.cosmetic_checks,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Functional (--broken):");
    for check in &catalog.functional_checks {
        println!("  {:<18} -{:>3}%  {}", check.id.to_string(), check.penalty_percent, check.label);
    }
    println!("Cosmetic (--defect):");
    for check in &catalog.cosmetic_checks {
        println!("  {:<18} -{:>3}%  {}", check.id.to_string(), check.penalty_percent, check.label);
    }
    Ok(())
}
