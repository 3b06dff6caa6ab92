use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coverage_catalog::load_catalog;
use coverage_core::config::currency_minor_units_from_env_value;
use coverage_core::{
    ClaimRequest, CoverageType, EngineConfig, Gender, PayoutCalculator, ProviderType,
    SpecializationId, Subject, assess_claim, build_global_map, entries_for_provider,
    filter_catalog, suggest_treatments,
};

#[derive(Parser)]
#[command(name = "coverage")]
#[command(about = "Coverage eligibility and payout engine CLI")]
struct Cli {
    /// Directory containing specializations.yaml, price_list.yaml and policies.yaml
    #[arg(long, global = true, env = "COVERAGE_CATALOG_DIR", default_value = "catalog")]
    catalog_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog entries a patient is eligible for
    Eligible {
        /// pharmacy, lab, radiology, or doctor (lists specializations)
        #[arg(long)]
        provider_type: ProviderType,
        /// male or female
        #[arg(long)]
        gender: Gender,
        /// Age in completed years
        #[arg(long)]
        age: u32,
        /// Specialization UUID of the prescribing doctor
        #[arg(long)]
        specialization: Option<SpecializationId>,
    },
    /// Suggest treatments for a diagnosis across all specializations
    Suggest {
        /// Diagnosis label
        diagnosis: String,
    },
    /// Validate the whole catalog
    Validate,
    /// Assess a claim against a policy
    Assess {
        /// Policy number
        #[arg(long)]
        policy_no: String,
        /// Coverage type of the claimed service
        #[arg(long)]
        coverage_type: CoverageType,
        /// Claimed amount
        #[arg(long)]
        amount: Decimal,
        /// Service name to select a specific coverage rule
        #[arg(long)]
        service: Option<String>,
        /// Date of service (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Amount already paid out under the policy
        #[arg(long, default_value = "0")]
        already_paid: Decimal,
        /// The claim is an emergency
        #[arg(long)]
        emergency: bool,
        /// The patient holds a referral
        #[arg(long)]
        referral: bool,
        /// male or female
        #[arg(long)]
        gender: Gender,
        /// Age in completed years
        #[arg(long)]
        age: u32,
    },
}

#[derive(Serialize)]
struct Suggestion<'a> {
    diagnosis: &'a str,
    treatments: Vec<&'a str>,
}

/// Main entry point for the coverage CLI
///
/// Loads the catalog directory, runs one subcommand and prints its result as JSON.
///
/// # Environment Variables
/// - `COVERAGE_CATALOG_DIR`: catalog directory (default: "catalog")
/// - `COVERAGE_CURRENCY_MINOR_UNITS`: decimal places payouts are rounded to (default: 2)
/// - `RUST_LOG`: log filter, added to the default `coverage=info` directive
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("coverage=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let minor_units =
        currency_minor_units_from_env_value(std::env::var("COVERAGE_CURRENCY_MINOR_UNITS").ok())?;
    let config = EngineConfig::new(minor_units)?;

    let catalog = load_catalog(&cli.catalog_dir)
        .with_context(|| format!("failed to load catalog from {}", cli.catalog_dir.display()))?;
    tracing::info!(dir = %cli.catalog_dir.display(), "catalog loaded");

    match cli.command {
        Commands::Eligible {
            provider_type,
            gender,
            age,
            specialization,
        } => {
            let mut subject = Subject::new(gender, age);
            if let Some(id) = specialization {
                catalog.find_specialization(id)?;
                subject = subject.with_specialization(id);
            }

            let output = if provider_type == ProviderType::Doctor {
                serde_json::to_string_pretty(&filter_catalog(catalog.specializations(), &subject))?
            } else {
                let entries = entries_for_provider(catalog.price_list(), provider_type);
                serde_json::to_string_pretty(&filter_catalog(&entries, &subject))?
            };
            println!("{output}");
        }
        Commands::Suggest { diagnosis } => {
            let global_map = build_global_map(catalog.specializations());
            let suggestion = Suggestion {
                diagnosis: &diagnosis,
                treatments: suggest_treatments(&diagnosis, &global_map),
            };
            println!("{}", serde_json::to_string_pretty(&suggestion)?);
        }
        Commands::Validate => {
            let violations = catalog.validate();
            println!("{}", serde_json::to_string_pretty(&violations)?);
            if !violations.is_empty() {
                anyhow::bail!("catalog has {} violation(s)", violations.len());
            }
        }
        Commands::Assess {
            policy_no,
            coverage_type,
            amount,
            service,
            date,
            already_paid,
            emergency,
            referral,
            gender,
            age,
        } => {
            let policy = catalog
                .find_policy_by_number(&policy_no)
                .with_context(|| format!("no policy with number '{policy_no}'"))?;

            let request = ClaimRequest {
                coverage_type,
                service_name: service,
                claimed_amount: amount,
                service_date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                already_paid,
            };
            let subject = Subject::new(gender, age)
                .emergency(emergency)
                .referral(referral);

            let calculator = PayoutCalculator::new(&config);
            let assessment = assess_claim(policy, &request, &subject, &calculator)?;
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        }
    }

    Ok(())
}
