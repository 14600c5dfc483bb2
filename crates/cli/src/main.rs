use carechain_core::{
    dataset_path_from_env_value, CoreConfig, DatasetStatus, InteractionIndex, InteractionResult,
    InteractionService, InteractionTable, MedicationEntry,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "carechain")]
#[command(about = "CareChain drug-interaction checker CLI")]
struct Cli {
    /// Interaction CSV (defaults to $DRUG_INTERACTIONS_FILE, then public/drug_interactions.csv)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    /// Add a flagged demonstration result when no real interaction is found
    #[arg(long, global = true)]
    demo_fallback: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract medications from prescription text and check their interactions
    Analyze {
        /// Free-form prescription text
        text: String,
    },
    /// Check interactions among named medications
    Check {
        /// Medication names
        #[arg(required = true)]
        medications: Vec<String>,
    },
    /// List the known interaction partners of one drug
    Lookup {
        /// Drug name
        drug: String,
    },
    /// Search the medication catalogue
    Search {
        /// Partial medication name
        query: String,
    },
    /// Show which interaction dataset is loaded
    Status,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carechain=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'carechain --help' for commands");
        return Ok(());
    };

    let dataset = cli.dataset.unwrap_or_else(|| {
        dataset_path_from_env_value(std::env::var("DRUG_INTERACTIONS_FILE").ok())
    });
    let service = build_service(dataset, cli.demo_fallback)?;

    match command {
        Commands::Analyze { text } => {
            let analysis = service.analyze_prescription(&text);
            println!("{}", analysis.analysis);
        }
        Commands::Check { medications } => {
            let review = service.review_medications(&medications, &[] as &[&str]);
            print!("{}", render_review(&review.medications.to_strings(), &review.interactions));
        }
        Commands::Lookup { drug } => {
            let partners = service.lookup(&drug);
            if partners.is_empty() {
                println!("No interactions known for {}.", drug.trim());
            }
            for partner in partners {
                println!("{}: {}", partner.drug, partner.description);
            }
        }
        Commands::Search { query } => {
            print!("{}", render_search(&service.search_medications(&query)));
        }
        Commands::Status => {
            print!("{}", render_status(&service.dataset_status()));
        }
    }

    Ok(())
}

fn build_service(
    dataset: PathBuf,
    demo_fallback: bool,
) -> Result<InteractionService, Box<dyn std::error::Error>> {
    let cfg = CoreConfig::new(dataset, demo_fallback)?;
    let table = InteractionTable::new(InteractionIndex::load(cfg.dataset_path()));
    Ok(InteractionService::new(Arc::new(table), Arc::new(cfg)))
}

fn render_review(medications: &[String], interactions: &[InteractionResult]) -> String {
    let mut out = format!("Medications: {}\n", medications.join(", "));
    if interactions.is_empty() {
        out.push_str("No interactions found.\n");
    }
    for result in interactions {
        out.push_str(&format!(
            "[{}] {} + {}\n  {}\n",
            result.severity, result.drugs[0], result.drugs[1], result.explanation
        ));
    }
    out
}

fn render_search(entries: &[MedicationEntry]) -> String {
    if entries.is_empty() {
        return "No medications found.\n".to_string();
    }
    entries
        .iter()
        .map(|e| {
            let marker = if e.generated { " (generated)" } else { "" };
            format!(
                "{:>4}  {} [{}]{}: {}\n",
                e.id,
                e.name,
                e.category,
                marker,
                e.common_dosages.join(", ")
            )
        })
        .collect()
}

fn render_status(status: &DatasetStatus) -> String {
    format!(
        "Source: {}\nRecords: {}\nDrugs: {}\nLoaded: {}\n",
        status.source,
        status.records,
        status.drugs,
        status.loaded_at.to_rfc3339()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_service(demo_fallback: bool) -> InteractionService {
        build_service(PathBuf::from("does/not/exist.csv"), demo_fallback).expect("service")
    }

    #[test]
    fn test_global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "carechain",
            "check",
            "Aspirin",
            "Warfarin",
            "--demo-fallback",
            "--dataset",
            "ddi.csv",
        ])
        .expect("valid arguments");

        assert!(cli.demo_fallback);
        assert_eq!(cli.dataset, Some(PathBuf::from("ddi.csv")));
        assert!(matches!(
            cli.command,
            Some(Commands::Check { medications }) if medications == vec!["Aspirin", "Warfarin"]
        ));
    }

    #[test]
    fn test_check_requires_a_medication() {
        assert!(Cli::try_parse_from(["carechain", "check"]).is_err());
    }

    #[test]
    fn test_render_review_for_known_pair() {
        let service = sample_service(false);
        let review = service.review_medications(&["aspirin", "warfarin"], &[] as &[&str]);

        let out = render_review(&review.medications.to_strings(), &review.interactions);
        assert!(out.starts_with("Medications: Aspirin, Warfarin\n[Low] Aspirin + Warfarin\n"));
    }

    #[test]
    fn test_render_review_without_findings() {
        let service = sample_service(false);
        let review = service.review_medications(&["DrugX", "DrugY"], &[] as &[&str]);

        let out = render_review(&review.medications.to_strings(), &review.interactions);
        assert_eq!(out, "Medications: Drugx, Drugy\nNo interactions found.\n");
    }

    #[test]
    fn test_render_search_marks_generated_entries() {
        let service = sample_service(false);
        let out = render_search(&service.search_medications("metformin"));

        let first = out.lines().next().expect("first line");
        assert_eq!(first, "   2  Metformin [Antidiabetic]: 500mg, 850mg, 1000mg");
        assert!(out.contains("Metformin XR [Generated Result] (generated)"));
        assert_eq!(render_search(&[]), "No medications found.\n");
    }

    #[test]
    fn test_render_status_for_sample() {
        let service = sample_service(false);
        let out = render_status(&service.dataset_status());
        assert!(out.starts_with("Source: built-in sample\nRecords: 3\nDrugs: 5\n"));
    }
}
