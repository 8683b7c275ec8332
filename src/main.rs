use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};

use casegraph::analysis::AnalysisReport;
use casegraph::graph::{sanitize_graph, validate_entity};
use casegraph::{AnalysisStore, Config};

#[derive(Parser, Debug)]
#[command(name = "casegraph")]
#[command(about = "Inspect and sanitize saved document-analysis responses")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List files and cases found in an analyze response
    Cases {
        /// Path to a saved analyze-response JSON file
        input: PathBuf,
    },
    /// Print the sanitized graph for a selected case as JSON
    Sanitize {
        /// Path to a saved analyze-response JSON file
        input: PathBuf,
        /// File index within the response
        #[arg(long, default_value_t = 0)]
        file: usize,
        /// Case index within the file
        #[arg(long, default_value_t = 0)]
        case: usize,
        /// Treat the input as a bare {entities, relationships} graph
        /// instead of a full response
        #[arg(long)]
        raw: bool,
    },
    /// Print validated entities of a selected case with their style class
    Entities {
        /// Path to a saved analyze-response JSON file
        input: PathBuf,
        /// File index within the response
        #[arg(long, default_value_t = 0)]
        file: usize,
        /// Case index within the file
        #[arg(long, default_value_t = 0)]
        case: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"))
        .init();

    let args = Args::parse();

    match args.command {
        Command::Cases { input } => run_cases(&input),
        Command::Sanitize {
            input,
            file,
            case,
            raw,
        } => run_sanitize(&input, file, case, raw),
        Command::Entities { input, file, case } => run_entities(&input, file, case),
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Input is not valid JSON: {}", path.display()))
}

fn run_cases(input: &Path) -> Result<()> {
    let report = AnalysisReport::from_value(&read_json(input)?)?;
    log::info!("Parsed report with {} file(s)", report.files.len());

    for (file_index, file) in report.files.iter().enumerate() {
        println!("[{}] {} ({} cases)", file_index, file.filename, file.cases.len());
        for (case_index, case) in file.cases.iter().enumerate() {
            let graph = sanitize_graph(&case.raw_graph());
            let headline = if case.headline.is_empty() {
                "(no headline)"
            } else {
                &case.headline
            };
            println!("    [{}] {}: {}", case_index, headline, graph.stats());
        }
    }
    Ok(())
}

fn run_sanitize(input: &Path, file: usize, case: usize, raw: bool) -> Result<()> {
    let value = read_json(input)?;

    let graph = if raw {
        sanitize_graph(&value)
    } else {
        let report = AnalysisReport::from_value(&value)?;
        let mut store = AnalysisStore::new();
        store.set_report(report);
        store.select_case(file, case)?;
        store.graph().clone()
    };

    log::info!("Sanitized graph: {}", graph.stats());
    println!("{}", serde_json::to_string_pretty(&graph)?);
    Ok(())
}

fn run_entities(input: &Path, file: usize, case: usize) -> Result<()> {
    let config = Config::load_or_default()?;
    let palette = config.build_palette();

    let report = AnalysisReport::from_value(&read_json(input)?)?;
    let selected = report.case(file, case)?;
    let graph = sanitize_graph(&selected.raw_graph());

    println!("{:-<72}", "");
    println!("{:<24} {:<20} {:<14} {:<10}", "Label", "Type", "Class", "Anomaly");
    println!("{:-<72}", "");
    for entity in graph.entities.iter().map(validate_entity) {
        println!(
            "{:<24} {:<20} {:<14} {:<10}",
            entity.label,
            entity.entity_type,
            palette.classify(&entity.entity_type),
            if entity.is_anomaly { "yes" } else { "" }
        );
    }
    println!("{:-<72}", "");
    println!("{}", graph.stats());
    Ok(())
}
