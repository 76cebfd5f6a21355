use clap::Parser;
use env_logger::Env;
use orbitrisk::cli::Args;
use orbitrisk::exporter::ReportExporter;
use orbitrisk::models::AssessmentInput;
use orbitrisk::reporter::ConsoleReporter;
use orbitrisk::{catalog, RiskEngine, RiskError, RiskResult};

fn display_banner() {
    println!();
    println!("    \x1b[38;5;39m█▀█ █▀▄ █▄▄ █ ▀█▀ █▀▄ █ █▀ █▄▀\x1b[0m");
    println!("    \x1b[38;5;33m█▄█ █▀▄ █▄█ █  █  █▀▄ █ ▄█ █ █\x1b[0m");
    println!();
    println!("    \x1b[3;38;5;147mThreat-asset risk scoring for space missions\x1b[0m");
    println!();
}

fn main() -> RiskResult<()> {
    display_banner();

    let args = Args::parse();

    // Initialize logging based on verbosity and quiet flags
    let log_level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    log::info!("Orbitrisk starting with args: {:?}", args);

    let assets = catalog::load_assets(&args.catalog_dir.join("Asset.csv"));
    let threats = catalog::load_threats(&args.catalog_dir.join("Threat.csv"));
    let controls = catalog::load_controls(&args.catalog_dir.join("Control.csv"));
    let mut engine = RiskEngine::new(assets, threats, controls);

    if let Some(assessment_path) = &args.assessment {
        let content = std::fs::read_to_string(assessment_path)
            .map_err(|e| RiskError::io(e, Some(assessment_path.clone())))?;
        let input: AssessmentInput = serde_json::from_str(&content)?;
        engine.load_assessment(&input);
    }

    for id in &args.apply {
        match engine.apply_control(id) {
            Ok(touched) => log::info!("Control '{}' applied ({} scores touched)", id, touched),
            Err(e) => log::error!("Could not apply control '{}': {}", id, e),
        }
    }

    let report = engine.build_report();
    ConsoleReporter::print_summary(&report);

    if let Some(path) = &args.output {
        ReportExporter::export_json(&report, path)?;
    }
    if let Some(path) = &args.csv {
        ReportExporter::export_csv(&report, path)?;
    }

    Ok(())
}
