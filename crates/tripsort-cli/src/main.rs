use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use tripsort_core::catalog::RuleSet;
use tripsort_core::{
    Categorizer, Category, Classification, Config, ProcessingStats, Record, Result, Stage,
    TripsortError,
};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config_dir = resolve_config_dir(cli.config_dir);
    tracing::debug!(config_dir = %config_dir.display(), "using config directory");

    let result = match cli.command {
        Some(Commands::Classify {
            input,
            output,
            breakdown,
        }) => handle_classify(&config_dir, &input, output.as_deref(), breakdown, cli.quiet),
        Some(Commands::Explain {
            venue,
            destination,
            json,
        }) => handle_explain(&config_dir, &venue, &destination, json),
        Some(Commands::Rules) => handle_rules(&config_dir),
        Some(Commands::Config { action }) => handle_config(action, &config_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "tripsort", &mut io::stdout());
}

fn resolve_config_dir(cli_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = cli_dir {
        return dir;
    }

    if let Ok(dir) = std::env::var("TRIPSORT_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    dirs::home_dir()
        .map(|h| h.join(".tripsort"))
        .unwrap_or_else(|| PathBuf::from(".tripsort"))
}

fn read_records(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path)?;
    let mut records: Vec<Record> =
        serde_json::from_str(&content).map_err(|e| TripsortError::InvalidInput {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    for record in &mut records {
        record.fill_period();
    }
    Ok(records)
}

fn write_records(records: &[Record], output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    match output {
        Some(path) => fs::write(path, json + "\n")?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}

fn handle_classify(
    config_dir: &Path,
    input: &Path,
    output: Option<&Path>,
    breakdown: bool,
    quiet: bool,
) -> Result<()> {
    let categorizer = Categorizer::from_config_dir(config_dir)?;
    let mut records = read_records(input)?;

    let stats = categorizer.categorize_all(&mut records);
    write_records(&records, output)?;

    if quiet {
        return Ok(());
    }

    eprintln!();
    eprintln!("{}", "Categorization Summary:".cyan().bold());
    print_summary(&stats);
    if breakdown {
        print_breakdown(&stats);
    }
    if let Some(path) = output {
        eprintln!();
        eprintln!("{} {}", "Written:".green(), path.display());
    }
    Ok(())
}

fn print_summary(stats: &ProcessingStats) {
    let accuracy = format!("{:.1}%", stats.accuracy_percentage());
    let accuracy = if stats.unassigned == 0 {
        accuracy.green()
    } else {
        accuracy.yellow()
    };
    eprintln!("  Records:    {}", stats.total);
    eprintln!("  Assigned:   {}", stats.assigned.to_string().green());
    eprintln!("  Unassigned: {}", stats.unassigned.to_string().yellow());
    eprintln!("  Accuracy:   {}", accuracy);

    if !stats.by_year.is_empty() {
        eprintln!();
        eprintln!("  {:<6} {:>6} {:>9} {:>11}", "Year", "Main", "Training", "Unassigned");
        for (year, summary) in &stats.by_year {
            eprintln!(
                "  {:<6} {:>6} {:>9} {:>11}",
                year, summary.main, summary.training, summary.unassigned
            );
        }
    }
}

fn print_breakdown(stats: &ProcessingStats) {
    eprintln!();
    eprintln!("{}", "By Category:".cyan().bold());
    let categories = Category::MAIN.into_iter().chain([
        Category::Training,
        Category::Equipment,
        Category::Unassigned,
    ]);
    for category in categories {
        let count = stats.count(category);
        if count == 0 {
            continue;
        }
        eprintln!("  {:<24} {}", category.label(), count);
    }
}

fn handle_explain(config_dir: &Path, venue: &str, destination: &str, json: bool) -> Result<()> {
    let categorizer = Categorizer::from_config_dir(config_dir)?;
    let mut record = Record::new(venue, destination);
    let result = categorizer.explain(&mut record);

    if json {
        let value = serde_json::json!({
            "venue": record.venue,
            "destination": record.destination,
            "venue_normalized": record.venue_normalized,
            "destination_normalized": record.destination_normalized,
            "category": result.category,
            "stage": result.stage,
            "eligible": result.eligible,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_explanation(&record, &result);
    Ok(())
}

fn print_explanation(record: &Record, result: &Classification) {
    println!();
    println!(
        "{} {:?} -> {:?}",
        "Venue:      ".bold(),
        record.venue,
        record.venue_normalized
    );
    println!(
        "{} {:?} -> {:?}",
        "Destination:".bold(),
        record.destination,
        record.destination_normalized
    );
    println!();

    let category = if result.category.is_assigned() {
        result.category.label().green().bold()
    } else {
        result.category.label().yellow().bold()
    };
    println!("{} {}", "Category:".cyan(), category);
    println!("{} {}", "Decided by:".cyan(), describe_stage(result.stage));

    if result.eligible.is_empty() {
        println!("{} none", "Eligible:".cyan());
    } else {
        let names: Vec<String> = result.eligible.iter().map(|k| k.to_string()).collect();
        println!("{} {}", "Eligible:".cyan(), names.join(", "));
        if result.is_ambiguous() {
            println!(
                "  {} several strategies matched, lowest priority won",
                "note:".dimmed()
            );
        }
    }
    println!();
}

fn describe_stage(stage: Stage) -> String {
    match stage {
        Stage::PreChain => "unknown-venue override".to_string(),
        Stage::Strategy(kind) => format!("{} strategy (priority {})", kind, kind.priority()),
        Stage::Fallback(step) => {
            let step = serde_json::to_value(step)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            format!("fallback ({})", step.replace('_', " "))
        }
    }
}

fn handle_rules(config_dir: &Path) -> Result<()> {
    let config = Config::load(config_dir)?;
    let paths = config.catalog_paths(config_dir);
    let rules = RuleSet::load(&paths)?;

    println!();
    println!("{}", "Rule Files:".cyan().bold());
    for path in [
        &paths.venue_aliases,
        &paths.destination_aliases,
        &paths.patterns,
        &paths.category_sets,
    ] {
        let marker = if path.exists() {
            "[OK]".green()
        } else {
            "[MISSING]".yellow()
        };
        println!("  {} {}", marker, path.display());
    }

    print_rule_counts(&rules);
    Ok(())
}

fn print_rule_counts(rules: &RuleSet) {
    let (flight, kitesafari, transfer) = rules.patterns.counts();
    let sets = &rules.category_sets;

    println!();
    println!("{}", "Aliases:".cyan().bold());
    println!(
        "  venue:       {} rules, {} canonical names",
        rules.venue_aliases.len(),
        rules.venue_aliases.canonical_values().len()
    );
    println!(
        "  destination: {} rules, {} canonical names",
        rules.destination_aliases.len(),
        rules.destination_aliases.canonical_values().len()
    );

    println!();
    println!("{}", "Patterns:".cyan().bold());
    println!("  flight:      {}", flight);
    println!("  kitesafari:  {}", kitesafari);
    println!("  transfer:    {}", transfer);

    println!();
    println!("{}", "Curated Sets:".cyan().bold());
    for (name, len) in [
        ("el_gouna_hotels", sets.el_gouna.len()),
        ("hamata_hotels", sets.hamata.len()),
        ("egypt_other_hotels", sets.egypt_other.len()),
        ("greece_limnos_hotels", sets.greece_limnos.len()),
        ("greece_rhodes_hotels", sets.greece_rhodes.len()),
        ("greece_other_hotels", sets.greece_other.len()),
        ("turkey_hotels", sets.turkey.len()),
        ("sal_hotels", sets.sal.len()),
        ("fuerteventura_hotels", sets.fuerteventura.len()),
        ("exotic_destinations", sets.exotic_destinations.len()),
    ] {
        println!("  {:<22} {}", name, len);
    }
    println!();
}

fn handle_config(action: ConfigAction, config_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", Config::path(config_dir).display());
        }
        ConfigAction::Init => {
            let path = Config::init(config_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }
    Ok(())
}
