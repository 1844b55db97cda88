mod schema;

use anyhow::{Context, Result, bail};
use argbind::{BindError, NameComparer, ParseResult, ParserSettings, Record};
use clap::{Parser, Subcommand};
use std::{fs, path::PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

use crate::schema::{SchemaReport, load_schema, load_settings};

#[derive(Parser)]
#[command(name = "argbind")]
#[command(version, about = "Bind command-line arguments against an option schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a schema document
    Check(CheckArgs),

    /// Bind arguments against a schema and print the result as JSON
    Bind(BindArgs),
}

#[derive(Parser)]
struct CheckArgs {
    /// Schema document (JSON)
    #[arg(value_name = "FILE")]
    schema: PathBuf,

    /// Parser settings (JSON)
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Output JSON report path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only output JSON (no human-readable output)
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct BindArgs {
    /// Schema document (JSON)
    #[arg(value_name = "FILE")]
    schema: PathBuf,

    /// Parser settings (JSON)
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Match option names case-insensitively
    #[arg(long)]
    ignore_case: bool,

    /// Arguments to bind (pass them after `--`)
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => check_command(args),
        Commands::Bind(args) => bind_command(args),
    }
}

fn settings_for(path: Option<&PathBuf>) -> Result<ParserSettings> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(ParserSettings::default()),
    }
}

fn check_command(args: CheckArgs) -> Result<()> {
    tracing::debug!("executing check command");

    let schema = load_schema(&args.schema)?;
    let settings = settings_for(args.settings.as_ref())?;
    let report = SchemaReport::new(&args.schema, &schema, &settings);

    if let Some(output_path) = &args.output {
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(output_path, &json)
            .with_context(|| format!("failed to write report: {}", output_path.display()))?;
        if !args.json {
            eprintln!("Report: {}", output_path.display());
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        if report.error.is_some() {
            std::process::exit(1);
        }
        return Ok(());
    }

    eprintln!("Schema: {}", report.schema);
    eprintln!("Specifications: {}", report.options.len());
    match &report.error {
        Some(error) => bail!("invalid schema: {error}"),
        None => eprintln!("OK"),
    }
    Ok(())
}

fn bind_command(args: BindArgs) -> Result<()> {
    tracing::debug!(args = args.args.len(), "executing bind command");

    let schema = load_schema(&args.schema)?;
    let mut settings = settings_for(args.settings.as_ref())?;
    if args.ignore_case {
        settings = settings.with_name_comparer(NameComparer::IgnoreCase);
    }

    let result = argbind::bind_mutable::<Record, _>(&schema.specifications, &args.args, &settings)
        .with_context(|| format!("invalid schema: {}", args.schema.display()))?;

    match result {
        ParseResult::Parsed(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        ParseResult::Errors(errors) if errors.first().is_some_and(BindError::stops_processing) => {
            print_usage(&schema);
            Ok(())
        }
        ParseResult::Errors(errors) => {
            for error in &errors {
                eprintln!("error: {error}");
            }
            std::process::exit(2);
        }
    }
}

fn print_usage(schema: &argbind::BindingSchemaV1) {
    if !schema.target.is_empty() {
        println!("{}", schema.target);
        println!();
    }
    for spec in &schema.specifications {
        let mut line = format!("  {}", spec.display_name());
        if spec.required {
            line.push_str(" (required)");
        }
        if !spec.help.is_empty() {
            line.push_str("  ");
            line.push_str(&spec.help);
        }
        println!("{line}");
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
