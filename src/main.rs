mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::api::ApiAnalyzeRequest;
use post_insights::config::InsightsConfig;
use post_insights::synthetic::generate_sample_rows;
use post_insights::{analyze_with_config, format_float, format_hours, format_number, format_percent};

#[derive(Parser)]
#[command(name = "post-insights", about = "Post performance insights and action plans")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze post rows from a JSON file or stdin
    Analyze(AnalyzeArgs),
    /// Serve the analysis over HTTP
    Serve(ServeArgs),
    /// Print synthetic post rows as JSON
    Sample(SampleArgs),
    /// Write the default configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct SampleArgs {
    #[arg(long, default_value_t = 30)]
    rows: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    #[arg(long)]
    write: PathBuf,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Serve(args) => {
            let (config, path) = InsightsConfig::load(args.config.clone())?;
            debug!(config_path = ?path, "loaded configuration");
            server::serve(args, config).await
        }
        Command::Sample(args) => run_sample(args),
        Command::Config(args) => {
            InsightsConfig::default().write(&args.write)?;
            println!("Wrote default config to {}", args.write.display());
            Ok(())
        }
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<(), String> {
    let (config, path) = InsightsConfig::load(args.config)?;
    debug!(config_path = ?path, "loaded configuration");

    let payload = read_payload(args.input.as_deref())?;
    let request = ApiAnalyzeRequest::from_value(payload).map_err(|err| err.to_string())?;
    let output = analyze_with_config(&request.rows, &config).map_err(|err| err.to_string())?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&output)
            .map_err(|err| format!("failed to serialize result: {}", err))?;
        println!("{}", rendered);
        return Ok(());
    }

    let diagnostics = &output.diagnostics;
    println!(
        "Analyzed {} posts ({} dropped without numeric views)",
        diagnostics.row_count, diagnostics.dropped_rows
    );
    if output.best_hours.is_empty() {
        println!("Best hours: n/a");
    } else {
        println!("Best hours: {}", format_hours(&output.best_hours));
    }
    if let Some(top) = diagnostics.type_scores.first() {
        println!(
            "Top format: {} ({} views/post, {} engagement)",
            top.content_type,
            format_number(top.view_per_post),
            format_percent(top.engagement_rate)
        );
    }
    if !output.top_hashtags.is_empty() {
        println!(
            "Top hashtags: {}",
            output
                .top_hashtags
                .iter()
                .map(|tag| format!("#{}", tag))
                .collect::<Vec<_>>()
                .join(" ")
        );
    }

    if args.details {
        println!("\nFormat scores:");
        for score in &diagnostics.type_scores {
            println!(
                "  {}: score {} | {} posts | {} views/post | engagement {}",
                score.content_type,
                format_float(score.score, 2),
                score.posts,
                format_number(score.view_per_post),
                format_percent(score.engagement_rate)
            );
        }
        println!("\nHashtag leaders by views:");
        for stat in &diagnostics.hashtag_leaders {
            println!(
                "  #{}: {} views over {} uses",
                stat.tag,
                format_number(stat.views as f64),
                stat.uses
            );
        }
    }

    println!("\nAction plan:");
    for action in &output.actions {
        println!("- {}", action);
    }

    Ok(())
}

fn run_sample(args: SampleArgs) -> Result<(), String> {
    let rows = generate_sample_rows(args.rows, args.seed);
    let rendered = serde_json::to_string_pretty(&json!({ "rows": rows }))
        .map_err(|err| format!("failed to serialize rows: {}", err))?;
    println!("{}", rendered);
    Ok(())
}

fn read_payload(path: Option<&Path>) -> Result<Value, String> {
    let data = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("failed reading {}: {}", path.display(), err))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed reading stdin: {}", err))?;
            buffer
        }
    };

    if data.trim().is_empty() {
        return Err("missing rows: pass --input or pipe JSON on stdin".to_string());
    }
    serde_json::from_str(&data).map_err(|err| format!("invalid JSON input: {}", err))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("post_insights=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
