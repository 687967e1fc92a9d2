use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;

mod api;
mod client;
mod config;
mod error;
mod extractor;
mod fetch;
mod interactive;
mod output;
mod search;
mod show;
mod telemetry;

use client::TranslationClient;
use config::ScrapeConfig;

#[derive(Parser)]
#[command(name = "trad", about = "Game translation search: HTTP API and interactive CLI")]
struct Cli {
    /// Site to scrape (env TRAD_BASE_URL)
    #[arg(global = true, long)]
    base_url: Option<String>,
    /// User-Agent sent with every request (env TRAD_USER_AGENT)
    #[arg(global = true, long)]
    user_agent: Option<String>,
    /// Per-request timeout in seconds (env TRAD_TIMEOUT_SECS)
    #[arg(global = true, long)]
    timeout_secs: Option<u64>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search translations by game name
    Search(search::SearchCmd),
    /// Show a translation page's details
    Show(show::ShowCmd),
    /// Run the HTTP API
    Serve(api::ServeCmd),
    /// Prompt-driven search (default)
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // prompts and log lines share the terminal, so stay quiet unless asked
    let interactive = matches!(cli.command, None | Some(Commands::Interactive));
    telemetry::config::init_tracing(if interactive { "warn" } else { "info" });

    let cfg = ScrapeConfig::resolve(cli.base_url, cli.user_agent, cli.timeout_secs)?;
    let client = TranslationClient::new(cfg)?;

    match cli.command {
        Some(Commands::Search(args)) => search::run(&client, args).await?,
        Some(Commands::Show(args)) => show::run(&client, args).await?,
        Some(Commands::Serve(args)) => api::run(client, args).await?,
        Some(Commands::Interactive) | None => interactive::run(&client).await?,
    }

    Ok(())
}
