use std::time::Instant;

use anyhow::Result;
use clap::Args;

use crate::client::TranslationClient;
use crate::interactive::render::{render_panel, render_results_table, Border};
use crate::telemetry;

/// `trad search <terms...>`
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Game name; several words are joined with spaces
    #[arg(required = true)]
    pub terms: Vec<String>,
}

pub async fn run(client: &TranslationClient, args: SearchCmd) -> Result<()> {
    let t0 = Instant::now();
    let query = args.terms.join(" ");
    let results = client.search(&query).await?;

    if telemetry::config::json_mode() {
        telemetry::search().result(&results, t0)?;
    } else if results.is_empty() {
        println!("{}", render_panel("No translations found", Border::Round, console::Style::new().red()));
    } else {
        println!("{}", render_results_table(&results));
        for (i, r) in results.iter().enumerate() { println!("  {:>2}. {}", i + 1, r.link); }
    }
    Ok(())
}
