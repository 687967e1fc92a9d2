use std::time::Duration;

use anyhow::Result;
use console::{style, Style, Term};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::TranslationClient;
use crate::extractor::{SearchResult, TranslationDetail};

mod browser;
pub mod render;

use render::{render_detail_panel, render_panel, render_results_table, Border, Panel};

/// Prompt loop: search, pick a result, show its details, optionally open the download.
pub async fn run(client: &TranslationClient) -> Result<()> {
    let term = Term::stdout();
    let theme = ColorfulTheme::default();

    term.write_line(&render_panel(&style("Central de Traduções - CLI").bold().to_string(), Border::Double, Style::new().white()))?;

    loop {
        let action = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&["Search translations", "Exit"])
            .default(0)
            .interact()?;
        if action == 1 { break; }

        let query: String = Input::with_theme(&theme)
            .with_prompt("Game name")
            .validate_with(|input: &String| -> Result<(), &'static str> {
                if input.trim().is_empty() { Err("Please type a search term") } else { Ok(()) }
            })
            .interact_text()?;

        if let Some(results) = search_step(client, &term, &query).await? {
            detail_step(client, &term, &theme, &results).await?;
        }

        let again = Confirm::with_theme(&theme)
            .with_prompt("Run another search?")
            .default(true)
            .interact()?;
        if !again { break; }
        term.write_line("")?;
    }

    term.write_line(&style("\nGoodbye!\n").cyan().to_string())?;
    Ok(())
}

// None when nothing should be shown (error already reported, or zero hits)
async fn search_step(client: &TranslationClient, term: &Term, query: &str) -> Result<Option<Vec<SearchResult>>> {
    let sp = spinner("Searching translations...");
    let res = client.search(query).await;
    sp.finish_and_clear();

    match res {
        Ok(results) if results.is_empty() => {
            term.write_line(&Panel::round(Style::new().red()).render(&[style("No translations found").red().bold().to_string()]))?;
            Ok(None)
        }
        Ok(results) => {
            term.write_line(&render_results_table(&results))?;
            Ok(Some(results))
        }
        Err(e) => {
            term.write_line(&format!("{} {e}", style("Error searching translations:").red().bold()))?;
            Ok(None)
        }
    }
}

async fn detail_step(client: &TranslationClient, term: &Term, theme: &ColorfulTheme, results: &[SearchResult]) -> Result<()> {
    let view = Confirm::with_theme(theme)
        .with_prompt("View details of a translation?")
        .default(true)
        .interact()?;
    if !view { return Ok(()); }

    let n = results.len();
    let pick: usize = Input::with_theme(theme)
        .with_prompt("Translation number")
        .validate_with(move |input: &usize| -> Result<(), &'static str> {
            if (1..=n).contains(input) { Ok(()) } else { Err("Invalid number") }
        })
        .interact_text()?;

    let sp = spinner("Loading translation details...");
    let res = client.get_details(&results[pick - 1].link).await;
    sp.finish_and_clear();

    let detail: TranslationDetail = match res {
        Ok(d) => d,
        Err(e) => {
            term.write_line(&format!("{} {e}", style("Error loading translation details:").red().bold()))?;
            return Ok(());
        }
    };
    term.write_line("")?;
    term.write_line(&render_detail_panel(&detail))?;

    let open = Confirm::with_theme(theme)
        .with_prompt("Open the download link in the browser?")
        .default(false)
        .interact()?;
    if open && detail.has_download() {
        if let Err(e) = browser::open_in_browser(&detail.download_link) {
            term.write_line(&format!("{} {e:#}", style("Could not open the browser:").red().bold()))?;
        }
    }
    Ok(())
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(st) = ProgressStyle::with_template("{spinner:.white} {msg}") { pb.set_style(st); }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
