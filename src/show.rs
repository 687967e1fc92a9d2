use std::time::Instant;

use anyhow::Result;
use clap::Args;

use crate::client::TranslationClient;
use crate::interactive::render::render_detail_panel;
use crate::telemetry;

/// `trad show <url-or-path>`
#[derive(Args, Debug)]
pub struct ShowCmd {
    /// Full page URL, or a path on the site such as `2024/01/game.html`
    pub target: String,
}

pub async fn run(client: &TranslationClient, args: ShowCmd) -> Result<()> {
    let t0 = Instant::now();
    let url = if args.target.starts_with("http://") || args.target.starts_with("https://") {
        args.target.clone()
    } else {
        client.resolve_path(&args.target)?.to_string()
    };
    let detail = client.get_details(&url).await?;

    if telemetry::config::json_mode() {
        telemetry::detail().result(&detail, t0)?;
    } else {
        println!("{}", render_detail_panel(&detail));
    }
    Ok(())
}
