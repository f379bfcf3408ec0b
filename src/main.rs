//! # Trend Digest
//!
//! Terminal viewer for the Trend Engine news backend.
//!
//! ## Usage
//!
//! ```sh
//! trend_digest summaries --expand-all
//! trend_digest topics --open 3
//! trend_digest browse
//! ```
//!
//! Logs go to stderr (default level `warn`, override with `RUST_LOG`) so the
//! rendered pages on stdout stay clean.

use clap::Parser;
use std::error::Error;
use std::io::{self, Write};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use trend_digest::browse;
use trend_digest::cli::{Cli, Command};
use trend_digest::config::Config;
use trend_digest::query::QueryClient;
use trend_digest::views::detail::{render_article, render_topic_detail};
use trend_digest::views::{App, RenderOptions, TopicsPage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(io::stderr)
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args.command, "Parsed CLI arguments");

    let config = Config::load(args.config.as_deref())?.apply_overrides(
        args.base_url.clone(),
        args.session_cookie.clone(),
        args.no_hyperlinks,
    );
    info!(base_url = %config.api_base_url, "Using API");

    let client = QueryClient::from_config(&config)?;
    let opts = RenderOptions {
        hyperlinks: config.hyperlinks,
    };

    let mut stdout = io::stdout().lock();
    match args.command {
        Command::Summaries {
            filter,
            expand,
            expand_all,
        } => {
            let mut app = App::new(filter.into());
            app.load(&client).await;
            if expand_all {
                app.set_all_expanded(true);
            }
            for n in expand {
                if !app.expand(n) {
                    warn!(card = n, "No such card; ignoring --expand");
                }
            }
            write!(stdout, "{}", app.render(opts))?;
        }
        Command::Topics { open, open_all } => {
            let mut page = TopicsPage::new();
            page.load(&client).await;
            if open_all {
                page.open_all(&client).await;
            } else if !open.is_empty() {
                let opened = page.open_topics(&open, &client).await;
                if opened < open.len() {
                    warn!(requested = open.len(), opened, "Some topic ids were not found");
                }
            }
            write!(stdout, "{}", page.render(opts))?;
        }
        Command::Topic { id } => {
            let topic = client.use_topic(id).await;
            write!(stdout, "{}", render_topic_detail(&topic, opts))?;
        }
        Command::Article { id } => {
            let article = client.use_article(id).await;
            write!(stdout, "{}", render_article(&article, opts))?;
        }
        Command::Browse { topics, filter } => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            if topics {
                let mut page = TopicsPage::new();
                browse::run(&mut page, &client, stdin, &mut stdout, opts).await?;
            } else {
                let mut app = App::new(filter.into());
                browse::run(&mut app, &client, stdin, &mut stdout, opts).await?;
            }
            writeln!(stdout)?;
        }
    }
    stdout.flush()?;

    let elapsed = start_time.elapsed();
    info!(?elapsed, millis = elapsed.as_millis(), "Execution complete");
    Ok(())
}
