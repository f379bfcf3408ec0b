//! Command-line interface definitions for Trend Digest.
//!
//! Connection options can come from flags, environment variables or the
//! YAML config file; flags win.
//!
//! # Examples
//!
//! ```sh
//! # Latest digest against a local backend
//! trend_digest summaries
//!
//! # One day, one topic, every card expanded
//! trend_digest summaries --date 2024-01-01 --topic-id 3 --expand-all
//!
//! # Topic list with two sections opened
//! trend_digest --base-url https://trends.example.com topics --open 1 --open 4
//!
//! # Interactive session over the topic list
//! trend_digest browse --topics
//! ```

use crate::resources::DailySummaryParams;
use clap::{Parser, Subcommand};

/// Top-level arguments: connection options shared by every subcommand.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base URL of the Trend Engine API
    #[arg(long, env = "TREND_API_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Optional path to config.yaml file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Cookie header value forwarded with every request
    #[arg(long, env = "TREND_SESSION_COOKIE", global = true)]
    pub session_cookie: Option<String>,

    /// Print URLs as plain text instead of terminal hyperlinks
    #[arg(long, global = true)]
    pub no_hyperlinks: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What to show.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Daily digest summaries grouped by date
    Summaries {
        #[command(flatten)]
        filter: SummaryFilter,

        /// Expand the card with this number (repeatable)
        #[arg(short, long = "expand", value_name = "N")]
        expand: Vec<usize>,

        /// Expand every card
        #[arg(long)]
        expand_all: bool,
    },

    /// All topics as collapsible sections
    Topics {
        /// Open the section of this topic id (repeatable)
        #[arg(short, long = "open", value_name = "TOPIC_ID")]
        open: Vec<i64>,

        /// Open every section
        #[arg(long)]
        open_all: bool,
    },

    /// One topic with all of its articles
    Topic {
        /// Topic id
        id: i64,
    },

    /// One article
    Article {
        /// Article id
        id: i64,
    },

    /// Interactive session: toggle cards by number
    Browse {
        /// Browse topics instead of daily summaries
        #[arg(long)]
        topics: bool,

        #[command(flatten)]
        filter: SummaryFilter,
    },
}

/// Filters forwarded to `/daily-summaries/`.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFilter {
    /// Only summaries for this date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Only summaries for this topic id
    #[arg(long)]
    pub topic_id: Option<i64>,

    /// Number of summaries to skip (pagination offset)
    #[arg(long)]
    pub skip: Option<u32>,

    /// Maximum number of summaries to return
    #[arg(long)]
    pub limit: Option<u32>,
}

impl From<SummaryFilter> for DailySummaryParams {
    fn from(f: SummaryFilter) -> Self {
        Self {
            date: f.date,
            topic_id: f.topic_id,
            skip: f.skip,
            limit: f.limit,
        }
    }
}
