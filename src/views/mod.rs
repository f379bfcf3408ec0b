//! Text renderers for the viewer.
//!
//! Each view is a value holding the immutable data it shows plus its own
//! expand/collapse flag; `render` is a pure function of both and returns the
//! text to print. Toggling never touches the data.
//!
//! # Views
//!
//! - [`summary_card`]: one daily summary, collapsible to reveal its articles
//! - [`topic_section`]: one topic, opening it fetches that topic's articles
//! - [`app`]: the daily digest page, summaries grouped by date
//! - [`topics_page`]: every topic as a collapsible section
//! - [`detail`]: a single topic or article

use crate::models::Article;
use crate::utils::render_link;

pub mod app;
pub mod detail;
pub mod summary_card;
pub mod topic_section;
pub mod topics_page;

pub use app::{App, AppState, DateGroup, group_by_date};
pub use summary_card::DailySummaryCard;
pub use topic_section::TopicSection;
pub use topics_page::{TopicsPage, TopicsState};

/// Presentation switches shared by every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap article titles in OSC-8 terminal hyperlinks.
    pub hyperlinks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { hyperlinks: true }
    }
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self { hyperlinks: false }
    }
}

/// Indentation used for everything nested under a card or section header.
pub(crate) const INDENT: &str = "    ";

/// An article as a link when it has a URL, plain title otherwise.
pub(crate) fn article_line(article: &Article, opts: RenderOptions) -> String {
    match article.link() {
        Some(url) => render_link(&article.title, url, opts.hyperlinks),
        None => article.title.clone(),
    }
}
