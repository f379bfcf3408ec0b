//! A collapsible card for one [`DailySummary`].
//!
//! Collapsed, the card shows the topic badge, the capitalized topic title
//! and the synopsis (when there is one). Expanded, it also lists the
//! article count and every article as an external link.

use super::{INDENT, RenderOptions, article_line};
use crate::models::DailySummary;
use crate::utils::{article_count_label, capitalize};
use std::fmt::Write;

pub const EXPAND_ICON: &str = "+";
pub const COLLAPSE_ICON: &str = "−";

#[derive(Debug, Clone)]
pub struct DailySummaryCard {
    summary: DailySummary,
    is_expanded: bool,
}

impl DailySummaryCard {
    /// A new card always starts collapsed.
    pub fn new(summary: DailySummary) -> Self {
        Self {
            summary,
            is_expanded: false,
        }
    }

    /// The summary this card shows.
    pub fn summary(&self) -> &DailySummary {
        &self.summary
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// Flip between collapsed and expanded. The summary itself is untouched.
    pub fn toggle(&mut self) {
        self.is_expanded = !self.is_expanded;
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.is_expanded = expanded;
    }

    /// Render the card. `index` is the number shown in front of the header,
    /// used by the browse session to address the card.
    pub fn render(&self, index: Option<usize>, opts: RenderOptions) -> String {
        let mut out = String::new();
        let topic = &self.summary.topic.name;
        let icon = if self.is_expanded {
            COLLAPSE_ICON
        } else {
            EXPAND_ICON
        };

        if let Some(i) = index {
            write!(out, "[{i}] ").unwrap();
        }
        writeln!(out, "[{}] {}  {}", topic, capitalize(topic), icon).unwrap();

        if let Some(text) = self.summary.summary.as_deref().filter(|s| !s.is_empty()) {
            for line in text.lines() {
                writeln!(out, "{INDENT}{line}").unwrap();
            }
        }

        if self.is_expanded {
            let articles = &self.summary.articles;
            writeln!(out, "{INDENT}{}", article_count_label(articles.len())).unwrap();
            for article in articles {
                let line = article_line(article, opts);
                writeln!(out, "{INDENT}  • {line}").unwrap();
            }
        }

        out
    }
}
