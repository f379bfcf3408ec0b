//! Single-resource views: one topic with its articles, or one article.

use super::{INDENT, RenderOptions, article_line};
use crate::models::{Article, TopicDetail};
use crate::query::QueryState;
use crate::utils::{article_count_label, capitalize};
use itertools::Itertools;
use std::fmt::Write;

pub fn render_topic_detail(query: &QueryState<TopicDetail>, opts: RenderOptions) -> String {
    let mut out = String::new();
    match query {
        QueryState::Loading => writeln!(out, "⠋ Loading topic...").unwrap(),
        QueryState::Error(_) => writeln!(out, "Failed to load topic. Please try again later.").unwrap(),
        QueryState::Success(topic) => {
            writeln!(out, "{}", capitalize(&topic.name)).unwrap();
            writeln!(out, "{INDENT}{}", article_count_label(topic.articles.len())).unwrap();
            for article in &topic.articles {
                writeln!(out, "{INDENT}• {}", article_line(article, opts)).unwrap();
            }
        }
    }
    out
}

pub fn render_article(query: &QueryState<Article>, opts: RenderOptions) -> String {
    let mut out = String::new();
    match query {
        QueryState::Loading => writeln!(out, "⠋ Loading article...").unwrap(),
        QueryState::Error(_) => writeln!(out, "Failed to load article. Please try again later.").unwrap(),
        QueryState::Success(article) => {
            writeln!(out, "{}", article_line(article, opts)).unwrap();
            if let Some(source) = &article.source {
                writeln!(out, "{INDENT}source: {source}").unwrap();
            }
            let topics = article
                .topics
                .iter()
                .map(|t| t.name.as_str())
                .chain(article.topic_name.as_deref())
                .unique()
                .join(", ");
            if !topics.is_empty() {
                writeln!(out, "{INDENT}topics: {topics}").unwrap();
            }
        }
    }
    out
}
