//! A collapsible section for one [`Topic`].
//!
//! Opening the section fetches the topic's articles through
//! [`QueryClient::use_articles`]; closing it only hides them.

use super::{INDENT, RenderOptions, article_line};
use crate::models::{Article, Topic};
use crate::query::{QueryClient, QueryState};
use std::fmt::Write;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TopicSection {
    topic: Topic,
    is_open: bool,
    articles: QueryState<Vec<Article>>,
}

impl TopicSection {
    /// A closed section with nothing fetched yet.
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            is_open: false,
            articles: QueryState::Loading,
        }
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn articles(&self) -> &QueryState<Vec<Article>> {
        &self.articles
    }

    /// Flip the open flag without fetching. Returns the new flag.
    pub fn flip(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }

    /// Store the outcome of an article query.
    pub fn set_articles(&mut self, state: QueryState<Vec<Article>>) {
        self.articles = state;
    }

    /// Toggle the section; opening it (re)fetches the articles.
    pub async fn toggle(&mut self, client: &QueryClient) {
        if self.flip() {
            self.load(client).await;
        }
    }

    /// Open the section and fetch its articles.
    pub async fn open(&mut self, client: &QueryClient) {
        self.is_open = true;
        self.load(client).await;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    async fn load(&mut self, client: &QueryClient) {
        debug!(topic_id = self.topic.id, "Loading topic articles");
        self.articles = QueryState::Loading;
        self.articles = client.use_articles(self.topic.id).await;
    }

    /// Render the header and, when open, the article list or its loading,
    /// error or empty message. `index` is the number shown before the header.
    pub fn render(&self, index: Option<usize>, opts: RenderOptions) -> String {
        let mut out = String::new();
        if let Some(i) = index {
            write!(out, "[{i}] ").unwrap();
        }
        writeln!(out, "{}  {}", self.topic.name, if self.is_open { "-" } else { "+" }).unwrap();

        if !self.is_open {
            return out;
        }

        match &self.articles {
            QueryState::Loading => writeln!(out, "{INDENT}Loading articles...").unwrap(),
            QueryState::Error(_) => writeln!(out, "{INDENT}Failed to load articles.").unwrap(),
            QueryState::Success(articles) if articles.is_empty() => {
                writeln!(out, "{INDENT}No articles").unwrap()
            }
            QueryState::Success(articles) => {
                for article in articles.iter() {
                    let line = article_line(article, opts);
                    writeln!(out, "{INDENT}• {line}").unwrap();
                }
            }
        }

        out
    }
}
