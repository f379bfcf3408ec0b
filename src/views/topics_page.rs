//! Topic browser: every topic as a collapsible [`TopicSection`].

use super::{RenderOptions, TopicSection};
use crate::models::Topic;
use crate::query::{QueryClient, QueryState};
use futures::future::join_all;
use std::fmt::Write;
use tracing::{info, instrument};

/// What the topic browser currently shows.
#[derive(Debug, Clone)]
pub enum TopicsState {
    Loading,
    Error,
    Empty,
    Populated(Vec<TopicSection>),
}

/// Every topic as a collapsible section. Sections start closed and fetch
/// their articles only when opened.
#[derive(Debug, Clone)]
pub struct TopicsPage {
    state: TopicsState,
}

impl Default for TopicsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicsPage {
    /// An empty page in the loading state; call [`TopicsPage::load`] next.
    pub fn new() -> Self {
        Self {
            state: TopicsState::Loading,
        }
    }

    /// Current page state.
    pub fn state(&self) -> &TopicsState {
        &self.state
    }

    /// Fetch the topic list and rebuild the sections.
    #[instrument(level = "info", skip_all)]
    pub async fn load(&mut self, client: &QueryClient) {
        self.state = TopicsState::Loading;
        let query = client.use_topics().await;
        self.apply(&query);
    }

    /// Rebuild the page from a finished topics query. Sections start closed.
    pub fn apply(&mut self, query: &QueryState<Vec<Topic>>) {
        self.state = match query {
            QueryState::Loading => TopicsState::Loading,
            QueryState::Error(_) => TopicsState::Error,
            QueryState::Success(topics) if topics.is_empty() => TopicsState::Empty,
            QueryState::Success(topics) => {
                info!(count = topics.len(), "Topics loaded");
                TopicsState::Populated(topics.iter().cloned().map(TopicSection::new).collect())
            }
        };
    }

    /// The sections in server order, empty unless the page is populated.
    pub fn sections(&self) -> &[TopicSection] {
        match &self.state {
            TopicsState::Populated(sections) => sections,
            _ => &[],
        }
    }

    fn sections_mut(&mut self) -> &mut [TopicSection] {
        match &mut self.state {
            TopicsState::Populated(sections) => sections.as_mut_slice(),
            _ => &mut [],
        }
    }

    /// Toggle the section with the given 1-based index. Opening it fetches
    /// the topic's articles.
    ///
    /// # Returns
    ///
    /// `false` if there is no such section.
    pub async fn toggle(&mut self, index: usize, client: &QueryClient) -> bool {
        let Some(i) = index.checked_sub(1) else {
            return false;
        };
        match self.sections_mut().get_mut(i) {
            Some(section) => {
                section.toggle(client).await;
                true
            }
            None => false,
        }
    }

    /// Open every section whose topic id is in `topic_ids`, fetching their
    /// articles concurrently. Returns how many sections were opened.
    pub async fn open_topics(&mut self, topic_ids: &[i64], client: &QueryClient) -> usize {
        let targets: Vec<&mut TopicSection> = self
            .sections_mut()
            .iter_mut()
            .filter(|s| topic_ids.contains(&s.topic().id))
            .collect();
        let opened = targets.len();
        join_all(targets.into_iter().map(|s| s.open(client))).await;
        opened
    }

    /// Open all sections concurrently.
    pub async fn open_all(&mut self, client: &QueryClient) {
        join_all(self.sections_mut().iter_mut().map(|s| s.open(client))).await;
    }

    /// Close every section. Nothing is fetched.
    pub fn close_all(&mut self) {
        for section in self.sections_mut() {
            section.close();
        }
    }

    /// Render the page.
    ///
    /// # Arguments
    ///
    /// * `opts` - Presentation switches (terminal hyperlinks on or off)
    ///
    /// # Returns
    ///
    /// The loading, error or empty message, or the `Topics` heading followed
    /// by every section numbered from 1.
    pub fn render(&self, opts: RenderOptions) -> String {
        let mut out = String::new();
        match &self.state {
            TopicsState::Loading => writeln!(out, "⠋ Loading topics...").unwrap(),
            TopicsState::Error => {
                writeln!(out, "Failed to load topics").unwrap();
                writeln!(out, "Please try again later.").unwrap();
            }
            TopicsState::Empty => writeln!(out, "No topics available.").unwrap(),
            TopicsState::Populated(sections) => {
                writeln!(out, "Topics\n").unwrap();
                for (i, section) in sections.iter().enumerate() {
                    out.push_str(&section.render(Some(i + 1), opts));
                }
            }
        }
        out
    }
}
