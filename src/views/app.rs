//! The daily digest page.
//!
//! Fetches daily summaries, then renders one of four states:
//!
//! | State | Output |
//! |-------|--------|
//! | Loading | spinner and "Loading today's news..." |
//! | Error | "Failed to load news" / "Please try again later." |
//! | Empty | "No summaries available for today." |
//! | Populated | one section per date, newest first, each holding its cards |
//!
//! Cards are numbered with a running 1-based index across all date groups so
//! the browse session can address them.

use super::{DailySummaryCard, RenderOptions};
use crate::models::DailySummary;
use crate::query::{QueryClient, QueryState};
use crate::resources::DailySummaryParams;
use crate::utils::{format_date_label, parse_calendar_date, today_local};
use chrono::NaiveDate;
use itertools::Itertools;
use std::fmt::Write;
use tracing::{info, instrument};

pub const APP_TITLE: &str = "Trend Engine";
const SPINNER: &str = "⠋";

/// Summaries sharing one date string.
#[derive(Debug, Clone)]
pub struct DateGroup {
    /// The date string exactly as the API returned it.
    pub date: String,
    /// Parsed calendar day, `None` if the date string is not a date.
    pub day: Option<NaiveDate>,
    pub cards: Vec<DailySummaryCard>,
}

impl DateGroup {
    /// `"Today"` or the long-form date, see [`format_date_label`].
    pub fn label(&self, today: NaiveDate) -> String {
        format_date_label(&self.date, today)
    }
}

/// Group summaries by exact date-string equality.
///
/// Within a group, summaries keep their original relative order. Groups are
/// ordered newest calendar date first; dates that do not parse sort last.
pub fn group_by_date(summaries: &[DailySummary]) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    for summary in summaries {
        match groups.iter_mut().find(|g| g.date == summary.date) {
            Some(group) => group.cards.push(DailySummaryCard::new(summary.clone())),
            None => groups.push(DateGroup {
                date: summary.date.clone(),
                day: parse_calendar_date(&summary.date),
                cards: vec![DailySummaryCard::new(summary.clone())],
            }),
        }
    }
    groups
        .into_iter()
        .sorted_by(|a, b| b.day.cmp(&a.day))
        .collect()
}

/// What the digest page currently shows.
#[derive(Debug, Clone)]
pub enum AppState {
    Loading,
    Error,
    Empty,
    Populated(Vec<DateGroup>),
}

impl AppState {
    /// Derive the page state from a summaries query.
    pub fn from_query(query: &QueryState<Vec<DailySummary>>) -> Self {
        match query {
            QueryState::Loading => Self::Loading,
            QueryState::Error(_) => Self::Error,
            QueryState::Success(summaries) if summaries.is_empty() => Self::Empty,
            QueryState::Success(summaries) => Self::Populated(group_by_date(summaries)),
        }
    }
}

/// Root view over the daily summaries.
#[derive(Debug, Clone)]
pub struct App {
    params: DailySummaryParams,
    today: NaiveDate,
    state: AppState,
}

impl App {
    /// A page in the loading state for the given filters, with "today"
    /// taken from the local clock.
    pub fn new(params: DailySummaryParams) -> Self {
        Self::with_today(params, today_local())
    }

    /// Like [`App::new`] with a fixed "today", for deterministic labels.
    pub fn with_today(params: DailySummaryParams, today: NaiveDate) -> Self {
        Self {
            params,
            today,
            state: AppState::Loading,
        }
    }

    /// Current page state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Filters sent with every load.
    pub fn params(&self) -> &DailySummaryParams {
        &self.params
    }

    /// Fetch the summaries and rebuild the page. All cards start collapsed.
    #[instrument(level = "info", skip_all)]
    pub async fn load(&mut self, client: &QueryClient) {
        self.state = AppState::Loading;
        let query = client.use_daily_summaries(&self.params).await;
        self.apply(&query);
    }

    /// Rebuild the page from a finished query.
    pub fn apply(&mut self, query: &QueryState<Vec<DailySummary>>) {
        self.state = AppState::from_query(query);
        if let AppState::Populated(groups) = &self.state {
            info!(
                groups = groups.len(),
                cards = self.card_count(),
                "Daily summaries loaded"
            );
        }
    }

    /// Date groups, newest first. Empty unless the page is populated.
    pub fn groups(&self) -> &[DateGroup] {
        match &self.state {
            AppState::Populated(groups) => groups,
            _ => &[],
        }
    }

    /// Every card in display order.
    pub fn cards(&self) -> impl Iterator<Item = &DailySummaryCard> {
        self.groups().iter().flat_map(|g| g.cards.iter())
    }

    fn cards_mut(&mut self) -> impl Iterator<Item = &mut DailySummaryCard> {
        let groups: &mut [DateGroup] = match &mut self.state {
            AppState::Populated(groups) => groups.as_mut_slice(),
            _ => &mut [],
        };
        groups.iter_mut().flat_map(|g| g.cards.iter_mut())
    }

    /// Number of cards across all date groups.
    pub fn card_count(&self) -> usize {
        self.cards().count()
    }

    /// Toggle the card with the given 1-based index. Returns `false` if there
    /// is no such card.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(i) = index.checked_sub(1) else {
            return false;
        };
        match self.cards_mut().nth(i) {
            Some(card) => {
                card.toggle();
                true
            }
            None => false,
        }
    }

    /// Expand the card with the given 1-based index, leaving it expanded if
    /// it already is.
    ///
    /// # Returns
    ///
    /// `false` if there is no such card.
    pub fn expand(&mut self, index: usize) -> bool {
        let Some(i) = index.checked_sub(1) else {
            return false;
        };
        match self.cards_mut().nth(i) {
            Some(card) => {
                card.set_expanded(true);
                true
            }
            None => false,
        }
    }

    /// Expand or collapse every card on the page.
    pub fn set_all_expanded(&mut self, expanded: bool) {
        for card in self.cards_mut() {
            card.set_expanded(expanded);
        }
    }

    /// Subtitle date: the label of the newest group, `"Today"` when empty.
    fn headline_label(&self) -> String {
        self.groups()
            .first()
            .map(|g| g.label(self.today))
            .unwrap_or_else(|| "Today".to_string())
    }

    /// Render the page for the current state.
    ///
    /// # Arguments
    ///
    /// * `opts` - Presentation switches (terminal hyperlinks on or off)
    ///
    /// # Returns
    ///
    /// The full page text. A populated page starts with the title and the
    /// "<date>'s News Summary" subtitle, then one `── <label> ──` section per
    /// date with its numbered cards.
    pub fn render(&self, opts: RenderOptions) -> String {
        let mut out = String::new();
        match &self.state {
            AppState::Loading => {
                writeln!(out, "{SPINNER} Loading today's news...").unwrap();
            }
            AppState::Error => {
                writeln!(out, "Failed to load news").unwrap();
                writeln!(out, "Please try again later.").unwrap();
            }
            AppState::Empty => {
                self.render_header(&mut out);
                writeln!(out, "No summaries available for today.").unwrap();
            }
            AppState::Populated(groups) => {
                self.render_header(&mut out);
                let mut index = 0;
                for group in groups {
                    writeln!(out, "── {} ──", group.label(self.today)).unwrap();
                    for card in &group.cards {
                        index += 1;
                        out.push_str(&card.render(Some(index), opts));
                    }
                    out.push('\n');
                }
            }
        }
        out
    }

    fn render_header(&self, out: &mut String) {
        writeln!(out, "{APP_TITLE}").unwrap();
        writeln!(out, "{}'s News Summary", self.headline_label()).unwrap();
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::{Article, Topic};
    use std::sync::Arc;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn summary(id: i64, date: &str, topic: &str) -> DailySummary {
        DailySummary {
            id,
            date: date.to_string(),
            summary: None,
            topic: Topic {
                id,
                name: topic.to_string(),
            },
            articles: vec![],
        }
    }

    fn loaded(summaries: Vec<DailySummary>, today: NaiveDate) -> App {
        let mut app = App::with_today(DailySummaryParams::default(), today);
        app.apply(&QueryState::Success(Arc::new(summaries)));
        app
    }

    #[test]
    fn test_one_group_per_distinct_date() {
        let groups = group_by_date(&[
            summary(1, "2024-01-01", "a"),
            summary(2, "2024-01-02", "b"),
            summary(3, "2024-01-01", "c"),
        ]);
        assert_eq!(groups.len(), 2);
        let ids: Vec<i64> = groups[1].cards.iter().map(|c| c.summary().id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_groups_sorted_descending() {
        let groups = group_by_date(&[
            summary(1, "2023-12-31", "a"),
            summary(2, "2024-02-01", "b"),
            summary(3, "2024-01-15", "c"),
        ]);
        let dates: Vec<&str> = groups.iter().map(|g| g.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-02-01", "2024-01-15", "2023-12-31"]);
    }

    #[test]
    fn test_unparseable_dates_sort_last() {
        let groups = group_by_date(&[summary(1, "garbage", "a"), summary(2, "2024-01-01", "b")]);
        assert_eq!(groups[0].date, "2024-01-01");
        assert_eq!(groups[1].date, "garbage");
        assert!(groups[1].day.is_none());
    }

    #[test]
    fn test_grouping_preserves_article_order() {
        let mut s = summary(1, "2024-01-01", "a");
        for (id, title) in [(5, "E"), (2, "B"), (9, "I")] {
            s.articles.push(Article {
                id,
                title: title.to_string(),
                url: None,
                source: None,
                topic_id: None,
                topic_name: None,
                topics: vec![],
            });
        }
        let groups = group_by_date(&[s]);
        let titles: Vec<&str> = groups[0].cards[0]
            .summary()
            .articles
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["E", "B", "I"]);
    }

    #[test]
    fn test_state_from_query() {
        assert!(matches!(AppState::from_query(&QueryState::Loading), AppState::Loading));
        let failed = QueryState::Error(Arc::new(ApiError::Status { status: 500 }));
        assert!(matches!(AppState::from_query(&failed), AppState::Error));
        let empty = QueryState::Success(Arc::new(vec![]));
        assert!(matches!(AppState::from_query(&empty), AppState::Empty));
    }

    #[test]
    fn test_render_loading_and_error() {
        let mut app = App::with_today(DailySummaryParams::default(), day(2024, 1, 1));
        assert!(app.render(RenderOptions::plain()).contains("Loading today's news..."));

        app.apply(&QueryState::Error(Arc::new(ApiError::Status { status: 500 })));
        let text = app.render(RenderOptions::plain());
        assert_eq!(text, "Failed to load news\nPlease try again later.\n");
    }

    #[test]
    fn test_render_empty() {
        let app = loaded(vec![], day(2024, 1, 1));
        let text = app.render(RenderOptions::plain());
        assert!(text.starts_with("Trend Engine\nToday's News Summary\n"));
        assert!(text.contains("No summaries available for today."));
    }

    #[test]
    fn test_render_groups_with_labels() {
        let app = loaded(
            vec![summary(1, "2024-01-01", "tech"), summary(2, "2024-01-02", "science")],
            day(2024, 1, 2),
        );
        let text = app.render(RenderOptions::plain());
        assert!(text.contains("Today's News Summary"));
        let today = text.find("── Today ──").unwrap();
        let monday = text.find("── Monday, January 1 ──").unwrap();
        assert!(today < monday);
        assert!(text.contains("[1] [science] Science  +"));
        assert!(text.contains("[2] [tech] Tech  +"));
    }

    #[test]
    fn test_toggle_by_running_index() {
        let mut app = loaded(
            vec![summary(1, "2024-01-01", "tech"), summary(2, "2024-01-02", "science")],
            day(2024, 1, 2),
        );
        assert!(app.toggle(2));
        let expanded: Vec<i64> = app
            .cards()
            .filter(|c| c.is_expanded())
            .map(|c| c.summary().id)
            .collect();
        assert_eq!(expanded, vec![1]);

        assert!(!app.toggle(0));
        assert!(!app.toggle(3));
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let mut app = loaded(
            vec![summary(1, "2024-01-01", "tech"), summary(2, "2024-01-01", "ai")],
            day(2024, 1, 1),
        );
        app.set_all_expanded(true);
        assert!(app.cards().all(DailySummaryCard::is_expanded));
        app.set_all_expanded(false);
        assert!(!app.cards().any(DailySummaryCard::is_expanded));
    }

    #[test]
    fn test_expand_keeps_card_expanded() {
        let mut app = loaded(
            vec![summary(1, "2024-01-01", "tech"), summary(2, "2024-01-01", "ai")],
            day(2024, 1, 1),
        );
        app.set_all_expanded(true);
        assert!(app.expand(1));
        assert!(app.cards().all(DailySummaryCard::is_expanded));

        app.set_all_expanded(false);
        assert!(app.expand(1));
        assert!(app.expand(1));
        let expanded: Vec<i64> = app
            .cards()
            .filter(|c| c.is_expanded())
            .map(|c| c.summary().id)
            .collect();
        assert_eq!(expanded, vec![1]);

        assert!(!app.expand(0));
        assert!(!app.expand(3));
    }

    #[test]
    fn test_reload_resets_cards_to_collapsed() {
        let summaries = vec![summary(1, "2024-01-01", "tech")];
        let mut app = loaded(summaries.clone(), day(2024, 1, 1));
        app.toggle(1);
        app.apply(&QueryState::Success(Arc::new(summaries)));
        assert!(!app.cards().any(DailySummaryCard::is_expanded));
    }
}
