//! Data models for topics, articles and daily summaries.
//!
//! These are read-only projections of server state:
//! - [`Topic`]: a named news category
//! - [`Article`]: a single news item, in either its list shape or its
//!   summary shape (see below)
//! - [`DailySummary`]: the articles of one topic for one calendar date,
//!   with an optional generated synopsis
//! - [`TopicDetail`]: a topic together with all of its articles
//!
//! Nothing here is ever mutated after deserialization; a refetch replaces
//! the whole value.

use serde::{Deserialize, Serialize};

/// A named news category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Topic {
    pub id: i64,
    pub name: String,
}

/// A single news item.
///
/// The API returns articles in two shapes. The per-topic listing carries
/// `source`, `topicId` and `topicName`; articles embedded in a daily summary
/// carry a `topics` list instead. Both decode into this struct, with the
/// fields of the other shape left empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    /// Link to the original story. Empty strings are treated as absent.
    #[serde(default)]
    pub url: Option<String>,
    /// Publisher name, when the listing provides one.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, alias = "topic_id")]
    pub topic_id: Option<i64>,
    #[serde(default, alias = "topic_name")]
    pub topic_name: Option<String>,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl Article {
    /// The article URL, if one is present and non-empty.
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

/// One topic's articles for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DailySummary {
    pub id: i64,
    /// ISO date (`YYYY-MM-DD`), used both as display key and grouping key.
    pub date: String,
    /// Generated synopsis; `None` until the summarizer has run.
    pub summary: Option<String>,
    pub topic: Topic,
    /// Articles in server order.
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// A topic with its full article list, as served by `/topic/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TopicDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_summary_deserialization() {
        let json = r#"[{
            "id": 1,
            "date": "2024-01-01",
            "summary": "x",
            "topic": {"id": 1, "name": "tech"},
            "articles": [{"id": 1, "title": "A", "url": "http://a", "topics": []}]
        }]"#;

        let summaries: Vec<DailySummary> = serde_json::from_str(json).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].date, "2024-01-01");
        assert_eq!(summaries[0].summary.as_deref(), Some("x"));
        assert_eq!(summaries[0].topic.name, "tech");
        assert_eq!(summaries[0].articles[0].link(), Some("http://a"));
    }

    #[test]
    fn test_summary_may_be_null() {
        let json = r#"{"id": 2, "date": "2024-01-02", "summary": null,
                       "topic": {"id": 3, "name": "science"}, "articles": []}"#;
        let summary: DailySummary = serde_json::from_str(json).unwrap();
        assert!(summary.summary.is_none());
        assert!(summary.articles.is_empty());
    }

    #[test]
    fn test_article_list_shape() {
        let json = r#"{"id": 9, "title": "Rust 2024", "url": "https://blog.rust-lang.org",
                       "source": "hn", "topicId": 4, "topicName": "programming"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.source.as_deref(), Some("hn"));
        assert_eq!(article.topic_id, Some(4));
        assert_eq!(article.topic_name.as_deref(), Some("programming"));
        assert!(article.topics.is_empty());
    }

    #[test]
    fn test_article_accepts_snake_case_topic_id() {
        let json = r#"{"id": 9, "title": "t", "topic_id": 7}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.topic_id, Some(7));
        assert!(article.link().is_none());
    }

    #[test]
    fn test_empty_url_is_not_a_link() {
        let json = r#"{"id": 1, "title": "t", "url": ""}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.link().is_none());
    }

    #[test]
    fn test_article_order_is_preserved() {
        let json = r#"{"id": 1, "date": "2024-01-01", "summary": null,
                       "topic": {"id": 1, "name": "tech"},
                       "articles": [{"id": 3, "title": "C"}, {"id": 1, "title": "A"}, {"id": 2, "title": "B"}]}"#;
        let summary: DailySummary = serde_json::from_str(json).unwrap();
        let titles: Vec<&str> = summary.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_topic_detail_deserialization() {
        let json = r#"{"id": 5, "name": "ai", "articles": [{"id": 1, "title": "GPT", "url": "http://g", "topics": [{"id": 5, "name": "ai"}]}]}"#;
        let detail: TopicDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.name, "ai");
        assert_eq!(detail.articles[0].topics[0].id, 5);
    }
}
