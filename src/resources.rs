//! Typed accessors, one per API resource.
//!
//! Each accessor only shapes the request (path and query string) and hands
//! it to a [`JsonSource`]. None of them retry, page or cache; see
//! [`crate::query`] for caching.
//!
//! | Accessor | Path |
//! |----------|------|
//! | [`fetch_topics`] | `/topics/` |
//! | [`fetch_articles_by_topic`] | `/articles/?topic_id=` |
//! | [`get_daily_summaries`] | `/daily-summaries/` |
//! | [`fetch_topic`] | `/topic/{id}/` |
//! | [`fetch_article`] | `/article/{id}/` |

use crate::api::JsonSource;
use crate::error::ApiError;
use crate::models::{Article, DailySummary, Topic, TopicDetail};
use tracing::instrument;
use url::form_urlencoded;

/// Filters accepted by `/daily-summaries/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DailySummaryParams {
    pub date: Option<String>,
    pub topic_id: Option<i64>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl DailySummaryParams {
    /// Build the query string, without the leading `?`.
    ///
    /// Keys appear in the order `date`, `topic_id`, `skip`, `limit`. An empty
    /// `date` and a `topic_id` of `0` are left out like absent values;
    /// `skip`/`limit` are sent whenever present, `0` included.
    pub fn query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(date) = self.date.as_deref().filter(|d| !d.is_empty()) {
            query.append_pair("date", date);
        }
        if let Some(topic_id) = self.topic_id.filter(|id| *id != 0) {
            query.append_pair("topic_id", &topic_id.to_string());
        }
        if let Some(skip) = self.skip {
            query.append_pair("skip", &skip.to_string());
        }
        if let Some(limit) = self.limit {
            query.append_pair("limit", &limit.to_string());
        }
        query.finish()
    }

    /// Request path including the query string, if any.
    pub fn path(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            "/daily-summaries/".to_string()
        } else {
            format!("/daily-summaries/?{query}")
        }
    }
}

/// All topics.
#[instrument(level = "debug", skip_all)]
pub async fn fetch_topics<S: JsonSource>(src: &S) -> Result<Vec<Topic>, ApiError> {
    src.get_json("/topics/").await
}

/// Articles belonging to one topic.
#[instrument(level = "debug", skip(src))]
pub async fn fetch_articles_by_topic<S: JsonSource>(
    src: &S,
    topic_id: i64,
) -> Result<Vec<Article>, ApiError> {
    src.get_json(&format!("/articles/?topic_id={topic_id}")).await
}

/// Daily summaries matching `params`.
#[instrument(level = "debug", skip(src))]
pub async fn get_daily_summaries<S: JsonSource>(
    src: &S,
    params: &DailySummaryParams,
) -> Result<Vec<DailySummary>, ApiError> {
    src.get_json(&params.path()).await
}

/// One topic with all of its articles.
#[instrument(level = "debug", skip(src))]
pub async fn fetch_topic<S: JsonSource>(src: &S, topic_id: i64) -> Result<TopicDetail, ApiError> {
    src.get_json(&format!("/topic/{topic_id}/")).await
}

/// A single article.
#[instrument(level = "debug", skip(src))]
pub async fn fetch_article<S: JsonSource>(src: &S, article_id: i64) -> Result<Article, ApiError> {
    src.get_json(&format!("/article/{article_id}/")).await
}
