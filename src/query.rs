//! Cached, keyed queries over the resource accessors.
//!
//! A query is identified by a [`QueryKey`] (resource name plus parameters)
//! and resolves to a [`QueryState`]. Caching, staleness and deduplication of
//! concurrent identical requests are handled by `moka`:
//!
//! - a cached entry younger than the cache's staleness window is returned
//!   without touching the network
//! - an absent or stale entry is refetched
//! - concurrent callers asking for the same key while a fetch is in flight
//!   wait on that fetch instead of issuing their own (`try_get_with`)
//!
//! [`QueryClient`] exposes one `use_*` method per resource. The topic list is
//! fresh for five minutes by default; everything else is stale as soon as it
//! lands, so each new view refetches it.

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{Article, DailySummary, Topic, TopicDetail};
use crate::resources::{self, DailySummaryParams};
use moka::future::Cache;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

const MAX_ENTRIES_PER_RESOURCE: u64 = 1_000;

/// Identity of a query: the resource plus every parameter that shapes the request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Topics,
    Articles(i64),
    DailySummaries(DailySummaryParams),
    Topic(i64),
    Article(i64),
}

impl QueryKey {
    /// The key as a list of parts, e.g. `["articles", "7"]`.
    pub fn parts(&self) -> Vec<String> {
        match self {
            Self::Topics => vec!["topics".to_string()],
            Self::Articles(topic_id) => vec!["articles".to_string(), topic_id.to_string()],
            Self::DailySummaries(params) => {
                let opt = |v: Option<String>| v.unwrap_or_default();
                vec![
                    "daily-summaries".to_string(),
                    opt(params.date.clone()),
                    opt(params.topic_id.map(|v| v.to_string())),
                    opt(params.skip.map(|v| v.to_string())),
                    opt(params.limit.map(|v| v.to_string())),
                ]
            }
            Self::Topic(id) => vec!["topic".to_string(), id.to_string()],
            Self::Article(id) => vec!["article".to_string(), id.to_string()],
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.parts().join(", "))
    }
}

/// Three-state result of a query.
#[derive(Debug)]
pub enum QueryState<T> {
    Loading,
    Error(Arc<ApiError>),
    Success(Arc<T>),
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Loading => Self::Loading,
            Self::Error(e) => Self::Error(Arc::clone(e)),
            Self::Success(v) => Self::Success(Arc::clone(v)),
        }
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> QueryState<T> {
    /// The fetched value, if the query succeeded.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(v) => Some(v),
            _ => None,
        }
    }

    /// `true` until the query has either succeeded or failed.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure, if the query failed. There is never both data and an error.
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl<T> From<Result<Arc<T>, Arc<ApiError>>> for QueryState<T> {
    fn from(res: Result<Arc<T>, Arc<ApiError>>) -> Self {
        match res {
            Ok(v) => Self::Success(v),
            Err(e) => Self::Error(e),
        }
    }
}

struct Fetched<V> {
    value: Arc<V>,
    fetched_at: Instant,
}

impl<V> Clone for Fetched<V> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            fetched_at: self.fetched_at,
        }
    }
}

/// A keyed response cache for one resource type.
pub struct QueryCache<V> {
    name: &'static str,
    stale_time: Duration,
    entries: Cache<QueryKey, Fetched<V>>,
}

impl<V> fmt::Debug for QueryCache<V>
where
    V: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("name", &self.name)
            .field("stale_time", &self.stale_time)
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl<V> QueryCache<V>
where
    V: Send + Sync + 'static,
{
    /// `stale_time` is how long an entry is served without refetching;
    /// `retention` is how long it is kept at all.
    pub fn new(name: &'static str, stale_time: Duration, retention: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(MAX_ENTRIES_PER_RESOURCE)
            .time_to_live(retention.max(stale_time))
            .build();
        Self {
            name,
            stale_time,
            entries,
        }
    }

    /// How long a cached entry is served without refetching.
    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Resolve `key`, running `fetcher` only if there is no fresh entry and
    /// no fetch for the same key already in flight.
    pub async fn fetch<F>(&self, key: QueryKey, fetcher: F) -> QueryState<V>
    where
        F: Future<Output = Result<V, ApiError>>,
    {
        if let Some(entry) = self.entries.get(&key).await {
            if entry.fetched_at.elapsed() < self.stale_time {
                debug!(cache = self.name, %key, "Query cache hit");
                return QueryState::Success(entry.value);
            }
            debug!(cache = self.name, %key, "Cached entry is stale; refetching");
            self.entries.invalidate(&key).await;
        }

        let name = self.name;
        let res = self
            .entries
            .try_get_with(key.clone(), async move {
                debug!(cache = name, %key, "Fetching");
                fetcher.await.map(|value| Fetched {
                    value: Arc::new(value),
                    fetched_at: Instant::now(),
                })
            })
            .await;

        res.map(|entry| entry.value).into()
    }

    /// Drop every cached entry so the next call refetches.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

/// Entry point for all data fetching done by the views.
#[derive(Debug)]
pub struct QueryClient {
    api: ApiClient,
    topics: QueryCache<Vec<Topic>>,
    articles: QueryCache<Vec<Article>>,
    summaries: QueryCache<Vec<DailySummary>>,
    topic_details: QueryCache<TopicDetail>,
    single_articles: QueryCache<Article>,
}

impl QueryClient {
    /// One cache per resource. Topics use the configured staleness window,
    /// everything else is refetched on every new call; all entries are
    /// evicted after `cache_ttl_secs`.
    pub fn new(api: ApiClient, config: &Config) -> Self {
        let retention = config.cache_ttl();
        Self {
            api,
            topics: QueryCache::new("topics", config.topics_stale_time(), retention),
            articles: QueryCache::new("articles", Duration::ZERO, retention),
            summaries: QueryCache::new("daily-summaries", Duration::ZERO, retention),
            topic_details: QueryCache::new("topic", Duration::ZERO, retention),
            single_articles: QueryCache::new("article", Duration::ZERO, retention),
        }
    }

    /// Build the API client and the query client from one config.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Ok(Self::new(ApiClient::new(config)?, config))
    }

    /// The underlying HTTP client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// All topics, key `["topics"]`.
    ///
    /// Served from cache for the configured topics staleness window (five
    /// minutes by default).
    #[instrument(level = "debug", skip(self))]
    pub async fn use_topics(&self) -> QueryState<Vec<Topic>> {
        self.topics
            .fetch(QueryKey::Topics, resources::fetch_topics(&self.api))
            .await
    }

    /// Articles of one topic, key `["articles", topic_id]`.
    ///
    /// # Arguments
    ///
    /// * `topic_id` - Topic whose articles to list
    ///
    /// # Returns
    ///
    /// A finished [`QueryState`]: the article list or the request failure.
    /// Callers asking for the same topic concurrently share one request.
    #[instrument(level = "debug", skip(self))]
    pub async fn use_articles(&self, topic_id: i64) -> QueryState<Vec<Article>> {
        self.articles
            .fetch(
                QueryKey::Articles(topic_id),
                resources::fetch_articles_by_topic(&self.api, topic_id),
            )
            .await
    }

    /// Daily summaries matching `params`, keyed by every filter value.
    #[instrument(level = "debug", skip(self))]
    pub async fn use_daily_summaries(
        &self,
        params: &DailySummaryParams,
    ) -> QueryState<Vec<DailySummary>> {
        self.summaries
            .fetch(
                QueryKey::DailySummaries(params.clone()),
                resources::get_daily_summaries(&self.api, params),
            )
            .await
    }

    /// One topic with its articles, key `["topic", topic_id]`.
    #[instrument(level = "debug", skip(self))]
    pub async fn use_topic(&self, topic_id: i64) -> QueryState<TopicDetail> {
        self.topic_details
            .fetch(QueryKey::Topic(topic_id), resources::fetch_topic(&self.api, topic_id))
            .await
    }

    /// One article, key `["article", article_id]`.
    #[instrument(level = "debug", skip(self))]
    pub async fn use_article(&self, article_id: i64) -> QueryState<Article> {
        self.single_articles
            .fetch(
                QueryKey::Article(article_id),
                resources::fetch_article(&self.api, article_id),
            )
            .await
    }

    /// Forget every cached response.
    pub fn invalidate_all(&self) {
        self.topics.invalidate_all();
        self.articles.invalidate_all();
        self.summaries.invalidate_all();
        self.topic_details.invalidate_all();
        self.single_articles.invalidate_all();
    }
}
