//! # Trend Digest
//!
//! A terminal viewer for the Trend Engine news backend: topics, the articles
//! filed under each topic, and the per-topic daily digest summaries.
//!
//! ## Layers
//!
//! 1. **API client** ([`api`]): GET with JSON headers and credentials; any
//!    non-2xx status is an error carrying the status code
//! 2. **Resource accessors** ([`resources`]): one request shape per endpoint
//! 3. **Queries** ([`query`]): keyed, cached, deduplicated fetches exposing a
//!    loading / error / data state
//! 4. **Views** ([`views`]): text renderers with local expand/collapse state
//! 5. **Browse** ([`browse`]): an interactive loop over a view
//!
//! ## Endpoints
//!
//! | Path | Query | Returns |
//! |------|-------|---------|
//! | `/topics/` | none | [`models::Topic`] list |
//! | `/articles/` | `topic_id` | [`models::Article`] list |
//! | `/daily-summaries/` | `date`, `topic_id`, `skip`, `limit` | [`models::DailySummary`] list |
//! | `/topic/{id}/` | none | [`models::TopicDetail`] |
//! | `/article/{id}/` | none | [`models::Article`] |

pub mod api;
pub mod browse;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod resources;
pub mod utils;
pub mod views;

pub use api::{ApiClient, JsonSource, RequestOptions};
pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use query::{QueryClient, QueryKey, QueryState};
pub use resources::DailySummaryParams;
