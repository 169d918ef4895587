//! Database access for user aggregations
//!
//! The HTTP layer only sees [`QueryExecutor`]; the Postgres pool is one
//! implementation of it.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::aggregation::{AggregateRow, AggregationKind, BucketRow};
use crate::filter::DateFilter;

/// Runs a parameterized aggregation query.
///
/// Placeholders are positional (`$1`, `$2`, ...) and `params` are bound in
/// slice order. SQL text never contains request values.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn fetch_buckets(&self, sql: &str, params: &[String]) -> Result<Vec<BucketRow>, sqlx::Error>;
}

#[async_trait]
impl QueryExecutor for PgPool {
    async fn fetch_buckets(&self, sql: &str, params: &[String]) -> Result<Vec<BucketRow>, sqlx::Error> {
        let mut query = sqlx::query_as::<_, BucketRow>(sql);
        for param in params {
            query = query.bind(param.as_str());
        }
        query.fetch_all(self).await
    }
}

/// Compose the query for `kind`, run it once and shape the rows.
pub async fn aggregate_users(
    executor: &dyn QueryExecutor,
    kind: AggregationKind,
    filter: &DateFilter,
) -> Result<Vec<AggregateRow>, sqlx::Error> {
    let sql = kind.compose(filter);
    tracing::debug!(kind = %kind, params = filter.params.len(), "Running user aggregation");

    let rows = executor.fetch_buckets(&sql, &filter.params).await?;
    Ok(kind.shape(rows))
}
