//! Aggregations over the `users` registration table
//!
//! Every template selects the same `(bucket, row_count)` pair so a single
//! row type can be fetched for all kinds. [`AggregationKind::shape`] turns
//! those pairs into the public record for the kind.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::filter::DateFilter;

/// Insertion point for the optional `WHERE` clause in each template.
const FILTER_SLOT: &str = "{filter}";

const TOTAL_SQL: &str = r#"
    SELECT NULL::text AS bucket, COUNT(*) AS row_count
    FROM users
    {filter}
"#;

// Suffix after the last '@'; an address without '@' maps to itself.
const BY_DOMAIN_SQL: &str = r#"
    SELECT substring(email from '[^@]*$') AS bucket, COUNT(*) AS row_count
    FROM users
    {filter}
    GROUP BY bucket
    ORDER BY row_count DESC, bucket ASC
"#;

const BY_DAY_SQL: &str = r#"
    SELECT to_char(created_at, 'YYYY-MM-DD') AS bucket, COUNT(*) AS row_count
    FROM users
    {filter}
    GROUP BY bucket
    ORDER BY bucket ASC
"#;

const BY_MONTH_SQL: &str = r#"
    SELECT to_char(created_at, 'YYYY-MM') AS bucket, COUNT(*) AS row_count
    FROM users
    {filter}
    GROUP BY bucket
    ORDER BY bucket ASC
"#;

/// Raw row returned by every aggregation template.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BucketRow {
    pub bucket: Option<String>,
    pub row_count: i64,
}

/// Public record shape, one variant per aggregation kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AggregateRow {
    Total { total_users: i64 },
    Domain { domain: Option<String>, users_count: i64 },
    Day { day: Option<String>, registrations: i64 },
    Month { month: Option<String>, registrations: i64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid type")]
pub struct UnknownAggregation(pub String);

/// The closed set of supported aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationKind {
    Total,
    ByDomain,
    ByDay,
    ByMonth,
}

impl AggregationKind {
    pub const ALL: [AggregationKind; 4] = [
        AggregationKind::Total,
        AggregationKind::ByDomain,
        AggregationKind::ByDay,
        AggregationKind::ByMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationKind::Total => "total",
            AggregationKind::ByDomain => "by_domain",
            AggregationKind::ByDay => "by_day",
            AggregationKind::ByMonth => "by_month",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            AggregationKind::Total => TOTAL_SQL,
            AggregationKind::ByDomain => BY_DOMAIN_SQL,
            AggregationKind::ByDay => BY_DAY_SQL,
            AggregationKind::ByMonth => BY_MONTH_SQL,
        }
    }

    /// Final SQL text for this kind with the filter's `WHERE` clause spliced in.
    pub fn compose(&self, filter: &DateFilter) -> String {
        self.template().replace(FILTER_SLOT, &filter.where_clause())
    }

    pub fn shape(&self, rows: Vec<BucketRow>) -> Vec<AggregateRow> {
        rows.into_iter()
            .map(|row| match self {
                AggregationKind::Total => AggregateRow::Total {
                    total_users: row.row_count,
                },
                AggregationKind::ByDomain => AggregateRow::Domain {
                    domain: row.bucket,
                    users_count: row.row_count,
                },
                AggregationKind::ByDay => AggregateRow::Day {
                    day: row.bucket,
                    registrations: row.row_count,
                },
                AggregationKind::ByMonth => AggregateRow::Month {
                    month: row.bucket,
                    registrations: row.row_count,
                },
            })
            .collect()
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationKind {
    type Err = UnknownAggregation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownAggregation(s.to_string()))
    }
}
