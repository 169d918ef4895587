pub mod aggregation;
pub mod filter;
pub mod repository;

pub use aggregation::{AggregateRow, AggregationKind, BucketRow};
pub use filter::DateFilter;
pub use repository::{aggregate_users, QueryExecutor};
