//! Optional `created_at` range filter for aggregation queries
//!
//! Bounds are always passed as bind parameters. The fragment only ever
//! contains column names, operators and positional placeholders.

/// Predicate body over `created_at` plus the values for its placeholders.
///
/// `fragment` does not include the `WHERE` keyword; callers add it once
/// through [`DateFilter::where_clause`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub fragment: String,
    pub params: Vec<String>,
}

impl DateFilter {
    /// Build the filter from raw query-string bounds.
    ///
    /// Empty strings count as absent. Values are not validated: a malformed
    /// timestamp is bound as-is and rejected by the database at execution.
    /// An inverted range (`from > to`) is passed through unchanged.
    pub fn build(from: Option<&str>, to: Option<&str>) -> Self {
        let from = from.filter(|v| !v.is_empty());
        let to = to.filter(|v| !v.is_empty());

        let mut filter = Self::default();
        match (from, to) {
            (Some(from), Some(to)) => {
                let lower = filter.push_param(from);
                let upper = filter.push_param(to);
                filter.fragment = format!("created_at BETWEEN {} AND {}", lower, upper);
            }
            (Some(from), None) => {
                let lower = filter.push_param(from);
                filter.fragment = format!("created_at >= {}", lower);
            }
            (None, Some(to)) => {
                let upper = filter.push_param(to);
                filter.fragment = format!("created_at <= {}", upper);
            }
            (None, None) => {}
        }
        filter
    }

    /// Bind a value and return its placeholder. Raw strings are cast so they
    /// compare against the timestamp column.
    fn push_param(&mut self, value: &str) -> String {
        self.params.push(value.to_string());
        format!("${}::timestamptz", self.params.len())
    }

    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty()
    }

    /// `WHERE <fragment>`, or an empty string when there is nothing to filter.
    pub fn where_clause(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.fragment)
        }
    }
}
