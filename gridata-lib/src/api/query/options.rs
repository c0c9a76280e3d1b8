//! Structured query options and their serialized form.

use super::GroupBy;
use super::OrderBy;

/// Structured query options for a list read.
///
/// Filter entries are opaque, pre-formatted predicate fragments; they are
/// combined with logical AND at serialization time. An empty filter list
/// serializes to no `$filter` parameter at all, which is how "no filter"
/// stays distinct from "match nothing".
///
/// # Example
///
/// ```
/// use gridata_lib::api::query::{OrderBy, QueryOptions};
///
/// let query = QueryOptions::new()
///     .filter("age eq 30")
///     .order_by(OrderBy::asc("name"))
///     .top(10)
///     .skip(20)
///     .include_count();
///
/// assert_eq!(
///     query.to_query_string(),
///     "?$filter=age eq 30&$orderby=name asc&$top=10&$skip=20&$count=true"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    filter: Vec<String>,
    order_by: Option<OrderBy>,
    top: Option<u64>,
    skip: Option<u64>,
    count: bool,
    group_by: Option<GroupBy>,
}

impl QueryOptions {
    /// Creates empty query options. These serialize to the empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate fragment to the filter.
    pub fn filter(mut self, fragment: impl Into<String>) -> Self {
        self.filter.push(fragment.into());
        self
    }

    /// Adds several predicate fragments to the filter.
    pub fn filters(mut self, fragments: impl IntoIterator<Item = String>) -> Self {
        self.filter.extend(fragments);
        self
    }

    /// Sets the ordering of results.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    /// Limits the number of records returned (`$top`).
    pub fn top(mut self, n: u64) -> Self {
        self.top = Some(n);
        self
    }

    /// Skips the first `n` matching records (`$skip`).
    pub fn skip(mut self, n: u64) -> Self {
        self.skip = Some(n);
        self
    }

    /// Requests the total count of matching records (`$count=true`).
    ///
    /// The server reports the total in the envelope's `@odata.count` field,
    /// independent of the page size.
    pub fn include_count(mut self) -> Self {
        self.count = true;
        self
    }

    /// Sets a grouping transform (`$apply`).
    pub fn group_by(mut self, group: GroupBy) -> Self {
        self.group_by = Some(group);
        self
    }

    /// Returns `true` if a grouping transform is set.
    pub fn is_grouped(&self) -> bool {
        self.group_by.is_some()
    }

    /// Returns `true` if `$top` or `$skip` is set.
    pub fn is_paginated(&self) -> bool {
        self.top.is_some() || self.skip.is_some()
    }

    /// Serializes to a query string with a leading `?`, or the empty string
    /// when no options are set.
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();

        if !self.filter.is_empty() {
            params.push(format!("$filter={}", self.filter.join(" and ")));
        }
        if let Some(ref order) = self.order_by {
            params.push(format!("$orderby={}", order.to_odata()));
        }
        if let Some(top) = self.top {
            params.push(format!("$top={top}"));
        }
        if let Some(skip) = self.skip {
            params.push(format!("$skip={skip}"));
        }
        if self.count {
            params.push("$count=true".to_string());
        }
        if let Some(ref group) = self.group_by {
            params.push(format!("$apply={}", group.to_apply()));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::query::Aggregate;

    use super::*;

    #[test]
    fn test_empty_options_serialize_to_nothing() {
        assert_eq!(QueryOptions::new().to_query_string(), "");
    }

    #[test]
    fn test_empty_filter_list_omits_filter_key() {
        let query = QueryOptions::new().top(10);
        assert!(!query.to_query_string().contains("$filter"));
    }

    #[test]
    fn test_single_fragment() {
        let query = QueryOptions::new().filter("age eq 30");
        assert_eq!(query.to_query_string(), "?$filter=age eq 30");
    }

    #[test]
    fn test_fragments_joined_with_and() {
        let query = QueryOptions::new()
            .filter("age eq 30")
            .filter("contains(name, 'bob')");
        assert_eq!(
            query.to_query_string(),
            "?$filter=age eq 30 and contains(name, 'bob')"
        );
    }

    #[test]
    fn test_pagination_and_count() {
        let query = QueryOptions::new().top(10).skip(20).include_count();
        assert_eq!(query.to_query_string(), "?$top=10&$skip=20&$count=true");
    }

    #[test]
    fn test_order_by() {
        let query = QueryOptions::new().order_by(OrderBy::desc("salary").then_asc("name"));
        assert_eq!(query.to_query_string(), "?$orderby=salary desc,name asc");
    }

    #[test]
    fn test_grouping_transform() {
        let query = QueryOptions::new()
            .filter("statecode eq 0")
            .group_by(GroupBy::new(["department"]).aggregate(Aggregate::Count));
        assert_eq!(
            query.to_query_string(),
            "?$filter=statecode eq 0&$apply=groupby((department),aggregate($count as $count))"
        );
    }
}
