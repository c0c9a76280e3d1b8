//! Table view-state and its reconciliation into query options.

use std::collections::BTreeMap;

use crate::api::query::Direction;
use crate::api::query::GroupBy;
use crate::api::query::OrderBy;
use crate::api::query::QueryOptions;

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page index.
    pub page_index: u64,
    /// Rows per page.
    pub page_size: u64,
}

impl Pagination {
    /// Creates pagination at the first page with the given page size.
    pub fn new(page_size: u64) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }

    /// Number of rows to skip for the current page.
    pub fn skip(&self) -> u64 {
        self.page_index * self.page_size
    }
}

/// The complete client-side table interaction state.
///
/// Created with defaults at table mount and mutated only through
/// [`ViewState::reconcile`], never directly by rendering code.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Per-column predicate fragments. A column present with an empty list
    /// contributes nothing to the filter but is a distinct state from the
    /// column being absent.
    pub filters: BTreeMap<String, Vec<String>>,
    /// Ordered sort rules, primary first.
    pub sort: Vec<(String, Direction)>,
    /// Current page and page size.
    pub pagination: Pagination,
    /// Columns to group by; non-empty switches the view to grouped mode.
    pub grouping: Vec<String>,
}

impl ViewState {
    /// Creates the default state: no filters, no sort, no grouping, first
    /// page at the given page size.
    pub fn new(page_size: u64) -> Self {
        Self {
            filters: BTreeMap::new(),
            sort: Vec::new(),
            pagination: Pagination::new(page_size),
            grouping: Vec::new(),
        }
    }

    /// The single state-transition function.
    ///
    /// Pure and deterministic: it is invoked on every state-changing UI
    /// event and its result becomes the new authoritative state. One
    /// self-healing rule applies: a change to the filter set resets the page
    /// index to zero, because "page N" is meaningless under a different
    /// result set. Sort, grouping, and explicit pagination changes pass
    /// through verbatim.
    pub fn reconcile(&self, mut next: ViewState) -> ViewState {
        if next.filters != self.filters {
            next.pagination.page_index = 0;
        }
        next
    }

    /// Maps this state to the query options for the next read.
    ///
    /// Flat mode sends the AND-combined filter fragments, the sort order,
    /// `$top`/`$skip` for the current page, and requests the total count.
    /// Grouped mode instead carries a group-by transform with a `$count`
    /// aggregate; filters still narrow the grouped input, but flat
    /// pagination does not apply.
    pub fn query_options(&self) -> QueryOptions {
        let fragments: Vec<String> = self.filters.values().flatten().cloned().collect();

        if !self.grouping.is_empty() {
            return QueryOptions::new()
                .filters(fragments)
                .group_by(GroupBy::new(self.grouping.iter().cloned()));
        }

        let mut options = QueryOptions::new()
            .filters(fragments)
            .top(self.pagination.page_size)
            .skip(self.pagination.skip())
            .include_count();
        if let Some(order) = order_from_sort(&self.sort) {
            options = options.order_by(order);
        }
        options
    }
}

fn order_from_sort(sort: &[(String, Direction)]) -> Option<OrderBy> {
    let mut rules = sort.iter();
    let (field, direction) = rules.next()?;
    let mut order = match direction {
        Direction::Asc => OrderBy::asc(field),
        Direction::Desc => OrderBy::desc(field),
    };
    for (field, direction) in rules {
        order = match direction {
            Direction::Asc => order.then_asc(field),
            Direction::Desc => order.then_desc(field),
        };
    }
    Some(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_filter(mut state: ViewState, column: &str, fragments: &[&str]) -> ViewState {
        state
            .filters
            .insert(column.to_string(), fragments.iter().map(|s| s.to_string()).collect());
        state
    }

    #[test]
    fn test_filter_change_resets_page_index() {
        let old = ViewState::new(25);
        let mut next = with_filter(old.clone(), "age", &["age eq 30"]);
        next.pagination.page_index = 4;

        let reconciled = old.reconcile(next);
        assert_eq!(reconciled.pagination.page_index, 0);
        assert_eq!(reconciled.filters["age"], vec!["age eq 30"]);
    }

    #[test]
    fn test_unchanged_filters_keep_page_index() {
        let old = with_filter(ViewState::new(25), "age", &["age eq 30"]);
        let mut next = old.clone();
        next.pagination.page_index = 7;

        let reconciled = old.reconcile(next);
        assert_eq!(reconciled.pagination.page_index, 7);
    }

    #[test]
    fn test_sort_change_does_not_reset_page() {
        let mut old = ViewState::new(25);
        old.pagination.page_index = 3;
        let mut next = old.clone();
        next.sort = vec![("name".to_string(), Direction::Asc)];

        let reconciled = old.reconcile(next);
        assert_eq!(reconciled.pagination.page_index, 3);
        assert_eq!(reconciled.sort.len(), 1);
    }

    #[test]
    fn test_grouping_change_does_not_reset_page() {
        let mut old = ViewState::new(25);
        old.pagination.page_index = 2;
        let mut next = old.clone();
        next.grouping = vec!["department".to_string()];

        let reconciled = old.reconcile(next);
        assert_eq!(reconciled.pagination.page_index, 2);
    }

    #[test]
    fn test_removing_a_filter_resets_page_index() {
        let old = with_filter(ViewState::new(25), "age", &["age eq 30"]);
        let mut next = old.clone();
        next.filters.remove("age");
        next.pagination.page_index = 5;

        let reconciled = old.reconcile(next);
        assert_eq!(reconciled.pagination.page_index, 0);
    }

    #[test]
    fn test_reconcile_is_deterministic() {
        let old = ViewState::new(10);
        let mut next = with_filter(old.clone(), "name", &["contains(name, 'a')"]);
        next.pagination.page_index = 9;

        let first = old.reconcile(next.clone());
        let second = old.reconcile(next);
        assert_eq!(first, second);
    }

    #[test]
    fn test_flat_query_options() {
        let mut state = with_filter(ViewState::new(10), "age", &["age eq 30"]);
        state.pagination.page_index = 2;
        state.sort = vec![("name".to_string(), Direction::Desc)];

        let qs = state.query_options().to_query_string();
        assert_eq!(
            qs,
            "?$filter=age eq 30&$orderby=name desc&$top=10&$skip=20&$count=true"
        );
    }

    #[test]
    fn test_empty_filters_emit_no_filter_key() {
        let qs = ViewState::new(10).query_options().to_query_string();
        assert!(!qs.contains("$filter"));
    }

    #[test]
    fn test_column_with_empty_fragment_list_emits_no_filter_key() {
        let state = with_filter(ViewState::new(10), "age", &[]);
        let qs = state.query_options().to_query_string();
        assert!(!qs.contains("$filter"));
    }

    #[test]
    fn test_grouped_query_options() {
        let mut state = ViewState::new(10);
        state.pagination.page_index = 3;
        state.grouping = vec!["department".to_string()];

        let options = state.query_options();
        assert!(options.is_grouped());
        assert!(!options.is_paginated());

        let qs = options.to_query_string();
        assert_eq!(
            qs,
            "?$apply=groupby((department),aggregate($count as $count))"
        );
    }

    #[test]
    fn test_grouped_query_keeps_filters() {
        let mut state = with_filter(ViewState::new(10), "age", &["age eq 30"]);
        state.grouping = vec!["department".to_string()];

        let qs = state.query_options().to_query_string();
        assert_eq!(
            qs,
            "?$filter=age eq 30&$apply=groupby((department),aggregate($count as $count))"
        );
    }

    #[test]
    fn test_multi_column_filters_combined_in_column_order() {
        let state = with_filter(
            with_filter(ViewState::new(10), "name", &["contains(name, 'a')"]),
            "age",
            &["age eq 30"],
        );
        let qs = state.query_options().to_query_string();
        // BTreeMap iterates columns in name order: age before name.
        assert!(qs.contains("$filter=age eq 30 and contains(name, 'a')"));
    }
}
