//! Predicate fragments and the built-in column filter parser.
//!
//! Filters travel through the system as opaque, pre-formatted predicate
//! fragments. Fragments from different columns are combined with logical
//! AND when the query string is serialized; a column that contributes no
//! fragment is simply absent from the aggregate filter.

/// The comparison applied by a [`SimpleFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `field eq value`
    Equals,
    /// `contains(field, value)`
    Contains,
    /// `startswith(field, value)`
    StartsWith,
    /// `endswith(field, value)`
    EndsWith,
}

/// A typed input value for a column filter form.
///
/// Text values render as quoted OData string literals; numeric values render
/// unquoted.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Free-text input.
    Text(String),
    /// Integer input.
    Int(i64),
    /// Floating-point input.
    Float(f64),
}

impl FilterValue {
    /// Returns `true` when the input carries nothing to filter on.
    fn is_blank(&self) -> bool {
        matches!(self, FilterValue::Text(s) if s.is_empty())
    }

    /// Renders the OData literal for this value.
    fn to_literal(&self) -> String {
        match self {
            FilterValue::Text(s) => escape_string(s),
            FilterValue::Int(n) => n.to_string(),
            FilterValue::Float(n) => n.to_string(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

/// Built-in parser for simple text/number column filters.
///
/// Given a field name and a comparison, produces a single predicate fragment
/// for the typed input, or no fragment at all when the input is empty or
/// absent. Omission, not a blank predicate, is what distinguishes "no
/// filter" from "match nothing".
///
/// # Example
///
/// ```
/// use gridata_lib::api::query::{Comparison, FilterValue, SimpleFilter};
///
/// let filter = SimpleFilter::new("name", Comparison::Contains);
/// let input = FilterValue::from("bob");
///
/// assert_eq!(filter.parse(Some(&input)), vec!["contains(name, 'bob')"]);
/// assert_eq!(filter.parse(None), Vec::<String>::new());
/// ```
#[derive(Debug, Clone)]
pub struct SimpleFilter {
    prop: String,
    comparison: Comparison,
}

impl SimpleFilter {
    /// Creates a parser for the given field and comparison.
    pub fn new(prop: impl Into<String>, comparison: Comparison) -> Self {
        Self {
            prop: prop.into(),
            comparison,
        }
    }

    /// The field this filter applies to.
    pub fn prop(&self) -> &str {
        &self.prop
    }

    /// Parses the typed input into predicate fragments.
    pub fn parse(&self, value: Option<&FilterValue>) -> Vec<String> {
        let Some(value) = value else {
            return Vec::new();
        };
        if value.is_blank() {
            return Vec::new();
        }

        let literal = value.to_literal();
        let fragment = match self.comparison {
            Comparison::Equals => format!("{} eq {}", self.prop, literal),
            Comparison::Contains => format!("contains({}, {})", self.prop, literal),
            Comparison::StartsWith => format!("startswith({}, {})", self.prop, literal),
            Comparison::EndsWith => format!("endswith({}, {})", self.prop, literal),
        };
        vec![fragment]
    }
}

/// Escapes a string for use as an OData literal.
///
/// Literals are enclosed in single quotes, with internal single quotes
/// doubled.
pub fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_string() {
        let filter = SimpleFilter::new("name", Comparison::Contains);
        assert_eq!(
            filter.parse(Some(&FilterValue::from("bob"))),
            vec!["contains(name, 'bob')"]
        );
    }

    #[test]
    fn test_equals_number_unquoted() {
        let filter = SimpleFilter::new("age", Comparison::Equals);
        assert_eq!(filter.parse(Some(&FilterValue::from(30i64))), vec!["age eq 30"]);
    }

    #[test]
    fn test_equals_string_quoted() {
        let filter = SimpleFilter::new("name", Comparison::Equals);
        assert_eq!(
            filter.parse(Some(&FilterValue::from("Ana"))),
            vec!["name eq 'Ana'"]
        );
    }

    #[test]
    fn test_starts_and_ends_with() {
        let starts = SimpleFilter::new("name", Comparison::StartsWith);
        let ends = SimpleFilter::new("name", Comparison::EndsWith);
        assert_eq!(
            starts.parse(Some(&FilterValue::from("A"))),
            vec!["startswith(name, 'A')"]
        );
        assert_eq!(
            ends.parse(Some(&FilterValue::from("z"))),
            vec!["endswith(name, 'z')"]
        );
    }

    #[test]
    fn test_empty_input_yields_no_fragment() {
        let filter = SimpleFilter::new("name", Comparison::Contains);
        assert!(filter.parse(Some(&FilterValue::from(""))).is_empty());
        assert!(filter.parse(None).is_empty());
    }

    #[test]
    fn test_float_literal() {
        let filter = SimpleFilter::new("rate", Comparison::Equals);
        assert_eq!(
            filter.parse(Some(&FilterValue::from(1.5f64))),
            vec!["rate eq 1.5"]
        );
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("O'Brien"), "'O''Brien'");
        let filter = SimpleFilter::new("name", Comparison::Equals);
        assert_eq!(
            filter.parse(Some(&FilterValue::from("O'Brien"))),
            vec!["name eq 'O''Brien'"]
        );
    }
}
