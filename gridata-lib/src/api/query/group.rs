//! Grouping and aggregation transforms.
//!
//! A grouped read trades flat pagination for an OData `$apply` transform:
//! group by one or more properties, then compute aggregates within each
//! group. The default aggregate is a row count aliased `$count`, matching
//! the shape grouped table views consume.

/// An aggregation computed within each group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregate {
    /// Count of rows in the group, aliased `$count`.
    Count,
    /// Sum of a numeric field.
    Sum { field: String, alias: String },
    /// Average of a numeric field.
    Avg { field: String, alias: String },
    /// Minimum value of a field.
    Min { field: String, alias: String },
    /// Maximum value of a field.
    Max { field: String, alias: String },
}

impl Aggregate {
    /// Creates a sum aggregate.
    pub fn sum(field: impl Into<String>, alias: impl Into<String>) -> Self {
        Aggregate::Sum {
            field: field.into(),
            alias: alias.into(),
        }
    }

    /// Creates an average aggregate.
    pub fn avg(field: impl Into<String>, alias: impl Into<String>) -> Self {
        Aggregate::Avg {
            field: field.into(),
            alias: alias.into(),
        }
    }

    /// Creates a minimum aggregate.
    pub fn min(field: impl Into<String>, alias: impl Into<String>) -> Self {
        Aggregate::Min {
            field: field.into(),
            alias: alias.into(),
        }
    }

    /// Creates a maximum aggregate.
    pub fn max(field: impl Into<String>, alias: impl Into<String>) -> Self {
        Aggregate::Max {
            field: field.into(),
            alias: alias.into(),
        }
    }

    fn to_apply(&self) -> String {
        match self {
            Aggregate::Count => "$count as $count".to_string(),
            Aggregate::Sum { field, alias } => format!("{field} with sum as {alias}"),
            Aggregate::Avg { field, alias } => format!("{field} with average as {alias}"),
            Aggregate::Min { field, alias } => format!("{field} with min as {alias}"),
            Aggregate::Max { field, alias } => format!("{field} with max as {alias}"),
        }
    }
}

/// A group-by transform over one or more properties.
///
/// # Example
///
/// ```
/// use gridata_lib::api::query::{Aggregate, GroupBy};
///
/// let group = GroupBy::new(["department"]);
/// assert_eq!(
///     group.to_apply(),
///     "groupby((department),aggregate($count as $count))"
/// );
///
/// let group = GroupBy::new(["department"]).aggregate(Aggregate::sum("salary", "total"));
/// assert_eq!(
///     group.to_apply(),
///     "groupby((department),aggregate(salary with sum as total))"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBy {
    properties: Vec<String>,
    aggregates: Vec<Aggregate>,
}

impl GroupBy {
    /// Creates a group-by over the given properties.
    ///
    /// With no explicit aggregates, serialization falls back to the default
    /// `$count as $count`.
    pub fn new<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
            aggregates: Vec::new(),
        }
    }

    /// Adds a named aggregate.
    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregates.push(aggregate);
        self
    }

    /// The grouped properties.
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Renders the `$apply` expression.
    pub fn to_apply(&self) -> String {
        let aggregates = if self.aggregates.is_empty() {
            Aggregate::Count.to_apply()
        } else {
            self.aggregates
                .iter()
                .map(Aggregate::to_apply)
                .collect::<Vec<_>>()
                .join(",")
        };
        format!(
            "groupby(({}),aggregate({}))",
            self.properties.join(","),
            aggregates
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_count_aggregate() {
        let group = GroupBy::new(["department"]);
        assert_eq!(
            group.to_apply(),
            "groupby((department),aggregate($count as $count))"
        );
    }

    #[test]
    fn test_multiple_properties() {
        let group = GroupBy::new(["department", "site"]);
        assert_eq!(
            group.to_apply(),
            "groupby((department,site),aggregate($count as $count))"
        );
    }

    #[test]
    fn test_named_aggregates() {
        let group = GroupBy::new(["department"])
            .aggregate(Aggregate::sum("salary", "total"))
            .aggregate(Aggregate::Count);
        assert_eq!(
            group.to_apply(),
            "groupby((department),aggregate(salary with sum as total,$count as $count))"
        );
    }
}
