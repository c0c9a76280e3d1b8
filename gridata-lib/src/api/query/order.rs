//! Ordering types for list-read queries.

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// The OData keyword for this direction.
    pub fn as_odata(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Specifies the ordering of query results.
///
/// Multiple fields can be chained together for secondary, tertiary, etc.
/// sorting.
///
/// # Example
///
/// ```
/// use gridata_lib::api::query::OrderBy;
///
/// // Single field ordering
/// let order = OrderBy::desc("salary");
///
/// // Multiple field ordering
/// let order = OrderBy::desc("salary")
///     .then_asc("name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    fields: Vec<(String, Direction)>,
}

impl OrderBy {
    /// Creates an ascending order on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Asc)],
        }
    }

    /// Creates a descending order on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Desc)],
        }
    }

    /// Adds a secondary ascending order on a field.
    pub fn then_asc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Asc));
        self
    }

    /// Adds a secondary descending order on a field.
    pub fn then_desc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Desc));
        self
    }

    /// Returns the ordered fields with their directions.
    pub fn fields(&self) -> &[(String, Direction)] {
        &self.fields
    }

    /// Renders the `$orderby` expression: `field dir,field dir,...`.
    pub fn to_odata(&self) -> String {
        self.fields
            .iter()
            .map(|(field, direction)| format!("{} {}", field, direction.as_odata()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by() {
        let order = OrderBy::desc("salary").then_asc("name");
        assert_eq!(order.to_odata(), "salary desc,name asc");
    }
}
