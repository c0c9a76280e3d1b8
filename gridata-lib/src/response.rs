//! Response envelope for read operations.

use serde::Deserialize;

/// The wrapper object returned by read operations.
///
/// List reads deserialize into `Envelope<Vec<T>>`; create responses into
/// `Envelope<T>`. The `count` field carries the server-reported total of
/// matching rows, independent of page size, and is present only when
/// `$count=true` was requested.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<V> {
    /// The payload rows (or row, for create responses).
    pub value: V,
    /// Total matching rows server-side, present iff the count was requested.
    #[serde(rename = "@odata.count")]
    pub count: Option<u64>,
}

/// A row of a grouped read: the grouped key properties plus the `$count`
/// aggregate computed for the group.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupRow<T> {
    /// The grouped property values.
    #[serde(flatten)]
    pub key: T,
    /// Number of rows in the group.
    #[serde(rename = "$count")]
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Employee {
        name: String,
    }

    #[test]
    fn test_envelope_with_count() {
        let envelope: Envelope<Vec<Employee>> = serde_json::from_value(json!({
            "value": [{"name": "Ana"}, {"name": "Bob"}],
            "@odata.count": 123
        }))
        .unwrap();
        assert_eq!(envelope.value.len(), 2);
        assert_eq!(envelope.count, Some(123));
    }

    #[test]
    fn test_envelope_without_count() {
        let envelope: Envelope<Vec<Employee>> = serde_json::from_value(json!({
            "value": []
        }))
        .unwrap();
        assert!(envelope.value.is_empty());
        assert_eq!(envelope.count, None);
    }

    #[derive(Debug, Deserialize)]
    struct DepartmentKey {
        department: String,
    }

    #[test]
    fn test_group_row() {
        let row: GroupRow<DepartmentKey> = serde_json::from_value(json!({
            "department": "Sales",
            "$count": 7
        }))
        .unwrap();
        assert_eq!(row.key.department, "Sales");
        assert_eq!(row.count, 7);
    }
}
