// Tabular dataset domain model
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("column '{column}' has {found} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
}

/// Per-column storage. A column is either wholly numeric or wholly textual,
/// decided once when the column is built.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Number(Vec<f64>),
    Text(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn number(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Number(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Text(values),
        }
    }

    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Number(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }
}

/// An ordered sequence of named, equally sized columns. Replaced wholesale on
/// upload, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset, enforcing the two invariants: every column shares one
    /// row count and column names are unique.
    pub fn new(columns: Vec<Column>) -> Result<Self, DatasetError> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            for column in &columns {
                if column.len() != expected {
                    return Err(DatasetError::ColumnLengthMismatch {
                        column: column.name.clone(),
                        expected,
                        found: column.len(),
                    });
                }
            }
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(DatasetError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self { columns })
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The values of a numeric column, or None if the column is missing or
    /// textual.
    pub fn numeric(&self, name: &str) -> Option<&[f64]> {
        match self.column(name).map(|c| &c.values) {
            Some(ColumnValues::Number(v)) => Some(v),
            _ => None,
        }
    }

    /// The values of a text column, or None if the column is missing or
    /// numeric.
    pub fn text(&self, name: &str) -> Option<&[String]> {
        match self.column(name).map(|c| &c.values) {
            Some(ColumnValues::Text(v)) => Some(v),
            _ => None,
        }
    }

    /// Arithmetic mean of a numeric column. None for missing or textual
    /// columns and for columns with no rows.
    pub fn mean(&self, name: &str) -> Option<f64> {
        let values = self.numeric(name)?;
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_mismatched_row_counts() {
        let result = Dataset::new(vec![
            Column::number("x", vec![1.0, 2.0]),
            Column::number("y", vec![1.0]),
        ]);
        assert!(matches!(
            result,
            Err(DatasetError::ColumnLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_column_names() {
        let result = Dataset::new(vec![
            Column::number("x", vec![1.0]),
            Column::text("x", vec!["a".to_string()]),
        ]);
        assert!(matches!(result, Err(DatasetError::DuplicateColumn(name)) if name == "x"));
    }

    #[test]
    fn test_row_count_and_lookup() {
        let dataset = Dataset::new(vec![
            Column::number("value", vec![1.0, 2.0, 3.0]),
            Column::text("label", vec!["a".into(), "b".into(), "c".into()]),
        ])
        .unwrap();

        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.numeric("value"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(dataset.text("label").map(|v| v.len()), Some(3));
        assert!(dataset.numeric("label").is_none());
        assert!(dataset.column("missing").is_none());
    }

    #[test]
    fn test_mean() {
        let dataset = Dataset::new(vec![
            Column::number("value", vec![2.0, 4.0, 6.0]),
            Column::text("label", vec!["a".into(), "b".into(), "c".into()]),
        ])
        .unwrap();

        assert_eq!(dataset.mean("value"), Some(4.0));
        assert_eq!(dataset.mean("label"), None);
        assert_eq!(dataset.mean("missing"), None);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::new(Vec::new()).unwrap();
        assert_eq!(dataset.row_count(), 0);
        assert!(dataset.columns().is_empty());
    }
}
