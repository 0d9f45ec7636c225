// CSV decoding into the tabular dataset model
use crate::domain::dataset::{Column, Dataset, DatasetError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("no columns to parse")]
    NoColumns,
    #[error("{0}")]
    Read(#[from] csv::Error),
    #[error("{0}")]
    Shape(#[from] DatasetError),
}

/// Parse CSV bytes into a dataset. The first record is the header row; every
/// later record must have the same number of fields. A column is numeric when
/// every one of its cells parses as a float, textual otherwise.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, CsvError> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers = dedupe_headers(reader.headers()?.iter());
    if headers.is_empty() {
        return Err(CsvError::NoColumns);
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (i, field) in record.iter().enumerate() {
            cells[i].push(field.to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, values)| build_column(name, values))
        .collect();

    Ok(Dataset::new(columns)?)
}

/// Decide the column type the way a dataframe reader would: numeric only when
/// there is at least one row and every cell parses as a float.
fn build_column(name: String, values: Vec<String>) -> Column {
    let parsed: Option<Vec<f64>> = if values.is_empty() {
        None
    } else {
        values.iter().map(|v| v.trim().parse::<f64>().ok()).collect()
    };

    match parsed {
        Some(numbers) => Column::number(name, numbers),
        None => Column::text(name, values),
    }
}

/// Deduplicate header names by suffixing repeats with `.1`, `.2`, ... so the
/// unique-name invariant holds for files with repeated headers.
fn dedupe_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in raw {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
            continue;
        }
        let mut suffix = 1;
        loop {
            let candidate = format!("{}.{}", name, suffix);
            if !names.iter().any(|n| *n == candidate) {
                names.push(candidate);
                break;
            }
            suffix += 1;
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::ColumnValues;

    #[test]
    fn test_parses_typed_columns() {
        let data = b"name,score\nalice,1.5\nbob,2\n";
        let dataset = parse_dataset(data).unwrap();

        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.text("name").map(|v| v.len()), Some(2));
        assert_eq!(dataset.numeric("score"), Some(&[1.5, 2.0][..]));
    }

    #[test]
    fn test_parses_two_by_two() {
        let data = b"x,y\n1,2\n3,4\n";
        let dataset = parse_dataset(data).unwrap();

        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.numeric("x"), Some(&[1.0, 3.0][..]));
        assert_eq!(dataset.numeric("y"), Some(&[2.0, 4.0][..]));
    }

    #[test]
    fn test_mixed_cells_fall_back_to_text() {
        let data = b"value\n1\ntwo\n";
        let dataset = parse_dataset(data).unwrap();

        assert!(dataset.numeric("value").is_none());
        assert_eq!(
            dataset.text("value"),
            Some(&["1".to_string(), "two".to_string()][..])
        );
    }

    #[test]
    fn test_ragged_record_is_an_error() {
        let data = b"x,y\n1,2\n3\n";
        let err = parse_dataset(data).unwrap_err();
        assert!(matches!(err, CsvError::Read(_)));
    }

    #[test]
    fn test_empty_input_has_no_columns() {
        let err = parse_dataset(b"").unwrap_err();
        assert!(matches!(err, CsvError::NoColumns));
    }

    #[test]
    fn test_header_only_file_parses_empty() {
        let dataset = parse_dataset(b"x,y\n").unwrap();
        assert_eq!(dataset.row_count(), 0);
        assert_eq!(dataset.columns().len(), 2);
        // Zero-row columns stay textual.
        assert!(matches!(
            dataset.column("x").unwrap().values,
            ColumnValues::Text(_)
        ));
    }

    #[test]
    fn test_duplicate_headers_are_deduplicated() {
        let data = b"x,x,x\n1,2,3\n";
        let dataset = parse_dataset(data).unwrap();

        let names: Vec<&str> = dataset.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["x", "x.1", "x.2"]);
    }
}
