// Upload pipeline - validate, parse, replace the store, persist, preview
use crate::application::dataset_store::DatasetStore;
use crate::domain::dataset::{ColumnValues, Dataset};
use crate::infrastructure::csv_codec;
use bytes::Bytes;
use std::path::PathBuf;
use thiserror::Error;

/// Rows shown in the preview table.
const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file selected")]
    NoFileSelected,
    #[error("Allowed file type is CSV")]
    DisallowedExtension,
    #[error("Could not parse CSV: {0}")]
    Malformed(String),
    #[error("Failed to store upload copy: {0}")]
    Persist(#[from] std::io::Error),
}

impl UploadError {
    /// Validation and parse failures re-render the form with a flashed
    /// message; a persist failure is the one path left to the framework's
    /// error handling.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, UploadError::Persist(_))
    }
}

/// First rows of the parsed dataset with cells already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug)]
pub struct UploadOutcome {
    pub stored_name: String,
    pub row_count: usize,
    pub preview: Preview,
}

#[derive(Clone)]
pub struct UploadService {
    store: DatasetStore,
    upload_dir: PathBuf,
}

impl UploadService {
    pub fn new(store: DatasetStore, upload_dir: PathBuf) -> Self {
        Self { store, upload_dir }
    }

    /// Run the upload pipeline for one submitted file. The store is replaced
    /// only after the whole byte stream parsed; every earlier failure leaves
    /// it untouched.
    pub fn handle(&self, file_name: Option<&str>, bytes: &Bytes) -> Result<UploadOutcome, UploadError> {
        let name = match file_name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(UploadError::NoFileSelected),
        };

        if !extension_allowed(name) {
            return Err(UploadError::DisallowedExtension);
        }

        let dataset =
            csv_codec::parse_dataset(bytes).map_err(|e| UploadError::Malformed(e.to_string()))?;
        let row_count = dataset.row_count();

        self.store.replace(dataset.clone());

        let stored_name = sanitize_filename(name);
        let path = self.upload_dir.join(&stored_name);
        std::fs::write(&path, bytes)?;
        tracing::info!(
            "Stored upload {} ({} rows) at {}",
            name,
            row_count,
            path.display()
        );

        Ok(UploadOutcome {
            stored_name,
            row_count,
            preview: build_preview(&dataset),
        })
    }
}

/// Allow-list check on the extension after the last dot, case-insensitive.
/// A name without a dot is disallowed.
fn extension_allowed(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Reduce a client-supplied filename to something safe to join onto the
/// upload directory: ASCII alphanumerics, dot, dash and underscore survive,
/// separators and whitespace collapse to underscores, everything else is
/// dropped, and leading dots go away so the name can never climb out of the
/// directory.
fn sanitize_filename(file_name: &str) -> String {
    let mut out = String::with_capacity(file_name.len());
    for ch in file_name.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            out.push(ch);
        } else if ch.is_whitespace() || matches!(ch, '/' | '\\') {
            out.push('_');
        }
    }
    let trimmed = out.trim_start_matches(['.', '_']).trim_end_matches('_');
    if trimmed.is_empty() {
        "upload.csv".to_string()
    } else {
        trimmed.to_string()
    }
}

/// First `PREVIEW_ROWS` rows, all columns, numeric cells formatted to two
/// decimal places.
fn build_preview(dataset: &Dataset) -> Preview {
    let columns = dataset.columns().iter().map(|c| c.name.clone()).collect();
    let rows = (0..dataset.row_count().min(PREVIEW_ROWS))
        .map(|row| {
            dataset
                .columns()
                .iter()
                .map(|column| match &column.values {
                    ColumnValues::Number(values) => format!("{:.2}", values[row]),
                    ColumnValues::Text(values) => values[row].clone(),
                })
                .collect()
        })
        .collect();
    Preview { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service() -> (UploadService, DatasetStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = DatasetStore::new();
        let service = UploadService::new(store.clone(), dir.path().to_path_buf());
        (service, store, dir)
    }

    #[test]
    fn test_upload_replaces_store_and_previews() {
        let (service, store, dir) = service();
        let bytes = Bytes::from_static(b"x,y\n1,2\n3,4\n");

        let outcome = service.handle(Some("a.csv"), &bytes).unwrap();

        assert_eq!(outcome.row_count, 2);
        assert_eq!(outcome.stored_name, "a.csv");
        assert_eq!(outcome.preview.columns, vec!["x", "y"]);
        assert_eq!(
            outcome.preview.rows,
            vec![vec!["1.00", "2.00"], vec!["3.00", "4.00"]]
        );
        assert_eq!(store.snapshot().unwrap().row_count(), 2);
        assert_eq!(std::fs::read(dir.path().join("a.csv")).unwrap(), bytes);
    }

    #[test]
    fn test_preview_caps_at_five_rows() {
        let (service, _store, _dir) = service();
        let bytes = Bytes::from_static(b"n\n1\n2\n3\n4\n5\n6\n7\n");

        let outcome = service.handle(Some("many.csv"), &bytes).unwrap();

        assert_eq!(outcome.row_count, 7);
        assert_eq!(outcome.preview.rows.len(), 5);
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let (service, store, _dir) = service();

        let err = service.handle(None, &Bytes::new()).unwrap_err();
        assert!(matches!(err, UploadError::NoFileSelected));

        let err = service.handle(Some(""), &Bytes::new()).unwrap_err();
        assert!(matches!(err, UploadError::NoFileSelected));

        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_extension_allow_list() {
        let (service, store, _dir) = service();
        let bytes = Bytes::from_static(b"x\n1\n");

        for name in ["data.txt", "data", "data.csv.exe"] {
            let err = service.handle(Some(name), &bytes).unwrap_err();
            assert!(matches!(err, UploadError::DisallowedExtension), "{name}");
        }
        assert!(store.snapshot().is_none());

        assert!(service.handle(Some("DATA.CSV"), &bytes).is_ok());
    }

    #[test]
    fn test_malformed_csv_leaves_store_unchanged() {
        let (service, store, _dir) = service();
        service
            .handle(Some("first.csv"), &Bytes::from_static(b"x\n1\n2\n"))
            .unwrap();
        let before = store.snapshot();

        let err = service
            .handle(Some("bad.csv"), &Bytes::from_static(b"x,y\n1,2\n3\n"))
            .unwrap_err();

        assert!(matches!(err, UploadError::Malformed(_)));
        assert!(err.is_recoverable());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_traversal_names_are_sanitized() {
        let (service, _store, dir) = service();
        let bytes = Bytes::from_static(b"x\n1\n");

        let outcome = service
            .handle(Some("../../etc/passwd.csv"), &bytes)
            .unwrap();

        assert_eq!(outcome.stored_name, "etc_passwd.csv");
        assert!(dir.path().join("etc_passwd.csv").exists());
    }

    #[test]
    fn test_collisions_overwrite_silently() {
        let (service, _store, dir) = service();

        service
            .handle(Some("a.csv"), &Bytes::from_static(b"x\n1\n"))
            .unwrap();
        service
            .handle(Some("a.csv"), &Bytes::from_static(b"x\n2\n"))
            .unwrap();

        assert_eq!(std::fs::read(dir.path().join("a.csv")).unwrap(), b"x\n2\n");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("report 2024.csv"), "report_2024.csv");
        assert_eq!(sanitize_filename(".hidden.csv"), "hidden.csv");
        assert_eq!(sanitize_filename("données.csv"), "donnes.csv");
        assert_eq!(sanitize_filename("日本語"), "upload.csv");
    }
}
