//! Sales document loading.
//!
//! Reads the JSON document, extracts the record array and applies field
//! defaults. Load failures are reported to the user and turned into an
//! empty collection so the caller never has to handle them.

use crate::error::LoadError;
use crate::models::{GameRecord, RawGameRecord};
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "ventas_videojuegos.json";

/// Default name of the array holding the records.
pub const DEFAULT_ARRAY_KEY: &str = "videojuegos";

/// Load records from `path`, returning an error on any failure.
///
/// A document without `array_key` is not an error and yields no records.
pub fn try_load_sales_data(path: &Path, array_key: &str) -> Result<Vec<GameRecord>, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileMissing {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut document: Value =
        serde_json::from_str(&content).map_err(|source| LoadError::MalformedDocument {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(array) = document.get_mut(array_key).map(Value::take) else {
        debug!("No '{}' key in {}", array_key, path.display());
        return Ok(Vec::new());
    };

    let raw: Vec<RawGameRecord> =
        serde_json::from_value(array).map_err(|source| LoadError::UnexpectedShape {
            path: path.to_path_buf(),
            key: array_key.to_string(),
            source,
        })?;

    Ok(raw.into_iter().map(GameRecord::from).collect())
}

/// Load records from `path`, reporting failures on `out`.
///
/// Writes exactly one diagnostic line when the file is missing, unreadable,
/// malformed or holds no record list, and returns an empty collection in
/// those cases.
pub fn load_sales_data<W: Write>(path: &Path, array_key: &str, out: &mut W) -> Vec<GameRecord> {
    match try_load_sales_data(path, array_key) {
        Ok(records) => {
            info!("Loaded {} records from {}", records.len(), path.display());
            records
        }
        Err(e) => {
            warn!("Failed to load sales data: {}", e);
            if let Err(io) = writeln!(out, "Error: {}.", e) {
                warn!("Failed to write diagnostic: {}", io);
            }
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("ventas.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_reports_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        let mut out = Vec::new();

        let records = load_sales_data(&path, DEFAULT_ARRAY_KEY, &mut out);

        assert!(records.is_empty());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("does not exist"));
    }

    #[test]
    fn test_invalid_json_reports_distinct_message() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "{ \"videojuegos\": [ {,] ");
        let mut out = Vec::new();

        let records = load_sales_data(&path, DEFAULT_ARRAY_KEY, &mut out);

        assert!(records.is_empty());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("not well-formed JSON"));
        assert!(!text.contains("does not exist"));
    }

    #[test]
    fn test_missing_key_yields_empty_without_diagnostic() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, r#"{"games": []}"#);
        let mut out = Vec::new();

        let records = load_sales_data(&path, DEFAULT_ARRAY_KEY, &mut out);

        assert!(records.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_loads_records_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            r#"{"videojuegos": [
                {"nombre": "A", "ventas_global": 10, "anio": 2000},
                {"nombre": "B", "ventas_global": 30, "anio": 2010, "genero": "Racing"}
            ]}"#,
        );

        let records = try_load_sales_data(&path, DEFAULT_ARRAY_KEY).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].genre, "Unknown");
        assert_eq!(records[1].genre, "Racing");
        assert_eq!(records[1].sales_global, 30.0);
    }

    #[test]
    fn test_custom_array_key() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, r#"{"games": [{"nombre": "Solo"}]}"#);

        let records = try_load_sales_data(&path, "games").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Solo");
    }

    #[test]
    fn test_non_array_key_is_unexpected_shape() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, r#"{"videojuegos": "none"}"#);
        let mut out = Vec::new();

        let err = try_load_sales_data(&path, DEFAULT_ARRAY_KEY).unwrap_err();
        assert!(matches!(err, LoadError::UnexpectedShape { .. }));

        assert!(load_sales_data(&path, DEFAULT_ARRAY_KEY, &mut out).is_empty());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("no usable record list"));
        assert!(!text.contains("not well-formed JSON"));
    }

    #[test]
    fn test_float_year_and_mixed_types_keep_document() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            r#"{"videojuegos": [
                {"nombre": "A", "anio": 2006.0, "ventas_global": 10},
                {"nombre": "B", "anio": 2010, "ventas_global": 30},
                {"nombre": 3, "anio": "1999", "ventas_global": "12", "plataforma": "PC"}
            ]}"#,
        );
        let mut out = Vec::new();

        let records = load_sales_data(&path, DEFAULT_ARRAY_KEY, &mut out);

        assert!(out.is_empty());
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].year, 2006);
        assert_eq!(records[1].year, 2010);
        assert_eq!(records[2].name, "Unknown");
        assert_eq!(records[2].year, 0);
        assert_eq!(records[2].sales_global, 0.0);
        assert_eq!(records[2].platform, "PC");
    }

    #[test]
    fn test_invalid_utf8_reports_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ventas.json");
        std::fs::write(&path, [0xff, 0xfe]).unwrap();
        let mut out = Vec::new();

        let records = load_sales_data(&path, DEFAULT_ARRAY_KEY, &mut out);

        assert!(records.is_empty());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("could not be read"));
    }

    #[test]
    fn test_directory_reports_read_error() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();

        let records = load_sales_data(dir.path(), DEFAULT_ARRAY_KEY, &mut out);

        assert!(records.is_empty());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("could not be read"));
    }

    #[test]
    fn test_missing_file_error_variant() {
        let err = try_load_sales_data(Path::new("/definitely/not/here.json"), "x").unwrap_err();
        assert!(matches!(err, LoadError::FileMissing { .. }));
    }
}
