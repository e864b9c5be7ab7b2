//! Header-addressed CSV tables.

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::IoError;
use crate::validate::ValidationCollector;

/// Token written for missing values.
pub const MISSING: &str = "NA";

/// A CSV file held as strings, addressed by header name.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Reads a headed CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] if `path` does not exist and
    /// [`IoError::Csv`] on malformed content.
    pub fn read(path: &Path) -> Result<Self, IoError> {
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    /// Reads only the header row, or `None` if `path` does not exist.
    pub fn read_headers(path: &Path) -> Result<Option<Vec<String>>, IoError> {
        if !path.exists() {
            return Ok(None);
        }
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        Ok(Some(rdr.headers()?.iter().map(str::to_string).collect()))
    }

    /// An empty table with the given headers, to be written to `path`.
    pub fn new(path: &Path, headers: Vec<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Index of column `name`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingColumn`] if there is no such header.
    pub fn column_index(&self, name: &str) -> Result<usize, IoError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| IoError::MissingColumn {
                name: name.to_string(),
                path: self.path.clone(),
            })
    }

    /// Raw cell values of column `name`.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, IoError> {
        let idx = self.column_index(name)?;
        Ok(self
            .rows
            .iter()
            .map(|r| r.get(idx).map_or("", String::as_str))
            .collect())
    }

    /// Column `name` parsed as numbers; `NA` and empty cells become NaN.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every unparseable cell.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, IoError> {
        let mut c = ValidationCollector::new();
        let values = self
            .column(name)?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                parse_value(cell).unwrap_or_else(|| {
                    c.push(format!("column '{name}' row {row}: cannot parse '{cell}'"));
                    f64::NAN
                })
            })
            .collect();
        c.finish()?;
        Ok(values)
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Adds or replaces column `name`.
    ///
    /// `values` must have one entry per row; missing trailing cells are
    /// written as [`MISSING`].
    pub fn set_column(&mut self, name: &str, values: Vec<String>) {
        let idx = match self.headers.iter().position(|h| h == name) {
            Some(i) => i,
            None => {
                self.headers.push(name.to_string());
                self.headers.len() - 1
            }
        };
        let mut values = values.into_iter();
        for row in &mut self.rows {
            let v = values.next().unwrap_or_else(|| MISSING.to_string());
            if row.len() <= idx {
                row.resize(idx, String::new());
                row.push(v);
            } else {
                row[idx] = v;
            }
        }
    }

    /// Keeps the rows for which `keep` is `true`, by position.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        let mut flags = keep.iter();
        self.rows.retain(|_| flags.next().copied().unwrap_or(true));
    }

    /// Writes the table to its path, creating parent directories.
    pub fn write(&self) -> Result<(), IoError> {
        self.write_to(&self.path)
    }

    /// Writes the table to `path`, creating parent directories.
    ///
    /// Rows are staged in a temporary file next to `path` and renamed over
    /// it once complete, so a failed write leaves any existing file intact.
    pub fn write_to(&self, path: &Path) -> Result<(), IoError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_err = |p: &Path, e: std::io::Error| IoError::Io {
            path: p.to_path_buf(),
            reason: e.to_string(),
        };
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

        let staged = NamedTempFile::new_in(dir).map_err(|e| io_err(dir, e))?;
        let mut wtr = csv::Writer::from_writer(staged);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        let staged = wtr.into_inner().map_err(|e| io_err(path, e.into_error()))?;
        staged.persist(path).map_err(|e| io_err(path, e.error))?;
        Ok(())
    }
}

/// Parses one cell; `NA`, `NaN` and empty cells are missing.
pub fn parse_value(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case(MISSING) || cell.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

/// Formats a value, writing non-finite values as [`MISSING`].
pub fn format_value(v: f64) -> String {
    if v.is_finite() {
        v.to_string()
    } else {
        MISSING.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_missing_tokens() {
        assert!(parse_value("").unwrap().is_nan());
        assert!(parse_value(" NA ").unwrap().is_nan());
        assert!(parse_value("nan").unwrap().is_nan());
        assert_eq!(parse_value("1.25"), Some(1.25));
        assert_eq!(parse_value("-3"), Some(-3.0));
        assert_eq!(parse_value("abc"), None);
    }

    #[test]
    fn format_missing() {
        assert_eq!(format_value(f64::NAN), "NA");
        assert_eq!(format_value(f64::INFINITY), "NA");
        assert_eq!(format_value(0.5), "0.5");
    }

    #[test]
    fn set_column_adds_and_replaces() {
        let mut t = CsvTable::new(Path::new("x.csv"), vec!["a".into()]);
        t.push_row(vec!["1".into()]);
        t.push_row(vec!["2".into()]);
        t.set_column("b", vec!["x".into(), "y".into()]);
        assert_eq!(t.headers(), &["a".to_string(), "b".to_string()]);
        assert_eq!(t.column("b").unwrap(), vec!["x", "y"]);
        t.set_column("a", vec!["9".into()]);
        assert_eq!(t.column("a").unwrap(), vec!["9", "NA"]);
    }

    #[test]
    fn write_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site").join("t.csv");
        let mut t = CsvTable::new(&path, vec!["a".into(), "b".into()]);
        t.push_row(vec!["1".into(), "x".into()]);
        t.write().unwrap();
        t.push_row(vec!["2".into(), "y".into()]);
        t.write().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n1,x\n2,y\n");
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn failed_write_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, "a\nold\n").unwrap();

        // A directory cannot be renamed over, so the final step fails.
        let blocked = dir.path().join("blocked");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep"), "").unwrap();
        let mut t = CsvTable::new(&blocked, vec!["a".into()]);
        t.push_row(vec!["new".into()]);
        assert!(matches!(t.write(), Err(IoError::Io { .. })));
        assert!(blocked.join("keep").exists());

        t.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nnew\n");
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 2, "stray files: {names:?}");
    }

    #[test]
    fn retain_rows_by_mask() {
        let mut t = CsvTable::new(Path::new("x.csv"), vec!["a".into()]);
        for v in ["1", "2", "3"] {
            t.push_row(vec![v.into()]);
        }
        t.retain_rows(&[true, false, true]);
        assert_eq!(t.column("a").unwrap(), vec!["1", "3"]);
    }

    #[test]
    fn missing_column_names_path() {
        let t = CsvTable::new(Path::new("/data/site.csv"), vec!["a".into()]);
        let err = t.column_index("pet").unwrap_err();
        assert_eq!(
            err,
            IoError::MissingColumn {
                name: "pet".into(),
                path: PathBuf::from("/data/site.csv")
            }
        );
    }

    #[test]
    fn numeric_column_collects_bad_cells() {
        let mut t = CsvTable::new(Path::new("x.csv"), vec!["v".into()]);
        for v in ["1", "oops", "NA", "bad"] {
            t.push_row(vec![v.into()]);
        }
        match t.numeric_column("v").unwrap_err() {
            IoError::Validation { count, .. } => assert_eq!(count, 2),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
