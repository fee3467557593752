use anyhow::{anyhow, Context, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A requested column is absent from the table. Kept as its own error type
/// so callers can tell a schema miss apart from a parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumn(pub String);

impl fmt::Display for MissingColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column '{}' not found in table", self.0)
    }
}

impl std::error::Error for MissingColumn {}

/// In-memory tabular data: a header row plus string cells, one table per
/// CSV file. Rebuilt on every rendering pass, never persisted.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open CSV file '{}'", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to read CSV file '{}'", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .context("Failed to read CSV headers")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read CSV record {}", i + 1))?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        if rows.is_empty() {
            anyhow::bail!("CSV must contain at least one data row");
        }

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Index of a named column, or `MissingColumn`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!(MissingColumn(name.to_string())))
    }

    /// All values of a named column, as strings.
    pub fn column(&self, name: &str) -> Result<Vec<String>> {
        let idx = self.column_index(name)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or_default())
            .collect())
    }

    /// All values of a named column, parsed as f64.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self.column_index(name)?;
        let mut values = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            let raw = row.get(idx).map(String::as_str).unwrap_or("");
            let value = raw.trim().parse::<f64>().with_context(|| {
                format!(
                    "Failed to parse value '{}' in column '{}' (data row {})",
                    raw,
                    name,
                    i + 1
                )
            })?;
            values.push(value);
        }
        Ok(values)
    }

    /// Add a numeric column, overwriting an existing column of the same
    /// name. Values must be row-aligned with the table.
    pub fn set_column(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if values.len() != self.rows.len() {
            anyhow::bail!(
                "Column '{}' has {} values but table has {} rows",
                name,
                values.len(),
                self.rows.len()
            );
        }

        let rendered: Vec<String> = values.iter().map(|v| format_number(*v)).collect();

        if let Ok(idx) = self.column_index(name) {
            for (row, value) in self.rows.iter_mut().zip(rendered) {
                row[idx] = value;
            }
        } else {
            self.headers.push(name.to_string());
            for (row, value) in self.rows.iter_mut().zip(rendered) {
                row.push(value);
            }
        }
        Ok(())
    }
}

/// Render a numeric cell without a trailing ".0" for whole numbers, so
/// synthesized columns look like the source data.
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}
