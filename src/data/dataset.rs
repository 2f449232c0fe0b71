use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info};

use crate::data::features::FEATURE_NAMES;
use crate::error::{DashboardError, Result};

pub const LABEL_COLUMN: &str = "label";

// Cells read as missing rather than as text, as pandas does by default.
const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Historical feature/label rows shown next to the prediction.
///
/// Cells are kept as read for the head table. Numeric columns are also
/// held parsed, with `None` for missing cells.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    numeric: Vec<Option<Vec<Option<f64>>>>,
}

impl ReferenceDataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DashboardError::io(path, e))?;
        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.headers.len(),
            "reference dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        for required in FEATURE_NAMES.iter().chain(std::iter::once(&LABEL_COLUMN)) {
            if !headers.iter().any(|h| h == required) {
                return Err(DashboardError::MissingColumn(required.to_string()));
            }
        }

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        let numeric = headers
            .iter()
            .enumerate()
            .map(|(col, name)| parse_column(name, col, &rows))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            numeric_columns = numeric.iter().filter(|c| c.is_some()).count(),
            "dataset columns typed"
        );

        Ok(ReferenceDataset {
            headers,
            rows,
            numeric,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        let idx = self.headers.iter().position(|h| h == name)?;
        self.numeric[idx].as_deref()
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.headers
            .iter()
            .zip(&self.numeric)
            .filter_map(|(name, values)| values.as_deref().map(|v| (name.as_str(), v)))
    }
}

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

// Feature columns must hold a finite number or a missing marker in every
// row. Any other column falls back to text at its first unparseable cell.
fn parse_column(
    name: &str,
    col: usize,
    rows: &[Vec<String>],
) -> Result<Option<Vec<Option<f64>>>> {
    let required = FEATURE_NAMES.contains(&name);
    if rows.is_empty() && !required {
        return Ok(None);
    }
    let mut cells = Vec::with_capacity(rows.len());

    for (row_idx, row) in rows.iter().enumerate() {
        let cell = row.get(col).map(String::as_str).unwrap_or("");
        if is_missing(cell) {
            cells.push(None);
            continue;
        }
        match cell.parse::<f64>() {
            Ok(v) if v.is_finite() => cells.push(Some(v)),
            _ if required => {
                return Err(DashboardError::InvalidNumber {
                    column: name.to_string(),
                    row: row_idx + 1,
                    value: cell.to_string(),
                });
            }
            _ => return Ok(None),
        }
    }

    Ok(Some(cells))
}
