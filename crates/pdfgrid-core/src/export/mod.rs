pub mod xlsx;

use crate::table::Grid;

/// A single worksheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

/// A named worksheet as an array of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetData {
    /// Sheet whose first row is `header`, followed by `rows`.
    pub fn with_header(name: &str, header: &[&str], rows: Vec<Vec<CellValue>>) -> Self {
        let mut all = Vec::with_capacity(rows.len() + 1);
        all.push(header.iter().map(|h| CellValue::from(*h)).collect());
        all.extend(rows);
        SheetData {
            name: name.to_string(),
            rows: all,
        }
    }

    /// The reconstructed table as-is, without a header row.
    pub fn from_grid(name: &str, grid: &Grid) -> Self {
        SheetData {
            name: name.to_string(),
            rows: grid
                .rows()
                .iter()
                .map(|row| row.iter().map(|c| CellValue::Text(c.clone())).collect())
                .collect(),
        }
    }
}
