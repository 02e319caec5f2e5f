use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_COLUMN_THRESHOLD: f64 = 18.0;
pub const DEFAULT_ROW_THRESHOLD: f64 = 4.0;
pub const DEFAULT_SHEET_NAME: &str = "Table";
pub const DEFAULT_OUTPUT_FILE: &str = "table_export.xlsx";

const MAX_SHEET_NAME_LEN: usize = 31;
const SHEET_NAME_FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Tuning knobs for table reconstruction and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Maximum x distance for two positions to share a column.
    pub column_threshold: f64,
    /// Maximum y distance for two positions to share a row.
    pub row_threshold: f64,
    /// Name of the worksheet holding the table.
    pub sheet_name: String,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            column_threshold: DEFAULT_COLUMN_THRESHOLD,
            row_threshold: DEFAULT_ROW_THRESHOLD,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

/// Load options from a JSON file. Missing fields take their defaults.
pub fn load_options(path: &Path) -> Result<GridOptions, GridError> {
    let content = std::fs::read_to_string(path).map_err(|e| GridError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let options: GridOptions =
        serde_json::from_str(&content).map_err(|e| GridError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_options(&options)?;
    Ok(options)
}

/// Parse options from a JSON string (no file path context).
pub fn parse_options_str(json: &str) -> Result<GridOptions, GridError> {
    let options: GridOptions = serde_json::from_str(json)?;
    validate_options(&options)?;
    Ok(options)
}

/// Validate thresholds and the sheet name.
pub fn validate_options(options: &GridOptions) -> Result<(), GridError> {
    for (name, value) in [
        ("column_threshold", options.column_threshold),
        ("row_threshold", options.row_threshold),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(GridError::ConfigInvalid(format!(
                "{name} must be a finite number >= 0, got {value}"
            )));
        }
    }

    validate_sheet_name(&options.sheet_name)
}

pub(crate) fn validate_sheet_name(name: &str) -> Result<(), GridError> {
    if name.trim().is_empty() {
        return Err(GridError::ConfigInvalid(
            "sheet_name must not be empty".into(),
        ));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(GridError::ConfigInvalid(format!(
            "sheet_name '{name}' is longer than {MAX_SHEET_NAME_LEN} characters"
        )));
    }
    if let Some(c) = name.chars().find(|c| SHEET_NAME_FORBIDDEN.contains(c)) {
        return Err(GridError::ConfigInvalid(format!(
            "sheet_name '{name}' contains forbidden character '{c}'"
        )));
    }
    Ok(())
}
