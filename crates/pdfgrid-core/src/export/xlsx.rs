use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::config::validate_sheet_name;
use crate::error::GridError;
use crate::export::{CellValue, SheetData};

/// Serialize sheets into an in-memory xlsx workbook, in the given order.
///
/// Empty text cells are left blank.
pub fn write_workbook(sheets: &[SheetData]) -> Result<Vec<u8>, GridError> {
    let mut workbook = build_workbook(sheets)?;
    workbook
        .save_to_buffer()
        .map_err(|e| GridError::Export(e.to_string()))
}

/// Serialize sheets and write the workbook to `path`.
pub fn save_workbook(sheets: &[SheetData], path: &Path) -> Result<(), GridError> {
    let bytes = write_workbook(sheets)?;
    std::fs::write(path, bytes)
        .map_err(|e| GridError::Export(format!("{}: {e}", path.display())))?;
    log::info!("wrote {} sheet(s) to {}", sheets.len(), path.display());
    Ok(())
}

fn build_workbook(sheets: &[SheetData]) -> Result<Workbook, GridError> {
    if sheets.is_empty() {
        return Err(GridError::Export("workbook has no sheets".into()));
    }

    let mut workbook = Workbook::new();
    for sheet in sheets {
        validate_sheet_name(&sheet.name)?;
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| GridError::Export(e.to_string()))?;

        for (r, row) in sheet.rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let (row_idx, col_idx) = cell_index(r, c)?;
                let written = match value {
                    CellValue::Text(s) if s.is_empty() => continue,
                    CellValue::Text(s) => worksheet.write_string(row_idx, col_idx, s),
                    CellValue::Number(n) => worksheet.write_number(row_idx, col_idx, *n),
                };
                written.map_err(|e| GridError::Export(e.to_string()))?;
            }
        }
    }
    Ok(workbook)
}

fn cell_index(row: usize, col: usize) -> Result<(u32, u16), GridError> {
    let r = u32::try_from(row)
        .map_err(|_| GridError::Export(format!("row {row} is out of range")))?;
    let c = u16::try_from(col)
        .map_err(|_| GridError::Export(format!("column {col} is out of range")))?;
    Ok((r, c))
}
