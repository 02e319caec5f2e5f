use pdfgrid_core::error::GridError;
use pdfgrid_core::table::Grid;

pub fn print(grid: &Grid) -> Result<(), GridError> {
    let json = serde_json::to_string_pretty(grid)?;
    println!("{json}");
    Ok(())
}
