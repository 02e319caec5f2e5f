use pdfgrid_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;
use crate::GridArgs;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    args: &GridArgs,
) -> Result<(), pdfgrid_core::error::GridError> {
    let options = super::resolve_options(args)?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let grid = pdfgrid_core::convert_pdf(&pdf_bytes, &extractor, &options)?;

    match output_format {
        "json" => output::json::print(&grid)?,
        _ => println!("{}", output::table::format_grid(&grid)),
    }
    Ok(())
}
