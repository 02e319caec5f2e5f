use pdfgrid_core::config::DEFAULT_OUTPUT_FILE;
use pdfgrid_core::extraction::pdftotext::PdftotextExtractor;
use pdfgrid_core::Converter;
use std::path::PathBuf;

use crate::GridArgs;

pub fn run(
    pdf_file: PathBuf,
    output_file: Option<PathBuf>,
    args: &GridArgs,
) -> Result<(), pdfgrid_core::error::GridError> {
    let options = super::resolve_options(args)?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let out = output_file.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));

    let converter = Converter::new(Box::new(PdftotextExtractor::new()), options);
    let grid = converter.convert_to_file(&pdf_bytes, &out)?;

    eprintln!(
        "Converted {} row(s) x {} column(s), written to {}",
        grid.row_count(),
        grid.column_count(),
        out.display()
    );
    Ok(())
}
