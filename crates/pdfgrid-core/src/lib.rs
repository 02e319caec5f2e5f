pub mod attendance;
pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod table;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use config::GridOptions;
use error::GridError;
use export::{xlsx, SheetData};
use extraction::{PageItems, PdfExtractor};
use table::assemble::assemble_grid;
use table::cluster::cluster_columns;
use table::normalize::normalize_grid;
use table::Grid;

/// Rebuild a table from extracted page items.
///
/// Columns are clustered over the whole document, rows per page. Pages are
/// laid out in ascending order, each page's rows top to bottom. Empty
/// intermediate results are reported as distinct errors.
pub fn reconstruct(pages: &[PageItems], options: &GridOptions) -> Result<Grid, GridError> {
    let fragments = extraction::collect_fragments(pages);
    let fragment_count: usize = fragments.iter().map(|p| p.fragments.len()).sum();
    if fragment_count == 0 {
        return Err(GridError::NoTextFound);
    }

    let columns = cluster_columns(&fragments, options.column_threshold);
    if columns.is_empty() {
        return Err(GridError::NoColumnsDetected);
    }

    let rows = assemble_grid(&fragments, &columns, options.row_threshold);
    if rows.is_empty() {
        return Err(GridError::NoRowsDetected);
    }

    let grid = normalize_grid(rows);
    log::info!(
        "reconstructed {} row(s) x {} column(s) from {} fragment(s) on {} page(s)",
        grid.row_count(),
        grid.column_count(),
        fragment_count,
        fragments.len()
    );
    Ok(grid)
}

/// Main API entry point: extract text from a PDF and rebuild its table.
pub fn convert_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    options: &GridOptions,
) -> Result<Grid, GridError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    log::debug!(
        "{} extracted {} page(s)",
        extractor.backend_name(),
        pages.len()
    );
    reconstruct(&pages, options)
}

/// Write the grid, without a header row, as the single sheet of a workbook.
pub fn export_grid(grid: &Grid, options: &GridOptions, path: &Path) -> Result<(), GridError> {
    xlsx::save_workbook(&[SheetData::from_grid(&options.sheet_name, grid)], path)
}

/// Runs conversions one at a time.
///
/// A conversion requested while another is still running on the same
/// converter fails with [`GridError::Busy`].
pub struct Converter {
    extractor: Box<dyn PdfExtractor>,
    options: GridOptions,
    in_flight: AtomicBool,
}

impl Converter {
    pub fn new(extractor: Box<dyn PdfExtractor>, options: GridOptions) -> Self {
        Converter {
            extractor,
            options,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Extract and rebuild the table of a PDF.
    pub fn convert(&self, pdf_bytes: &[u8]) -> Result<Grid, GridError> {
        let _flight = FlightGuard::acquire(&self.in_flight)?;
        convert_pdf(pdf_bytes, self.extractor.as_ref(), &self.options)
    }

    /// Extract, rebuild and write the table to `path`. Nothing is written
    /// when any step fails.
    pub fn convert_to_file(&self, pdf_bytes: &[u8], path: &Path) -> Result<Grid, GridError> {
        let _flight = FlightGuard::acquire(&self.in_flight)?;
        let grid = convert_pdf(pdf_bytes, self.extractor.as_ref(), &self.options)?;
        export_grid(&grid, &self.options, path)?;
        Ok(grid)
    }
}

struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, GridError> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| GridError::Busy)?;
        Ok(FlightGuard { flag })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
