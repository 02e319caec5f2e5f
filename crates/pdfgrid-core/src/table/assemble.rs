use crate::extraction::{PageFragments, TextFragment};
use crate::table::cluster::{cluster_rows, round_coord, ColumnSet};

/// One logical table row on one page.
#[derive(Debug, Clone)]
pub struct RowBand<'a> {
    pub page: usize,
    pub center: f64,
    /// Fragments of the band, left to right.
    pub fragments: Vec<&'a TextFragment>,
}

/// Group a page's fragments into row bands, top of the page first.
///
/// A fragment belongs to every band whose center is within `threshold` of
/// its rounded y, so it may appear in two adjacent bands or in none.
pub fn row_bands(page: &PageFragments, threshold: f64) -> Vec<RowBand<'_>> {
    cluster_rows(&page.fragments, threshold)
        .into_iter()
        .map(|center| {
            let mut fragments: Vec<&TextFragment> = page
                .fragments
                .iter()
                .filter(|f| (round_coord(f.y) - center).abs() <= threshold)
                .collect();
            fragments.sort_by(|a, b| a.x.total_cmp(&b.x));
            RowBand {
                page: page.page_number,
                center,
                fragments,
            }
        })
        .collect()
}

/// Lay a band out across the columns. Every returned row has exactly
/// `columns.len()` cells; fragment texts sharing a cell are space-joined.
pub fn assemble_row(band: &RowBand<'_>, columns: &ColumnSet) -> Vec<String> {
    let placed: Vec<(usize, &str)> = band
        .fragments
        .iter()
        .filter_map(|f| columns.nearest(f.x).map(|col| (col, f.text.as_str())))
        .collect();

    (0..columns.len())
        .map(|col| {
            placed
                .iter()
                .filter(|(c, _)| *c == col)
                .fold(String::new(), |cell, (_, text)| {
                    if cell.is_empty() {
                        text.to_string()
                    } else {
                        format!("{cell} {text}")
                    }
                })
        })
        .collect()
}

/// Build the raw grid: pages in ascending order, bands top to bottom.
pub fn assemble_grid(
    pages: &[PageFragments],
    columns: &ColumnSet,
    row_threshold: f64,
) -> Vec<Vec<String>> {
    let mut ordered: Vec<&PageFragments> = pages.iter().collect();
    ordered.sort_by_key(|p| p.page_number);

    let mut rows = Vec::new();
    for page in ordered {
        let bands = row_bands(page, row_threshold);
        log::debug!("page {}: {} row band(s)", page.page_number, bands.len());
        rows.extend(bands.iter().map(|band| assemble_row(band, columns)));
    }
    rows
}
