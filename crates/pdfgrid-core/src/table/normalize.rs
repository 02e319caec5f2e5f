use crate::table::Grid;

/// Pad every row to the widest row's width and trim every cell.
///
/// Blank rows are kept so row positions still match the source document.
pub fn normalize_grid(rows: Vec<Vec<String>>) -> Grid {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let rows = rows
        .into_iter()
        .map(|row| {
            let mut cells: Vec<String> = row.iter().map(|c| c.trim().to_string()).collect();
            cells.resize(width, String::new());
            cells
        })
        .collect();
    Grid::from_rectangular(rows)
}
