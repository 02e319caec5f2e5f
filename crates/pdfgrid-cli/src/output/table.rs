use pdfgrid_core::attendance::AttendanceLog;
use pdfgrid_core::table::Grid;

/// Render the grid as aligned text columns, one line per row.
pub fn format_grid(grid: &Grid) -> String {
    let widths: Vec<usize> = (0..grid.column_count())
        .map(|col| {
            grid.rows()
                .iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in grid.rows() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
    }
    out.push_str(&format!(
        "\n{} row(s) x {} column(s)",
        grid.row_count(),
        grid.column_count()
    ));
    out
}

/// Point totals, highest first.
pub fn format_summary(log: &AttendanceLog) -> String {
    let mut totals = log.totals();
    if totals.is_empty() {
        return "No attendance records yet".to_string();
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    let max_name = totals
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(10);

    let mut out = String::from("Points summary:\n");
    for (name, points) in &totals {
        out.push_str(&format!(
            "  {:<width$}  {} point(s)\n",
            name,
            points,
            width = max_name
        ));
    }
    out.push_str(&format!("\n{} attendance record(s)", log.records().len()));
    out
}
