use pdfgrid_core::attendance::roster::RosterStore;
use pdfgrid_core::attendance::{AttendanceLog, DEFAULT_REPORT_FILE};
use pdfgrid_core::error::GridError;
use std::path::{Path, PathBuf};

use crate::output;

pub fn record(
    store: &Path,
    student: &str,
    day: &str,
    mass: &str,
    meeting: bool,
) -> Result<(), GridError> {
    let roster = RosterStore::open(store).load()?;
    let mut log = AttendanceLog::load(store)?;
    let rec = log.record(&roster, student, day, mass, meeting)?.clone();
    log.save(store)?;

    println!(
        "Attendance recorded for {} ({} point(s))",
        rec.student_name, rec.points
    );
    Ok(())
}

pub fn summary(store: &Path) -> Result<(), GridError> {
    let log = AttendanceLog::load(store)?;
    println!("{}", output::table::format_summary(&log));
    Ok(())
}

pub fn export(store: &Path, output_file: Option<PathBuf>) -> Result<(), GridError> {
    let log = AttendanceLog::load(store)?;
    if log.records().is_empty() {
        return Err(GridError::Roster("no attendance records to export".into()));
    }
    let out = output_file.unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FILE));
    log.export(&out)?;
    eprintln!(
        "Exported {} record(s) to {}",
        log.records().len(),
        out.display()
    );
    Ok(())
}
