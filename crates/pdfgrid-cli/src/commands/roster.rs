use pdfgrid_core::attendance::roster::RosterStore;
use pdfgrid_core::attendance::AttendanceLog;
use pdfgrid_core::error::GridError;
use std::path::Path;

pub fn list(store: &Path) -> Result<(), GridError> {
    let students = RosterStore::open(store).load()?;
    if students.is_empty() {
        println!("No students yet");
        return Ok(());
    }
    for name in &students {
        println!("  {name}");
    }
    println!("\nTotal students: {}", students.len());
    Ok(())
}

pub fn add(store: &Path, name: &str) -> Result<(), GridError> {
    let students = RosterStore::open(store).add(name)?;
    println!("{} added ({} student(s))", name.trim(), students.len());
    Ok(())
}

pub fn remove(store: &Path, name: &str) -> Result<(), GridError> {
    let students = RosterStore::open(store).remove(name)?;

    let mut log = AttendanceLog::load(store)?;
    let dropped = log.remove_student(name.trim());
    if dropped > 0 {
        log.save(store)?;
    }

    println!(
        "{} removed ({} record(s) dropped, {} student(s) left)",
        name.trim(),
        dropped,
        students.len()
    );
    Ok(())
}
