pub mod roster;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::GridError;
use crate::export::{xlsx, CellValue, SheetData};

pub const ATTENDANCE_FILE: &str = "attendance.json";
pub const DEFAULT_REPORT_FILE: &str = "attendance_report.xlsx";
pub const DETAIL_SHEET: &str = "Detailed Attendance";
pub const SUMMARY_SHEET: &str = "Summary Report";

const AM_MASS_POINTS: u32 = 2;
const PM_MASS_POINTS: u32 = 1;
const MEETING_POINTS: u32 = 5;

const WEEKDAY_MASSES: &[&str] = &["6:30 AM", "7:00 PM"];
const SUNDAY_MASSES: &[&str] = &["7:30 AM", "8:30 AM", "9:30 AM", "6:00 PM"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn from_str_loose(s: &str) -> Option<Weekday> {
        let lower = s.trim().to_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|d| d.to_string().to_lowercase() == lower)
    }

    /// Mass times offered on this day.
    pub fn masses(&self) -> &'static [&'static str] {
        match self {
            Weekday::Sunday => SUNDAY_MASSES,
            _ => WEEKDAY_MASSES,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

/// Points earned for one attendance: AM mass 2, PM mass 1, meeting 5.
pub fn attendance_points(mass_time: &str, meeting_attended: bool) -> u32 {
    let am = if mass_time.contains("AM") { AM_MASS_POINTS } else { 0 };
    let pm = if mass_time.contains("PM") { PM_MASS_POINTS } else { 0 };
    let meeting = if meeting_attended { MEETING_POINTS } else { 0 };
    am + pm + meeting
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_name: String,
    pub day_of_week: Weekday,
    pub mass_time: String,
    pub meeting_attended: bool,
    pub points: u32,
}

/// Append-only attendance history, stored next to the roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceLog {
    records: Vec<AttendanceRecord>,
}

impl AttendanceLog {
    fn path(dir: &Path) -> PathBuf {
        dir.join(ATTENDANCE_FILE)
    }

    /// Read the log from `dir`. A missing file is an empty log.
    pub fn load(dir: &Path) -> Result<AttendanceLog, GridError> {
        let path = Self::path(dir);
        if !path.exists() {
            return Ok(AttendanceLog::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, dir: &Path) -> Result<(), GridError> {
        std::fs::create_dir_all(dir)?;
        std::fs::write(Self::path(dir), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    /// Validate an attendance against the roster and the mass schedule,
    /// then append it with its computed points.
    pub fn record(
        &mut self,
        roster: &[String],
        student: &str,
        day: &str,
        mass_time: &str,
        meeting_attended: bool,
    ) -> Result<&AttendanceRecord, GridError> {
        let student = student.trim();
        if student.is_empty() || day.trim().is_empty() || mass_time.trim().is_empty() {
            return Err(GridError::Roster("please fill in all fields".into()));
        }
        if !roster.iter().any(|s| s == student) {
            return Err(GridError::Roster(format!("student '{student}' not found")));
        }
        let day_of_week = Weekday::from_str_loose(day)
            .ok_or_else(|| GridError::Roster(format!("unknown day of week '{day}'")))?;
        let mass_time = day_of_week
            .masses()
            .iter()
            .find(|m| m.eq_ignore_ascii_case(mass_time.trim()))
            .ok_or_else(|| {
                GridError::Roster(format!(
                    "no mass at '{mass_time}' on {day_of_week}. Available: {}",
                    day_of_week.masses().join(", ")
                ))
            })?;

        let points = attendance_points(mass_time, meeting_attended);
        log::info!("{student}: {day_of_week} {mass_time} -> {points} point(s)");
        self.records.push(AttendanceRecord {
            student_name: student.to_string(),
            day_of_week,
            mass_time: mass_time.to_string(),
            meeting_attended,
            points,
        });
        Ok(&self.records[self.records.len() - 1])
    }

    /// Drop every record of `student`, returning how many were removed.
    pub fn remove_student(&mut self, student: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.student_name != student);
        before - self.records.len()
    }

    /// Point totals per student, in order of first attendance.
    pub fn totals(&self) -> Vec<(String, u32)> {
        self.records
            .iter()
            .fold(Vec::<(String, u32)>::new(), |mut totals, r| {
                match totals.iter_mut().find(|(name, _)| *name == r.student_name) {
                    Some((_, total)) => *total += r.points,
                    None => totals.push((r.student_name.clone(), r.points)),
                }
                totals
            })
    }

    pub fn detail_sheet(&self) -> SheetData {
        SheetData::with_header(
            DETAIL_SHEET,
            &[
                "Student Name",
                "Day of Week",
                "Mass Time",
                "Meeting Attended",
                "Points",
            ],
            self.records
                .iter()
                .map(|r| {
                    vec![
                        CellValue::from(r.student_name.as_str()),
                        CellValue::from(r.day_of_week.to_string()),
                        CellValue::from(r.mass_time.as_str()),
                        CellValue::from(if r.meeting_attended { "Yes" } else { "No" }),
                        CellValue::from(r.points),
                    ]
                })
                .collect(),
        )
    }

    pub fn summary_sheet(&self) -> SheetData {
        SheetData::with_header(
            SUMMARY_SHEET,
            &["Student Name", "Total Points"],
            self.totals()
                .into_iter()
                .map(|(name, total)| vec![CellValue::from(name), CellValue::from(total)])
                .collect(),
        )
    }

    /// Write the detail and summary sheets to an xlsx workbook.
    pub fn export(&self, path: &Path) -> Result<(), GridError> {
        xlsx::save_workbook(&[self.detail_sheet(), self.summary_sheet()], path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<String> {
        vec!["Ana".to_string(), "Ben".to_string()]
    }

    #[test]
    fn points_follow_mass_and_meeting() {
        assert_eq!(attendance_points("6:30 AM", false), 2);
        assert_eq!(attendance_points("7:00 PM", false), 1);
        assert_eq!(attendance_points("6:00 PM", true), 6);
        assert_eq!(attendance_points("9:30 AM", true), 7);
    }

    #[test]
    fn weekday_parsing_and_schedule() {
        assert_eq!(Weekday::from_str_loose(" sunday "), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_str_loose("Funday"), None);
        assert_eq!(Weekday::Sunday.masses().len(), 4);
        assert_eq!(Weekday::Tuesday.masses(), &["6:30 AM", "7:00 PM"]);
    }

    #[test]
    fn record_validates_schedule_and_roster() {
        let mut log = AttendanceLog::default();
        assert!(log.record(&roster(), "Cara", "Monday", "6:30 AM", false).is_err());
        assert!(log.record(&roster(), "Ana", "Monday", "7:30 AM", false).is_err());
        assert!(log.record(&roster(), "Ana", "", "6:30 AM", false).is_err());
        let rec = log.record(&roster(), "Ana", "monday", "6:30 am", true).unwrap();
        assert_eq!(rec.mass_time, "6:30 AM");
        assert_eq!(rec.points, 7);
        assert_eq!(log.records().len(), 1);
    }

    #[test]
    fn totals_keep_first_seen_order() {
        let mut log = AttendanceLog::default();
        log.record(&roster(), "Ben", "Sunday", "6:00 PM", false).unwrap();
        log.record(&roster(), "Ana", "Friday", "6:30 AM", true).unwrap();
        log.record(&roster(), "Ben", "Sunday", "8:30 AM", false).unwrap();
        assert_eq!(
            log.totals(),
            vec![("Ben".to_string(), 3), ("Ana".to_string(), 7)]
        );
        assert_eq!(log.remove_student("Ben"), 2);
        assert_eq!(log.totals(), vec![("Ana".to_string(), 7)]);
    }

    #[test]
    fn log_persists_between_loads() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = AttendanceLog::load(dir.path()).unwrap();
        log.record(&roster(), "Ana", "Saturday", "7:00 PM", false).unwrap();
        log.save(dir.path()).unwrap();

        let reloaded = AttendanceLog::load(dir.path()).unwrap();
        assert_eq!(reloaded.records(), log.records());
    }

    #[test]
    fn sheets_have_headers() {
        let mut log = AttendanceLog::default();
        log.record(&roster(), "Ana", "Sunday", "7:30 AM", true).unwrap();
        let detail = log.detail_sheet();
        assert_eq!(detail.name, DETAIL_SHEET);
        assert_eq!(detail.rows.len(), 2);
        assert_eq!(detail.rows[1][3], CellValue::Text("Yes".into()));
        assert_eq!(detail.rows[1][4], CellValue::Number(7.0));

        let summary = log.summary_sheet();
        assert_eq!(summary.rows[0][0], CellValue::Text("Student Name".into()));
        assert_eq!(summary.rows[1][1], CellValue::Number(7.0));
    }
}
