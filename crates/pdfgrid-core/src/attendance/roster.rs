use std::path::{Path, PathBuf};

use crate::error::GridError;

/// Storage key of the roster; the list lives in `<key>.json`.
pub const STUDENTS_KEY: &str = "students";

/// Student roster persisted as a JSON array of names.
#[derive(Debug, Clone)]
pub struct RosterStore {
    dir: PathBuf,
}

impl RosterStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        RosterStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self) -> PathBuf {
        self.dir.join(format!("{STUDENTS_KEY}.json"))
    }

    /// Read the roster. A store that was never written is an empty roster.
    pub fn load(&self) -> Result<Vec<String>, GridError> {
        let path = self.path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&path)?;
        let students: Vec<String> = serde_json::from_str(&content)?;
        Ok(students)
    }

    fn save(&self, students: &[String]) -> Result<(), GridError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(), serde_json::to_string(students)?)?;
        log::debug!("saved {} student(s) to {}", students.len(), self.path().display());
        Ok(())
    }

    /// Add a student and return the sorted roster.
    pub fn add(&self, name: &str) -> Result<Vec<String>, GridError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GridError::Roster("please enter a student name".into()));
        }

        let mut students = self.load()?;
        if students.iter().any(|s| s == name) {
            return Err(GridError::Roster(format!("student '{name}' already exists")));
        }
        students.push(name.to_string());
        students.sort();
        self.save(&students)?;
        Ok(students)
    }

    /// Remove a student and return the remaining roster.
    pub fn remove(&self, name: &str) -> Result<Vec<String>, GridError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GridError::Roster(
                "please enter a student name to remove".into(),
            ));
        }

        let students = self.load()?;
        let remaining: Vec<String> = students.iter().filter(|s| *s != name).cloned().collect();
        if remaining.len() == students.len() {
            return Err(GridError::Roster(format!("student '{name}' not found")));
        }
        self.save(&remaining)?;
        Ok(remaining)
    }
}
