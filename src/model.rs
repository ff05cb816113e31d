use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hard cap on concurrently registered students.
pub const MAX_STUDENTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "CSE")]
    Cse,
    #[serde(rename = "CSE-AIML")]
    CseAiml,
    #[serde(rename = "CSE-DS")]
    CseDs,
}

impl Department {
    pub const ALL: [Department; 3] = [Department::Cse, Department::CseAiml, Department::CseDs];

    pub fn as_str(self) -> &'static str {
        match self {
            Department::Cse => "CSE",
            Department::CseAiml => "CSE-AIML",
            Department::CseDs => "CSE-DS",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str() == s.trim())
            .ok_or_else(|| format!("unknown department: {}", s))
    }
}

/// Attendance status as stored in `students.json`. The serialized strings are
/// the ones shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "Not Marked")]
    NotMarked,
    #[serde(rename = "Present (awaiting teacher scan)")]
    PresentAwaitingScan,
    #[serde(rename = "Present")]
    Present,
    #[serde(rename = "Absent")]
    Absent,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::NotMarked => "Not Marked",
            AttendanceStatus::PresentAwaitingScan => "Present (awaiting teacher scan)",
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub roll_number: String,
    pub name: String,
    pub department: Department,
    pub attendance: AttendanceStatus,
}

/// On-disk shape of a student; the roll number is the mapping key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    pub name: String,
    pub department: Department,
    pub attendance: AttendanceStatus,
}

impl Student {
    pub fn from_record(roll_number: String, rec: StudentRecord) -> Self {
        Student {
            roll_number,
            name: rec.name,
            department: rec.department,
            attendance: rec.attendance,
        }
    }

    pub fn to_record(&self) -> StudentRecord {
        StudentRecord {
            name: self.name.clone(),
            department: self.department,
            attendance: self.attendance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRecord {
    pub name: String,
    pub classes: Vec<Department>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub classes: Vec<Department>,
}

pub fn seed_teachers() -> Vec<Teacher> {
    vec![
        Teacher {
            id: "teacher1".to_string(),
            name: "Teacher 1".to_string(),
            classes: vec![Department::Cse, Department::CseAiml],
        },
        Teacher {
            id: "teacher2".to_string(),
            name: "Teacher 2".to_string(),
            classes: vec![Department::CseDs],
        },
    ]
}
