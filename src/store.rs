use crate::model::{seed_teachers, AttendanceStatus, Student, StudentRecord, Teacher, TeacherRecord};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const STUDENTS_FILE: &str = "students.json";
pub const TEACHERS_FILE: &str = "teachers.json";
pub const ATTENDANCE_FILE: &str = "attendance.json";

/// Students keyed by roll number, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct StudentBook(pub Vec<Student>);

impl TryFrom<Map<String, Value>> for StudentBook {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut out = Vec::with_capacity(map.len());
        for (roll, v) in map {
            let rec: StudentRecord = serde_json::from_value(v)?;
            out.push(Student::from_record(roll, rec));
        }
        Ok(StudentBook(out))
    }
}

impl From<StudentBook> for Map<String, Value> {
    fn from(book: StudentBook) -> Self {
        let mut map = Map::new();
        for s in book.0 {
            // StudentRecord only holds strings and unit enums.
            if let Ok(v) = serde_json::to_value(s.to_record()) {
                map.insert(s.roll_number, v);
            }
        }
        map
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct TeacherRoster(pub Vec<Teacher>);

impl TryFrom<Map<String, Value>> for TeacherRoster {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut out = Vec::with_capacity(map.len());
        for (id, v) in map {
            let rec: TeacherRecord = serde_json::from_value(v)?;
            out.push(Teacher {
                id,
                name: rec.name,
                classes: rec.classes,
            });
        }
        Ok(TeacherRoster(out))
    }
}

impl From<TeacherRoster> for Map<String, Value> {
    fn from(roster: TeacherRoster) -> Self {
        let mut map = Map::new();
        for t in roster.0 {
            let rec = TeacherRecord {
                name: t.name,
                classes: t.classes,
            };
            if let Ok(v) = serde_json::to_value(rec) {
                map.insert(t.id, v);
            }
        }
        map
    }
}

/// Reads the named collection blob, or writes `default` and returns it when the
/// file does not exist yet. Any other failure is returned to the caller.
pub fn load_collection<T>(dir: &Path, file: &str, default: T) -> anyhow::Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let path = dir.join(file);
    match std::fs::read_to_string(&path) {
        Ok(text) => serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.to_string_lossy())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(file = %path.display(), "seeding missing collection");
            save_collection(dir, file, &default)?;
            Ok(default)
        }
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.to_string_lossy())),
    }
}

/// Overwrites the collection blob wholesale, pretty-printed with 4-space indent.
pub fn save_collection<T: Serialize>(dir: &Path, file: &str, data: &T) -> anyhow::Result<()> {
    let path = dir.join(file);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)
        .with_context(|| format!("failed to serialize {}", file))?;
    std::fs::write(&path, buf)
        .with_context(|| format!("failed to write {}", path.to_string_lossy()))
}

/// Repository over the student collection. Every mutating call persists the
/// whole collection before returning.
pub trait StudentStore {
    fn students(&self) -> &[Student];

    fn student(&self, roll: &str) -> Option<&Student> {
        self.students().iter().find(|s| s.roll_number == roll)
    }

    fn insert(&mut self, student: Student) -> anyhow::Result<()>;

    /// Returns false when no student has that roll number.
    fn set_attendance(&mut self, roll: &str, status: AttendanceStatus) -> anyhow::Result<bool>;

    fn remove(&mut self, roll: &str) -> anyhow::Result<Option<Student>>;

    fn set_all(&mut self, students: Vec<Student>) -> anyhow::Result<()>;
}

/// File-backed store: an in-memory cache of each collection, flushed to its
/// blob on every mutation.
pub struct JsonStore {
    dir: PathBuf,
    students: StudentBook,
    teachers: TeacherRoster,
    attendance: Map<String, Value>,
}

impl JsonStore {
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.to_string_lossy()))?;
        let students = load_collection(dir, STUDENTS_FILE, StudentBook::default())?;
        let teachers = load_collection(dir, TEACHERS_FILE, TeacherRoster(seed_teachers()))?;
        let attendance = load_collection(dir, ATTENDANCE_FILE, Map::new())?;
        Ok(JsonStore {
            dir: dir.to_path_buf(),
            students,
            teachers,
            attendance,
        })
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers.0
    }

    pub fn attendance_record_count(&self) -> usize {
        self.attendance.len()
    }

    /// Writes `next` to disk and only then swaps it into the cache, so a failed
    /// write leaves both exactly as they were.
    fn commit_students(&mut self, next: Vec<Student>) -> anyhow::Result<()> {
        let next = StudentBook(next);
        save_collection(&self.dir, STUDENTS_FILE, &next)?;
        self.students = next;
        Ok(())
    }
}

impl StudentStore for JsonStore {
    fn students(&self) -> &[Student] {
        &self.students.0
    }

    fn insert(&mut self, student: Student) -> anyhow::Result<()> {
        let mut next = self.students.0.clone();
        next.push(student);
        self.commit_students(next)
    }

    fn set_attendance(&mut self, roll: &str, status: AttendanceStatus) -> anyhow::Result<bool> {
        let mut next = self.students.0.clone();
        let Some(s) = next.iter_mut().find(|s| s.roll_number == roll) else {
            return Ok(false);
        };
        s.attendance = status;
        self.commit_students(next)?;
        Ok(true)
    }

    fn remove(&mut self, roll: &str) -> anyhow::Result<Option<Student>> {
        let Some(idx) = self.students.0.iter().position(|s| s.roll_number == roll) else {
            return Ok(None);
        };
        let mut next = self.students.0.clone();
        let removed = next.remove(idx);
        self.commit_students(next)?;
        Ok(Some(removed))
    }

    fn set_all(&mut self, students: Vec<Student>) -> anyhow::Result<()> {
        self.commit_students(students)
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub students: Vec<Student>,
    pub saves: usize,
}

#[cfg(test)]
impl StudentStore for MemoryStore {
    fn students(&self) -> &[Student] {
        &self.students
    }

    fn insert(&mut self, student: Student) -> anyhow::Result<()> {
        self.students.push(student);
        self.saves += 1;
        Ok(())
    }

    fn set_attendance(&mut self, roll: &str, status: AttendanceStatus) -> anyhow::Result<bool> {
        let Some(s) = self.students.iter_mut().find(|s| s.roll_number == roll) else {
            return Ok(false);
        };
        s.attendance = status;
        self.saves += 1;
        Ok(true)
    }

    fn remove(&mut self, roll: &str) -> anyhow::Result<Option<Student>> {
        let idx = self.students.iter().position(|s| s.roll_number == roll);
        let removed = idx.map(|i| self.students.remove(i));
        if removed.is_some() {
            self.saves += 1;
        }
        Ok(removed)
    }

    fn set_all(&mut self, students: Vec<Student>) -> anyhow::Result<()> {
        self.students = students;
        self.saves += 1;
        Ok(())
    }
}
