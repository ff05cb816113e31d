use crate::model::{AttendanceStatus, Department, Student, MAX_STUDENTS};
use crate::scan::{self, ScanDelay, ScanOutcome};
use crate::store::StudentStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("All fields are required.")]
    MissingFields,
    #[error("Maximum student limit reached.")]
    CapacityReached,
    #[error("Student with this roll number already exists.")]
    DuplicateRoll,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl RegistrationError {
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationError::MissingFields => "missing_fields",
            RegistrationError::CapacityReached => "capacity_reached",
            RegistrationError::DuplicateRoll => "duplicate_roll",
            RegistrationError::Store(_) => "store_save_failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Please select a class first.")]
    NoClassSelected,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ScanError {
    pub fn code(&self) -> &'static str {
        match self {
            ScanError::NoClassSelected => "no_class_selected",
            ScanError::Store(_) => "store_save_failed",
        }
    }
}

pub struct Registration<'a> {
    pub name: &'a str,
    pub roll_number: &'a str,
    pub department: Option<Department>,
}

/// Self-registration. Checks run in a fixed order (presence, capacity,
/// uniqueness) and nothing is written unless all pass.
pub fn register<S>(store: &mut S, reg: Registration<'_>) -> Result<Student, RegistrationError>
where
    S: StudentStore + ?Sized,
{
    // Roll numbers are keyed trimmed, so " 101" and "101" name the same student.
    let name = reg.name.trim();
    let roll = reg.roll_number.trim();
    let Some(department) = reg.department else {
        return Err(RegistrationError::MissingFields);
    };
    if name.is_empty() || roll.is_empty() {
        return Err(RegistrationError::MissingFields);
    }
    if store.students().len() >= MAX_STUDENTS {
        return Err(RegistrationError::CapacityReached);
    }
    if store.student(roll).is_some() {
        return Err(RegistrationError::DuplicateRoll);
    }

    let student = Student {
        roll_number: roll.to_string(),
        name: name.to_string(),
        department,
        attendance: AttendanceStatus::NotMarked,
    };
    store.insert(student.clone())?;
    tracing::info!(roll = %student.roll_number, department = %department, "student registered");
    Ok(student)
}

/// Marks the student as waiting for the teacher's scan. Returns false when the
/// roll is unknown.
pub fn give_attendance<S>(store: &mut S, roll: &str) -> anyhow::Result<bool>
where
    S: StudentStore + ?Sized,
{
    let found = store.set_attendance(roll, AttendanceStatus::PresentAwaitingScan)?;
    if found {
        tracing::info!(roll, "attendance given, awaiting scan");
    }
    Ok(found)
}

/// Runs the simulated scan for `class`: blocks for the configured delay, then
/// classifies every student of that class and persists the full collection.
pub fn take_attendance<S>(
    store: &mut S,
    class: Option<Department>,
    delay: &ScanDelay,
) -> Result<ScanOutcome, ScanError>
where
    S: StudentStore + ?Sized,
{
    let Some(class) = class else {
        return Err(ScanError::NoClassSelected);
    };
    tracing::info!(class = %class, "scanning for students");
    let waited = delay.wait();

    let mut students = store.students().to_vec();
    let outcome = scan::classify(&mut students, class);
    store.set_all(students)?;
    tracing::info!(
        class = %class,
        present = outcome.present.len(),
        absent = outcome.absent.len(),
        waited_secs = waited.as_secs(),
        "scan complete"
    );
    Ok(outcome)
}

/// Deletes the student's record. Registration does not outlive the session.
pub fn logout_student<S>(store: &mut S, roll: &str) -> anyhow::Result<Option<Student>>
where
    S: StudentStore + ?Sized,
{
    let removed = store.remove(roll)?;
    if removed.is_some() {
        tracing::info!(roll, "student logged out, record deleted");
    }
    Ok(removed)
}

pub fn students_in_class(students: &[Student], class: Department) -> impl Iterator<Item = &Student> {
    students.iter().filter(move |s| s.department == class)
}

pub fn present_in_class(students: &[Student], class: Department) -> impl Iterator<Item = &Student> {
    students_in_class(students, class).filter(|s| s.attendance == AttendanceStatus::Present)
}
