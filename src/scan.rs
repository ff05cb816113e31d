use crate::model::{AttendanceStatus, Department, Student};
use rand::Rng;
use std::time::Duration;

/// Range the simulated scan pause is drawn from, in whole seconds (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanDelay {
    pub min_secs: u64,
    pub max_secs: u64,
}

impl ScanDelay {
    pub fn new(min_secs: u64, max_secs: u64) -> anyhow::Result<Self> {
        if min_secs > max_secs {
            anyhow::bail!(
                "scan delay min ({}s) is greater than max ({}s)",
                min_secs,
                max_secs
            );
        }
        Ok(ScanDelay { min_secs, max_secs })
    }

    pub fn sample(&self) -> Duration {
        if self.max_secs == 0 {
            return Duration::ZERO;
        }
        let secs = rand::thread_rng().gen_range(self.min_secs..=self.max_secs);
        Duration::from_secs(secs)
    }

    /// Blocks the calling thread for a sampled duration.
    pub fn wait(&self) -> Duration {
        let d = self.sample();
        if !d.is_zero() {
            std::thread::sleep(d);
        }
        d
    }
}

impl Default for ScanDelay {
    fn default() -> Self {
        ScanDelay {
            min_secs: 10,
            max_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanOutcome {
    /// Roll numbers confirmed present, in collection order.
    pub present: Vec<String>,
    /// Names of confirmed students, parallel to `present`.
    pub present_names: Vec<String>,
    pub absent: Vec<String>,
}

impl ScanOutcome {
    pub fn summary(&self) -> String {
        if self.present.is_empty() {
            "No students found for the selected class.".to_string()
        } else {
            format!(
                "Attendance marked for: {} students. (Present: {})",
                self.present.len(),
                self.present_names.join(", ")
            )
        }
    }
}

/// One linear pass over the collection. In `class`, a student awaiting the
/// scan becomes Present; every other student becomes Absent, including ones
/// already Present from an earlier scan. Other classes are left alone.
pub fn classify(students: &mut [Student], class: Department) -> ScanOutcome {
    let mut out = ScanOutcome::default();
    for s in students.iter_mut().filter(|s| s.department == class) {
        if s.attendance == AttendanceStatus::PresentAwaitingScan {
            s.attendance = AttendanceStatus::Present;
            out.present.push(s.roll_number.clone());
            out.present_names.push(s.name.clone());
        } else {
            s.attendance = AttendanceStatus::Absent;
            out.absent.push(s.roll_number.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(roll: &str, dept: Department, att: AttendanceStatus) -> Student {
        Student {
            roll_number: roll.to_string(),
            name: format!("S{}", roll),
            department: dept,
            attendance: att,
        }
    }

    #[test]
    fn awaiting_becomes_present_everyone_else_absent() {
        let mut v = vec![
            st("1", Department::Cse, AttendanceStatus::PresentAwaitingScan),
            st("2", Department::Cse, AttendanceStatus::NotMarked),
            st("3", Department::CseDs, AttendanceStatus::PresentAwaitingScan),
            st("4", Department::Cse, AttendanceStatus::PresentAwaitingScan),
        ];
        let out = classify(&mut v, Department::Cse);
        assert_eq!(out.present, vec!["1", "4"]);
        assert_eq!(out.absent, vec!["2"]);
        assert_eq!(v[0].attendance, AttendanceStatus::Present);
        assert_eq!(v[1].attendance, AttendanceStatus::Absent);
        assert_eq!(v[2].attendance, AttendanceStatus::PresentAwaitingScan);
        assert_eq!(
            out.summary(),
            "Attendance marked for: 2 students. (Present: S1, S4)"
        );
    }

    #[test]
    fn rescan_flips_present_to_absent() {
        let mut v = vec![st("1", Department::CseAiml, AttendanceStatus::PresentAwaitingScan)];
        classify(&mut v, Department::CseAiml);
        assert_eq!(v[0].attendance, AttendanceStatus::Present);
        let second = classify(&mut v, Department::CseAiml);
        assert_eq!(v[0].attendance, AttendanceStatus::Absent);
        assert!(second.present.is_empty());
        assert_eq!(second.summary(), "No students found for the selected class.");
    }

    #[test]
    fn zero_delay_never_sleeps() {
        let d = ScanDelay::new(0, 0).expect("delay");
        assert_eq!(d.wait(), Duration::ZERO);
    }

    #[test]
    fn delay_samples_stay_in_range() {
        let d = ScanDelay::new(2, 4).expect("delay");
        for _ in 0..50 {
            let s = d.sample().as_secs();
            assert!((2..=4).contains(&s));
        }
        assert!(ScanDelay::new(5, 1).is_err());
    }
}
