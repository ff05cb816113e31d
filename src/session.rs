use crate::model::Department;
use chrono::{DateTime, Utc};

/// Which student table the teacher dashboard shows. The two tables are
/// mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListView {
    #[default]
    Hidden,
    Present,
    All,
}

impl ListView {
    pub fn toggle(self, target: ListView) -> ListView {
        if self == target {
            ListView::Hidden
        } else {
            target
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListView::Hidden => "hidden",
            ListView::Present => "present",
            ListView::All => "all",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeacherDashboard {
    pub selected_class: Option<Department>,
    pub message: String,
    pub list: ListView,
    pub last_scan_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Login,
    TeacherDashboard(TeacherDashboard),
    StudentLogin,
    StudentDashboard {
        roll: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TeacherLogin,
    StudentLogin,
    SubmitRegistration,
    BackToLogin,
    SelectClass,
    TakeAttendance,
    TogglePresent,
    ToggleAll,
    TeacherLogout,
    GiveAttendance,
    StudentLogout,
}

impl Action {
    pub fn method(self) -> &'static str {
        match self {
            Action::TeacherLogin => "login.teacher",
            Action::StudentLogin => "login.student",
            Action::SubmitRegistration => "studentLogin.submit",
            Action::BackToLogin => "studentLogin.back",
            Action::SelectClass => "teacher.selectClass",
            Action::TakeAttendance => "teacher.takeAttendance",
            Action::TogglePresent => "teacher.togglePresent",
            Action::ToggleAll => "teacher.toggleAll",
            Action::TeacherLogout => "teacher.logout",
            Action::GiveAttendance => "student.giveAttendance",
            Action::StudentLogout => "student.logout",
        }
    }
}

impl Page {
    pub fn name(&self) -> &'static str {
        match self {
            Page::Login => "login",
            Page::TeacherDashboard(_) => "teacher_dashboard",
            Page::StudentLogin => "student_login",
            Page::StudentDashboard { .. } => "student_dashboard",
        }
    }

    /// Transition table: the actions each page accepts.
    pub fn actions(&self) -> &'static [Action] {
        match self {
            Page::Login => &[Action::TeacherLogin, Action::StudentLogin],
            Page::StudentLogin => &[Action::SubmitRegistration, Action::BackToLogin],
            Page::TeacherDashboard(_) => &[
                Action::SelectClass,
                Action::TakeAttendance,
                Action::TogglePresent,
                Action::ToggleAll,
                Action::TeacherLogout,
            ],
            Page::StudentDashboard { .. } => &[Action::GiveAttendance, Action::StudentLogout],
        }
    }

    pub fn accepts(&self, action: Action) -> bool {
        self.actions().contains(&action)
    }
}

/// Per-session interaction state. Recreated with defaults when a session id is
/// first seen.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub page: Page,
    /// One-shot message shown on the next render only.
    pub notice: Option<String>,
    pub warnings: Vec<String>,
}

impl Session {
    pub fn go(&mut self, page: Page) {
        self.page = page;
    }

    /// Consumes the one-shot notice and warnings for a render.
    pub fn take_flash(&mut self) -> (Option<String>, Vec<String>) {
        (self.notice.take(), std::mem::take(&mut self.warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_page_only_offers_the_two_login_buttons() {
        let p = Page::Login;
        assert!(p.accepts(Action::TeacherLogin));
        assert!(p.accepts(Action::StudentLogin));
        assert!(!p.accepts(Action::TakeAttendance));
        assert!(!p.accepts(Action::StudentLogout));
    }

    #[test]
    fn dashboards_reject_each_others_actions() {
        let teacher = Page::TeacherDashboard(TeacherDashboard::default());
        let student = Page::StudentDashboard {
            roll: "101".to_string(),
        };
        assert!(!teacher.accepts(Action::GiveAttendance));
        assert!(!student.accepts(Action::TakeAttendance));
        assert!(!student.accepts(Action::SubmitRegistration));
        assert!(teacher.accepts(Action::TeacherLogout));
        assert!(student.accepts(Action::StudentLogout));
    }

    #[test]
    fn every_action_has_a_distinct_method_name() {
        let pages = [
            Page::Login,
            Page::StudentLogin,
            Page::TeacherDashboard(TeacherDashboard::default()),
            Page::StudentDashboard {
                roll: "1".to_string(),
            },
        ];
        let mut seen = std::collections::HashSet::new();
        for p in pages {
            for a in p.actions() {
                assert!(seen.insert(a.method()), "duplicate {}", a.method());
            }
        }
        assert_eq!(seen.len(), 11);
    }

    #[test]
    fn list_toggle_is_mutually_exclusive() {
        let v = ListView::Hidden.toggle(ListView::Present);
        assert_eq!(v, ListView::Present);
        let v = v.toggle(ListView::All);
        assert_eq!(v, ListView::All);
        assert_eq!(v.toggle(ListView::All), ListView::Hidden);
    }

    #[test]
    fn flash_is_consumed_once() {
        let mut s = Session {
            notice: Some("hi".to_string()),
            warnings: vec!["w".to_string()],
            ..Session::default()
        };
        assert_eq!(s.take_flash(), (Some("hi".to_string()), vec!["w".to_string()]));
        assert_eq!(s.take_flash(), (None, Vec::new()));
    }
}
