use crate::ipc::helpers::run_page_action;
use crate::ipc::types::{AppState, Request};
use crate::session::{Action, Page, TeacherDashboard};

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "login.teacher" => Some(run_page_action(
            state,
            req,
            Action::TeacherLogin,
            |session, _, _, _| {
                session.go(Page::TeacherDashboard(TeacherDashboard::default()));
                Ok(())
            },
        )),
        "login.student" => Some(run_page_action(
            state,
            req,
            Action::StudentLogin,
            |session, _, _, _| {
                session.go(Page::StudentLogin);
                Ok(())
            },
        )),
        _ => None,
    }
}
