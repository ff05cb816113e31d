use crate::ipc::helpers::{run_page_action, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::session::{Action, Page, Session};
use crate::store::JsonStore;
use crate::workflow;

fn logged_in_roll(session: &Session) -> Result<String, HandlerErr> {
    match &session.page {
        Page::StudentDashboard { roll } => Ok(roll.clone()),
        _ => Err(HandlerErr::new("wrong_page", "no student is logged in")),
    }
}

fn give_attendance(session: &mut Session, store: &mut JsonStore) -> Result<(), HandlerErr> {
    let roll = logged_in_roll(session)?;
    // A false return means the record vanished; the render redirects to login.
    workflow::give_attendance(store, &roll)
        .map_err(|e| HandlerErr::store("store_save_failed", e))?;
    Ok(())
}

fn logout(session: &mut Session, store: &mut JsonStore) -> Result<(), HandlerErr> {
    let roll = logged_in_roll(session)?;
    let removed = workflow::logout_student(store, &roll)
        .map_err(|e| HandlerErr::store("store_save_failed", e))?;
    if removed.is_some() {
        session.notice = Some("Logged out and data deleted.".to_string());
    }
    session.go(Page::Login);
    Ok(())
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "student.giveAttendance" => Some(run_page_action(
            state,
            req,
            Action::GiveAttendance,
            |session, store, _, _| give_attendance(session, store),
        )),
        "student.logout" => Some(run_page_action(
            state,
            req,
            Action::StudentLogout,
            |session, store, _, _| logout(session, store),
        )),
        _ => None,
    }
}
