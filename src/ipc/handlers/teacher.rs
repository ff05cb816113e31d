use crate::config::Config;
use crate::ipc::helpers::{get_required_str, parse_department, run_page_action, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::session::{Action, ListView, Page, Session, TeacherDashboard};
use crate::store::JsonStore;
use crate::workflow::{self, ScanError};

fn dashboard(session: &mut Session) -> Result<&mut TeacherDashboard, HandlerErr> {
    match &mut session.page {
        Page::TeacherDashboard(dash) => Ok(dash),
        _ => Err(HandlerErr::new("wrong_page", "teacher dashboard is not open")),
    }
}

fn select_class(session: &mut Session, params: &serde_json::Value) -> Result<(), HandlerErr> {
    let raw = get_required_str(params, "department")?;
    let class = parse_department(&raw)?;
    let dash = dashboard(session)?;
    dash.selected_class = Some(class);
    dash.message = format!(
        "Selected Class: {}. Click \"Take Attendance\" to scan.",
        class
    );
    dash.list = ListView::Hidden;
    Ok(())
}

fn take_attendance(
    session: &mut Session,
    store: &mut JsonStore,
    config: &Config,
) -> Result<(), HandlerErr> {
    let dash = dashboard(session)?;
    if dash.selected_class.is_some() {
        dash.list = ListView::Hidden;
    }
    let outcome = workflow::take_attendance(store, dash.selected_class, &config.scan_delay)
        .map_err(|e| match e {
            ScanError::Store(inner) => HandlerErr::store("store_save_failed", inner),
            other => HandlerErr::new(other.code(), other.to_string()),
        })?;
    dash.message = outcome.summary();
    dash.last_scan_at = Some(chrono::Utc::now());
    Ok(())
}

fn toggle(session: &mut Session, target: ListView) -> Result<(), HandlerErr> {
    let dash = dashboard(session)?;
    dash.list = dash.list.toggle(target);
    Ok(())
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "teacher.selectClass" => Some(run_page_action(
            state,
            req,
            Action::SelectClass,
            |session, _, _, params| select_class(session, params),
        )),
        "teacher.takeAttendance" => Some(run_page_action(
            state,
            req,
            Action::TakeAttendance,
            |session, store, config, _| take_attendance(session, store, config),
        )),
        "teacher.togglePresent" => Some(run_page_action(
            state,
            req,
            Action::TogglePresent,
            |session, _, _, _| toggle(session, ListView::Present),
        )),
        "teacher.toggleAll" => Some(run_page_action(
            state,
            req,
            Action::ToggleAll,
            |session, _, _, _| toggle(session, ListView::All),
        )),
        "teacher.logout" => Some(run_page_action(
            state,
            req,
            Action::TeacherLogout,
            |session, _, _, _| {
                // Dropping the dashboard clears class, message and list toggles.
                session.go(Page::Login);
                Ok(())
            },
        )),
        _ => None,
    }
}
