use crate::ipc::helpers::{get_optional_str, parse_department, run_page_action, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::session::{Action, Page, Session};
use crate::store::JsonStore;
use crate::workflow::{self, Registration, RegistrationError};

fn submit(
    session: &mut Session,
    store: &mut JsonStore,
    params: &serde_json::Value,
) -> Result<(), HandlerErr> {
    let name = get_optional_str(params, "name").unwrap_or_default();
    let roll = get_optional_str(params, "rollNumber").unwrap_or_default();
    let department = match get_optional_str(params, "department") {
        Some(raw) if !raw.trim().is_empty() => Some(parse_department(&raw)?),
        _ => None,
    };

    let student = workflow::register(
        store,
        Registration {
            name: &name,
            roll_number: &roll,
            department,
        },
    )
    .map_err(|e| match e {
        RegistrationError::Store(inner) => HandlerErr::store("store_save_failed", inner),
        other => HandlerErr::new(other.code(), other.to_string()),
    })?;

    session.notice = Some(format!("Student {} logged in successfully.", student.name));
    session.go(Page::StudentDashboard {
        roll: student.roll_number,
    });
    Ok(())
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "studentLogin.submit" => Some(run_page_action(
            state,
            req,
            Action::SubmitRegistration,
            |session, store, _, params| submit(session, store, params),
        )),
        "studentLogin.back" => Some(run_page_action(
            state,
            req,
            Action::BackToLogin,
            |session, _, _, _| {
                session.go(Page::Login);
                Ok(())
            },
        )),
        _ => None,
    }
}
