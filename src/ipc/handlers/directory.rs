use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{get_optional_str, parse_department};
use crate::ipc::types::{AppState, Request};
use crate::store::StudentStore;
use serde_json::json;

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let department = match get_optional_str(&req.params, "department") {
        Some(raw) => match parse_department(&raw) {
            Ok(d) => Some(d),
            Err(e) => return e.response(&req.id),
        },
        None => None,
    };
    let rows: Vec<serde_json::Value> = store
        .students()
        .iter()
        .filter(|s| department.map(|d| s.department == d).unwrap_or(true))
        .map(|s| {
            json!({
                "rollNumber": s.roll_number,
                "name": s.name,
                "department": s.department.as_str(),
                "attendance": s.attendance.label(),
            })
        })
        .collect();
    ok(&req.id, json!({ "students": rows }))
}

fn handle_teachers_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let rows: Vec<serde_json::Value> = store
        .teachers()
        .iter()
        .map(|t| {
            json!({
                "id": t.id,
                "name": t.name,
                "classes": t.classes.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
            })
        })
        .collect();
    ok(&req.id, json!({ "teachers": rows }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "teachers.list" => Some(handle_teachers_list(state, req)),
        _ => None,
    }
}
