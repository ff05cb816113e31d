use crate::ipc::error::{err, ok};
use crate::ipc::helpers::HandlerErr;
use crate::ipc::types::{AppState, Request};
use crate::model::MAX_STUDENTS;
use crate::store::{JsonStore, StudentStore};
use serde_json::json;
use std::path::{Path, PathBuf};

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string()),
            "students": state.store.as_ref().map(|s| s.students().len()),
            "maxStudents": MAX_STUDENTS,
            "attendanceRecords": state.store.as_ref().map(|s| s.attendance_record_count()),
            "sessions": state.sessions.len(),
        }),
    )
}

/// Opens (or seeds) the collection blobs under `path` and makes it the active
/// workspace. Sessions survive a workspace switch.
pub fn open_workspace(state: &mut AppState, path: &Path) -> anyhow::Result<()> {
    let store = JsonStore::open(path)?;
    tracing::info!(
        workspace = %path.display(),
        students = store.students().len(),
        teachers = store.teachers().len(),
        "workspace opened"
    );
    state.workspace = Some(path.to_path_buf());
    state.store = Some(store);
    Ok(())
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    match open_workspace(state, &path) {
        Ok(()) => ok(&req.id, json!({ "workspacePath": path.to_string_lossy() })),
        Err(e) => HandlerErr::store("store_load_failed", e).response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        _ => None,
    }
}
