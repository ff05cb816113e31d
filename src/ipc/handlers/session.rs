use crate::ipc::error::ok;
use crate::ipc::helpers::{get_optional_str, get_required_str, render_session};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use uuid::Uuid;

fn handle_session_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let sid = get_optional_str(&req.params, "sessionId")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    if !state.sessions.contains_key(&sid) {
        tracing::debug!(session = %sid, "new session");
    }
    let page = render_session(state, &sid);
    ok(&req.id, json!({ "sessionId": sid, "page": page }))
}

fn handle_session_close(state: &mut AppState, req: &Request) -> serde_json::Value {
    let sid = match get_required_str(&req.params, "sessionId") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let closed = state.sessions.remove(&sid).is_some();
    ok(&req.id, json!({ "sessionId": sid, "closed": closed }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.open" => Some(handle_session_open(state, req)),
        "session.close" => Some(handle_session_close(state, req)),
        _ => None,
    }
}
