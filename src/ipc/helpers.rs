use crate::config::Config;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::Department;
use crate::render;
use crate::session::{Action, Session};
use crate::store::{JsonStore, StudentStore};
use serde_json::json;

pub const DEFAULT_SESSION: &str = "default";

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        HandlerErr {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// I/O failures from the store. The request fails; the process keeps going.
    pub fn store(code: &'static str, e: anyhow::Error) -> Self {
        tracing::error!(code, error = %format!("{e:#}"), "store operation failed");
        HandlerErr::new(code, format!("{e:#}"))
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::new("bad_params", format!("missing {}", key)))
}

pub fn get_optional_str(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

pub fn session_id(params: &serde_json::Value) -> String {
    get_optional_str(params, "sessionId")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION.to_string())
}

pub fn parse_department(raw: &str) -> Result<Department, HandlerErr> {
    raw.parse::<Department>()
        .map_err(|e| HandlerErr::new("bad_params", e))
}

/// Renders a session (created with defaults when unknown) without running any
/// action.
pub fn render_session(state: &mut AppState, sid: &str) -> serde_json::Value {
    let AppState {
        config,
        workspace,
        store,
        sessions,
    } = state;
    let logo = config.logo_path(workspace.as_deref());
    let session = sessions.entry(sid.to_string()).or_default();
    render::render(session, store.as_ref().map(|s| s.students()), &logo)
}

/// Runs a page action against a draft copy of the session. The draft replaces
/// the session only when the action succeeds, so a rejected action leaves the
/// page as it was. Either way the response carries the re-rendered page.
pub fn run_page_action<F>(
    state: &mut AppState,
    req: &Request,
    action: Action,
    f: F,
) -> serde_json::Value
where
    F: FnOnce(&mut Session, &mut JsonStore, &Config, &serde_json::Value) -> Result<(), HandlerErr>,
{
    let sid = session_id(&req.params);
    let AppState {
        config,
        workspace,
        store,
        sessions,
    } = state;
    let Some(store) = store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let logo = config.logo_path(workspace.as_deref());
    let session = sessions.entry(sid.clone()).or_default();

    if !session.page.accepts(action) {
        let message = format!(
            "{} is not available on page {}",
            action.method(),
            session.page.name()
        );
        tracing::warn!(session = %sid, action = action.method(), page = session.page.name(), "rejected action");
        let page = render::render(session, Some(store.students()), &logo);
        let mut e = HandlerErr::new("wrong_page", message);
        e.details = Some(json!({ "sessionId": sid, "page": page }));
        return e.response(&req.id);
    }

    let mut draft = session.clone();
    match f(&mut draft, &mut *store, &*config, &req.params) {
        Ok(()) => {
            *session = draft;
            let page = render::render(session, Some(store.students()), &logo);
            ok(&req.id, json!({ "sessionId": sid, "page": page }))
        }
        Err(mut e) => {
            let page = render::render(session, Some(store.students()), &logo);
            e.details = Some(json!({ "sessionId": sid, "page": page }));
            e.response(&req.id)
        }
    }
}
