use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::config::Config;
use crate::session::Session;
use crate::store::JsonStore;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub config: Config,
    pub workspace: Option<PathBuf>,
    pub store: Option<JsonStore>,
    pub sessions: HashMap<String, Session>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            workspace: None,
            store: None,
            sessions: HashMap::new(),
        }
    }
}
