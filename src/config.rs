use crate::scan::ScanDelay;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "attendd", version, about = "Attendance tracking sidecar (JSON lines over stdio)")]
pub struct Args {
    /// Directory holding students.json, teachers.json and attendance.json
    #[arg(long, env = "ATTENDD_WORKSPACE")]
    pub workspace: Option<PathBuf>,
    /// Logo image; relative paths resolve against the workspace
    #[arg(long, env = "ATTENDD_LOGO", default_value = "mckvian_logo.jpeg")]
    pub logo: PathBuf,
    #[arg(long, env = "ATTENDD_SCAN_DELAY_MIN_SECS", default_value_t = 10)]
    pub scan_delay_min_secs: u64,
    #[arg(long, env = "ATTENDD_SCAN_DELAY_MAX_SECS", default_value_t = 30)]
    pub scan_delay_max_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub workspace: Option<PathBuf>,
    pub logo: PathBuf,
    pub scan_delay: ScanDelay,
}

impl Config {
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let scan_delay = ScanDelay::new(args.scan_delay_min_secs, args.scan_delay_max_secs)?;
        Ok(Config {
            workspace: args.workspace,
            logo: args.logo,
            scan_delay,
        })
    }

    pub fn logo_path(&self, workspace: Option<&Path>) -> PathBuf {
        match workspace {
            Some(ws) if self.logo.is_relative() => ws.join(&self.logo),
            _ => self.logo.clone(),
        }
    }
}
