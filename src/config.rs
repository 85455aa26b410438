use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Where the CLI persists its `{progress, entries}` snapshot between runs.
    pub snapshot_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            snapshot_path: env::var("MOODARC_SNAPSHOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("moodarc.json")),
        }
    }
}
