use std::path::{Path, PathBuf};

const DEFAULT_HOST: &str = "https://next.openspending.org";

/// Explicit configuration for the recorder and the freezer.
///
/// Live snapshots land in `user_dir`; frozen (redacted) snapshots land
/// in `snapshots_dir`, meant to be checked into the repository as
/// fixtures.
#[derive(Debug, Clone)]
pub struct RecorderConfiguration {
    freeze_mode: bool,
    expanded_log_style: bool,
    host: String,
    user_dir: PathBuf,
    snapshots_dir: PathBuf,
}

impl RecorderConfiguration {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(user_dir: P, snapshots_dir: Q) -> Self {
        Self {
            freeze_mode: false,
            expanded_log_style: false,
            host: DEFAULT_HOST.into(),
            user_dir: user_dir.into(),
            snapshots_dir: snapshots_dir.into(),
        }
    }

    pub fn set_freeze_mode(&mut self, value: bool) {
        self.freeze_mode = value;
    }

    pub fn freeze_mode(&self) -> bool {
        self.freeze_mode
    }

    pub fn set_expanded_log_style(&mut self, value: bool) {
        self.expanded_log_style = value;
    }

    pub fn expanded_log_style(&self) -> bool {
        self.expanded_log_style
    }

    pub fn set_host<S: Into<String>>(&mut self, host: S) {
        self.host = host.into();
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    pub fn snapshots_dir(&self) -> &Path {
        &self.snapshots_dir
    }
}
