mod config;
mod data;
mod endpoint;
mod error;
mod freeze;
mod snapshot;

pub mod fixtures;

pub use config::RecorderConfiguration;
pub use data::ResponseData;
pub use endpoint::Endpoint;
pub use error::Error;
pub use freeze::{freeze, freeze_and_archive};
pub use snapshot::{Snapshot, SnapshotRecorder};
