//! Infrastructure layer: config, storage and logging adapters.

pub mod account_store;
pub mod config;
pub mod contracts;
pub mod error;
pub mod file_storage;
pub mod logging;
pub mod secrets;
pub mod storage_layout;
pub mod stubs;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
