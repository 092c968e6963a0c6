//! Domain layer: accounts, discussions and messages.

pub mod account;
pub mod discussion;
pub mod message;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
