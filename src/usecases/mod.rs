//! Use case layer: accounts, discussions and startup wiring.

pub mod bootstrap;
pub mod context;
pub mod conversation;
pub mod session;
pub mod startup;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
