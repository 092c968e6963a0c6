//! UI layer: line-oriented terminal front-end.

pub mod command;
pub mod shell;
pub mod terminal;
pub mod view;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
