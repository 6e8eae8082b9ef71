//! Command implementations for spanpatch-cli

pub mod apply;
pub mod check;

pub use apply::run_apply;
pub use check::run_check;
