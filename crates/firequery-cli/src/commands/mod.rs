//! CLI command implementations.

pub mod args;
pub mod check;
pub mod locate;
pub mod replay;
pub mod targets;
