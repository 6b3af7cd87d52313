//! Logging utilities.
//!
//! Centralizes logger initialization behind the standard `log` facade so
//! the rest of the crate only ever emits through `log::*` macros.

mod init;

pub use init::{LoggingConfig, init_logging};
