//! Command handlers: bridge CLI args -> core pipeline -> output formatting.

pub mod config_cmd;
pub mod debug_log;
pub mod inspect;
pub mod run;
