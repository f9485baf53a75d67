//! Invocation of the Navisphere secure CLI (`naviseccli`).
//!
//! Commands are built from [`NaviCliConfig`] and executed through a
//! [`CommandRunner`]. `naviseccli` is spawned directly, without a shell;
//! line truncation and counting are applied in-process by [`OutputFilter`]
//! after the tool has exited successfully.

pub mod command;
pub mod fake;
pub mod runner;

pub use command::{NaviCliConfig, OutputFilter, VendorCommand, DEFAULT_NAVISECCLI_PATH};
pub use fake::ScriptedRunner;
pub use runner::{CommandRunner, ShellRunner};
