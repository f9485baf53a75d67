//! Testing aid: a [`CommandRunner`] that needs no array.
//!
//! [`ScriptedRunner`] is public so downstream crates and this crate's
//! integration tests can drive the pollers without `naviseccli`. The
//! exporter binary never uses it.

use crate::error::{ExporterError, Result};
use crate::navi::command::VendorCommand;
use crate::navi::runner::CommandRunner;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted [`CommandRunner`] that replays canned outputs in order.
///
/// Outputs are returned as-is; the command's
/// [`OutputFilter`](crate::navi::OutputFilter) is not applied, so scripts
/// hold already reduced text. Once the script is exhausted every call
/// fails, which ends a poll loop.
#[derive(Default)]
pub struct ScriptedRunner {
    script: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<VendorCommand>>,
}

impl ScriptedRunner {
    pub fn new(script: Vec<Result<String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Commands received so far.
    pub fn calls(&self) -> Vec<VendorCommand> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &VendorCommand) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }

        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());

        next.unwrap_or_else(|| Err(ExporterError::config_error("scripted runner exhausted")))
    }
}
