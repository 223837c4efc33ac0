//! Process runner that spawns real commands.

use std::io;
use std::process::{Command, Stdio};

use tracing::{info, instrument};

use frontforge_core::{
    application::{ApplicationError, ports::{CommandSpec, ProcessRunner}},
    error::ForgeResult,
};

/// Runs commands to completion. The child's stdout is sent to our stderr so
/// that stdout carries only frontforge's own output (`--output-format json`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

/// `npm` is a batch script on Windows and has to be spawned as `npm.cmd`.
fn program_name(program: &str) -> String {
    if cfg!(windows) && program == "npm" {
        "npm.cmd".to_string()
    } else {
        program.to_string()
    }
}

impl ProcessRunner for SystemProcessRunner {
    #[instrument(skip_all, fields(command = %command, cwd = %command.cwd.display()))]
    fn run(&self, command: &CommandSpec) -> ForgeResult<()> {
        info!("Running");
        let failure = |status: Option<i32>, reason: String| ApplicationError::ProcessExecutionFailure {
            command: command.to_string(),
            cwd: command.cwd.clone(),
            status,
            reason,
        };

        let status = Command::new(program_name(&command.program))
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::from(io::stderr()))
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| failure(None, format!("failed to start: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(failure(status.code(), format!("exited with {status}")).into())
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use frontforge_core::error::ForgeError;

    #[test]
    fn zero_exit_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = CommandSpec::new("true", dir.path());
        assert!(SystemProcessRunner::new().run(&cmd).is_ok());
    }

    #[test]
    fn non_zero_exit_carries_status() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = CommandSpec::new("sh", dir.path()).args(["-c", "exit 3"]);

        let err = SystemProcessRunner::new().run(&cmd).unwrap_err();

        match err {
            ForgeError::Application(ApplicationError::ProcessExecutionFailure {
                status, command, ..
            }) => {
                assert_eq!(status, Some(3));
                assert_eq!(command, "sh -c exit 3");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_program_fails_to_start() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = CommandSpec::new("frontforge-definitely-not-a-program", dir.path());
        let err = SystemProcessRunner::new().run(&cmd).unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }
}
