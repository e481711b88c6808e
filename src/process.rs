// ─────────────────────────────────────────────────────────────────────────────
//  pong-build :: process  —  subprocess seam
//
//  Everything the pipeline spawns goes through `ProcessRunner`:
//
//    capture  — short queries (`which clang`, `clang -v`), output collected
//    spawn    — the compile itself, stdio inherited from the caller
//
//  `SystemRunner` is the real implementation; tests substitute their own.
// ─────────────────────────────────────────────────────────────────────────────

use std::process::{Command, Stdio};

use crate::error::{BuildError, Result};

/// Captured output of a finished query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub stdout: String,
    pub stderr: String,
}

pub trait ProcessRunner {
    /// Run `program args…` to completion and collect both streams.
    fn capture(&self, program: &str, args: &[&str]) -> Result<Captured>;

    /// Run `program args…` with inherited stdio and wait for it.
    ///
    /// Returns the exit code, or `None` when the child was killed by a signal.
    fn spawn(&self, program: &str, args: &[String]) -> Result<Option<i32>>;
}

/// Runs real processes on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn capture(&self, program: &str, args: &[&str]) -> Result<Captured> {
        tracing::debug!(program, ?args, "capturing");

        let out = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| BuildError::Spawn { program: program.to_owned(), source })?;

        Ok(Captured {
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }

    fn spawn(&self, program: &str, args: &[String]) -> Result<Option<i32>> {
        tracing::info!(program, argc = args.len(), "spawning");

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| BuildError::Spawn { program: program.to_owned(), source })?;

        Ok(status.code())
    }
}
