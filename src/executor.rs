// ─────────────────────────────────────────────────────────────────────────────
//  pong-build :: executor  —  build directory + compiler run
// ─────────────────────────────────────────────────────────────────────────────

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::command::CompileCommand;
use crate::error::Result;
use crate::process::ProcessRunner;

/// The build directory after `prepare`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDirectoryState {
    pub path:    PathBuf,
    /// False when the directory was already there.
    pub created: bool,
}

/// What came back from the compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Wall time since the start of the whole run.
    pub elapsed:   Duration,
    /// Compiler exit code, `None` if it died from a signal. Not interpreted.
    pub exit_code: Option<i32>,
}

impl BuildOutcome {
    /// Elapsed seconds, rounded to two decimals.
    pub fn elapsed_display(&self) -> String {
        format!("{:.2}", self.elapsed.as_secs_f64())
    }
}

/// Create `build_dir` (and its parents) if it is missing.
pub fn prepare(build_dir: &Path) -> Result<BuildDirectoryState> {
    let created = !build_dir.is_dir();
    if created {
        std::fs::create_dir_all(build_dir)?;
        tracing::info!(dir = %build_dir.display(), "build directory created");
    }
    Ok(BuildDirectoryState { path: build_dir.to_owned(), created })
}

/// Spawn the composed command and wait for it.
///
/// `started` marks the beginning of the whole run, so the returned time
/// covers validation and composition too.
pub fn run(
    runner:    &dyn ProcessRunner,
    command:   &CompileCommand,
    build_dir: &Path,
    started:   Instant,
) -> Result<BuildOutcome> {
    prepare(build_dir)?;

    let exit_code = runner.spawn(command.program(), command.args())?;
    tracing::info!(?exit_code, "compiler finished");

    Ok(BuildOutcome { elapsed: started.elapsed(), exit_code })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::FakeRunner;
    use pretty_assertions::assert_eq;

    #[test]
    fn prepare_creates_then_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("build").join("win32");

        let first = prepare(&dir).unwrap();
        assert!(first.created);
        assert!(dir.is_dir());

        let second = prepare(&dir).unwrap();
        assert!(!second.created);
        assert_eq!(second.path, dir);
    }

    #[test]
    fn elapsed_display_rounds() {
        let outcome = BuildOutcome { elapsed: Duration::from_millis(1234), exit_code: Some(0) };
        assert_eq!(outcome.elapsed_display(), "1.23");
        let outcome = BuildOutcome { elapsed: Duration::from_millis(7), exit_code: None };
        assert_eq!(outcome.elapsed_display(), "0.01");
    }

    #[test]
    fn exit_code_is_reported_not_judged() {
        let root = tempfile::tempdir().unwrap();
        let mut runner = FakeRunner::new();
        runner.exit_code = Some(1);

        let cmd = CompileCommand::from_tokens(["clang", "-o", "out/pong", "main.c"]);
        let outcome = run(&runner, &cmd, root.path(), Instant::now()).unwrap();
        assert_eq!(outcome.exit_code, Some(1));
        assert_eq!(runner.spawned.borrow()[0], cmd.tokens());
    }
}
