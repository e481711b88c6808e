// ─────────────────────────────────────────────────────────────────────────────
//  pong-build :: toolchain  —  compiler presence and target checks
//
//  Two queries, each run at most once:
//
//    1. `where clang` / `which clang`  → is it on PATH, and is that a file?
//    2. `clang -v`                     → does its default target say x86_64?
//
//  Both parse another program's human-oriented text. That parsing lives in
//  `strip_line_terminator` and `reports_x64_target` and nowhere else.
// ─────────────────────────────────────────────────────────────────────────────

use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};
use crate::platform::PlatformTarget;
use crate::process::ProcessRunner;

/// Marker clang prints in its `Target:` line for 64-bit x86.
pub const X64_MARKER: &str = "x86_64";

/// What the validator learned about the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainInfo {
    pub compiler:    String,
    pub path:        Option<PathBuf>,
    pub present:     bool,
    pub targets_x64: bool,
}

/// A compiler known to be present and targeting x86_64.
///
/// Only `ToolchainInfo::require` hands these out, so anything that takes one
/// cannot run before validation has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedToolchain {
    compiler: String,
    path:     PathBuf,
}

impl ValidatedToolchain {
    /// Name the compiler is invoked by.
    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ToolchainInfo {
    pub fn require(self) -> Result<ValidatedToolchain> {
        match (self.present, self.targets_x64, self.path) {
            (true, true, Some(path)) => Ok(ValidatedToolchain { compiler: self.compiler, path }),
            (true, false, Some(_))   => Err(BuildError::ToolchainWrongArchitecture(self.compiler)),
            _                        => Err(BuildError::ToolchainNotFound(self.compiler)),
        }
    }
}

/// Locate `compiler` on PATH and classify its target.
pub fn validate(runner: &dyn ProcessRunner, target: PlatformTarget, compiler: &str) -> Result<ToolchainInfo> {
    let path = locate(runner, target.path_lookup_tool(), compiler)?;

    let Some(path) = path else {
        tracing::info!(compiler, "compiler not on PATH");
        return Ok(ToolchainInfo {
            compiler:    compiler.to_owned(),
            path:        None,
            present:     false,
            targets_x64: false,
        });
    };

    let version = runner.capture(compiler, &["-v"])?;
    if !version.stdout.is_empty() {
        return Err(BuildError::UnexpectedToolOutput {
            tool:   format!("{compiler} -v"),
            stream: "stdout",
            output: version.stdout,
        });
    }

    let targets_x64 = reports_x64_target(&version.stderr);
    tracing::debug!(compiler, path = %path.display(), targets_x64, "compiler found");

    Ok(ToolchainInfo {
        compiler: compiler.to_owned(),
        path:     Some(path),
        present:  true,
        targets_x64,
    })
}

/// Run the lookup utility; `Some(path)` only when it names a regular file.
fn locate(runner: &dyn ProcessRunner, lookup_tool: &str, compiler: &str) -> Result<Option<PathBuf>> {
    let out = runner.capture(lookup_tool, &[compiler])?;
    if !out.stderr.is_empty() {
        return Err(BuildError::UnexpectedToolOutput {
            tool:   format!("{lookup_tool} {compiler}"),
            stream: "stderr",
            output: out.stderr,
        });
    }

    let candidate = strip_line_terminator(&out.stdout);
    if candidate.is_empty() {
        return Ok(None);
    }

    let candidate = PathBuf::from(candidate);
    Ok(candidate.is_file().then_some(candidate))
}

/// Remove trailing line terminators (`\n`, each optionally preceded by `\r`).
///
/// The result never ends in `\n`, so applying this twice equals applying it
/// once. A lone trailing `\r` is kept, and inner line breaks are kept, so
/// multi-line lookup output stays multi-line (and then fails the file check).
pub fn strip_line_terminator(mut s: &str) -> &str {
    while let Some(rest) = s.strip_suffix('\n') {
        s = rest.strip_suffix('\r').unwrap_or(rest);
    }
    s
}

/// True when `clang -v` diagnostics mention the x86_64 target.
pub fn reports_x64_target(diagnostics: &str) -> bool {
    diagnostics.contains(X64_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::FakeRunner;
    use pretty_assertions::assert_eq;

    const CLANG_V_X64: &str = "clang version 17.0.6\nTarget: x86_64-pc-windows-msvc\nThread model: posix\n";
    const CLANG_V_ARM: &str = "clang version 17.0.6\nTarget: aarch64-apple-darwin23.0.0\nThread model: posix\n";

    fn fake_compiler() -> tempfile::NamedTempFile {
        tempfile::NamedTempFile::new().unwrap()
    }

    #[test]
    fn strips_newline_and_crlf() {
        assert_eq!(strip_line_terminator("/usr/bin/clang\n"), "/usr/bin/clang");
        assert_eq!(strip_line_terminator("C:\\LLVM\\bin\\clang.exe\r\n"), "C:\\LLVM\\bin\\clang.exe");
        assert_eq!(strip_line_terminator("/usr/bin/clang"), "/usr/bin/clang");
        assert_eq!(strip_line_terminator(""), "");
        assert_eq!(strip_line_terminator("clang\r"), "clang\r");
    }

    #[test]
    fn stripping_is_idempotent() {
        for s in ["/usr/bin/clang\n", "C:\\clang.exe\r\n", "clang", "", "a\nb\n", "x\r", "y\r\n\n"] {
            let once = strip_line_terminator(s);
            assert_eq!(strip_line_terminator(once), once, "{s:?}");
        }
    }

    #[test]
    fn x64_marker_detection() {
        assert!(reports_x64_target(CLANG_V_X64));
        assert!(!reports_x64_target(CLANG_V_ARM));
        assert!(!reports_x64_target(""));
    }

    #[test]
    fn present_and_x64() {
        let exe = fake_compiler();
        let listed = format!("{}\r\n", exe.path().display());
        let runner = FakeRunner::new()
            .reply("where clang", &listed, "")
            .reply("clang -v", "", CLANG_V_X64);

        let info = validate(&runner, PlatformTarget::WindowsLike, "clang").unwrap();
        assert!(info.present);
        assert!(info.targets_x64);
        assert_eq!(info.path.as_deref(), Some(exe.path()));
        assert_eq!(*runner.captured.borrow(), vec!["where clang", "clang -v"]);

        let ok = info.require().unwrap();
        assert_eq!(ok.compiler(), "clang");
    }

    #[test]
    fn absent_skips_version_query() {
        let runner = FakeRunner::new();
        let info = validate(&runner, PlatformTarget::Linux, "clang").unwrap();
        assert!(!info.present);
        assert_eq!(*runner.captured.borrow(), vec!["which clang"]);
        assert!(matches!(info.require(), Err(BuildError::ToolchainNotFound(c)) if c == "clang"));
    }

    #[test]
    fn lookup_result_must_be_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let listed = format!("{}\n", dir.path().display());
        let runner = FakeRunner::new().reply("which clang", &listed, "");
        let info = validate(&runner, PlatformTarget::Linux, "clang").unwrap();
        assert!(!info.present);
    }

    #[test]
    fn wrong_architecture() {
        let exe = fake_compiler();
        let listed = format!("{}\n", exe.path().display());
        let runner = FakeRunner::new()
            .reply("which clang", &listed, "")
            .reply("clang -v", "", CLANG_V_ARM);

        let info = validate(&runner, PlatformTarget::MacOS, "clang").unwrap();
        assert!(info.present);
        assert!(!info.targets_x64);
        assert!(matches!(info.require(), Err(BuildError::ToolchainWrongArchitecture(_))));
    }

    #[test]
    fn lookup_stderr_is_an_invariant_violation() {
        let runner = FakeRunner::new().reply("which clang", "", "which: no clang in (/usr/bin)\n");
        match validate(&runner, PlatformTarget::Linux, "clang") {
            Err(BuildError::UnexpectedToolOutput { tool, stream, .. }) => {
                assert_eq!(tool, "which clang");
                assert_eq!(stream, "stderr");
            }
            other => panic!("expected UnexpectedToolOutput, got {other:?}"),
        }
    }

    #[test]
    fn version_stdout_is_an_invariant_violation() {
        let exe = fake_compiler();
        let listed = format!("{}\n", exe.path().display());
        let runner = FakeRunner::new()
            .reply("which clang", &listed, "")
            .reply("clang -v", "clang version 17\n", "");
        match validate(&runner, PlatformTarget::Linux, "clang") {
            Err(BuildError::UnexpectedToolOutput { stream, .. }) => assert_eq!(stream, "stdout"),
            other => panic!("expected UnexpectedToolOutput, got {other:?}"),
        }
    }
}
