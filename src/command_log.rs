// ─────────────────────────────────────────────────────────────────────────────
//  pong-build :: command_log  —  last attempted invocation
//
//  Written before the compiler is spawned, so the file always holds the most
//  recent attempt whether or not it succeeded.
// ─────────────────────────────────────────────────────────────────────────────

use std::path::{Path, PathBuf};

use crate::error::Result;

pub const LOG_FILE: &str = "last_compile_command.txt";

/// Overwrite `<build_dir>/last_compile_command.txt` with `command_text`.
pub fn persist(command_text: &str, build_dir: &Path) -> Result<PathBuf> {
    let path = build_dir.join(LOG_FILE);
    std::fs::write(&path, command_text)?;
    tracing::debug!(path = %path.display(), bytes = command_text.len(), "command logged");
    Ok(path)
}

/// Text stored by the last `persist` into `build_dir`.
pub fn read_last(build_dir: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(build_dir.join(LOG_FILE))?)
}
