// ─────────────────────────────────────────────────────────────────────────────
//  pong-build :: error
// ─────────────────────────────────────────────────────────────────────────────

use std::path::PathBuf;

use thiserror::Error;

use crate::platform::PlatformTarget;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{0} compiler not found\n  Hint: install it and make sure it's in the PATH")]
    ToolchainNotFound(String),

    #[error("{0} target is not x64\n  Hint: this code should only be compiled for x64")]
    ToolchainWrongArchitecture(String),

    #[error("Unsupported platform '{0}' — only windows, linux and macos are recognized")]
    UnsupportedPlatform(String),

    #[error("Build settings are not configured for {0}\n  Hint: fill in the {0} linker flags before building")]
    UnconfiguredPlatformLinker(PlatformTarget),

    #[error("`{tool}` wrote unexpected output to {stream}:\n{output}")]
    UnexpectedToolOutput {
        tool:   String,
        stream: &'static str,
        output: String,
    },

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source:  std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// True for the checks that run before anything is created or spawned.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            BuildError::ToolchainNotFound(_)
                | BuildError::ToolchainWrongArchitecture(_)
                | BuildError::UnsupportedPlatform(_)
                | BuildError::UnconfiguredPlatformLinker(_)
                | BuildError::UnexpectedToolOutput { .. }
                | BuildError::Config { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
