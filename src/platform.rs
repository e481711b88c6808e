// ─────────────────────────────────────────────────────────────────────────────
//  pong-build :: platform  —  host platform table
//
//  The host OS is resolved once into a `PlatformTarget`; everything
//  downstream consults the settings table indexed by it.
// ─────────────────────────────────────────────────────────────────────────────

use std::fmt;

use crate::error::{BuildError, Result};

/// The three operating systems the project can be built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformTarget {
    WindowsLike,
    Linux,
    MacOS,
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlatformTarget::WindowsLike => "Windows",
            PlatformTarget::Linux       => "Linux",
            PlatformTarget::MacOS       => "MacOS",
        })
    }
}

impl PlatformTarget {
    /// Map an OS identifier (`std::env::consts::OS` or a Python-style
    /// `sys.platform` value) to a target.
    pub fn from_os_id(os_id: &str) -> Result<Self> {
        match os_id {
            "windows" | "win32"  => Ok(PlatformTarget::WindowsLike),
            "linux"              => Ok(PlatformTarget::Linux),
            "macos" | "darwin"   => Ok(PlatformTarget::MacOS),
            other                => Err(BuildError::UnsupportedPlatform(other.to_owned())),
        }
    }

    /// Utility that prints the full path of an executable found on PATH.
    pub fn path_lookup_tool(self) -> &'static str {
        match self {
            PlatformTarget::WindowsLike                   => "where",
            PlatformTarget::Linux | PlatformTarget::MacOS => "which",
        }
    }
}

/// Sources, libraries and output layout for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSettings {
    pub sources:      &'static [&'static str],
    pub libraries:    &'static [&'static str],
    /// Single linker-flags token; `None` while the platform is not set up.
    pub linker_flags: Option<&'static str>,
    /// Subdirectory of `<root>/build`.
    pub build_subdir: &'static str,
    pub exe_suffix:   &'static str,
}

static WIN32: PlatformSettings = PlatformSettings {
    sources:      &["win32/win32_main.c"],
    libraries:    &["-lkernel32", "-luser32", "-lwinmm", "-lgdi32", "-lole32"],
    linker_flags: Some("-Wl,-wx,-subsystem:windows,-incremental:no,-opt:ref"),
    build_subdir: "win32",
    exe_suffix:   ".exe",
};

static LINUX: PlatformSettings = PlatformSettings {
    sources:      &[],
    libraries:    &[],
    linker_flags: None,
    build_subdir: "linux",
    exe_suffix:   "",
};

static MACOS: PlatformSettings = PlatformSettings {
    sources:      &[],
    libraries:    &[],
    linker_flags: None,
    build_subdir: "mac",
    exe_suffix:   "",
};

/// Raw table entry, whether or not the platform is fully configured.
pub fn settings(target: PlatformTarget) -> &'static PlatformSettings {
    match target {
        PlatformTarget::WindowsLike => &WIN32,
        PlatformTarget::Linux       => &LINUX,
        PlatformTarget::MacOS       => &MACOS,
    }
}

/// Settings for a platform that can actually be built.
///
/// Fails with `UnconfiguredPlatformLinker` while the linker flags are unset.
pub fn resolve(target: PlatformTarget) -> Result<&'static PlatformSettings> {
    let s = settings(target);
    if s.linker_flags.is_none() {
        return Err(BuildError::UnconfiguredPlatformLinker(target));
    }
    tracing::debug!(%target, subdir = s.build_subdir, sources = s.sources.len(), "platform resolved");
    Ok(s)
}
