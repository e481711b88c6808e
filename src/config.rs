// ─────────────────────────────────────────────────────────────────────────────
//  pong-build :: config  —  project configuration
//
//  Built once at startup and passed by reference to every stage.
//  Values come from an optional `build.toml` in the working directory:
//
//      [project]
//      root            = ".."       # project root, relative to the cwd
//      program_name    = "Pong"     # empty → name of the root directory
//      executable_name = "pong"     # empty → program_name, snake-cased
//      compiler        = "clang"
//
//      [flags]
//      enable_warnings = ["-Wconversion"]
//      disable_errors  = ["-Wno-error=unused-function", …]
//
//      [log]
//      level = "warn"
// ─────────────────────────────────────────────────────────────────────────────

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BuildError, Result};
use crate::platform::PlatformSettings;

pub const CONFIG_FILE: &str = "build.toml";

// ── TOML schema ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    project: RawProject,
    flags:   RawFlags,
    log:     RawLog,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawProject {
    root:            String,
    program_name:    String,
    executable_name: String,
    compiler:        String,
}

impl Default for RawProject {
    fn default() -> Self {
        Self {
            root:            "..".into(),
            program_name:    "Pong".into(),
            executable_name: "pong".into(),
            compiler:        "clang".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawFlags {
    enable_warnings: Vec<String>,
    disable_errors:  Vec<String>,
}

impl Default for RawFlags {
    fn default() -> Self {
        Self {
            enable_warnings: vec!["-Wconversion".into()],
            disable_errors: vec![
                "-Wno-error=unused-function".into(),
                "-Wno-error=unused-variable".into(),
                "-Wno-error=unused-parameter".into(),
                "-Wno-error=unused-but-set-variable".into(),
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawLog {
    level: String,
}

impl Default for RawLog {
    fn default() -> Self {
        Self { level: "warn".into() }
    }
}

// ── Resolved config ───────────────────────────────────────────────────────────

/// Immutable, normalised project configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Project root without a trailing separator.
    pub root:            String,
    pub program_name:    String,
    pub executable_name: String,
    pub compiler:        String,
    pub enable_warnings: Vec<String>,
    pub disable_errors:  Vec<String>,
    pub log_level:       String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::from_raw(RawConfig::default())
    }
}

impl BuildConfig {
    /// Load `build.toml` from `dir`, falling back to the defaults when absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)?;
        Self::from_toml(&text).map_err(|message| BuildError::Config { path, message })
    }

    /// Parse config text. Errors are returned as the parser's message.
    pub fn from_toml(text: &str) -> std::result::Result<Self, String> {
        let raw: RawConfig = toml::from_str(text).map_err(|e| e.message().to_owned())?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let root = strip_trailing_separator(&raw.project.root).to_owned();

        let program_name = if raw.project.program_name.is_empty() {
            dir_name(&root)
        } else {
            raw.project.program_name
        };

        let executable_name = if raw.project.executable_name.is_empty() {
            program_name.to_lowercase().replace(' ', "_")
        } else {
            raw.project.executable_name
        };

        Self {
            root,
            program_name,
            executable_name,
            compiler:        raw.project.compiler,
            enable_warnings: raw.flags.enable_warnings,
            disable_errors:  raw.flags.disable_errors,
            log_level:       raw.log.level,
        }
    }

    /// `<root>/build/<subdir>` for the given platform.
    pub fn build_dir(&self, settings: &PlatformSettings) -> String {
        format!("{}/build/{}", self.root, settings.build_subdir)
    }

    /// `<build dir>/<executable><suffix>` for the given platform.
    pub fn executable_path(&self, settings: &PlatformSettings) -> String {
        format!("{}/{}{}", self.build_dir(settings), self.executable_name, settings.exe_suffix)
    }
}

fn strip_trailing_separator(root: &str) -> &str {
    root.strip_suffix('/')
        .or_else(|| root.strip_suffix('\\'))
        .unwrap_or(root)
}

/// Final component of the absolute form of `root`.
fn dir_name(root: &str) -> String {
    let abs = std::path::absolute(root).unwrap_or_else(|_| PathBuf::from(root));
    // `absolute` keeps `..` components; resolve them lexically first.
    let mut clean = PathBuf::new();
    for part in abs.components() {
        match part {
            std::path::Component::ParentDir => { clean.pop(); }
            std::path::Component::CurDir => {}
            other => clean.push(other),
        }
    }
    clean.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{settings, PlatformTarget};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_project() {
        let cfg = BuildConfig::default();
        assert_eq!(cfg.root, "..");
        assert_eq!(cfg.program_name, "Pong");
        assert_eq!(cfg.executable_name, "pong");
        assert_eq!(cfg.compiler, "clang");
        assert_eq!(cfg.enable_warnings, vec!["-Wconversion"]);
        assert_eq!(cfg.disable_errors.len(), 4);
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(BuildConfig::from_toml("").unwrap(), BuildConfig::default());
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(BuildConfig::load(dir.path()).unwrap(), BuildConfig::default());
    }

    #[test]
    fn trailing_separator_is_stripped() {
        let cfg = BuildConfig::from_toml("[project]\nroot = \"../game/\"").unwrap();
        assert_eq!(cfg.root, "../game");
        let cfg = BuildConfig::from_toml("[project]\nroot = 'C:\\game\\'").unwrap();
        assert_eq!(cfg.root, "C:\\game");
    }

    #[test]
    fn empty_names_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Space Pong");
        let text = format!(
            "[project]\nroot = '{}'\nprogram_name = ''\nexecutable_name = ''",
            root.display()
        );
        let cfg = BuildConfig::from_toml(&text).unwrap();
        assert_eq!(cfg.program_name, "Space Pong");
        assert_eq!(cfg.executable_name, "space_pong");
    }

    #[test]
    fn executable_name_derives_from_explicit_program_name() {
        let cfg = BuildConfig::from_toml(
            "[project]\nprogram_name = 'Big Game'\nexecutable_name = ''"
        ).unwrap();
        assert_eq!(cfg.executable_name, "big_game");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(BuildConfig::from_toml("[project]\nnmae = 'x'").is_err());
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[project\n").unwrap();
        match BuildConfig::load(dir.path()) {
            Err(BuildError::Config { path, .. }) => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn windows_paths() {
        let cfg = BuildConfig { root: "/proj".into(), ..BuildConfig::default() };
        let win = settings(PlatformTarget::WindowsLike);
        assert_eq!(cfg.build_dir(win), "/proj/build/win32");
        assert_eq!(cfg.executable_path(win), "/proj/build/win32/pong.exe");
        let mac = settings(PlatformTarget::MacOS);
        assert_eq!(cfg.executable_path(mac), "/proj/build/mac/pong");
    }
}
