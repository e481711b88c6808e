// ─────────────────────────────────────────────────────────────────────────────
//  pong_build  —  public library API
// ─────────────────────────────────────────────────────────────────────────────

pub mod command;
pub mod command_log;
pub mod config;
pub mod error;
pub mod executor;
pub mod platform;
pub mod process;
pub mod profile;
pub mod toolchain;

use std::path::{Path, PathBuf};
use std::time::Instant;

pub use command::CompileCommand;
pub use config::BuildConfig;
pub use error::{BuildError, Result};
pub use executor::BuildOutcome;
pub use platform::PlatformTarget;
pub use process::{ProcessRunner, SystemRunner};
pub use profile::BuildProfile;

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Milestones reported while a build runs.
#[derive(Debug)]
pub enum Progress<'a> {
    BuildDirCreated(&'a Path),
    Composed(&'a CompileCommand),
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct BuildReport {
    pub target:            PlatformTarget,
    pub profile:           BuildProfile,
    /// Where the compiler was found on PATH.
    pub compiler_path:     PathBuf,
    pub build_dir:         PathBuf,
    pub created_build_dir: bool,
    pub command:           CompileCommand,
    pub log_path:          PathBuf,
    pub outcome:           BuildOutcome,
}

/// One build: args → profile → platform + toolchain → command → log → run.
///
/// ```no_run
/// use pong_build::{BuildConfig, Pipeline};
///
/// let report = Pipeline::new(BuildConfig::default())
///     .run(&["--fast".to_string()], |_| {})
///     .unwrap();
/// println!("{}", report.command);
/// ```
pub struct Pipeline<'r> {
    config: BuildConfig,
    os_id:  String,
    runner: &'r dyn ProcessRunner,
}

impl Pipeline<'static> {
    /// Pipeline for the host OS, spawning real processes.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            os_id:  std::env::consts::OS.to_owned(),
            runner: &SystemRunner,
        }
    }
}

impl<'r> Pipeline<'r> {
    /// Build as if running on `os_id` instead of the host.
    pub fn with_os(mut self, os_id: impl Into<String>) -> Self {
        self.os_id = os_id.into();
        self
    }

    pub fn with_runner<'n>(self, runner: &'n dyn ProcessRunner) -> Pipeline<'n> {
        Pipeline { config: self.config, os_id: self.os_id, runner }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn run<F>(&self, args: &[String], mut on_progress: F) -> Result<BuildReport>
    where
        F: FnMut(Progress<'_>),
    {
        let started = Instant::now();
        let cfg = &self.config;

        let profile = profile::select(args);
        let target  = PlatformTarget::from_os_id(&self.os_id)?;

        // Validation must pass before anything touches the filesystem.
        let toolchain = toolchain::validate(self.runner, target, &cfg.compiler)?.require()?;
        let settings  = platform::resolve(target)?;
        tracing::info!(
            compiler = toolchain.compiler(),
            path = %toolchain.path().display(),
            "toolchain validated"
        );

        let build_dir = cfg.build_dir(settings);
        let dir = executor::prepare(Path::new(&build_dir))?;
        if dir.created {
            on_progress(Progress::BuildDirCreated(&dir.path));
        }

        let exe_path = cfg.executable_path(settings);
        let command  = command::compose(&toolchain, settings, &profile, cfg, &exe_path);
        on_progress(Progress::Composed(&command));

        let log_path = command_log::persist(&command.text(), &dir.path)?;
        let outcome  = executor::run(self.runner, &command, &dir.path, started)?;

        Ok(BuildReport {
            target,
            profile,
            compiler_path: toolchain.path().to_owned(),
            build_dir: dir.path,
            created_build_dir: dir.created,
            command,
            log_path,
            outcome,
        })
    }
}
