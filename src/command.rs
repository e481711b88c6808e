// ─────────────────────────────────────────────────────────────────────────────
//  pong-build :: command  —  compiler invocation composer
//
//  Token order is significant to clang and must not change:
//
//    compiler  -std  -fuse-ld  -nodefaultlibs -nostdlib  -mno-stack-arg-probe
//    -D PROGRAM_NAME  -Wall -Wextra -Werror  <enabled warnings>
//    <disabled error categories>  <profile flags>  -o <exe>
//    <platform sources>  <platform libraries>  <platform linker flags>
// ─────────────────────────────────────────────────────────────────────────────

use std::fmt;

use crate::config::BuildConfig;
use crate::platform::PlatformSettings;
use crate::profile::BuildProfile;
use crate::toolchain::ValidatedToolchain;

pub const LANGUAGE_STANDARD: &str = "-std=c99";
pub const LINKER_SELECTION: &str = "-fuse-ld=lld";
pub const FREESTANDING: &[&str] = &["-nodefaultlibs", "-nostdlib"];
pub const NO_STACK_PROBE: &str = "-mno-stack-arg-probe";
pub const BASELINE_WARNINGS: &[&str] = &["-Wall", "-Wextra", "-Werror"];
pub const OUTPUT_FLAG: &str = "-o";

/// The full compiler invocation, head token first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    tokens: Vec<String>,
}

impl CompileCommand {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Executable to spawn.
    pub fn program(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    /// Everything after the program.
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    /// Tokens joined with single spaces; what gets printed and logged.
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

#[cfg(test)]
impl CompileCommand {
    pub(crate) fn from_tokens<const N: usize>(tokens: [&str; N]) -> Self {
        Self { tokens: tokens.iter().map(|t| (*t).to_owned()).collect() }
    }
}

impl fmt::Display for CompileCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Assemble the invocation.
///
/// `settings` must come from `platform::resolve`; a missing linker-flags
/// entry is simply omitted here. Tokens are never deduplicated.
pub fn compose(
    toolchain: &ValidatedToolchain,
    settings:  &PlatformSettings,
    profile:   &BuildProfile,
    config:    &BuildConfig,
    output:    &str,
) -> CompileCommand {
    let mut tokens: Vec<String> = vec![
        toolchain.compiler().to_owned(),
        LANGUAGE_STANDARD.into(),
        LINKER_SELECTION.into(),
    ];
    tokens.extend(FREESTANDING.iter().map(|t| (*t).to_owned()));
    tokens.push(NO_STACK_PROBE.into());
    tokens.push(format!("-D PROGRAM_NAME=\"{}\"", config.program_name));
    tokens.extend(BASELINE_WARNINGS.iter().map(|t| (*t).to_owned()));
    tokens.extend(config.enable_warnings.iter().cloned());
    tokens.extend(config.disable_errors.iter().cloned());
    tokens.extend(profile.flags.iter().cloned());

    tokens.push(OUTPUT_FLAG.into());
    tokens.push(output.to_owned());

    tokens.extend(settings.sources.iter().map(|s| (*s).to_owned()));
    tokens.extend(settings.libraries.iter().map(|l| (*l).to_owned()));
    if let Some(linker) = settings.linker_flags {
        tokens.push(linker.to_owned());
    }

    tracing::debug!(tokens = tokens.len(), profile = %profile.kind, "command composed");
    CompileCommand { tokens }
}
