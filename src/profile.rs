// ─────────────────────────────────────────────────────────────────────────────
//  pong-build :: profile  —  CLI arguments → compile flags
//
//    (none) | --slow   development flags, -O0
//    --fast            development flags + release flags
//    --release         release flags only
//    anything else     slow flags + the token itself, verbatim
//
//  Tokens after the first are always appended verbatim.
// ─────────────────────────────────────────────────────────────────────────────

use std::fmt;

pub const DEVELOPMENT_FLAGS: &[&str] = &["-D ASSERTIONS_ON", "-D DEVELOPMENT", "-g"];
pub const RELEASE_FLAGS: &[&str] = &["-D OPTIMIZATIONS_ON", "-O3"];
pub const NO_OPTIMIZATION_FLAG: &str = "-O0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Slow,
    Fast,
    Release,
    CustomPassthrough,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProfileKind::Slow              => "slow",
            ProfileKind::Fast              => "fast",
            ProfileKind::Release           => "release",
            ProfileKind::CustomPassthrough => "slow+passthrough",
        })
    }
}

/// A profile together with its ordered flag tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildProfile {
    pub kind:  ProfileKind,
    pub flags: Vec<String>,
}

impl BuildProfile {
    pub fn slow() -> Self {
        let mut flags = owned(DEVELOPMENT_FLAGS);
        flags.push(NO_OPTIMIZATION_FLAG.to_owned());
        Self { kind: ProfileKind::Slow, flags }
    }

    pub fn fast() -> Self {
        let mut flags = owned(DEVELOPMENT_FLAGS);
        flags.extend(owned(RELEASE_FLAGS));
        Self { kind: ProfileKind::Fast, flags }
    }

    pub fn release() -> Self {
        Self { kind: ProfileKind::Release, flags: owned(RELEASE_FLAGS) }
    }
}

/// Pick the profile for the given arguments (program name excluded).
pub fn select<S: AsRef<str>>(args: &[S]) -> BuildProfile {
    let Some((first, rest)) = args.split_first() else {
        return BuildProfile::slow();
    };

    let mut profile = match first.as_ref() {
        "--slow"    => BuildProfile::slow(),
        "--fast"    => BuildProfile::fast(),
        "--release" => BuildProfile::release(),
        other => {
            let mut p = BuildProfile::slow();
            p.kind = ProfileKind::CustomPassthrough;
            p.flags.push(other.to_owned());
            p
        }
    };

    profile.flags.extend(rest.iter().map(|a| a.as_ref().to_owned()));
    profile
}

fn owned(flags: &[&str]) -> Vec<String> {
    flags.iter().map(|f| (*f).to_owned()).collect()
}
