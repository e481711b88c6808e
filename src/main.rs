// ─────────────────────────────────────────────────────────────────────────────
//  pong-build  —  compile the Pong project with clang
//
//  USAGE
//  ─────
//    pong-build                  slow build (debug info, assertions, -O0)
//    pong-build --fast           debug build with optimizations
//    pong-build --release        optimized build
//    pong-build -DFOO bar        slow build, `-DFOO bar` forwarded to clang
//
//  Every token after the first is forwarded to clang verbatim.
//  Project settings come from ./build.toml when present.
// ─────────────────────────────────────────────────────────────────────────────

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use pong_build::{BuildConfig, BuildError, Pipeline, Progress};

// ─────────────────────────────────────────────────────────────────────────────
//  CLI definition (clap derive)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name    = "pong-build",
    version = env!("CARGO_PKG_VERSION"),
    about   = "Validate clang, compose the Pong compile command and run it",
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true,
)]
struct Cli {
    /// Profile keyword (--slow, --fast, --release) or a flag to forward to clang,
    /// followed by any number of extra flags to forward
    #[arg(
        value_name = "PROFILE|FLAG",
        trailing_var_arg = true,
        allow_hyphen_values = true,
    )]
    args: Vec<String>,
}

impl Cli {
    /// Parse `argv` so that every token after the program name is a value.
    ///
    /// An escape is placed in front of the user's tokens, which keeps a
    /// leading `--`, `-h` or `--version` from being read as a clap flag.
    fn parse_tokens<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().unwrap_or_else(|| OsString::from("pong-build"));
        Self::try_parse_from(
            std::iter::once(program)
                .chain(std::iter::once(OsString::from("--")))
                .chain(argv),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
//  Entry point
// ─────────────────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse_tokens(std::env::args_os()).unwrap_or_else(|e| e.exit());

    if let Err(e) = run(cli) {
        match e.downcast_ref::<BuildError>() {
            Some(build_err) => render_build_error(build_err),
            None => eprintln!("{} {:#}", "✗".red().bold(), e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine the working directory")?;
    let config = BuildConfig::load(&cwd)?;
    init_logging(&config.log_level)?;

    let pipeline = Pipeline::new(config);
    let report = pipeline.run(&cli.args, |event| match event {
        Progress::BuildDirCreated(dir) => {
            println!("{} {}\n", "Build directory created:".cyan().bold(), dir.display());
        }
        Progress::Composed(command) => {
            println!("{}\n", command.text());
        }
    })?;

    match report.outcome.exit_code {
        Some(0) => {}
        Some(code) => println!("{} clang exited with status {}", "!".yellow(), code),
        None => println!("{} clang was terminated by a signal", "!".yellow()),
    }
    println!(
        "Total build script time: {} seconds.",
        report.outcome.elapsed_display().bold()
    );

    Ok(())
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let level: tracing::Level = level
        .parse()
        .with_context(|| format!("invalid [log] level '{level}' in build.toml"))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
//  Error rendering
// ─────────────────────────────────────────────────────────────────────────────

fn render_build_error(e: &BuildError) {
    if !e.is_precondition() {
        eprintln!("{} {}", "✗".red().bold(), e);
        return;
    }

    eprintln!("\n{} {}", "BuildError".red().bold(), "no compile was attempted");
    eprintln!("{}", "─".repeat(60).dimmed());

    match e {
        BuildError::ToolchainNotFound(compiler) => {
            eprintln!("  {} {} compiler not found.", "✗".red(), compiler);
            eprintln!("  Install it and make sure it's in the PATH.");
        }
        BuildError::ToolchainWrongArchitecture(compiler) => {
            eprintln!("  {} {} target is not x64.", "✗".red(), compiler);
            eprintln!("  This code should only be compiled for x64.");
        }
        BuildError::UnsupportedPlatform(os) => {
            eprintln!("  {} You're running on an unsupported platform: {}", "✗".red(), os.yellow());
        }
        BuildError::UnconfiguredPlatformLinker(target) => {
            eprintln!("  {} Please, make sure the {} build settings are configured properly.",
                "✗".red(), target);
        }
        BuildError::UnexpectedToolOutput { tool, stream, output } => {
            eprintln!("  {} `{}` wrote to {} where nothing was expected:", "✗".red(), tool.bold(), stream);
            for line in output.lines().filter(|l| !l.trim().is_empty()) {
                eprintln!("    {}", line.dimmed());
            }
        }
        _ => eprintln!("  {} {}", "✗".red(), e),
    }

    eprintln!("{}", "─".repeat(60).dimmed());
}
