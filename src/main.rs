//! CLI entry point for dirmap

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use dirmap::{DefaultPrompter, LinePrompter, Prompter, RunOptions, StatusPrinter};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode, stream_is_terminal: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            stream_is_terminal
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dirmap")]
#[command(about = "Map a project directory into Project_Directory.md, remembering what to leave out")]
#[command(version)]
struct Args {
    /// Project directory to map
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Write the document here instead of Project_Directory.md in the project root
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Answer every question with its default (include everything, save)
    #[arg(short = 'y', long = "defaults")]
    defaults: bool,

    /// Ignore saved preferences and ask again
    #[arg(long = "reconfigure")]
    reconfigure: bool,

    /// Never write the preference file
    #[arg(long = "no-save")]
    no_save: bool,

    /// Also print a JSON summary of the scan to stdout
    /// Status lines and questions move to stderr
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    let options = RunOptions {
        root: args.path.clone(),
        output: args.output.clone(),
        reconfigure: args.reconfigure,
        save: !args.no_save,
        json: args.json,
    };

    // With --json, stdout carries only the summary
    let mut status = if args.json {
        StatusPrinter::to_stderr(should_use_color(args.color, io::stderr().is_terminal()))
    } else {
        StatusPrinter::new(should_use_color(args.color, io::stdout().is_terminal()))
    };

    let stdin = io::stdin();
    let mut prompter: Box<dyn Prompter> = match (args.defaults, args.json) {
        (true, _) => Box::new(DefaultPrompter),
        (false, true) => Box::new(LinePrompter::new(stdin.lock(), io::stderr())),
        (false, false) => Box::new(LinePrompter::new(stdin.lock(), io::stdout())),
    };

    if let Err(e) = dirmap::run(&options, prompter.as_mut(), &mut status) {
        eprintln!("dirmap: error: {:#}", e);
        process::exit(1);
    }
}
