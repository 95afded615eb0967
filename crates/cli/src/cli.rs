//! Command-line arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "panocapture",
    version,
    about = "Stitch panoramas and blend exposure stacks with the Hugin tools.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PANOCAPTURE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Settings file. Defaults to `~/.panocapture/settings.json`.
    #[arg(long, value_name = "FILE", global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Stitch overlapping photos into a panorama.
    Stitch {
        #[command(flatten)]
        run: RunArgs,

        /// Keep the full canvas instead of cropping to content.
        #[arg(long)]
        no_crop: bool,
    },

    /// Blend a bracketed exposure stack into one image.
    Blend {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Show or change the stored settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SettingsAction {
    /// Print the settings document.
    Show,

    /// Remember the folder holding the Hugin executables.
    SetToolDir { dir: PathBuf },

    /// Forget the tool folder and resolve tools from PATH.
    ClearToolDir,
}

/// Options shared by the pipeline commands.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Input images. Files that are not JPEG or TIFF are skipped.
    #[arg(required = true, value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Output file. Defaults to `<first>-pano/<first>-pano.tif` next to the
    /// first input.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Folder holding the Hugin executables; overrides the settings file.
    #[arg(long, value_name = "DIR")]
    pub tool_dir: Option<PathBuf>,

    /// Folder the tools run in.
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Write the diagnostic log into this folder when the run ends.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Fail the run when a tool exits with a nonzero status.
    #[arg(long)]
    pub strict_exit_codes: bool,

    /// Kill a tool that runs longer than this many seconds.
    #[arg(long, value_name = "SECS")]
    pub step_timeout: Option<u64>,

    /// Print the tool command lines without running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the final run report as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
