pub mod run;
pub mod settings;

use crate::cli::{CliArgs, Command};
use color_eyre::Result;
use pano_core::config::{SettingsRepository, SETTINGS_FILE_NAME};
use pano_protocol::run_models::PipelineKind;
use std::path::PathBuf;

/// Dispatch a parsed command line.
pub async fn dispatch(args: CliArgs) -> Result<()> {
    let repo = SettingsRepository::new(args.settings.unwrap_or_else(default_settings_path));

    match args.command {
        Command::Stitch {
            run: run_args,
            no_crop,
        } => run::run(PipelineKind::Panorama, run_args, !no_crop, &repo).await,
        Command::Blend { run: run_args } => {
            run::run(PipelineKind::BlendedStack, run_args, true, &repo).await
        }
        Command::Settings { action } => settings::run(action, &repo),
    }
}

/// `~/.panocapture/settings.json`, or the current directory when no home
/// directory is known.
fn default_settings_path() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".panocapture"))
        .unwrap_or_default()
        .join(SETTINGS_FILE_NAME)
}
