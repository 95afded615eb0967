//! `settings` subcommands.

use crate::cli::SettingsAction;
use color_eyre::Result;
use colored::Colorize;
use pano_core::config::SettingsRepository;

pub fn run(action: SettingsAction, repo: &SettingsRepository) -> Result<()> {
    match action {
        SettingsAction::Show => {
            let settings = repo.load()?;
            println!("{}", repo.path().display().to_string().dimmed());
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::SetToolDir { dir } => {
            if !dir.is_dir() {
                eprintln!(
                    "{} {} is not a directory; saving anyway",
                    "warning:".yellow().bold(),
                    dir.display()
                );
            }
            let mut settings = repo.load()?;
            settings.tool_directory = Some(dir);
            repo.save(&settings)?;
            println!("{} {}", "Saved".green().bold(), repo.path().display());
        }
        SettingsAction::ClearToolDir => {
            let mut settings = repo.load()?;
            settings.tool_directory = None;
            repo.save(&settings)?;
            println!("{} {}", "Saved".green().bold(), repo.path().display());
        }
    }

    Ok(())
}
