use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::config::Config;
use crate::theme::Theme;

/// In-memory task list for the terminal.
/// Nothing is saved; tasks live as long as the window.
#[derive(Parser)]
#[command(name = "tasklist", version, about = "Terminal task-list widget")]
pub struct Cli {
    /// Path to a JSON settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Theme to start with; overrides the settings file.
    #[arg(long, value_enum, global = true)]
    pub theme: Option<Theme>,

    /// Write logs to this directory; overrides the settings file.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive task list (the default).
    Ui,

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Fold command-line overrides into loaded settings.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_ui() {
        let cli = Cli::try_parse_from(["tasklist"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn flags_override_settings() {
        let args = ["tasklist", "--theme", "dark", "--log-dir", "/tmp/tl", "ui"];
        let cli = Cli::try_parse_from(args).expect("parses");
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/tl")));
        assert!(matches!(cli.command, Some(Commands::Ui)));
    }

    #[test]
    fn completions_takes_a_shell() {
        let cli = Cli::try_parse_from(["tasklist", "completions", "bash"]).expect("parses");
        assert!(matches!(cli.command, Some(Commands::Completions { shell: Shell::Bash })));
    }
}
