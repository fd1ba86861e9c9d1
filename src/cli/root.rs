use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::list::ListCommand;
use crate::config::Settings;
use crate::domain::Route;
use crate::tui;

/// SchemaX - database diagrams in your terminal
#[derive(Parser)]
#[command(
    name = "schemax",
    version,
    about = "Design database diagrams in your terminal",
    long_about = r#"SchemaX is a terminal database diagram editor. Create diagrams, import
schemas from a live database and export them as SQL or images.

Examples:
  schemax                         # Open the editor
  schemax open <ID>               # Open a stored diagram
  schemax examples                # Browse the example diagrams
  schemax list                    # Print stored diagrams"#
)]
pub struct Cli {
    /// Current working directory
    #[arg(short = 'c', long = "cwd", global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Directory holding the database, preferences and logs
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a stored diagram in the editor
    Open {
        /// Diagram id
        id: String,
    },
    /// Browse the example diagrams
    Examples,
    /// Print stored diagrams
    List(ListCommand),
}

impl Cli {
    /// Resolve settings, applying the command line overrides
    pub async fn settings(&self) -> Result<Settings> {
        if let Some(cwd) = &self.cwd {
            std::env::set_current_dir(cwd).map_err(|e| {
                anyhow::anyhow!("Failed to change directory to {}: {}", cwd.display(), e)
            })?;
        }

        let mut settings = Settings::init().await?;
        if let Some(data_dir) = &self.data_dir {
            settings.data_dir = data_dir.clone();
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Route the editor starts on
    pub fn route(&self) -> Route {
        match &self.command {
            Some(Commands::Open { id }) => Route::Diagram(id.clone()),
            Some(Commands::Examples) => Route::Examples,
            Some(Commands::List(_)) | None => Route::Home,
        }
    }

    pub async fn execute(self, settings: Settings) -> Result<()> {
        if let Some(cwd) = &self.cwd {
            info!("Working directory: {}", cwd.display());
        }
        debug!("Data directory: {}", settings.data_dir.display());

        match &self.command {
            Some(Commands::List(list)) => list.execute(&settings).await,
            _ => {
                info!("Starting interactive mode at {}", self.route());
                tui::run(Arc::new(settings), self.route()).await?;
                info!("Application finished");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcommands_map_to_routes() {
        let cli = Cli::parse_from(["schemax", "open", "abc"]);
        assert_eq!(cli.route(), Route::Diagram("abc".into()));

        let cli = Cli::parse_from(["schemax", "examples"]);
        assert_eq!(cli.route(), Route::Examples);

        let cli = Cli::parse_from(["schemax", "--debug"]);
        assert!(cli.debug);
        assert_eq!(cli.route(), Route::Home);
    }

    #[test]
    fn test_data_dir_is_global() {
        let cli = Cli::parse_from(["schemax", "list", "--data-dir", "/tmp/schemax"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/schemax")));
    }
}
