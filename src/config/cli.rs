use crate::config::toml_config::DashboardConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "rice-dashboard")]
#[command(about = "Personal Linux dashboard: notes, quick links and a setup gallery")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding the record snapshot")]
    pub data_dir: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve the gallery images from the feed
    Images,
    /// Print the favicon URL for a site
    Favicon { url: String },
    /// Print the landing page data
    Dashboard,
    /// Create the data store and the admin account
    Init,
    /// Check a username and password
    Login { username: String, password: String },
    #[command(subcommand)]
    Notes(NotesCommand),
    #[command(subcommand)]
    Links(LinksCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum NotesCommand {
    List,
    Add {
        title: String,
        content: String,
    },
    Edit {
        id: u64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        completed: bool,
    },
    Delete {
        id: u64,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum LinksCommand {
    List,
    Add {
        title: String,
        url: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        fast_access: bool,
    },
    Delete {
        id: u64,
    },
}

impl CliConfig {
    /// File configuration (or defaults) with command-line overrides applied.
    pub fn load_config(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::from_file(path)?,
            None => DashboardConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }

        Ok(config)
    }
}
