use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "containerconf")]
#[command(about = "Edit Wine container configurations and manage custom GPU drivers")]
#[command(version)]
pub struct Cli {
    /// Application settings file (default: ~/.config/containerconf/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Open the interactive editor for a container file
    Edit {
        file: PathBuf,
        /// Dialog title (default: "Edit <container name>")
        #[arg(long)]
        title: Option<String>,
        /// Edit the default profile rather than a single container
        #[arg(long)]
        default_profile: bool,
    },
    /// Print the reconciled container record
    Show { file: PathBuf },
    /// Print the environment the container is launched with
    Env { file: PathBuf },
    /// Manage custom GPU drivers (interactive without a subcommand)
    Drivers {
        #[command(subcommand)]
        action: Option<DriverAction>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum DriverAction {
    /// List installed drivers
    List,
    /// Install a driver package from a ZIP archive
    Import { archive: PathBuf },
    /// Remove an installed driver
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

impl Cli {
    /// Whether the command takes over the terminal.
    pub fn is_interactive(&self) -> bool {
        matches!(
            self.command,
            Command::Edit { .. } | Command::Drivers { action: None }
        )
    }
}
