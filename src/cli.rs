use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "chatinside",
    about = "Terminal chat client with local accounts and generated replies"
)]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding accounts, the lock file and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep accounts in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start the interactive shell
    Run,
    /// Create an account; the password is read from the terminal
    Register { login: String, pseudo: String },
    /// Print the discussions of an account after signing in
    Discussions { login: String },
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
