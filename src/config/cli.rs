use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "sceros")]
#[command(about = "Campus energy and resource dashboard data tool")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a sceros.toml configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding the JSON fixtures")]
    pub fixtures: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory for the session store")]
    pub session_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in with a fixture account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user and their navigation
    Whoami,
    /// Search, filter, sort and page through a dataset
    View {
        /// areas, alerts, users or recommendations
        dataset: String,
        #[arg(long, default_value = "")]
        search: String,
        /// Column filter as key=value; repeatable
        #[arg(long = "filter")]
        filters: Vec<String>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, requires = "sort")]
        desc: bool,
        #[arg(long, default_value = "1")]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Usage totals, trends and alert counts for the signed-in user
    Summary {
        #[arg(long, help = "Print JSON instead of text")]
        json: bool,
        #[arg(long, help = "Take usage trends from this area id")]
        area: Option<String>,
    },
}
