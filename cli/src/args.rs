use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "diskman")]
#[command(about = "Text-menu disk and volume administration for Windows", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log filter directive, overrides --verbose
    #[arg(long, env = "DISKMAN_LOG", global = true)]
    pub log: Option<String>,

    /// diskpart script to run when partition creation falls back to diskpart
    #[arg(long, value_name = "PATH")]
    pub partition_script: Option<PathBuf>,

    /// Do not print the version banner
    #[arg(long)]
    pub no_banner: bool,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// List physical disks
    ListDisks,
    /// List volumes on one disk or on all disks
    ListVolumes {
        /// OS disk number
        #[arg(short, long)]
        disk: Option<u32>,
    },
    /// Mount a volume
    Mount {
        /// Drive letter, e.g. E:
        volume: String,
    },
    /// Dismount a volume
    Dismount {
        /// Drive letter, e.g. E:
        volume: String,
    },
}
