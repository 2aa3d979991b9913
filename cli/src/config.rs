use crate::args::Cli;
use std::path::PathBuf;

const COMPUTER_NAME_VAR: &str = "COMPUTERNAME";

/// Runtime settings assembled from arguments and environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub computer_name: String,
    pub partition_script: Option<PathBuf>,
    pub show_banner: bool,
    pub verbosity: u8,
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            computer_name: "Unknown".to_string(),
            partition_script: None,
            show_banner: true,
            verbosity: 0,
            log_filter: None,
        }
    }
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            computer_name: std::env::var(COMPUTER_NAME_VAR).unwrap_or_else(|_| "Unknown".to_string()),
            partition_script: cli.partition_script.clone(),
            show_banner: !cli.no_banner,
            verbosity: cli.verbose,
            log_filter: cli.log.clone(),
        }
    }

    pub fn log_directive(&self) -> String {
        if let Some(filter) = &self.log_filter {
            return filter.clone();
        }
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
        .to_string()
    }
}
