use diskman_core::DiskmanError;
use serde::de::DeserializeOwned;
use std::process::Command;

#[cfg(target_os = "windows")]
use std::os::windows::process::CommandExt;

const POWERSHELL: &str = "powershell.exe";

/// Runs PowerShell scripts against the CIM/Storage management interface.
#[derive(Debug, Clone, Default)]
pub struct PowerShell;

impl PowerShell {
    /// Run a script and return its standard output.
    pub fn run(&self, script: &str) -> Result<String, DiskmanError> {
        let mut cmd = Command::new(POWERSHELL);

        #[cfg(target_os = "windows")]
        {
            const CREATE_NO_WINDOW: u32 = 0x08000000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        log::debug!("PowerShell: {}", script);

        let output = cmd
            .args([
                "-NoProfile",
                "-NonInteractive",
                "-Command",
                &format!("$ErrorActionPreference = 'Stop'; {}", script),
            ])
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => DiskmanError::ExternalToolMissing(POWERSHELL.to_string()),
                _ => DiskmanError::External(format!("Failed to run PowerShell: {}", e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiskmanError::External(first_error_line(&stderr)));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a script ending in `ConvertTo-Json` and decode its records.
    pub fn run_json<T: DeserializeOwned>(&self, script: &str) -> Result<Vec<T>, DiskmanError> {
        let stdout = self.run(script)?;
        parse_json_list(&stdout)
    }
}

/// `ConvertTo-Json` emits a bare object for one result, an array for many
/// and nothing at all for none.
pub fn parse_json_list<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, DiskmanError> {
    let json = json.trim();
    if json.is_empty() {
        return Ok(Vec::new());
    }
    if json.starts_with('[') {
        Ok(serde_json::from_str(json)?)
    } else {
        Ok(vec![serde_json::from_str(json)?])
    }
}

/// Quote a value as a PowerShell single-quoted string literal.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn first_error_line(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("PowerShell command failed")
        .to_string()
}
