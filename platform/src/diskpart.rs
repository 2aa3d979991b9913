//! `diskpart` fallback used when the management interface fails.

use async_trait::async_trait;
use diskman_core::{DiskmanError, PartitionTool};
use std::path::{Path, PathBuf};
use std::process::Command;

pub fn list_disk_script() -> &'static str {
    "list disk\nexit\n"
}

pub fn partition_script(disk_index: u32, size_mb: u64) -> String {
    format!(
        "select disk {}\n\
         create partition primary size={}\n\
         exit\n",
        disk_index, size_mb
    )
}

#[derive(Debug, Clone, Default)]
pub struct Diskpart;

impl Diskpart {
    fn locate() -> Result<PathBuf, DiskmanError> {
        which::which("diskpart").map_err(|_| DiskmanError::ExternalToolMissing("diskpart".to_string()))
    }

    /// Run `diskpart /s <script>` and return its output.
    fn run_script(script: &Path) -> Result<String, DiskmanError> {
        let program = Self::locate()?;
        log::info!("Running diskpart script {}", script.display());

        let output = Command::new(program)
            .arg("/s")
            .arg(script)
            .output()
            .map_err(|e| DiskmanError::ToolFailed(format!("Failed to execute diskpart: {}", e)))?;

        // diskpart reports its errors on stdout
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiskmanError::ToolFailed(format!("{}{}", stdout.trim(), stderr.trim())));
        }
        Ok(stdout)
    }

    /// Write `contents` to a temp script, run it, remove it.
    fn run_generated(name: &str, contents: &str) -> Result<String, DiskmanError> {
        let script = std::env::temp_dir().join(format!("diskman_{}_{}.txt", name, std::process::id()));
        std::fs::write(&script, contents)?;

        let result = Self::run_script(&script);

        if let Err(e) = std::fs::remove_file(&script) {
            log::warn!("Failed to remove {}: {}", script.display(), e);
        }
        result
    }
}

#[async_trait]
impl PartitionTool for Diskpart {
    async fn list_disks(&self) -> Result<String, DiskmanError> {
        Self::run_generated("list", list_disk_script())
    }

    async fn create_partition(
        &self,
        disk_index: u32,
        size_mb: u64,
        script: Option<&Path>,
    ) -> Result<(), DiskmanError> {
        let output = match script {
            Some(path) => Self::run_script(path)?,
            None => Self::run_generated("partition", &partition_script(disk_index, size_mb))?,
        };
        log::debug!("diskpart output: {}", output);
        Ok(())
    }
}
