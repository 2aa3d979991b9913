use crate::{DiskmanError, FormatOptions};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A physical disk as reported by the OS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Disk {
    pub index: u32,
    pub device_id: String,
    pub caption: String,
    pub status: Option<String>,
    pub size: Option<u64>,
    pub media_type: Option<String>,
    pub interface_type: Option<String>,
}

impl Disk {
    pub fn status_or_unknown(&self) -> &str {
        self.status.as_deref().unwrap_or("Unknown")
    }
}

/// Logical disk drive type codes as used by `Win32_LogicalDisk.DriveType`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DriveType {
    Unknown,
    NoRootDirectory,
    Removable,
    Fixed,
    Network,
    CompactDisc,
    RamDisk,
}

impl From<u32> for DriveType {
    fn from(code: u32) -> Self {
        match code {
            1 => DriveType::NoRootDirectory,
            2 => DriveType::Removable,
            3 => DriveType::Fixed,
            4 => DriveType::Network,
            5 => DriveType::CompactDisc,
            6 => DriveType::RamDisk,
            _ => DriveType::Unknown,
        }
    }
}

impl fmt::Display for DriveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriveType::Unknown => "Unknown",
            DriveType::NoRootDirectory => "No Root Directory",
            DriveType::Removable => "Removable",
            DriveType::Fixed => "Fixed",
            DriveType::Network => "Network",
            DriveType::CompactDisc => "CD-ROM",
            DriveType::RamDisk => "RAM Disk",
        };
        f.write_str(name)
    }
}

/// A partition and the logical disk mounted on it, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Volume {
    pub partition_id: String,
    /// Drive letter with colon, e.g. `E:`.
    pub device_id: Option<String>,
    pub label: Option<String>,
    pub file_system: Option<String>,
    pub size: Option<u64>,
    pub free_space: Option<u64>,
    pub drive_type: DriveType,
    pub status: Option<String>,
    pub created: Option<DateTime<FixedOffset>>,
    pub cluster_size: Option<u64>,
}

impl Volume {
    pub fn is_fixed(&self) -> bool {
        self.drive_type == DriveType::Fixed
    }

    /// Name shown to the user: the drive letter, or the partition id when unlettered.
    pub fn display_name(&self) -> &str {
        self.device_id.as_deref().unwrap_or(&self.partition_id)
    }

    pub fn drive_letter(&self) -> Option<char> {
        self.device_id
            .as_deref()
            .and_then(|id| id.chars().next())
            .filter(|c| c.is_ascii_alphabetic())
    }
}

/// Size range the OS will accept for a partition, in bytes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResizeBounds {
    pub current: u64,
    pub minimum: u64,
    pub maximum: u64,
}

impl ResizeBounds {
    /// Room the partition can grow into.
    pub fn free(&self) -> u64 {
        self.maximum.saturating_sub(self.current)
    }
}

/// Management interface over disks and volumes.
#[async_trait::async_trait]
pub trait DiskManager: Send + Sync {
    async fn enumerate_disks(&self) -> Result<Vec<Disk>, DiskmanError>;
    /// Largest unallocated extent on the disk, in bytes.
    async fn unallocated_space(&self, disk: &Disk) -> Result<u64, DiskmanError>;
    async fn create_partition(&self, disk: &Disk, size: u64) -> Result<(), DiskmanError>;
    async fn list_volumes(&self, disk: &Disk) -> Result<Vec<Volume>, DiskmanError>;
    async fn format_volume(&self, volume: &Volume, options: &FormatOptions) -> Result<(), DiskmanError>;
    async fn resize_bounds(&self, volume: &Volume) -> Result<ResizeBounds, DiskmanError>;
    async fn resize_volume(&self, volume: &Volume, new_size: u64) -> Result<(), DiskmanError>;
    async fn mount_volume(&self, drive: &str) -> Result<(), DiskmanError>;
    async fn dismount_volume(&self, drive: &str) -> Result<(), DiskmanError>;
}

/// The command-line partitioning tool used when the management interface fails.
#[async_trait::async_trait]
pub trait PartitionTool: Send + Sync {
    /// Raw `list disk` output.
    async fn list_disks(&self) -> Result<String, DiskmanError>;
    /// Create a primary partition, running `script` instead of a generated one when given.
    async fn create_partition(
        &self,
        disk_index: u32,
        size_mb: u64,
        script: Option<&Path>,
    ) -> Result<(), DiskmanError>;
}
