//! Records emitted by the PowerShell queries and their conversion into core types.

use chrono::DateTime;
use diskman_core::{Disk, DiskmanError, DriveType, ResizeBounds, Volume};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct DiskDriveRecord {
    #[serde(rename = "Index")]
    pub index: u32,
    #[serde(rename = "DeviceID")]
    pub device_id: String,
    #[serde(rename = "Caption")]
    pub caption: Option<String>,
    #[serde(rename = "Model")]
    pub model: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Size")]
    pub size: Option<u64>,
    #[serde(rename = "MediaType")]
    pub media_type: Option<String>,
    #[serde(rename = "InterfaceType")]
    pub interface_type: Option<String>,
}

impl From<DiskDriveRecord> for Disk {
    fn from(record: DiskDriveRecord) -> Self {
        let caption = record
            .caption
            .or(record.model)
            .unwrap_or_else(|| format!("Disk {}", record.index));
        Disk {
            index: record.index,
            device_id: record.device_id,
            caption,
            status: record.status,
            size: record.size,
            media_type: record.media_type,
            interface_type: record.interface_type,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VolumeRecord {
    #[serde(rename = "PartitionId")]
    pub partition_id: String,
    #[serde(rename = "PartitionSize")]
    pub partition_size: Option<u64>,
    #[serde(rename = "DriveLetter")]
    pub drive_letter: Option<String>,
    #[serde(rename = "Label")]
    pub label: Option<String>,
    #[serde(rename = "FileSystem")]
    pub file_system: Option<String>,
    #[serde(rename = "Size")]
    pub size: Option<u64>,
    #[serde(rename = "FreeSpace")]
    pub free_space: Option<u64>,
    #[serde(rename = "DriveType")]
    pub drive_type: Option<u32>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Created")]
    pub created: Option<String>,
    #[serde(rename = "ClusterSize")]
    pub cluster_size: Option<u64>,
}

impl From<VolumeRecord> for Volume {
    fn from(record: VolumeRecord) -> Self {
        let created = record.created.as_deref().and_then(|s| match DateTime::parse_from_rfc3339(s) {
            Ok(date) => Some(date),
            Err(e) => {
                log::debug!("Ignoring unparsable creation date {:?}: {}", s, e);
                None
            }
        });
        Volume {
            partition_id: record.partition_id,
            device_id: record.drive_letter.filter(|d| !d.is_empty()),
            label: record.label.filter(|l| !l.is_empty()),
            file_system: record.file_system.filter(|f| !f.is_empty()),
            size: record.size.or(record.partition_size),
            free_space: record.free_space,
            drive_type: record.drive_type.map(DriveType::from).unwrap_or(DriveType::Unknown),
            status: record.status,
            created,
            cluster_size: record.cluster_size,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FreeExtentRecord {
    #[serde(rename = "Number")]
    pub number: u32,
    #[serde(rename = "LargestFreeExtent")]
    pub largest_free_extent: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SupportedSizeRecord {
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "SizeMin")]
    pub size_min: u64,
    #[serde(rename = "SizeMax")]
    pub size_max: u64,
}

impl From<SupportedSizeRecord> for ResizeBounds {
    fn from(record: SupportedSizeRecord) -> Self {
        ResizeBounds {
            current: record.size,
            minimum: record.size_min,
            maximum: record.size_max,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MethodResult {
    #[serde(rename = "ReturnValue")]
    pub return_value: u32,
}

/// `Win32_Volume` instance methods whose return codes we translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeMethod {
    Format,
    Mount,
    Dismount,
}

impl VolumeMethod {
    pub fn name(&self) -> &'static str {
        match self {
            VolumeMethod::Format => "Format",
            VolumeMethod::Mount => "Mount",
            VolumeMethod::Dismount => "Dismount",
        }
    }

    fn reason(&self, code: u32) -> &'static str {
        match (self, code) {
            (VolumeMethod::Format, 1) => "Unsupported file system",
            (VolumeMethod::Format, 2) => "Incompatible media in drive",
            (VolumeMethod::Format, 3) | (VolumeMethod::Mount, 1) | (VolumeMethod::Dismount, 1) => "Access denied",
            (VolumeMethod::Format, 4) => "Call canceled",
            (VolumeMethod::Format, 5) => "Call cancellation request too late",
            (VolumeMethod::Format, 6) => "Volume write protected",
            (VolumeMethod::Format, 7) => "Volume lock failed",
            (VolumeMethod::Format, 8) => "Unable to quick format",
            (VolumeMethod::Format, 9) => "Input/Output (I/O) error",
            (VolumeMethod::Format, 10) => "Invalid volume label",
            (VolumeMethod::Format, 11) => "No media in drive",
            (VolumeMethod::Format, 12) => "Volume is too small",
            (VolumeMethod::Format, 13) => "Volume is too large",
            (VolumeMethod::Format, 14) => "Volume is not mounted",
            (VolumeMethod::Format, 15) => "Cluster size is too small",
            (VolumeMethod::Format, 16) => "Cluster size is too large",
            (VolumeMethod::Format, 17) => "Cluster size is beyond 32 bits",
            (VolumeMethod::Dismount, 2) => "Volume has mount points",
            (VolumeMethod::Dismount, 3) => "Volume does not support the no-autoremount state",
            (VolumeMethod::Dismount, 4) => "Force option required",
            _ => "Unknown error",
        }
    }

    /// Turn the method's `ReturnValue` into a result.
    pub fn check(&self, result: &MethodResult) -> Result<(), DiskmanError> {
        match result.return_value {
            0 => Ok(()),
            code => Err(DiskmanError::MethodFailed {
                method: format!("Win32_Volume.{}", self.name()),
                code,
                reason: self.reason(code).to_string(),
            }),
        }
    }
}
