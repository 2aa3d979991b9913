use crate::DiskmanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FileSystem {
    Ntfs,
    Fat32,
    ExFat,
}

impl FileSystem {
    pub const SUPPORTED: [FileSystem; 3] = [FileSystem::Ntfs, FileSystem::Fat32, FileSystem::ExFat];

    /// Name as the OS expects it in format calls.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileSystem::Ntfs => "NTFS",
            FileSystem::Fat32 => "FAT32",
            FileSystem::ExFat => "exFAT",
        }
    }

    pub fn max_label_len(&self) -> usize {
        match self {
            FileSystem::Ntfs => 32,
            FileSystem::Fat32 | FileSystem::ExFat => 11,
        }
    }
}

impl fmt::Display for FileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileSystem {
    type Err = DiskmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NTFS" => Ok(FileSystem::Ntfs),
            "FAT32" => Ok(FileSystem::Fat32),
            "EXFAT" => Ok(FileSystem::ExFat),
            other => Err(DiskmanError::InvalidInput(format!("Unsupported file system: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatOptions {
    pub file_system: FileSystem,
    pub quick_format: bool,
    /// Allocation unit size in bytes; `None` lets the OS choose.
    pub cluster_size: Option<u32>,
    pub label: Option<String>,
}

impl FormatOptions {
    /// Quick format that keeps the volume's current file system. Unformatted
    /// (RAW) volumes get NTFS; any other file system outside
    /// [`FileSystem::SUPPORTED`] is refused rather than replaced.
    pub fn quick(current: Option<&str>) -> Result<Self, DiskmanError> {
        let file_system = match current.map(str::trim) {
            None | Some("") => FileSystem::Ntfs,
            Some(fs) if fs.eq_ignore_ascii_case("RAW") => FileSystem::Ntfs,
            Some(fs) => fs.parse().map_err(|_| {
                DiskmanError::InvalidInput(format!(
                    "Quick format cannot keep file system {}. Use a custom format instead.",
                    fs
                ))
            })?,
        };
        Ok(Self {
            file_system,
            quick_format: true,
            cluster_size: None,
            label: None,
        })
    }
}
