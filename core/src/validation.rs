//! Input checks that run before any OS call.

use crate::units::{mb_to_bytes, whole_mb};
use crate::{Disk, DiskmanError, FileSystem, ResizeBounds};
use serde::{Deserialize, Serialize};

const MIN_CLUSTER_SIZE: u32 = 512;
const MAX_CLUSTER_SIZE: u32 = 2 * 1024 * 1024;

/// Parse a megabyte count typed by the user. Negative numbers parse so that
/// the caller can report them as a range error rather than a typo.
pub fn parse_mb(input: &str) -> Result<i64, DiskmanError> {
    input.trim().parse::<i64>().map_err(|_| {
        DiskmanError::InvalidInput(format!("'{}' is not a whole number of megabytes", input.trim()))
    })
}

/// Find the disk with OS number `disk_index` among `disks` and check the
/// requested size. OS numbers need not be contiguous.
pub fn validate_partition_request(
    disks: &[Disk],
    disk_index: u32,
    size_mb: i64,
) -> Result<(&Disk, u64), DiskmanError> {
    let disk = disks
        .iter()
        .find(|d| d.index == disk_index)
        .ok_or_else(|| DiskmanError::InvalidInput(format!("Invalid disk number: {}", disk_index)))?;
    Ok((disk, require_positive_mb(size_mb, "Partition size")?))
}

pub fn check_free_space(required_mb: u64, available_bytes: u64) -> Result<(), DiskmanError> {
    let available_mb = whole_mb(available_bytes);
    tracing::debug!("Free space check: {} MB requested, {} MB available", required_mb, available_mb);
    if available_mb < required_mb {
        return Err(DiskmanError::InsufficientSpace { required_mb, available_mb });
    }
    Ok(())
}

pub fn require_positive_mb(value: i64, what: &str) -> Result<u64, DiskmanError> {
    if value <= 0 {
        return Err(DiskmanError::InvalidInput(format!("{} must be greater than zero.", what)));
    }
    Ok(value as u64)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResizeRequest {
    Extend { by_mb: u64 },
    Shrink { desired_mb: Option<u64>, minimum_mb: Option<u64> },
}

impl ResizeRequest {
    /// Build a request from the three optional prompts. `Ok(None)` means
    /// nothing was entered.
    pub fn from_inputs(
        extend: &str,
        shrink_desired: &str,
        shrink_minimum: &str,
    ) -> Result<Option<Self>, DiskmanError> {
        let extend = optional_mb(extend, "Extend size")?;
        let desired = optional_mb(shrink_desired, "Desired shrink size")?;
        let minimum = optional_mb(shrink_minimum, "Minimum shrink size")?;

        match (extend, desired, minimum) {
            (None, None, None) => Ok(None),
            (Some(by_mb), None, None) => Ok(Some(ResizeRequest::Extend { by_mb })),
            (Some(_), _, _) => Err(DiskmanError::InvalidInput(
                "Choose either extend or shrink, not both.".to_string(),
            )),
            (None, desired_mb, minimum_mb) => Ok(Some(ResizeRequest::Shrink { desired_mb, minimum_mb })),
        }
    }

    /// Check the request against what the OS reports and return the new
    /// partition size in bytes.
    pub fn new_size(&self, bounds: &ResizeBounds) -> Result<u64, DiskmanError> {
        let current_mb = whole_mb(bounds.current);
        match *self {
            ResizeRequest::Extend { by_mb } => {
                let free_mb = whole_mb(bounds.free());
                tracing::debug!("Extend by {} MB, {} MB free", by_mb, free_mb);
                if by_mb > free_mb {
                    return Err(DiskmanError::InsufficientSpace { required_mb: by_mb, available_mb: free_mb });
                }
                Ok(bounds.current.saturating_add(mb_to_bytes(by_mb)))
            }
            ResizeRequest::Shrink { desired_mb, minimum_mb } => {
                let minimum_mb = minimum_mb.unwrap_or_else(|| whole_mb(bounds.minimum));
                let target_mb = desired_mb.unwrap_or(minimum_mb);
                if target_mb < minimum_mb || target_mb > current_mb {
                    return Err(DiskmanError::InvalidInput(format!(
                        "Invalid shrink size. Desired size ({} MB) must be between minimum size ({} MB) and current size ({} MB).",
                        target_mb, minimum_mb, current_mb
                    )));
                }
                Ok(mb_to_bytes(target_mb))
            }
        }
    }
}

fn optional_mb(input: &str, what: &str) -> Result<Option<u64>, DiskmanError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_mb(input).and_then(|mb| require_positive_mb(mb, what)).map(Some)
}

/// Allocation unit size in bytes; empty or `0` selects the OS default.
pub fn parse_cluster_size(input: &str) -> Result<Option<u32>, DiskmanError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let size: u32 = input
        .parse()
        .map_err(|_| DiskmanError::InvalidInput(format!("Invalid allocation unit size: {}", input)))?;
    if size == 0 {
        return Ok(None);
    }
    if !size.is_power_of_two() || !(MIN_CLUSTER_SIZE..=MAX_CLUSTER_SIZE).contains(&size) {
        return Err(DiskmanError::InvalidInput(format!(
            "Allocation unit size must be a power of two between {} and {} bytes",
            MIN_CLUSTER_SIZE, MAX_CLUSTER_SIZE
        )));
    }
    Ok(Some(size))
}

pub fn validate_label(input: &str, file_system: FileSystem) -> Result<Option<String>, DiskmanError> {
    let label = input.trim();
    if label.is_empty() {
        return Ok(None);
    }
    if label.chars().count() > file_system.max_label_len() {
        return Err(DiskmanError::InvalidInput(format!(
            "{} volume labels are limited to {} characters",
            file_system,
            file_system.max_label_len()
        )));
    }
    if label.contains(['"', '\'', '`', '$']) {
        return Err(DiskmanError::InvalidInput("Volume label contains a reserved character".to_string()));
    }
    Ok(Some(label.to_string()))
}
