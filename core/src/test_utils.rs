/// Mock implementations for testing - NEVER touch real hardware
use crate::units::GIB;
use crate::{
    Disk, DiskManager, DiskmanError, DriveType, FormatOptions, PartitionTool, ResizeBounds, Volume,
};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub fn mock_disk(index: u32, size_gb: u64) -> Disk {
    Disk {
        index,
        device_id: format!(r"\\.\PHYSICALDRIVE{}", index),
        caption: format!("Mock Disk {}", index),
        status: Some("OK".to_string()),
        size: Some(size_gb * GIB),
        media_type: Some("Fixed hard disk media".to_string()),
        interface_type: Some("SCSI".to_string()),
    }
}

pub fn mock_volume(letter: char, drive_type: DriveType, size: u64, free_space: u64) -> Volume {
    Volume {
        partition_id: format!("Disk #1, Partition #{}", letter as u32 - 'A' as u32),
        device_id: Some(format!("{}:", letter)),
        label: Some("DATA".to_string()),
        file_system: Some("NTFS".to_string()),
        size: Some(size),
        free_space: Some(free_space),
        drive_type,
        status: Some("OK".to_string()),
        created: None,
        cluster_size: Some(4096),
    }
}

/// Mock disk manager that records every call it receives
pub struct MockDiskManager {
    pub disks: Vec<Disk>,
    pub volumes: Vec<Volume>,
    pub unallocated: u64,
    pub bounds: ResizeBounds,
    pub fail_enumeration: bool,
    pub fail_operations: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockDiskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDiskManager {
    pub fn new() -> Self {
        Self {
            disks: vec![mock_disk(0, 500), mock_disk(1, 16)],
            volumes: vec![mock_volume('E', DriveType::Fixed, 8 * GIB, 4 * GIB)],
            unallocated: 8 * GIB,
            bounds: ResizeBounds {
                current: 8 * GIB,
                minimum: GIB,
                maximum: 12 * GIB,
            },
            fail_enumeration: false,
            fail_operations: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(' ').next() == Some(name))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn outcome(&self, what: &str) -> Result<(), DiskmanError> {
        if self.fail_operations {
            Err(DiskmanError::External(format!("mock {} failure", what)))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl DiskManager for MockDiskManager {
    async fn enumerate_disks(&self) -> Result<Vec<Disk>, DiskmanError> {
        self.record("enumerate_disks".to_string());
        if self.fail_enumeration {
            return Err(DiskmanError::External("mock enumeration failure".to_string()));
        }
        Ok(self.disks.clone())
    }

    async fn unallocated_space(&self, disk: &Disk) -> Result<u64, DiskmanError> {
        self.record(format!("unallocated_space {}", disk.index));
        Ok(self.unallocated)
    }

    async fn create_partition(&self, disk: &Disk, size: u64) -> Result<(), DiskmanError> {
        self.record(format!("create_partition {} {}", disk.index, size));
        self.outcome("partition")
    }

    async fn list_volumes(&self, disk: &Disk) -> Result<Vec<Volume>, DiskmanError> {
        self.record(format!("list_volumes {}", disk.index));
        Ok(self.volumes.clone())
    }

    async fn format_volume(&self, volume: &Volume, options: &FormatOptions) -> Result<(), DiskmanError> {
        self.record(format!(
            "format_volume {} {} quick={}",
            volume.display_name(),
            options.file_system,
            options.quick_format
        ));
        self.outcome("format")
    }

    async fn resize_bounds(&self, volume: &Volume) -> Result<ResizeBounds, DiskmanError> {
        self.record(format!("resize_bounds {}", volume.display_name()));
        Ok(self.bounds)
    }

    async fn resize_volume(&self, volume: &Volume, new_size: u64) -> Result<(), DiskmanError> {
        self.record(format!("resize_volume {} {}", volume.display_name(), new_size));
        self.outcome("resize")
    }

    async fn mount_volume(&self, drive: &str) -> Result<(), DiskmanError> {
        self.record(format!("mount_volume {}", drive));
        self.outcome("mount")
    }

    async fn dismount_volume(&self, drive: &str) -> Result<(), DiskmanError> {
        self.record(format!("dismount_volume {}", drive));
        self.outcome("dismount")
    }
}

/// Mock partitioning tool
#[derive(Default)]
pub struct MockPartitionTool {
    pub fail: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPartitionTool {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PartitionTool for MockPartitionTool {
    async fn list_disks(&self) -> Result<String, DiskmanError> {
        self.calls.lock().unwrap().push("list_disks".to_string());
        if self.fail {
            return Err(DiskmanError::ToolFailed("mock diskpart failure".to_string()));
        }
        Ok("  Disk ###  Status         Size     Free\n  Disk 0    Online          500 GB      0 B\n".to_string())
    }

    async fn create_partition(
        &self,
        disk_index: u32,
        size_mb: u64,
        script: Option<&Path>,
    ) -> Result<(), DiskmanError> {
        self.calls.lock().unwrap().push(format!(
            "create_partition {} {} {}",
            disk_index,
            size_mb,
            script.map(|p| p.display().to_string()).unwrap_or_else(|| "generated".to_string())
        ));
        if self.fail {
            return Err(DiskmanError::ToolFailed("mock diskpart failure".to_string()));
        }
        Ok(())
    }
}
