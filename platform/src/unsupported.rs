use async_trait::async_trait;
use diskman_core::{Disk, DiskManager, DiskmanError, FormatOptions, ResizeBounds, Volume};

/// Stand-in for platforms without a disk management interface.
#[derive(Debug, Default)]
pub struct UnsupportedDiskManager;

impl UnsupportedDiskManager {
    pub fn new() -> Self {
        Self
    }
}

fn unsupported<T>() -> Result<T, DiskmanError> {
    Err(DiskmanError::PlatformNotSupported(std::env::consts::OS.to_string()))
}

#[async_trait]
impl DiskManager for UnsupportedDiskManager {
    async fn enumerate_disks(&self) -> Result<Vec<Disk>, DiskmanError> {
        unsupported()
    }

    async fn unallocated_space(&self, _disk: &Disk) -> Result<u64, DiskmanError> {
        unsupported()
    }

    async fn create_partition(&self, _disk: &Disk, _size: u64) -> Result<(), DiskmanError> {
        unsupported()
    }

    async fn list_volumes(&self, _disk: &Disk) -> Result<Vec<Volume>, DiskmanError> {
        unsupported()
    }

    async fn format_volume(&self, _volume: &Volume, _options: &FormatOptions) -> Result<(), DiskmanError> {
        unsupported()
    }

    async fn resize_bounds(&self, _volume: &Volume) -> Result<ResizeBounds, DiskmanError> {
        unsupported()
    }

    async fn resize_volume(&self, _volume: &Volume, _new_size: u64) -> Result<(), DiskmanError> {
        unsupported()
    }

    async fn mount_volume(&self, _drive: &str) -> Result<(), DiskmanError> {
        unsupported()
    }

    async fn dismount_volume(&self, _drive: &str) -> Result<(), DiskmanError> {
        unsupported()
    }
}

pub fn is_elevated() -> bool {
    false
}
