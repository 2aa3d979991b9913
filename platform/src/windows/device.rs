use crate::powershell::PowerShell;
use crate::records::{DiskDriveRecord, FreeExtentRecord, MethodResult, SupportedSizeRecord, VolumeMethod, VolumeRecord};
use crate::scripts;
use async_trait::async_trait;
use diskman_core::{Disk, DiskManager, DiskmanError, FormatOptions, ResizeBounds, Volume};

/// Disk management through CIM/WMI and the Storage cmdlets.
#[derive(Debug, Default)]
pub struct WindowsDiskManager {
    shell: PowerShell,
}

impl WindowsDiskManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn letter_of(volume: &Volume) -> Result<char, DiskmanError> {
        volume.drive_letter().ok_or_else(|| {
            DiskmanError::VolumeNotFound(format!("{} has no drive letter", volume.partition_id))
        })
    }

    fn invoke_volume_method(&self, method: VolumeMethod, script: &str) -> Result<(), DiskmanError> {
        let result = self
            .shell
            .run_json::<MethodResult>(script)?
            .into_iter()
            .next()
            .ok_or_else(|| DiskmanError::External(format!("Win32_Volume.{} returned nothing", method.name())))?;
        method.check(&result)
    }
}

#[async_trait]
impl DiskManager for WindowsDiskManager {
    async fn enumerate_disks(&self) -> Result<Vec<Disk>, DiskmanError> {
        let records: Vec<DiskDriveRecord> = self.shell.run_json(scripts::DISK_QUERY)?;
        log::info!("Enumerated {} disks", records.len());
        Ok(records.into_iter().map(Disk::from).collect())
    }

    async fn unallocated_space(&self, disk: &Disk) -> Result<u64, DiskmanError> {
        let record = self
            .shell
            .run_json::<FreeExtentRecord>(&scripts::free_extent_query(disk.index))?
            .into_iter()
            .next()
            .ok_or_else(|| DiskmanError::DiskNotFound(disk.device_id.clone()))?;
        Ok(record.largest_free_extent.unwrap_or(0))
    }

    async fn create_partition(&self, disk: &Disk, size: u64) -> Result<(), DiskmanError> {
        log::info!("Creating {} byte partition on disk {}", size, disk.index);
        self.shell.run(&scripts::create_partition_command(disk.index, size))?;
        Ok(())
    }

    async fn list_volumes(&self, disk: &Disk) -> Result<Vec<Volume>, DiskmanError> {
        let records: Vec<VolumeRecord> = self.shell.run_json(&scripts::volume_query(disk.index))?;
        log::debug!("Disk {} has {} partitions", disk.index, records.len());
        Ok(records.into_iter().map(Volume::from).collect())
    }

    async fn format_volume(&self, volume: &Volume, options: &FormatOptions) -> Result<(), DiskmanError> {
        let letter = Self::letter_of(volume)?;
        log::info!("Formatting {}: as {} (quick: {})", letter, options.file_system, options.quick_format);
        self.invoke_volume_method(VolumeMethod::Format, &scripts::format_command(letter, options))
    }

    async fn resize_bounds(&self, volume: &Volume) -> Result<ResizeBounds, DiskmanError> {
        let letter = Self::letter_of(volume)?;
        self.shell
            .run_json::<SupportedSizeRecord>(&scripts::supported_size_query(letter))?
            .into_iter()
            .next()
            .map(ResizeBounds::from)
            .ok_or_else(|| DiskmanError::VolumeNotFound(format!("{}:", letter)))
    }

    async fn resize_volume(&self, volume: &Volume, new_size: u64) -> Result<(), DiskmanError> {
        let letter = Self::letter_of(volume)?;
        log::info!("Resizing {}: to {} bytes", letter, new_size);
        self.shell.run(&scripts::resize_command(letter, new_size))?;
        Ok(())
    }

    async fn mount_volume(&self, drive: &str) -> Result<(), DiskmanError> {
        let letter = scripts::parse_drive_letter(drive)?;
        self.invoke_volume_method(VolumeMethod::Mount, &scripts::mount_command(letter))
    }

    async fn dismount_volume(&self, drive: &str) -> Result<(), DiskmanError> {
        let letter = scripts::parse_drive_letter(drive)?;
        self.invoke_volume_method(VolumeMethod::Dismount, &scripts::dismount_command(letter))
    }
}
