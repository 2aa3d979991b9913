//! PowerShell scripts for each management operation.

use crate::powershell::quote;
use diskman_core::{DiskmanError, FormatOptions};

pub const DISK_QUERY: &str = "Get-CimInstance -ClassName Win32_DiskDrive | Sort-Object Index | \
    Select-Object Index, DeviceID, Caption, Model, Status, Size, MediaType, InterfaceType | ConvertTo-Json";

/// Walk disk -> partition -> logical disk and emit one record per partition.
pub fn volume_query(disk_index: u32) -> String {
    format!(
        r#"$disk = Get-CimInstance -ClassName Win32_DiskDrive -Filter 'Index={index}'
if (-not $disk) {{ throw 'Disk {index} not found' }}
$rows = @(Get-CimAssociatedInstance -InputObject $disk -ResultClassName Win32_DiskPartition | Sort-Object Index | ForEach-Object {{
    $partition = $_
    $logical = Get-CimAssociatedInstance -InputObject $partition -ResultClassName Win32_LogicalDisk | Select-Object -First 1
    $volume = $null
    if ($logical) {{ $volume = Get-CimInstance -ClassName Win32_Volume -Filter "DriveLetter='$($logical.DeviceID)'" }}
    [PSCustomObject]@{{
        PartitionId = $partition.DeviceID
        PartitionSize = $partition.Size
        DriveLetter = $logical.DeviceID
        Label = $logical.VolumeName
        FileSystem = $logical.FileSystem
        Size = $logical.Size
        FreeSpace = $logical.FreeSpace
        DriveType = $logical.DriveType
        Status = $logical.Status
        Created = if ($partition.InstallDate) {{ $partition.InstallDate.ToString('o') }} else {{ $null }}
        ClusterSize = $volume.BlockSize
    }}
}})
ConvertTo-Json -InputObject $rows"#,
        index = disk_index
    )
}

pub fn free_extent_query(disk_index: u32) -> String {
    format!(
        "Get-Disk -Number {} | Select-Object Number, LargestFreeExtent | ConvertTo-Json",
        disk_index
    )
}

pub fn create_partition_command(disk_index: u32, size: u64) -> String {
    format!("New-Partition -DiskNumber {} -Size {} | Out-Null", disk_index, size)
}

fn volume_lookup(letter: char) -> String {
    format!(
        "$v = Get-CimInstance -ClassName Win32_Volume -Filter \"DriveLetter='{letter}:'\"; \
         if (-not $v) {{ throw 'Volume {letter}: not found' }}; ",
        letter = letter
    )
}

pub fn format_command(letter: char, options: &FormatOptions) -> String {
    let mut arguments = vec![
        format!("FileSystem = {}", quote(options.file_system.as_str())),
        format!("QuickFormat = ${}", options.quick_format),
    ];
    if let Some(cluster_size) = options.cluster_size {
        arguments.push(format!("ClusterSize = [uint32]{}", cluster_size));
    }
    if let Some(label) = &options.label {
        arguments.push(format!("Label = {}", quote(label)));
    }
    format!(
        "{}Invoke-CimMethod -InputObject $v -MethodName Format -Arguments @{{ {} }} | \
         Select-Object ReturnValue | ConvertTo-Json",
        volume_lookup(letter),
        arguments.join("; ")
    )
}

pub fn mount_command(letter: char) -> String {
    format!(
        "{}Invoke-CimMethod -InputObject $v -MethodName Mount | Select-Object ReturnValue | ConvertTo-Json",
        volume_lookup(letter)
    )
}

pub fn dismount_command(letter: char) -> String {
    format!(
        "{}Invoke-CimMethod -InputObject $v -MethodName Dismount -Arguments @{{ Force = $false; Permanent = $false }} | \
         Select-Object ReturnValue | ConvertTo-Json",
        volume_lookup(letter)
    )
}

pub fn supported_size_query(letter: char) -> String {
    format!(
        "$p = Get-Partition -DriveLetter {letter}; $s = $p | Get-PartitionSupportedSize; \
         [PSCustomObject]@{{ Size = $p.Size; SizeMin = $s.SizeMin; SizeMax = $s.SizeMax }} | ConvertTo-Json",
        letter = letter
    )
}

pub fn resize_command(letter: char, size: u64) -> String {
    format!("Resize-Partition -DriveLetter {} -Size {}", letter, size)
}

/// Accepts `E`, `E:` or `E:\` and returns the upper-case letter.
pub fn parse_drive_letter(drive: &str) -> Result<char, DiskmanError> {
    let trimmed = drive.trim().trim_end_matches('\\').trim_end_matches(':');
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(DiskmanError::InvalidInput(format!("Not a drive letter: {}", drive))),
    }
}
