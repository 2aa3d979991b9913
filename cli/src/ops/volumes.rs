use super::Context;
use diskman_core::units::format_gb;
use diskman_core::{Disk, DiskmanError, Volume};
use std::io::{BufRead, Write};

const HEADER: &str = "Volume ###  Ltr  Label        Fs     Type        Size        Status     Info";
const RULE: &str = "----------  ---  -----------  -----  ----------  ----------  ---------  --------";

fn truncate(value: Option<&str>, width: usize) -> String {
    value.unwrap_or("").chars().take(width).collect()
}

pub fn volume_row(number: usize, volume: &Volume) -> String {
    let created = volume
        .created
        .map(|date| date.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let cluster = volume
        .cluster_size
        .map(|size| size.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let size = volume.size.map(format_gb).unwrap_or_else(|| "Unknown".to_string());

    format!(
        "Volume {:<4}  {:<3}  {:<11}  {:<5}  {:<10}  {:<10}  {:<9}  Creation Date: {}, Cluster Size: {}, Drive Type: {}",
        number,
        volume.device_id.as_deref().unwrap_or(""),
        truncate(volume.label.as_deref(), 11),
        truncate(volume.file_system.as_deref(), 5),
        "Partition",
        size,
        volume.status.as_deref().unwrap_or("Unknown"),
        created,
        cluster,
        volume.drive_type
    )
}

async fn print_disk_volumes<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
    disk: &Disk,
    indent: &str,
) -> Result<(), DiskmanError> {
    let volumes = match ctx.manager.list_volumes(disk).await {
        Ok(volumes) => volumes,
        Err(e) => {
            ctx.console.say(format!("{}Error listing volumes: {}", indent, e))?;
            return Ok(());
        }
    };

    ctx.console.say(format!("{}{}", indent, HEADER))?;
    ctx.console.say(format!("{}{}", indent, RULE))?;
    for (i, volume) in volumes.iter().enumerate() {
        ctx.console.say(format!("{}{}", indent, volume_row(i + 1, volume)))?;
    }
    Ok(())
}

/// List volumes on `disk`, or on every disk when none is given.
pub async fn list_volumes<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
    disk: Option<&Disk>,
) -> Result<(), DiskmanError> {
    match disk {
        Some(disk) => {
            ctx.console.say("\nVolume Information for Selected Disk:")?;
            print_disk_volumes(ctx, disk, "").await
        }
        None => {
            ctx.console.say("\nVolume Information for All Disks:")?;
            let disks = match ctx.manager.enumerate_disks().await {
                Ok(disks) => disks,
                Err(e) => {
                    ctx.console.say(format!("Error listing disks: {}", e))?;
                    return Ok(());
                }
            };
            for disk in &disks {
                ctx.console.say(format!("\n  Volumes on Disk {} ({}):", disk.index, disk.caption))?;
                print_disk_volumes(ctx, disk, "    ").await?;
            }
            Ok(())
        }
    }
}

/// Look up a disk by OS index and list its volumes.
pub async fn list_disk_volumes<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
    disk_index: u32,
) -> Result<(), DiskmanError> {
    let disk = ctx
        .manager
        .enumerate_disks()
        .await?
        .into_iter()
        .find(|d| d.index == disk_index)
        .ok_or_else(|| DiskmanError::DiskNotFound(format!("Disk {}", disk_index)))?;
    list_volumes(ctx, Some(&disk)).await
}

pub async fn mount<R: BufRead, W: Write>(ctx: &mut Context<'_, R, W>, drive: &str) -> Result<(), DiskmanError> {
    match ctx.manager.mount_volume(drive).await {
        Ok(()) => {
            ctx.console.say("Volume mounted successfully.")?;
            Ok(())
        }
        Err(e) => {
            ctx.console.say(format!("Error during volume mounting: {}", e))?;
            Err(e)
        }
    }
}

pub async fn dismount<R: BufRead, W: Write>(ctx: &mut Context<'_, R, W>, drive: &str) -> Result<(), DiskmanError> {
    match ctx.manager.dismount_volume(drive).await {
        Ok(()) => {
            ctx.console.say("Volume dismounted successfully.")?;
            Ok(())
        }
        Err(e) => {
            ctx.console.say(format!("Error during volume dismounting: {}", e))?;
            Err(e)
        }
    }
}
