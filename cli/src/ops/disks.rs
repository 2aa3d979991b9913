use super::Context;
use diskman_core::units::format_gb;
use diskman_core::{Disk, DiskmanError};
use std::io::{BufRead, Write};

/// Print every physical disk, falling back to diskpart's own listing.
/// Fails only when both sources fail.
pub async fn list_disks<R: BufRead, W: Write>(ctx: &mut Context<'_, R, W>) -> Result<(), DiskmanError> {
    match ctx.manager.enumerate_disks().await {
        Ok(disks) => {
            ctx.console.say("Disk ###  Status  Size")?;
            ctx.console.say("--------  ------  ----------")?;
            for disk in &disks {
                let status: String = disk.status_or_unknown().chars().take(6).collect();
                let size = disk.size.map(format_gb).unwrap_or_else(|| "Unknown".to_string());
                ctx.console.say(format!("Disk {:<4} {:<6}  {}", disk.index, status, size))?;
            }
            Ok(())
        }
        Err(wmi_error) => {
            tracing::warn!("Disk enumeration failed, falling back to diskpart: {}", wmi_error);
            ctx.console.say(format!("WMI error occurred: {}", wmi_error))?;
            ctx.console.say("Falling back to diskpart...")?;
            match ctx.tool.list_disks().await {
                Ok(output) => {
                    ctx.console.say(output.trim_end())?;
                    Ok(())
                }
                Err(tool_error) => {
                    ctx.console.say(format!("Error occurred while listing disks: {}", tool_error))?;
                    Err(tool_error)
                }
            }
        }
    }
}

/// List disks and let the user pick one. `Ok(None)` when there is nothing
/// to pick or the user cancels; `Err` when the disks cannot be enumerated.
pub async fn select_disk<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
) -> Result<Option<Disk>, DiskmanError> {
    let mut disks = ctx.manager.enumerate_disks().await.map_err(|e| {
        tracing::error!("Disk selection failed: {}", e);
        e
    })?;

    if disks.is_empty() {
        ctx.console.say("No disks found on the system.")?;
        return Ok(None);
    }

    ctx.console.say("Available disks:")?;
    ctx.console.say("No.  Disk ###  Status      Size")?;
    ctx.console.say("---  --------  ----------  ----------")?;
    for (i, disk) in disks.iter().enumerate() {
        let size = disk.size.map(format_gb).unwrap_or_else(|| "Unknown".to_string());
        ctx.console.say(format!(
            "{:<3}  Disk {:<4}  {:<10}  {}",
            format!("{}.", i + 1),
            disk.index,
            disk.status_or_unknown(),
            size
        ))?;
    }

    match ctx.console.choose("disk to select", disks.len())? {
        Some(position) => {
            let disk = disks.swap_remove(position);
            ctx.console.say(format!("Selected disk: {}", disk.caption))?;
            tracing::info!("Selected disk {} ({})", disk.index, disk.device_id);
            Ok(Some(disk))
        }
        None => {
            ctx.console.say("Operation canceled.")?;
            Ok(None)
        }
    }
}
