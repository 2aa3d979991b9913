use super::Context;
use diskman_core::units::mb_to_bytes;
use diskman_core::validation::{check_free_space, parse_mb, require_positive_mb, validate_partition_request};
use diskman_core::{Disk, DiskmanError};
use std::io::{BufRead, Write};

/// Menu entry: ask for a size and create a primary partition on `disk`.
pub async fn prompt_and_create<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
    disk: &Disk,
) -> Result<(), DiskmanError> {
    let Some(answer) = ctx.console.prompt("Enter size for the primary partition (in MB): ")? else {
        return Ok(());
    };
    let size_mb = match parse_mb(&answer) {
        Ok(size) => size,
        Err(_) => {
            ctx.console.say("Invalid input. Please enter a valid integer value for partition size.")?;
            return Ok(());
        }
    };
    if size_mb <= 0 {
        ctx.console.say("Partition size must be greater than zero.")?;
        return Ok(());
    }

    match create_partition(ctx, disk.index, size_mb).await {
        Ok(()) => ctx.console.say("Partition created successfully.")?,
        Err(e) => ctx.console.say(format!("Partition creation failed: {}", e))?,
    }
    Ok(())
}

/// Create a partition of `size_mb` megabytes on the disk with OS index
/// `disk_index`. Validation failures are returned as-is; a failing OS call
/// is retried once through diskpart.
pub async fn create_partition<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
    disk_index: u32,
    size_mb: i64,
) -> Result<(), DiskmanError> {
    let size_mb = require_positive_mb(size_mb, "Partition size")?;

    match create_with_manager(ctx, disk_index, size_mb).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_validation() => Err(e),
        Err(wmi_error) => {
            tracing::warn!("Partition creation failed, falling back to diskpart: {}", wmi_error);
            ctx.console.say(format!("WMI error occurred: {}", wmi_error))?;
            ctx.console.say("Attempting to create partition using diskpart...")?;

            let script = ctx.settings.partition_script.as_deref();
            if let Err(tool_error) = ctx.tool.create_partition(disk_index, size_mb, script).await {
                tracing::error!("diskpart fallback failed: {}", tool_error);
                ctx.console.say(format!("diskpart error occurred: {}", tool_error))?;
                return Err(DiskmanError::FallbackFailed {
                    operation: "create partition".to_string(),
                });
            }
            Ok(())
        }
    }
}

async fn create_with_manager<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
    disk_index: u32,
    size_mb: u64,
) -> Result<(), DiskmanError> {
    let disks = ctx.manager.enumerate_disks().await?;
    let (disk, size_mb) = validate_partition_request(&disks, disk_index, size_mb as i64)?;

    let available = ctx.manager.unallocated_space(disk).await?;
    check_free_space(size_mb, available)?;

    ctx.manager.create_partition(disk, mb_to_bytes(size_mb)).await
}
