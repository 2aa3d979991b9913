use super::{find_fixed_volume, Context};
use diskman_core::validation::{parse_cluster_size, validate_label};
use diskman_core::{Disk, DiskmanError, FileSystem, FormatOptions};
use std::io::{BufRead, Write};

fn confirm_message(device: &str) -> String {
    format!("Are you sure you want to format volume {}? (yes/no): ", device)
}

/// Quick format of the first fixed volume on `disk`, keeping its file system.
pub async fn format_quick<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
    disk: &Disk,
) -> Result<(), DiskmanError> {
    let Some(volume) = find_fixed_volume(ctx, disk, "quick format").await? else {
        return Ok(());
    };
    let device = volume.display_name().to_string();

    let options = match FormatOptions::quick(volume.file_system.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            ctx.console.say(format!("Error during quick format: {}", e))?;
            return Ok(());
        }
    };

    if !ctx.console.confirm(&confirm_message(&device), "yes")? {
        ctx.console.say("Format operation cancelled.")?;
        return Ok(());
    }

    ctx.console.say(format!("Formatting volume: {} (Quick Format)", device))?;
    match ctx.manager.format_volume(&volume, &options).await {
        Ok(()) => ctx.console.say("Formatting completed successfully.")?,
        Err(e) => ctx.console.say(format!("Error during quick format: {}", e))?,
    }
    Ok(())
}

/// Format the first fixed volume on `disk` with a chosen file system,
/// allocation unit size and label.
pub async fn format_custom<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
    disk: &Disk,
) -> Result<(), DiskmanError> {
    let Some(volume) = find_fixed_volume(ctx, disk, "formatting").await? else {
        return Ok(());
    };
    let device = volume.display_name().to_string();

    let Some(options) = prompt_options(ctx).await? else {
        return Ok(());
    };

    if !ctx.console.confirm(&confirm_message(&device), "yes")? {
        ctx.console.say("Format operation cancelled.")?;
        return Ok(());
    }

    ctx.console.say(format!(
        "Formatting volume: {} with file system {}",
        device, options.file_system
    ))?;
    match ctx.manager.format_volume(&volume, &options).await {
        Ok(()) => ctx.console.say("Formatting completed successfully.")?,
        Err(e) => ctx.console.say(format!("Error during custom format: {}", e))?,
    }
    Ok(())
}

async fn prompt_options<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
) -> Result<Option<FormatOptions>, DiskmanError> {
    let supported: Vec<&str> = FileSystem::SUPPORTED.iter().map(FileSystem::as_str).collect();
    ctx.console.say(format!("Supported file systems: {}", supported.join(", ")))?;

    let Some(answer) = ctx.console.prompt("Enter file system (e.g., NTFS, FAT32, exFAT): ")? else {
        return Ok(None);
    };
    let file_system: FileSystem = match answer.parse() {
        Ok(fs) => fs,
        Err(_) => {
            ctx.console.say("Invalid file system.")?;
            return Ok(None);
        }
    };

    let Some(answer) = ctx
        .console
        .prompt("Enter allocation unit size in bytes (leave empty for default): ")?
    else {
        return Ok(None);
    };
    let cluster_size = match parse_cluster_size(&answer) {
        Ok(size) => size,
        Err(e) => {
            ctx.console.say(e)?;
            return Ok(None);
        }
    };

    let Some(answer) = ctx.console.prompt("Enter volume label (leave empty for none): ")? else {
        return Ok(None);
    };
    let label = match validate_label(&answer, file_system) {
        Ok(label) => label,
        Err(e) => {
            ctx.console.say(e)?;
            return Ok(None);
        }
    };

    Ok(Some(FormatOptions {
        file_system,
        quick_format: true,
        cluster_size,
        label,
    }))
}
