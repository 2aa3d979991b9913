use super::Context;
use diskman_core::units::{format_mb, whole_mb};
use diskman_core::{Disk, DiskmanError, ResizeRequest, Volume};
use std::io::{BufRead, Write};

pub async fn resize<R: BufRead, W: Write>(ctx: &mut Context<'_, R, W>, disk: &Disk) -> Result<(), DiskmanError> {
    ctx.console.say("\n** Resize Volume **")?;

    let mut answers = Vec::with_capacity(3);
    for message in [
        "Enter size to extend volume (in MB, leave empty for no extension): ",
        "Enter desired size to shrink (in MB, leave empty for no shrink): ",
        "Enter minimum size to shrink (in MB, leave empty for no shrink): ",
    ] {
        let Some(answer) = ctx.console.prompt(message)? else {
            return Ok(());
        };
        answers.push(answer);
    }

    let request = match ResizeRequest::from_inputs(&answers[0], &answers[1], &answers[2]) {
        Ok(Some(request)) => request,
        Ok(None) => {
            ctx.console.say("No resizing options provided. Operation canceled.")?;
            return Ok(());
        }
        Err(e) => {
            ctx.console.say(e)?;
            return Ok(());
        }
    };

    let volumes = match ctx.manager.list_volumes(disk).await {
        Ok(volumes) => volumes,
        Err(e) => {
            ctx.console.say(format!("Error during volume resize: {}", e))?;
            return Ok(());
        }
    };

    if let Err(e) = resize_volume(ctx, volumes, request).await {
        ctx.console.say(format!("Error during volume resize: {}", e))?;
    }
    Ok(())
}

/// Pick one of `volumes` and apply `request` to it. `Ok(false)` when nothing
/// was resized.
pub async fn resize_volume<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
    volumes: Vec<Volume>,
    request: ResizeRequest,
) -> Result<bool, DiskmanError> {
    // resizing goes through the drive letter
    let mut volumes: Vec<Volume> = volumes.into_iter().filter(|v| v.drive_letter().is_some()).collect();
    if volumes.is_empty() {
        ctx.console.say("No volumes found.")?;
        return Ok(false);
    }

    ctx.console.say("Available Volumes:")?;
    ctx.console.say("Volume   Size           Free Space")?;
    ctx.console.say("-------  -------------  -------------")?;
    for (i, volume) in volumes.iter().enumerate() {
        ctx.console.say(format!(
            "{}. {:<4} {:>13}  {:>13}",
            i + 1,
            volume.display_name(),
            format_mb(volume.size.unwrap_or(0)),
            format_mb(volume.free_space.unwrap_or(0))
        ))?;
    }

    let Some(position) = ctx.console.choose("volume to resize", volumes.len())? else {
        ctx.console.say("Resize canceled.")?;
        return Ok(false);
    };
    let volume = volumes.swap_remove(position);
    let device = volume.display_name().to_string();
    ctx.console.say(format!("Selected volume: {}", device))?;

    let bounds = ctx.manager.resize_bounds(&volume).await?;
    ctx.console.say(format!(
        "Available space on volume {}: {} MB",
        device,
        whole_mb(bounds.free())
    ))?;

    let new_size = request.new_size(&bounds)?;

    let question = match request {
        ResizeRequest::Extend { by_mb } => {
            format!("Are you sure you want to extend volume {} by {} MB? (y/n): ", device, by_mb)
        }
        ResizeRequest::Shrink { desired_mb: Some(mb), .. } => {
            format!("Are you sure you want to shrink volume {} to {} MB? (y/n): ", device, mb)
        }
        ResizeRequest::Shrink { .. } => format!(
            "Are you sure you want to shrink volume {} to a minimum size of {} MB? (y/n): ",
            device,
            whole_mb(new_size)
        ),
    };
    if !ctx.console.confirm(&question, "y")? {
        ctx.console.say("Resize canceled.")?;
        return Ok(false);
    }

    tracing::info!("Resizing {} from {} to {} bytes", device, bounds.current, new_size);
    ctx.manager.resize_volume(&volume, new_size).await?;
    match request {
        ResizeRequest::Extend { .. } => ctx.console.say("Volume extended successfully.")?,
        ResizeRequest::Shrink { .. } => ctx.console.say("Volume shrunk successfully.")?,
    }
    Ok(true)
}
