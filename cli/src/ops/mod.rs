//! One module per menu operation. Each prints its own diagnostics and only
//! returns `Err` for failures that should end the process.

pub mod disks;
pub mod format;
pub mod help;
pub mod partition;
pub mod resize;
pub mod volumes;

use crate::config::Settings;
use crate::console::Console;
use diskman_core::{Disk, DiskManager, PartitionTool, Volume};
use std::io::{BufRead, Write};

/// Everything an operation needs: the management interface, the fallback
/// tool, settings and the console.
pub struct Context<'a, R, W> {
    pub manager: &'a dyn DiskManager,
    pub tool: &'a dyn PartitionTool,
    pub settings: &'a Settings,
    pub console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Context<'a, R, W> {
    pub fn new(
        manager: &'a dyn DiskManager,
        tool: &'a dyn PartitionTool,
        settings: &'a Settings,
        console: Console<R, W>,
    ) -> Self {
        Self {
            manager,
            tool,
            settings,
            console,
        }
    }
}

/// First volume on the disk that is a fixed drive with a letter, the only
/// kind the format calls accept. Prints why when there is none.
pub(crate) async fn find_fixed_volume<R: BufRead, W: Write>(
    ctx: &mut Context<'_, R, W>,
    disk: &Disk,
    purpose: &str,
) -> std::io::Result<Option<Volume>> {
    let volumes = match ctx.manager.list_volumes(disk).await {
        Ok(volumes) => volumes,
        Err(e) => {
            ctx.console.say(format!("An error occurred: {}", e))?;
            return Ok(None);
        }
    };

    if volumes.is_empty() {
        ctx.console.say("No partitions found on the selected disk.")?;
        return Ok(None);
    }

    let found = volumes
        .into_iter()
        .find(|v| v.is_fixed() && v.drive_letter().is_some());
    if found.is_none() {
        ctx.console.say(format!("No suitable volume found for {} on the selected disk.", purpose))?;
    }
    Ok(found)
}
