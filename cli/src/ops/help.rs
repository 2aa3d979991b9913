use super::Context;
use crate::console::Console;
use crate::config::Settings;
use diskman_core::DiskmanError;
use std::io::{self, BufRead, Write};

const HELP: &str = "
** DiskMan Help **
This section describes each menu option:

1. List Disks:
Displays all connected disks with their number, status and size.

2. Select Disk:
Chooses the disk that options 3 to 7 operate on. The selection lasts until
another disk is selected or the selection is cancelled.

3. Create Partition (on Selected Disk):
Creates a new primary partition on the selected disk. You are prompted for
the size in megabytes (MB). If the management interface refuses, diskpart is
tried once.

4. Format Volume (Quick) - Selected Disk:
Quick formats the first fixed volume of the selected disk, keeping its file
system. You are asked to confirm with 'yes'.

5. Format Volume (Custom) - Selected Disk:
Formats the first fixed volume with a file system (NTFS, FAT32, exFAT),
allocation unit size and label of your choice.
**Note:** Formatting erases all data on the volume. Back up first.

6. Resize Volume - Selected Disk:
Extends a volume by a number of MB, or shrinks it to a desired size. The
shrink target must lie between the minimum size and the current size, and an
extension cannot exceed the space available to the partition.

7. List Volumes (All Disks or Selected Disk):
Shows label, file system, size, status, creation date, cluster size and
drive type of each volume, for the selected disk or for all disks.

8. Exit DiskPart:
Leaves DiskMan.

10. Exit:
Also leaves DiskMan.";

pub fn print_banner<R: BufRead, W: Write>(console: &mut Console<R, W>, settings: &Settings) -> io::Result<()> {
    console.say(format!(" DiskMan Version {}", env!("CARGO_PKG_VERSION")))?;
    console.say("Copyright (C) ZMSTECH.")?;
    console.say(format!("On computer: {}", settings.computer_name))
}

pub fn show_help<R: BufRead, W: Write>(ctx: &mut Context<'_, R, W>) -> Result<(), DiskmanError> {
    ctx.console.say(HELP)?;
    ctx.console.prompt("Press Enter to continue...")?;
    Ok(())
}
