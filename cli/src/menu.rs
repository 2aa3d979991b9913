use crate::ops::{self, Context};
use diskman_core::{Disk, DiskmanError};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListDisks,
    SelectDisk,
    CreatePartition,
    FormatQuick,
    FormatCustom,
    ResizeVolume,
    ListVolumes,
    ExitDiskPart,
    Help,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim().parse::<u8>().ok()? {
            1 => MenuChoice::ListDisks,
            2 => MenuChoice::SelectDisk,
            3 => MenuChoice::CreatePartition,
            4 => MenuChoice::FormatQuick,
            5 => MenuChoice::FormatCustom,
            6 => MenuChoice::ResizeVolume,
            7 => MenuChoice::ListVolumes,
            8 => MenuChoice::ExitDiskPart,
            9 => MenuChoice::Help,
            10 => MenuChoice::Exit,
            _ => return None,
        };
        Some(choice)
    }

    /// Options that act on the selected disk.
    pub fn needs_disk(&self) -> bool {
        matches!(
            self,
            MenuChoice::CreatePartition | MenuChoice::FormatQuick | MenuChoice::FormatCustom | MenuChoice::ResizeVolume
        )
    }
}

const MENU: &str = "
**  DiskMan **
1. List Disks
2. Select Disk
3. Create Partition (on Selected Disk)
4. Format Volume (Quick) - Selected Disk
5. Format Volume (Custom) - Selected Disk
6. Resize Volume - Selected Disk
7. List Volumes (All Disks or Selected Disk)
8. Exit DiskPart
9. Help
10. Exit";

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The interactive loop and its one piece of state, the selected disk.
pub struct Session<'a, R, W> {
    pub ctx: Context<'a, R, W>,
    selected: Option<Disk>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(ctx: Context<'a, R, W>) -> Self {
        Self { ctx, selected: None }
    }

    pub fn selected(&self) -> Option<&Disk> {
        self.selected.as_ref()
    }

    /// Run until the user exits or input ends. `Err` only for failures
    /// that should terminate the process.
    pub async fn run(&mut self) -> Result<(), DiskmanError> {
        loop {
            self.ctx.console.say(MENU)?;
            let Some(answer) = self.ctx.console.prompt("Enter your choice (1-10): ")? else {
                return Ok(());
            };

            let flow = match MenuChoice::parse(&answer) {
                Some(choice) => self.dispatch(choice).await?,
                None => {
                    self.ctx
                        .console
                        .say("Invalid choice. Please enter a number between 1 and 10.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    pub async fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow, DiskmanError> {
        tracing::debug!("Menu choice: {:?}", choice);

        if choice.needs_disk() && self.selected.is_none() {
            self.ctx.console.say(DiskmanError::NoDiskSelected)?;
            return Ok(Flow::Continue);
        }

        if choice == MenuChoice::SelectDisk {
            self.selected = ops::disks::select_disk(&mut self.ctx).await?;
            return Ok(Flow::Continue);
        }

        let ctx = &mut self.ctx;
        match (choice, self.selected.as_ref()) {
            (MenuChoice::ListDisks, _) => ops::disks::list_disks(ctx).await?,
            (MenuChoice::CreatePartition, Some(disk)) => ops::partition::prompt_and_create(ctx, disk).await?,
            (MenuChoice::FormatQuick, Some(disk)) => ops::format::format_quick(ctx, disk).await?,
            (MenuChoice::FormatCustom, Some(disk)) => ops::format::format_custom(ctx, disk).await?,
            (MenuChoice::ResizeVolume, Some(disk)) => ops::resize::resize(ctx, disk).await?,
            (MenuChoice::ListVolumes, disk) => ops::volumes::list_volumes(ctx, disk).await?,
            (MenuChoice::ExitDiskPart, _) => {
                ctx.console.say("Exiting DiskPart")?;
                return Ok(Flow::Exit);
            }
            (MenuChoice::Help, _) => ops::help::show_help(ctx)?,
            (MenuChoice::Exit, _) => {
                ctx.console.say("Exiting...")?;
                return Ok(Flow::Exit);
            }
            // handled or gated above
            (MenuChoice::SelectDisk, _) | (_, None) => {}
        }
        Ok(Flow::Continue)
    }
}
