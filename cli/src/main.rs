use clap::Parser;
use diskman_cli::ops::{disks, help, volumes};
use diskman_cli::{logging, Cli, Commands, Console, Context, Session, Settings};
use diskman_platform::{PlatformDiskManager, PlatformPartitionTool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli);
    logging::init(&settings);

    if !diskman_platform::is_elevated() {
        tracing::warn!("Not running as administrator; partition, format and resize calls will be refused");
    }

    let manager = PlatformDiskManager::new();
    let tool = PlatformPartitionTool;
    let mut ctx = Context::new(&manager, &tool, &settings, Console::stdio());

    let result = match cli.command {
        None => {
            if settings.show_banner {
                help::print_banner(&mut ctx.console, &settings)?;
            }
            Session::new(ctx).run().await
        }
        Some(Commands::ListDisks) => disks::list_disks(&mut ctx).await,
        Some(Commands::ListVolumes { disk: Some(index) }) => volumes::list_disk_volumes(&mut ctx, index).await,
        Some(Commands::ListVolumes { disk: None }) => volumes::list_volumes(&mut ctx, None).await,
        Some(Commands::Mount { volume }) => volumes::mount(&mut ctx, &volume).await,
        Some(Commands::Dismount { volume }) => volumes::dismount(&mut ctx, &volume).await,
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
