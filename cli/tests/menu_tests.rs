/// Menu dispatch, disk gating and operation tests against mock disks
/// These never touch real hardware

use diskman_cli::menu::Flow;
use diskman_cli::{Console, Context, MenuChoice, Session, Settings};
use diskman_core::test_utils::{mock_disk, mock_volume, MockDiskManager, MockPartitionTool};
use diskman_core::units::{GIB, MIB};
use diskman_core::DriveType;
use std::io::Cursor;
use std::path::PathBuf;

type TestSession<'a> = Session<'a, Cursor<Vec<u8>>, Vec<u8>>;

fn session<'a>(
    manager: &'a MockDiskManager,
    tool: &'a MockPartitionTool,
    settings: &'a Settings,
    input: &str,
) -> TestSession<'a> {
    let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    Session::new(Context::new(manager, tool, settings, console))
}

fn output(session: TestSession<'_>) -> String {
    String::from_utf8(session.ctx.console.into_output()).unwrap()
}

/// Run the whole menu loop over `input` and return what was printed.
async fn run_menu(manager: &MockDiskManager, tool: &MockPartitionTool, input: &str) -> String {
    let settings = Settings::default();
    let mut s = session(manager, tool, &settings, input);
    s.run().await.expect("menu loop failed");
    output(s)
}

#[tokio::test]
async fn test_disk_scoped_options_refuse_without_selection() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "3\n4\n5\n6\n10\n").await;

    assert_eq!(text.matches("No disk selected. Please select a disk first.").count(), 4);
    assert!(manager.calls().is_empty(), "Gated options reached the OS: {:?}", manager.calls());
    assert!(tool.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_choice_and_end_of_input() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "0\neleven\n11\n").await;

    assert_eq!(
        text.matches("Invalid choice. Please enter a number between 1 and 10.").count(),
        3
    );
    assert!(manager.calls().is_empty());
}

#[tokio::test]
async fn test_dispatch_runs_matching_routine() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();
    let settings = Settings::default();

    let mut s = session(&manager, &tool, &settings, "\n");
    assert_eq!(s.dispatch(MenuChoice::ListDisks).await.unwrap(), Flow::Continue);
    assert_eq!(manager.calls(), vec!["enumerate_disks"]);

    assert_eq!(s.dispatch(MenuChoice::ListVolumes).await.unwrap(), Flow::Continue);
    assert_eq!(manager.call_count("list_volumes"), 2);

    assert_eq!(s.dispatch(MenuChoice::Help).await.unwrap(), Flow::Continue);
    assert_eq!(s.dispatch(MenuChoice::ExitDiskPart).await.unwrap(), Flow::Exit);
    assert_eq!(s.dispatch(MenuChoice::Exit).await.unwrap(), Flow::Exit);

    let text = output(s);
    assert!(text.contains("Disk 0"));
    assert!(text.contains("500.00 GB"));
    assert!(text.contains("Volume Information for All Disks:"));
    assert!(text.contains("** DiskMan Help **"));
    assert!(text.contains("Exiting DiskPart"));
    assert!(text.contains("Exiting..."));
}

#[tokio::test]
async fn test_select_disk_scopes_volume_listing() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n2\n7\n10\n").await;

    assert!(text.contains("Selected disk: Mock Disk 1"));
    assert!(text.contains("Volume Information for Selected Disk:"));
    assert_eq!(manager.calls(), vec!["enumerate_disks", "list_volumes 1"]);
}

#[tokio::test]
async fn test_cancelled_selection_clears_disk() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();
    let settings = Settings::default();

    let mut s = session(&manager, &tool, &settings, "1\n0\n");
    s.dispatch(MenuChoice::SelectDisk).await.unwrap();
    assert_eq!(s.selected().map(|d| d.index), Some(0));

    s.dispatch(MenuChoice::SelectDisk).await.unwrap();
    assert!(s.selected().is_none());
    assert!(output(s).contains("Operation canceled."));
}

#[tokio::test]
async fn test_selection_enumeration_failure_is_fatal() {
    let mut manager = MockDiskManager::new();
    manager.fail_enumeration = true;
    let tool = MockPartitionTool::default();
    let settings = Settings::default();

    let mut s = session(&manager, &tool, &settings, "2\n");
    assert!(s.run().await.is_err());
}

#[tokio::test]
async fn test_list_disks_falls_back_to_diskpart() {
    let mut manager = MockDiskManager::new();
    manager.fail_enumeration = true;
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "1\n10\n").await;

    assert!(text.contains("WMI error occurred"));
    assert!(text.contains("Disk ###  Status         Size"));
    assert_eq!(tool.calls(), vec!["list_disks"]);
}

#[tokio::test]
async fn test_list_disks_fails_when_both_sources_fail() {
    let mut manager = MockDiskManager::new();
    manager.fail_enumeration = true;
    let tool = MockPartitionTool::failing();
    let settings = Settings::default();

    let mut s = session(&manager, &tool, &settings, "");
    assert!(s.dispatch(MenuChoice::ListDisks).await.is_err());
    assert!(output(s).contains("Error occurred while listing disks"));
}

#[tokio::test]
async fn test_create_partition() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n3\n1024\n10\n").await;

    assert!(text.contains("Partition created successfully."));
    assert!(manager.calls().contains(&"unallocated_space 0".to_string()));
    assert!(manager.calls().contains(&format!("create_partition 0 {}", 1024 * MIB)));
    assert!(tool.calls().is_empty());
}

#[tokio::test]
async fn test_create_partition_rejects_bad_sizes() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n3\n0\n3\n-20\n3\nlots\n10\n").await;

    assert_eq!(text.matches("Partition size must be greater than zero.").count(), 2);
    assert!(text.contains("Invalid input. Please enter a valid integer value for partition size."));
    assert_eq!(manager.call_count("create_partition"), 0);
}

#[tokio::test]
async fn test_create_partition_insufficient_space_skips_fallback() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    // 8 GiB unallocated on the mock disk
    let text = run_menu(&manager, &tool, "2\n1\n3\n9000\n10\n").await;

    assert!(text.contains("Insufficient free space on disk. Required: 9000 MB, Available: 8192 MB."));
    assert_eq!(manager.call_count("create_partition"), 0);
    assert!(tool.calls().is_empty());
}

#[tokio::test]
async fn test_create_partition_falls_back_to_diskpart() {
    let mut manager = MockDiskManager::new();
    manager.fail_operations = true;
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n3\n1024\n10\n").await;

    assert!(text.contains("WMI error occurred"));
    assert!(text.contains("Partition created successfully."));
    assert_eq!(tool.calls(), vec!["create_partition 0 1024 generated"]);
}

#[tokio::test]
async fn test_create_partition_on_disk_after_numbering_gap() {
    let mut manager = MockDiskManager::new();
    manager.disks = vec![mock_disk(0, 500), mock_disk(3, 64)];
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n2\n3\n1024\n10\n").await;

    assert!(text.contains("Selected disk: Mock Disk 3"));
    assert!(text.contains("Partition created successfully."));
    assert!(!text.contains("Invalid disk number"));
    assert!(manager.calls().contains(&"unallocated_space 3".to_string()));
    assert!(manager.calls().contains(&format!("create_partition 3 {}", 1024 * MIB)));
    assert!(tool.calls().is_empty());
}

#[tokio::test]
async fn test_create_partition_uses_configured_script() {
    let mut manager = MockDiskManager::new();
    manager.fail_operations = true;
    let tool = MockPartitionTool::default();
    let settings = Settings {
        partition_script: Some(PathBuf::from("create.txt")),
        ..Settings::default()
    };

    let mut s = session(&manager, &tool, &settings, "2\n1\n3\n512\n10\n");
    s.run().await.unwrap();

    assert_eq!(tool.calls(), vec!["create_partition 0 512 create.txt"]);
}

#[tokio::test]
async fn test_create_partition_both_paths_fail() {
    let mut manager = MockDiskManager::new();
    manager.fail_operations = true;
    let tool = MockPartitionTool::failing();

    let text = run_menu(&manager, &tool, "2\n1\n3\n1024\n10\n").await;

    assert!(text.contains("diskpart error occurred"));
    assert!(text.contains("Partition creation failed: Failed to create partition using both WMI and diskpart"));
    assert_eq!(tool.calls().len(), 1);
}

#[tokio::test]
async fn test_quick_format_requires_yes() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n4\nno\n4\nyes\n10\n").await;

    assert!(text.contains("Format operation cancelled."));
    assert!(text.contains("Formatting volume: E: (Quick Format)"));
    assert!(text.contains("Formatting completed successfully."));
    assert_eq!(manager.call_count("format_volume"), 1);
    assert!(manager.calls().contains(&"format_volume E: NTFS quick=true".to_string()));
}

#[tokio::test]
async fn test_quick_format_keeps_or_refuses_current_file_system() {
    let mut fat32 = mock_volume('E', DriveType::Fixed, 8 * GIB, GIB);
    fat32.file_system = Some("FAT32".to_string());
    let mut manager = MockDiskManager::new();
    manager.volumes = vec![fat32];
    let tool = MockPartitionTool::default();

    run_menu(&manager, &tool, "2\n1\n4\nyes\n10\n").await;
    assert!(manager.calls().contains(&"format_volume E: FAT32 quick=true".to_string()));

    let mut fat = mock_volume('E', DriveType::Fixed, 8 * GIB, GIB);
    fat.file_system = Some("FAT".to_string());
    let mut manager = MockDiskManager::new();
    manager.volumes = vec![fat];

    let text = run_menu(&manager, &tool, "2\n1\n4\n10\n").await;

    assert!(text.contains("Quick format cannot keep file system FAT"));
    assert!(!text.contains("Are you sure you want to format"));
    assert_eq!(manager.call_count("format_volume"), 0);
}

#[tokio::test]
async fn test_quick_format_gives_raw_volume_ntfs() {
    let mut raw = mock_volume('E', DriveType::Fixed, 8 * GIB, 8 * GIB);
    raw.file_system = Some("RAW".to_string());
    let mut manager = MockDiskManager::new();
    manager.volumes = vec![raw];
    let tool = MockPartitionTool::default();

    run_menu(&manager, &tool, "2\n1\n4\nyes\n10\n").await;

    assert!(manager.calls().contains(&"format_volume E: NTFS quick=true".to_string()));
}

#[tokio::test]
async fn test_format_skips_non_fixed_volumes() {
    let mut manager = MockDiskManager::new();
    manager.volumes = vec![mock_volume('F', DriveType::Removable, 16 * GIB, GIB)];
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n4\n10\n").await;

    assert!(text.contains("No suitable volume found for quick format on the selected disk."));
    assert_eq!(manager.call_count("format_volume"), 0);
}

#[tokio::test]
async fn test_format_reports_disk_without_partitions() {
    let mut manager = MockDiskManager::new();
    manager.volumes = vec![];
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n5\n10\n").await;

    assert!(text.contains("No partitions found on the selected disk."));
}

#[tokio::test]
async fn test_custom_format() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n5\nexfat\n32768\nUSB\nyes\n10\n").await;

    assert!(text.contains("Supported file systems: NTFS, FAT32, exFAT"));
    assert!(text.contains("Formatting volume: E: with file system exFAT"));
    assert!(manager.calls().contains(&"format_volume E: exFAT quick=true".to_string()));
}

#[tokio::test]
async fn test_custom_format_rejects_bad_input() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n5\next4\n5\nNTFS\n1000\n5\nFAT32\n\nMUCH_TOO_LONG\n10\n").await;

    assert!(text.contains("Invalid file system."));
    assert!(text.contains("Allocation unit size must be a power of two"));
    assert!(text.contains("FAT32 volume labels are limited to 11 characters"));
    assert_eq!(manager.call_count("format_volume"), 0);
}

#[tokio::test]
async fn test_resize_without_options() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n6\n\n\n\n10\n").await;

    assert!(text.contains("No resizing options provided. Operation canceled."));
    assert_eq!(manager.call_count("list_volumes"), 0);
}

#[tokio::test]
async fn test_resize_extend() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    // mock partition: 8 GiB, may grow to 12 GiB
    let text = run_menu(&manager, &tool, "2\n1\n6\n1024\n\n\n1\ny\n10\n").await;

    assert!(text.contains("Available space on volume E: 4096 MB"));
    assert!(text.contains("Are you sure you want to extend volume E: by 1024 MB? (y/n): "));
    assert!(text.contains("Volume extended successfully."));
    assert!(manager.calls().contains(&format!("resize_volume E: {}", 9 * GIB)));
}

#[tokio::test]
async fn test_resize_extend_beyond_free_space() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n6\n5000\n\n\n1\n10\n").await;

    assert!(text.contains("Error during volume resize: Insufficient free space"));
    assert_eq!(manager.call_count("resize_volume"), 0);
}

#[tokio::test]
async fn test_resize_shrink() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n6\n\n2048\n\n1\ny\n10\n").await;

    assert!(text.contains("Are you sure you want to shrink volume E: to 2048 MB? (y/n): "));
    assert!(text.contains("Volume shrunk successfully."));
    assert!(manager.calls().contains(&format!("resize_volume E: {}", 2 * GIB)));
}

#[tokio::test]
async fn test_resize_shrink_to_minimum_only() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n6\n\n\n2048\n1\ny\n10\n").await;

    assert!(text.contains("Are you sure you want to shrink volume E: to a minimum size of 2048 MB? (y/n): "));
    assert!(text.contains("Volume shrunk successfully."));
    assert!(manager.calls().contains(&format!("resize_volume E: {}", 2 * GIB)));
}

#[tokio::test]
async fn test_resize_shrink_outside_range() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n6\n\n500\n1000\n1\n10\n").await;

    assert!(text.contains("Invalid shrink size. Desired size (500 MB) must be between minimum size (1000 MB) and current size (8192 MB)."));
    assert_eq!(manager.call_count("resize_volume"), 0);
}

#[tokio::test]
async fn test_resize_cancelled() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();

    let text = run_menu(&manager, &tool, "2\n1\n6\n100\n\n\n0\n6\n100\n\n\n1\nn\n10\n").await;

    assert_eq!(text.matches("Resize canceled.").count(), 2);
    assert_eq!(manager.call_count("resize_volume"), 0);
}

#[tokio::test]
async fn test_mount_and_dismount() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();
    let settings = Settings::default();
    let console = Console::new(Cursor::new(Vec::new()), Vec::new());
    let mut ctx = Context::new(&manager, &tool, &settings, console);

    diskman_cli::ops::volumes::mount(&mut ctx, "E:").await.unwrap();
    diskman_cli::ops::volumes::dismount(&mut ctx, "E:").await.unwrap();

    assert_eq!(manager.calls(), vec!["mount_volume E:", "dismount_volume E:"]);
    let text = String::from_utf8(ctx.console.into_output()).unwrap();
    assert!(text.contains("Volume mounted successfully."));
    assert!(text.contains("Volume dismounted successfully."));
}

#[tokio::test]
async fn test_dismount_failure_is_reported() {
    let mut manager = MockDiskManager::new();
    manager.fail_operations = true;
    let tool = MockPartitionTool::default();
    let settings = Settings::default();
    let console = Console::new(Cursor::new(Vec::new()), Vec::new());
    let mut ctx = Context::new(&manager, &tool, &settings, console);

    assert!(diskman_cli::ops::volumes::dismount(&mut ctx, "E:").await.is_err());
    let text = String::from_utf8(ctx.console.into_output()).unwrap();
    assert!(text.contains("Error during volume dismounting"));
}

#[tokio::test]
async fn test_list_volumes_for_unknown_disk() {
    let manager = MockDiskManager::new();
    let tool = MockPartitionTool::default();
    let settings = Settings::default();
    let console = Console::new(Cursor::new(Vec::new()), Vec::new());
    let mut ctx = Context::new(&manager, &tool, &settings, console);

    assert!(diskman_cli::ops::volumes::list_disk_volumes(&mut ctx, 9).await.is_err());
    diskman_cli::ops::volumes::list_disk_volumes(&mut ctx, 1).await.unwrap();
    assert!(manager.calls().contains(&"list_volumes 1".to_string()));
}
