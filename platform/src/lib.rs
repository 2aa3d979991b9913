pub mod diskpart;
pub mod powershell;
pub mod records;
pub mod scripts;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(not(target_os = "windows"))]
pub mod unsupported;

#[cfg(target_os = "windows")]
pub use windows::{is_elevated, WindowsDiskManager as PlatformDiskManager};

#[cfg(not(target_os = "windows"))]
pub use unsupported::{is_elevated, UnsupportedDiskManager as PlatformDiskManager};

pub use diskpart::Diskpart as PlatformPartitionTool;
