pub mod disk;
pub mod error;
pub mod filesystem;
pub mod units;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use disk::{Disk, DiskManager, DriveType, PartitionTool, ResizeBounds, Volume};
pub use error::DiskmanError;
pub use filesystem::{FileSystem, FormatOptions};
pub use validation::ResizeRequest;
