pub mod device;
pub mod elevation;

pub use device::WindowsDiskManager;
pub use elevation::is_elevated;
