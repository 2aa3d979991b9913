//! Byte/megabyte/gigabyte conversions used by the console tables.

pub const MIB: u64 = 1024 * 1024;
pub const GIB: u64 = 1024 * 1024 * 1024;

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / MIB as f64
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / GIB as f64
}

/// Whole megabytes, rounded down.
pub fn whole_mb(bytes: u64) -> u64 {
    bytes / MIB
}

pub fn mb_to_bytes(mb: u64) -> u64 {
    mb.saturating_mul(MIB)
}

pub fn format_gb(bytes: u64) -> String {
    format!("{:.2} GB", bytes_to_gb(bytes))
}

pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes_to_mb(bytes))
}
