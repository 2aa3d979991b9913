use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::Security::{GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY};
use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

/// Whether DiskMan runs as administrator. Partition, format and resize
/// calls are refused by the OS otherwise.
pub fn is_elevated() -> bool {
    match token_elevation() {
        Ok(elevated) => elevated,
        Err(e) => {
            log::debug!("Could not query process elevation: {}", e);
            false
        }
    }
}

fn token_elevation() -> windows::core::Result<bool> {
    let mut token = HANDLE::default();
    // SAFETY: the pseudo handle from GetCurrentProcess needs no cleanup and
    // `token` is closed below once it has been opened.
    unsafe { OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token)? };

    let mut elevation = TOKEN_ELEVATION::default();
    let mut returned = 0u32;
    // SAFETY: the buffer is a TOKEN_ELEVATION of the size passed in.
    let queried = unsafe {
        GetTokenInformation(
            token,
            TokenElevation,
            Some(&mut elevation as *mut TOKEN_ELEVATION as *mut _),
            std::mem::size_of::<TOKEN_ELEVATION>() as u32,
            &mut returned,
        )
    };
    // SAFETY: `token` was opened above and is not used afterwards.
    let _ = unsafe { CloseHandle(token) };

    queried?;
    Ok(elevation.TokenIsElevated != 0)
}
