use crate::alloc::AllocError;
use anyhow::{Context, Result};
use nix::errno::Errno;
use std::io;

/// Exit status used when the allocator runs out of memory.
pub const EXIT_OUT_OF_MEMORY: i32 = Errno::ENOMEM as i32;

pub fn clear_errno() {
    Errno::clear();
}

/// Classifies a failed allocation from the errno left behind by malloc().
pub fn last_alloc_error() -> AllocError {
    alloc_error_from(Errno::last())
}

fn alloc_error_from(errno: Errno) -> AllocError {
    match errno {
        // Some allocators return NULL without touching errno.
        Errno::ENOMEM | Errno::UnknownErrno => AllocError::OutOfMemory,
        other => AllocError::Os(io::Error::from_raw_os_error(other as i32)),
    }
}

/// Caps the address space of this process at `bytes`.
///
/// Only the soft limit is lowered, and never above the current hard limit.
#[cfg(any(target_os = "linux", target_os = "android", target_os = "macos"))]
pub fn limit_address_space(bytes: u64) -> Result<()> {
    use nix::libc::rlim_t;
    use nix::sys::resource::{getrlimit, setrlimit, Resource};

    let (_, hard) =
        getrlimit(Resource::RLIMIT_AS).context("failed to read the address space limit")?;
    let soft = rlim_t::try_from(bytes).unwrap_or(hard).min(hard);

    setrlimit(Resource::RLIMIT_AS, soft, hard)
        .with_context(|| format!("failed to limit the address space to {} bytes", bytes))?;
    log::info!("address space limited to {} bytes", soft);
    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "macos")))]
pub fn limit_address_space(_bytes: u64) -> Result<()> {
    anyhow::bail!("limiting the address space is not supported on this platform")
}
