use crate::alloc::AllocError;
use anyhow::{bail, Result};

/// `ENOMEM` from the C runtime.
pub const EXIT_OUT_OF_MEMORY: i32 = 12;

pub fn clear_errno() {}

pub fn last_alloc_error() -> AllocError {
    AllocError::OutOfMemory
}

pub fn limit_address_space(_bytes: u64) -> Result<()> {
    bail!("limiting the address space is not supported on Windows")
}
