use crate::native;
use std::alloc::{self, Layout, LayoutError};
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AllocError {
    #[error("out of memory")]
    OutOfMemory,
    #[error("zero-sized allocation requested")]
    ZeroSize,
    #[error("{0} bytes exceed the addressable memory of this platform")]
    TooLarge(u64),
    #[error("invalid layout for {size} bytes: {source}")]
    Layout { size: u64, source: LayoutError },
    /// The allocator failed for a reason other than running out of memory.
    #[error("{0}")]
    Os(io::Error),
}

impl AllocError {
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, AllocError::OutOfMemory)
    }
}

/// Source of the memory blocks eaten by the engine.
///
/// A successful call hands the block over for the rest of the process lifetime: it is never
/// returned to the allocator.
pub trait Allocator {
    fn allocate(&mut self, size: u64) -> Result<(), AllocError>;
}

impl<A: Allocator + ?Sized> Allocator for &mut A {
    fn allocate(&mut self, size: u64) -> Result<(), AllocError> {
        (**self).allocate(size)
    }
}

/// Eats memory from the global allocator and leaks every block it gets.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemAllocator;

impl SystemAllocator {
    fn layout(size: u64) -> Result<Layout, AllocError> {
        if size == 0 {
            return Err(AllocError::ZeroSize);
        }
        let size_usize = usize::try_from(size).map_err(|_| AllocError::TooLarge(size))?;
        // Byte alignment keeps the request on plain malloc(), which sets errno on failure.
        Layout::from_size_align(size_usize, 1)
            .map_err(|source| AllocError::Layout { size, source })
    }
}

impl Allocator for SystemAllocator {
    fn allocate(&mut self, size: u64) -> Result<(), AllocError> {
        let layout = Self::layout(size)?;

        native::clear_errno();
        // SAFETY: `layout` has a non-zero size, checked above. The block is deliberately never
        // deallocated, so there's no pointer to keep around.
        let ptr = unsafe { alloc::alloc(layout) };
        if ptr.is_null() {
            return Err(native::last_alloc_error());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AllocError, Allocator, SystemAllocator};

    #[test]
    fn test_small_allocation() {
        let mut allocator = SystemAllocator;
        allocator.allocate(1024).unwrap();
        allocator.allocate(1).unwrap();
    }

    #[test]
    fn test_invalid_sizes() {
        let mut allocator = SystemAllocator;
        assert!(matches!(allocator.allocate(0), Err(AllocError::ZeroSize)));

        let err = allocator.allocate(u64::MAX).unwrap_err();
        assert!(!err.is_out_of_memory());
        assert!(matches!(
            err,
            AllocError::TooLarge(_) | AllocError::Layout { .. }
        ));
    }
}
