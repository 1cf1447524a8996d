/*!
Allocation types and traits.

Every allocation made through this module is zero-initialised.  Owned strings remember which allocator produced them, and release their memory through that same allocator.
*/
use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::cmp;
use std::mem;

use libc::{self, c_void};
use thiserror::Error;

/**
Abstracts over different memory allocators.

In practice, this will be implemented by a marker type (which is not intended to actually be instantiated anywhere).
*/
pub trait Allocator {
    /**
    Allocate the specified number of bytes, with the specified alignment.  The returned memory is zeroed.
    */
    fn alloc_bytes(bytes: usize, align: usize) -> Result<*mut (), AllocError>;

    /**
    Free an allocation.

    Although this method specifies the alignment the pointer was allocated with, it does *not* specify the length.  This is because it is not always possible to determine the original length of the allocation.  If your allocator needs to know the length of the allocation, you will need to hide the length as part of the allocation itself and recover the information on deallocation.

    # Safety

    `ptr` must have been returned by `alloc_bytes` on the same allocator, with the same `align`, and must not have been freed already.
    */
    unsafe fn free(ptr: *mut (), align: usize);

    /**
    Returns a string which can be used to uniquely identify this allocator in debug output.

    This string should *preferably* be short, reasonably evocative, unique, and a single `Camelword`, although nothing will break if this is not done.
    */
    fn debug_prefix() -> &'static str;
}

/**
A general allocation error.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum AllocError {
    #[error("failed to allocate memory")]
    Failed,
    #[error("cannot satisfy requested alignment")]
    CannotAlign,
    #[error("overflow while computing size")]
    SizeOverflow,
}

/**
Allocates a zeroed array of `count` values of type `T`.

The caller owns the result, and must release it with `A::free(ptr as *mut (), mem::align_of::<T>())`.
*/
pub fn alloc_array<A, T>(count: usize) -> Result<*mut T, AllocError>
where
    A: Allocator,
{
    let bytes = count
        .checked_mul(mem::size_of::<T>())
        .ok_or(AllocError::SizeOverflow)?;
    let ptr = A::alloc_bytes(bytes, mem::align_of::<T>())?;
    Ok(ptr as *mut T)
}

/**
Represents the C runtime heap allocator.

Pointers produced by this allocator can be released by foreign code with `free`.
*/
pub enum Malloc {}

impl Allocator for Malloc {
    fn alloc_bytes(bytes: usize, align: usize) -> Result<*mut (), AllocError> {
        // A conservative guess.
        if align > mem::align_of::<usize>() {
            return Err(AllocError::CannotAlign);
        }

        // `calloc(0, _)` is allowed to return null.
        let ptr = unsafe { libc::calloc(cmp::max(bytes, 1), 1) };
        if ptr.is_null() {
            Err(AllocError::Failed)
        } else {
            Ok(ptr as *mut ())
        }
    }

    unsafe fn free(ptr: *mut (), _align: usize) {
        if !ptr.is_null() {
            libc::free(ptr as *mut c_void);
        }
    }

    fn debug_prefix() -> &'static str { "C" }
}

/**
Represents the Rust runtime heap allocator.

The total size of each allocation is stashed in a header ahead of the returned pointer, so that it can be recovered on deallocation.
*/
pub enum Rust {}

impl Rust {
    fn header(align: usize) -> usize {
        cmp::max(align, mem::size_of::<usize>())
    }
}

impl Allocator for Rust {
    fn alloc_bytes(bytes: usize, align: usize) -> Result<*mut (), AllocError> {
        let header = Rust::header(align);
        let align = cmp::max(align, mem::align_of::<usize>());
        let total = bytes.checked_add(header).ok_or(AllocError::SizeOverflow)?;
        let layout = Layout::from_size_align(total, align).map_err(|_| AllocError::CannotAlign)?;

        unsafe {
            let base = alloc_zeroed(layout);
            if base.is_null() {
                return Err(AllocError::Failed);
            }

            // Save the length for later.
            *(base as *mut usize) = total;
            Ok(base.add(header) as *mut ())
        }
    }

    unsafe fn free(ptr: *mut (), align: usize) {
        if !ptr.is_null() {
            let header = Rust::header(align);
            let align = cmp::max(align, mem::align_of::<usize>());

            let base = (ptr as *mut u8).sub(header);
            let total = *(base as *const usize);

            dealloc(base, Layout::from_size_align_unchecked(total, align));
        }
    }

    fn debug_prefix() -> &'static str { "R" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_zeroed<A: Allocator>() {
        let ptr = alloc_array::<A, u32>(37).expect("allocation failed");
        unsafe {
            let units = std::slice::from_raw_parts(ptr, 37);
            assert!(units.iter().all(|&u| u == 0));
            A::free(ptr as *mut (), mem::align_of::<u32>());
        }
    }

    #[test]
    fn test_malloc_zeroed() {
        check_zeroed::<Malloc>();
    }

    #[test]
    fn test_rust_zeroed() {
        check_zeroed::<Rust>();
    }

    #[test]
    fn test_size_overflow() {
        assert_eq!(alloc_array::<Malloc, u32>(usize::MAX).err(), Some(AllocError::SizeOverflow));
        assert_eq!(alloc_array::<Rust, u64>(usize::MAX / 4).err(), Some(AllocError::SizeOverflow));
    }

    #[test]
    fn test_malloc_overaligned() {
        assert_eq!(Malloc::alloc_bytes(16, 64).err(), Some(AllocError::CannotAlign));
    }
}
