/*!
Owned zero-terminated strings.
*/
use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::mem;
use std::ops::Deref;
use std::ptr::NonNull;
use std::slice;

use crate::alloc::{alloc_array, AllocError, Allocator, Malloc, Rust};
use crate::encoding::conv::{os, WcToUniError};
use crate::encoding::{encode_wide, Unit, WChar};
use crate::util::{units_len, TrapErrExt, WideDisplay};

/**
Represents an owned, zero-terminated string.

A `ZString` is always terminated: its buffer holds at least one unit, and the last unit of the buffer is zero.  The string's content ends at the first zero unit.

Note that this type *always* transfers ownership.  Its memory is released through `A` when it is dropped, or it can be handed to foreign code with `into_ptr`, after which that code is responsible for releasing it (with `free`, for the default `Malloc` allocator).

# Parameters

`U` is the unit type.  *e.g.* `WChar` for wide strings, and `u8` for narrow ones.

`A` defines the allocator which manages the string data.  *e.g.* `Malloc` for the C runtime heap allocator, and `Rust` for the Rust heap allocator.
*/
pub struct ZString<U, A = Malloc>
where
    U: Unit,
    A: Allocator,
{
    ptr: NonNull<U>,
    cap: usize,
    _marker: PhantomData<A>,
}

/// Owned wide string on the C heap.
pub type WCString = ZString<WChar, Malloc>;
/// Owned wide string on the Rust heap.
pub type WRString = ZString<WChar, Rust>;
/// Owned narrow string on the C heap.
pub type MbCString = ZString<u8, Malloc>;

impl<U, A> ZString<U, A>
where
    U: Unit,
    A: Allocator,
{
    /**
    Allocates a zeroed buffer of `cap` units.  The result is an empty string with room for `cap - 1` units of content.

    A `cap` of zero is rounded up to one, to make room for the terminator.
    */
    pub fn zeroed(cap: usize) -> Result<Self, AllocError> {
        let cap = cap.max(1);
        let ptr = alloc_array::<A, U>(cap)?;
        let ptr = NonNull::new(ptr).ok_or(AllocError::Failed)?;
        Ok(ZString {
            ptr,
            cap,
            _marker: PhantomData,
        })
    }

    /**
    Construct a `ZString` from a slice of units.

    The copy stops at the first zero unit in `units`, if there is one.

    # Failure

    This method will fail if allocating memory fails.
    */
    pub fn new(units: &[U]) -> Result<Self, AllocError> {
        let units = &units[..units_len(units)];
        let mut s = ZString::zeroed(units.len().checked_add(1).ok_or(AllocError::SizeOverflow)?)?;
        s.buffer_mut()[..units.len()].copy_from_slice(units);
        Ok(s)
    }

    /**
    Constructs a `ZString` by taking ownership of a foreign string pointer.

    If `ptr` is null, this method will return `None`.

    # Safety

    `ptr` must point to a zero-terminated string allocated by `A`, and this method must *not* be called more than once on the same pointer.
    */
    pub unsafe fn from_ptr(ptr: *mut U) -> Option<Self> {
        let ptr = NonNull::new(ptr)?;
        let mut len = 0;
        while !(*ptr.as_ptr().add(len)).is_zero() {
            len += 1;
        }
        Some(ZString {
            ptr,
            cap: len + 1,
            _marker: PhantomData,
        })
    }

    /**
    Relinquishes ownership of this string and returns a pointer.

    This pointer can be turned back into a `ZString` by `from_ptr`, or sent to foreign code, which is then responsible for deallocating it.
    */
    pub fn into_ptr(self) -> *mut U {
        let ptr = self.ptr.as_ptr();
        mem::forget(self);
        ptr
    }

    /**
    Re-borrows this string as a foreign pointer.

    The returned pointer is valid for at least as long as the `ZString` itself is.
    */
    pub fn as_ptr(&self) -> *const U {
        self.ptr.as_ptr()
    }

    /**
    Returns the units comprising this string as a contiguous slice.  This *does not* include the terminating zero.
    */
    pub fn as_units(&self) -> &[U] {
        let buf = &self.buffer()[..self.cap - 1];
        &buf[..units_len(buf)]
    }

    /**
    Returns the units comprising this string as a contiguous slice.  This *includes* the terminating zero.
    */
    pub fn as_units_with_term(&self) -> &[U] {
        let len = self.as_units().len();
        &self.buffer()[..len + 1]
    }

    /**
    The number of units in the underlying buffer, terminator included.
    */
    pub fn capacity(&self) -> usize {
        self.cap
    }

    fn buffer(&self) -> &[U] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.cap) }
    }

    /**
    The whole underlying buffer, for rendering into.  Writers must leave it terminated; the last unit is treated as the terminator regardless.
    */
    pub(crate) fn buffer_mut(&mut self) -> &mut [U] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.cap) }
    }
}

impl<A> ZString<WChar, A> where A: Allocator {
    /**
    Construct a wide `ZString` from a Rust string.

    The result is truncated at the first NUL in `s`, if any.
    */
    pub fn from_str(s: &str) -> Result<Self, AllocError> {
        ZString::new(&encode_wide(s))
    }

    /**
    Converts the contents of this string into a normal Rust string.

    # Failure

    This conversion will fail if the string contains any units which cannot be translated into Unicode.
    */
    pub fn into_string(&self) -> Result<String, WcToUniError> {
        let mut err = Ok(());
        let s: String = os::WcToUniIter::new(self.as_units().iter().cloned())
            .trap_err(&mut err)
            .collect();
        err?;
        Ok(s)
    }

    /**
    Converts the contents of this string into a Rust string, replacing invalid units with U+FFFD.
    */
    pub fn to_string_lossy(&self) -> String {
        WideDisplay(self.as_units()).to_string()
    }
}

impl<A> ZString<u8, A> where A: Allocator {
    /**
    Re-borrows this string as a C string pointer.
    */
    pub fn as_c_ptr(&self) -> *const libc::c_char {
        self.as_ptr() as *const libc::c_char
    }
}

/**
Duplicates the first `len` units of `src` (or fewer, if `src` is shorter) into a new owned string.

Returns `None` if `src` is absent or allocation fails.
*/
pub fn dup_n<U>(src: Option<&[U]>, len: usize) -> Option<ZString<U, Malloc>> where U: Unit {
    let src = src?;
    let src = &src[..len.min(src.len())];
    let mut s = ZString::zeroed(src.len().checked_add(1)?).ok()?;
    s.buffer_mut()[..src.len()].copy_from_slice(src);
    Some(s)
}

impl<U, A> AsRef<[U]> for ZString<U, A> where U: Unit, A: Allocator {
    fn as_ref(&self) -> &[U] {
        self.as_units()
    }
}

impl<U, A> Borrow<[U]> for ZString<U, A> where U: Unit, A: Allocator {
    fn borrow(&self) -> &[U] {
        self.as_units()
    }
}

impl<U, A> Clone for ZString<U, A> where U: Unit, A: Allocator {
    fn clone(&self) -> Self {
        ZString::new(self.as_units()).expect("could not allocate ZString")
    }
}

impl<U, A> Debug for ZString<U, A> where U: Unit, A: Allocator {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Z{}", A::debug_prefix())?;
        fmt.debug_list().entries(self.as_units()).finish()
    }
}

impl<U, A> Deref for ZString<U, A> where U: Unit, A: Allocator {
    type Target = [U];

    fn deref(&self) -> &[U] {
        self.as_units()
    }
}

impl<U, A> Drop for ZString<U, A> where U: Unit, A: Allocator {
    fn drop(&mut self) {
        unsafe {
            A::free(self.ptr.as_ptr() as *mut (), mem::align_of::<U>());
        }
    }
}

impl<U, A> Eq for ZString<U, A> where U: Unit, A: Allocator {}

impl<U, A, B> PartialEq<ZString<U, B>> for ZString<U, A>
where
    U: Unit,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &ZString<U, B>) -> bool {
        self.as_units() == other.as_units()
    }
}

impl<U, A> PartialEq<[U]> for ZString<U, A> where U: Unit, A: Allocator {
    fn eq(&self, other: &[U]) -> bool {
        self.as_units() == &other[..units_len(other)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stops_at_zero() {
        let s = MbCString::new(b"abc\0def").unwrap();
        assert_eq!(s.as_units(), b"abc");
        assert_eq!(s.as_units_with_term(), b"abc\0");
        assert_eq!(s.capacity(), 4);
    }

    #[test]
    fn test_zeroed_is_empty() {
        let s = WCString::zeroed(0).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.capacity(), 1);
        assert_eq!(s.as_units_with_term(), &[0][..]);
    }

    #[test]
    fn test_ptr_round_trip() {
        let s = WRString::from_str("garçon").unwrap();
        let ptr = s.into_ptr();
        let s = unsafe { WRString::from_ptr(ptr) }.unwrap();
        assert_eq!(s.into_string().unwrap(), "garçon");
        assert!(unsafe { WCString::from_ptr(std::ptr::null_mut()) }.is_none());
    }

    #[test]
    fn test_into_string_rejects_invalid() {
        let bad: WChar = if cfg!(windows) { 0xdc00u32 as WChar } else { 0xd800u32 as WChar };
        let s = WCString::new(&[b'a' as WChar, bad]).unwrap();
        assert!(s.into_string().is_err());
        assert_eq!(s.to_string_lossy(), "a\u{FFFD}");
    }

    #[test]
    fn test_dup_n() {
        let src = encode_wide("hello");
        let d = dup_n(Some(&src[..]), 3).unwrap();
        assert_eq!(d.to_string_lossy(), "hel");
        let d = dup_n(Some(&src[..]), 99).unwrap();
        assert_eq!(d.to_string_lossy(), "hello");
        assert!(dup_n::<WChar>(None, 3).is_none());
    }

    #[test]
    fn test_eq_across_allocators() {
        let a = WCString::from_str("x").unwrap();
        let b = WRString::from_str("x").unwrap();
        assert_eq!(a, b);
        assert!(a == *encode_wide("x").as_slice());
    }
}
