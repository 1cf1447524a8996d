#![allow(non_camel_case_types)]

use libc::{c_char, size_t};

use crate::encoding::WChar;

/*
We have no way of knowing what encodings we'll have to deal with, so 16 was chosen as a (hopefully) excessive upper bound.

Keep in mind that there are serious encodings in existence (though probably *not* being used as the C MB encoding) that can require up to *12 bytes* for a single character.

Normally, you would get this from `limits.h`, except it's not even necessarily a compile-time constant.  Bah!
*/
pub const MB_LEN_MAX: usize = 16;

pub const MBRTOWC_ILLEGAL: size_t = -1isize as size_t;
pub const MBRTOWC_INCOMPLETE: size_t = -2isize as size_t;

extern "C" {
    pub fn mbrtowc(dest: *mut WChar, src: *const c_char, n: size_t, mbs: *mut mbstate_t) -> size_t;
    pub fn wcrtomb(dest: *mut c_char, src: WChar, mbs: *mut mbstate_t) -> size_t;
}

#[cfg(windows)]
extern "system" {
    pub fn OutputDebugStringW(output: *const u16);
}

/*
The real layout differs between C runtimes (8 bytes on glibc, 4 on 32-bit MSVCRT).  The functions above only ever touch the prefix they know about, so an oversized, zeroed opaque block is a valid initial state everywhere.
*/
#[derive(Copy, Clone)]
#[repr(C)]
pub struct mbstate_t {
    _data: [u64; 16],
}

impl mbstate_t {
    pub fn new() -> Self {
        mbstate_t { _data: [0; 16] }
    }
}
